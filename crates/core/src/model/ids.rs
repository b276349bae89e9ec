use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Topic.
///
/// Opaque string handed out by the store; never parsed or interpreted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Question within a topic's exam
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key under which a student's progress records are stored.
///
/// UUID-shaped: either a real authenticated user id or the pseudonymous
/// key derived from a free-text name (see `crate::identity`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Creates a new `StudentId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── From Implementations ──────────────────────────────────────────────────────

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_id_display() {
        let id = TopicId::new("t-42");
        assert_eq!(id.to_string(), "t-42");
    }

    #[test]
    fn test_topic_id_as_str() {
        let id = TopicId::new("abc");
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("q1");
        assert_eq!(id.to_string(), "q1");
    }

    #[test]
    fn test_student_id_display() {
        let id = StudentId::new("0000002a-0000-002a-0000-002a0000002a");
        assert_eq!(id.to_string(), "0000002a-0000-002a-0000-002a0000002a");
    }

    #[test]
    fn test_ids_equality() {
        assert_eq!(TopicId::new("1"), TopicId::from("1"));
        assert_ne!(QuestionId::new("q1"), QuestionId::new("q2"));
    }

    #[test]
    fn test_id_usable_as_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(TopicId::new("t1"), 1);
        assert_eq!(map.get(&TopicId::from("t1")), Some(&1));
    }
}
