use uuid::Uuid;

use crate::model::StudentId;

//
// ─── KEY DERIVATION ────────────────────────────────────────────────────────────
//

/// Derive a stable pseudonymous progress key from a free-text student name.
///
/// Folds the name's UTF-16 code units into a 32-bit accumulator
/// (`acc = acc * 31 + unit`, wrapping), takes the absolute value, and tiles
/// the 8 hex digits into a dashed 8-4-4-4-12 grouping so the key is shaped
/// like a UUID for stores that expect one.
///
/// Deterministic: the same name always yields the same key. Distinct names
/// collide at the rate of a 31-bit hash; that is a tolerated limitation.
/// This is a lookup key for a name that is already trusted, never an
/// authentication credential.
#[must_use]
pub fn derive_student_key(name: &str) -> StudentId {
    let mut acc: i32 = 0;
    for unit in name.encode_utf16() {
        acc = acc.wrapping_mul(31).wrapping_add(i32::from(unit));
    }

    let hex = format!("{:08x}", acc.unsigned_abs());
    let tiled: String = hex.chars().cycle().take(32).collect();

    StudentId::new(format!(
        "{}-{}-{}-{}-{}",
        &tiled[0..8],
        &tiled[8..12],
        &tiled[12..16],
        &tiled[16..20],
        &tiled[20..32],
    ))
}

//
// ─── STUDENT IDENTITY ──────────────────────────────────────────────────────────
//

/// How the current student is identified.
///
/// The platform started with plain names, grew the derived pseudonymous key,
/// and will eventually hold real authenticated user ids. Callers resolve the
/// progress key through `progress_key` and never branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentIdentity {
    /// Pre-auth: a free-text name plus the key derived from it.
    NameDerived { name: String, key: StudentId },

    /// A real authenticated user id.
    Authenticated { user_id: StudentId },
}

impl StudentIdentity {
    /// Identity for an anonymous, name-based session.
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = derive_student_key(&name);
        Self::NameDerived { name, key }
    }

    /// Identity for an authenticated session.
    #[must_use]
    pub fn authenticated(user_id: Uuid) -> Self {
        Self::Authenticated {
            user_id: StudentId::new(user_id.to_string()),
        }
    }

    /// The key under which this student's progress records are stored.
    #[must_use]
    pub fn progress_key(&self) -> &StudentId {
        match self {
            Self::NameDerived { key, .. } => key,
            Self::Authenticated { user_id } => user_id,
        }
    }

    /// Display name, when the identity carries one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::NameDerived { name, .. } => Some(name),
            Self::Authenticated { .. } => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
