use crate::model::{ProgressSet, Topic};

/// Dashboard-level progress metrics for one student.
///
/// Derived, never persisted: always recomputed from the full record set so
/// it cannot drift from the authoritative records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    pub completed_count: usize,
    pub total_count: usize,
    pub percentage: f64,
    pub exams_passed_count: usize,
}

impl ProgressSummary {
    /// Percentage rounded to the nearest integer, for labels; the raw
    /// `percentage` drives progress bars.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_rounded(&self) -> u8 {
        self.percentage.round() as u8
    }
}

/// Fold a student's progress records and the topic catalog into summary
/// metrics.
///
/// Pure and read-only. With no topics the percentage is 0, never a division
/// by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(topics: &[Topic], records: &ProgressSet) -> ProgressSummary {
    let total_count = topics.len();
    let completed_count = records.iter().filter(|r| r.completed).count();
    let exams_passed_count = records.iter().filter(|r| r.passed_exam()).count();

    let percentage = if total_count == 0 {
        0.0
    } else {
        completed_count as f64 / total_count as f64 * 100.0
    };

    ProgressSummary {
        completed_count,
        total_count,
        percentage,
        exams_passed_count,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
