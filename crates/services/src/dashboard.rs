use std::sync::Arc;

use hub_core::identity::StudentIdentity;
use hub_core::model::{ProgressSet, TopicId};
use hub_core::summary::{ProgressSummary, summarize};
use storage::repository::{ProgressRepository, TopicOrder, TopicRepository};

use crate::error::DashboardError;

//
// ─── VIEW TYPES ────────────────────────────────────────────────────────────────
//

/// Where one topic stands for the student; exam-passed wins over plain
/// completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    NotStarted,
    Completed,
    ExamPassed,
}

/// One row of the detailed progress list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicStatusView {
    pub topic_id: TopicId,
    pub title: String,
    pub status: TopicStatus,
    pub score: Option<u8>,
}

/// Everything the student dashboard renders in one load.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    pub summary: ProgressSummary,
    pub topics: Vec<TopicStatusView>,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Read path for the student dashboard.
///
/// Metrics are recomputed from the authoritative stores on every call,
/// never cached or incrementally maintained.
#[derive(Clone)]
pub struct DashboardService {
    topics: Arc<dyn TopicRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(topics: Arc<dyn TopicRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { topics, progress }
    }

    /// Load the summary metrics and per-topic detail for one student,
    /// topics newest first.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if either store read fails.
    pub async fn overview(
        &self,
        student: &StudentIdentity,
    ) -> Result<DashboardOverview, DashboardError> {
        let topics = self.topics.list_topics(TopicOrder::CreatedDesc).await?;
        let records = ProgressSet::from_records(
            self.progress
                .progress_for_user(student.progress_key())
                .await?,
        );

        let summary = summarize(&topics, &records);

        let topics = topics
            .iter()
            .map(|topic| {
                let record = records.get(topic.id());
                let status = match record {
                    Some(r) if r.passed_exam() => TopicStatus::ExamPassed,
                    Some(r) if r.completed => TopicStatus::Completed,
                    _ => TopicStatus::NotStarted,
                };
                TopicStatusView {
                    topic_id: topic.id().clone(),
                    title: topic.title().to_string(),
                    status,
                    score: record.and_then(|r| r.score),
                }
            })
            .collect();

        Ok(DashboardOverview { summary, topics })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
