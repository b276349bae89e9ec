#![forbid(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod exam_service;
pub mod progress_service;
pub mod topic_service;

pub use hub_core::Clock;

pub use dashboard::{DashboardOverview, DashboardService, TopicStatus, TopicStatusView};
pub use error::{DashboardError, ExamError, ProgressError, TopicServiceError};
pub use exam_service::{ExamOutcome, ExamService};
pub use progress_service::ProgressService;
pub use topic_service::TopicService;
