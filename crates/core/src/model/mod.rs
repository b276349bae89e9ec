mod ids;
mod progress;
mod topic;

pub use ids::{QuestionId, StudentId, TopicId};
pub use progress::{ProgressRecord, ProgressSet};
pub use topic::{
    OPTION_COUNT, Question, QuestionDraft, QuestionValidationError, Topic, TopicDraft,
    TopicValidationError,
};
