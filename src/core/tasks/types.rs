pub use super::handle::{
    CancellableTask,
    TaskHandle,
};
use crate::{
    core::models::{
        AnalysisResult,
        HealthStatus,
    },
    upload::UploadUpdate,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    Upload(UploadUpdate),
    History(Vec<AnalysisResult>),
    Health(HealthStatus),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Upload(UploadUpdate::Progress { .. }) => "upload_progress",
            TaskResult::Upload(UploadUpdate::Finished { .. }) => "upload_finished",
            TaskResult::History(_) => "history",
            TaskResult::Health(_) => "health",
        }
    }
}
