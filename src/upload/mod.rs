pub mod controller;
pub mod progress;
pub mod workflow;

use std::sync::Arc;

pub use controller::{
    ControllerEvent,
    Notification,
    Severity,
    SubmitOutcome,
    UploadController,
    UploadState,
};
pub use progress::{
    ProgressTicker,
    PROGRESS_CEILING,
    PROGRESS_TICK,
};
pub use workflow::run_upload;

use crate::core::models::AnalysisResult;

pub type SubmissionId = uuid::Uuid;

/// Messages flowing from a running submission back to the controller.
#[derive(Debug, Clone)]
pub enum UploadUpdate {
    Progress { submission: SubmissionId, percent: u8 },
    Finished { submission: SubmissionId, result: Result<AnalysisResult, String> },
}

impl UploadUpdate {
    pub fn submission(&self) -> SubmissionId {
        match self {
            UploadUpdate::Progress { submission, .. } => *submission,
            UploadUpdate::Finished { submission, .. } => *submission,
        }
    }
}

pub type UpdateSink = Arc<dyn Fn(UploadUpdate) + Send + Sync>;
