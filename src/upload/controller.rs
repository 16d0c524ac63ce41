use std::{
    collections::VecDeque,
    sync::Arc,
};

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    progress::PROGRESS_CEILING,
    SubmissionId,
    UploadUpdate,
};
use crate::core::{
    errors::ValidationError,
    models::AnalysisResult,
    store::AnalysisStore,
    video::VideoFile,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Uploading { submission: SubmissionId, filename: String },
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Text and severity only; how it is shown is up to the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Success, title: title.into(), message: message.into() }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, title: title.into(), message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    Progress(u8),
    Published(Arc<AnalysisResult>),
    Notify(Notification),
    NavigateToResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(SubmissionId),
    Rejected(ValidationError),
    Ignored,
}

/// Drives one submission at a time from file selection to a published report.
///
/// The controller itself never awaits anything. Whoever runs the submission feeds
/// [`UploadUpdate`]s back through [`UploadController::apply`], and the display layer
/// drains the resulting [`ControllerEvent`]s with [`UploadController::take_events`].
pub struct UploadController {
    state: UploadState,
    progress: u8,
    store: AnalysisStore,
    max_upload_bytes: u64,
    events: VecDeque<ControllerEvent>,
}

impl UploadController {
    pub fn new(store: AnalysisStore, max_upload_bytes: u64) -> Self {
        Self {
            state: UploadState::Idle,
            progress: 0,
            store,
            max_upload_bytes,
            events: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    pub fn active_submission(&self) -> Option<SubmissionId> {
        match &self.state {
            UploadState::Uploading { submission, .. } => Some(*submission),
            _ => None,
        }
    }

    pub fn active_filename(&self) -> Option<&str> {
        match &self.state {
            UploadState::Uploading { filename, .. } => Some(filename.as_str()),
            _ => None,
        }
    }

    pub fn set_max_upload_bytes(&mut self, max_upload_bytes: u64) {
        self.max_upload_bytes = max_upload_bytes;
    }

    pub fn take_events(&mut self) -> Vec<ControllerEvent> {
        self.events.drain(..).collect()
    }

    /// Validates `file` and, if it is acceptable and nothing else is in flight,
    /// moves to Uploading. The caller is expected to start the actual request
    /// under the returned submission id.
    pub fn submit(&mut self, file: &VideoFile) -> SubmitOutcome {
        if self.state != UploadState::Idle {
            debug!("Ignoring {} while another upload is in progress", file.name);
            return SubmitOutcome::Ignored;
        }

        self.state = UploadState::Validating;

        if let Err(e) = file.validate(self.max_upload_bytes) {
            warn!("Rejected {}: {}", file.name, e);
            self.state = UploadState::Failed;
            self.notify(Notification::error("Upload Error", e.to_string()));
            self.reset();
            return SubmitOutcome::Rejected(e);
        }

        let submission = SubmissionId::new_v4();
        info!("Uploading {} ({}) as {}", file.name, file.format_size(), submission);

        self.state = UploadState::Uploading { submission, filename: file.name.clone() };
        self.progress = 0;
        SubmitOutcome::Started(submission)
    }

    pub fn apply(&mut self, update: UploadUpdate) {
        if self.active_submission() != Some(update.submission()) {
            debug!("Dropping update for stale submission {}", update.submission());
            return;
        }

        match update {
            UploadUpdate::Progress { percent, .. } => {
                let percent = percent.min(PROGRESS_CEILING);
                if percent > self.progress {
                    self.progress = percent;
                    self.events.push_back(ControllerEvent::Progress(percent));
                }
            }
            UploadUpdate::Finished { result: Ok(result), .. } => self.complete(result),
            UploadUpdate::Finished { result: Err(message), .. } => {
                self.fail("Analysis Failed", message)
            }
        }
    }

    /// Abandons the in-flight submission. Returns its id so the caller can abort
    /// the running task; any late updates for it are ignored.
    pub fn cancel(&mut self) -> Option<SubmissionId> {
        let submission = self.active_submission()?;
        info!("Upload {} cancelled", submission);
        self.notify(Notification::info("Upload Cancelled", "The analysis was cancelled."));
        self.reset();
        Some(submission)
    }

    fn complete(&mut self, result: AnalysisResult) {
        info!("Analysis {} complete for {}", result.id, result.filename);

        self.state = UploadState::Completed;
        self.progress = 100;
        self.events.push_back(ControllerEvent::Progress(100));

        let filename = result.filename.clone();
        let published = self.store.publish(result);
        self.events.push_back(ControllerEvent::Published(published));
        self.notify(Notification::success(
            "Analysis Complete",
            format!("{} has been analyzed.", filename),
        ));
        self.events.push_back(ControllerEvent::NavigateToResults);

        self.reset();
    }

    fn fail(&mut self, title: &str, message: String) {
        warn!("Upload failed: {}", message);
        self.state = UploadState::Failed;
        self.notify(Notification::error(title, message));
        self.reset();
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push_back(ControllerEvent::Notify(notification));
    }

    fn reset(&mut self) {
        self.state = UploadState::Idle;
        if self.progress != 0 {
            self.progress = 0;
            self.events.push_back(ControllerEvent::Progress(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{
        fallback::placeholder_result,
        video::MAX_UPLOAD_BYTES,
    };

    fn video(name: &str, mime_type: &str) -> VideoFile {
        VideoFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size: 1024,
        }
    }

    fn started(controller: &mut UploadController, file: &VideoFile) -> SubmissionId {
        match controller.submit(file) {
            SubmitOutcome::Started(id) => id,
            other => panic!("Expected Started, got {:?}", other),
        }
    }

    fn controller() -> (UploadController, AnalysisStore) {
        let store = AnalysisStore::new();
        (UploadController::new(store.clone(), MAX_UPLOAD_BYTES), store)
    }

    #[test]
    fn non_video_is_rejected_and_leaves_store_alone() {
        let (mut controller, store) = controller();
        let outcome = controller.submit(&video("slide.png", "image/png"));

        assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::NotAVideo { .. })));
        assert_eq!(controller.state(), &UploadState::Idle);
        assert_eq!(controller.progress(), 0);
        assert!(store.is_empty());

        let events = controller.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            ControllerEvent::Notify(n) if n.severity == Severity::Error
        ));
    }

    #[test]
    fn oversized_video_is_rejected() {
        let store = AnalysisStore::new();
        let mut controller = UploadController::new(store, 512);
        let outcome = controller.submit(&video("long.mp4", "video/mp4"));
        assert!(matches!(outcome, SubmitOutcome::Rejected(ValidationError::TooLarge { .. })));
        assert!(!controller.is_busy());
    }

    #[test]
    fn second_drop_while_uploading_is_ignored() {
        let (mut controller, _) = controller();
        let first = started(&mut controller, &video("a.mp4", "video/mp4"));

        assert_eq!(controller.submit(&video("b.mp4", "video/mp4")), SubmitOutcome::Ignored);
        assert_eq!(controller.active_submission(), Some(first));
        assert_eq!(controller.active_filename(), Some("a.mp4"));
        assert!(controller.take_events().is_empty());
    }

    #[test]
    fn progress_is_monotonic_and_capped() {
        let (mut controller, _) = controller();
        let id = started(&mut controller, &video("a.mp4", "video/mp4"));

        for percent in [10, 30, 20, 95, 40] {
            controller.apply(UploadUpdate::Progress { submission: id, percent });
        }

        assert_eq!(controller.progress(), 90);
        assert_eq!(
            controller.take_events(),
            vec![
                ControllerEvent::Progress(10),
                ControllerEvent::Progress(30),
                ControllerEvent::Progress(90)
            ]
        );
    }

    #[test]
    fn completion_publishes_once_then_resets() {
        let (mut controller, store) = controller();
        let id = started(&mut controller, &video("pitch.mp4", "video/mp4"));
        controller.apply(UploadUpdate::Progress { submission: id, percent: 40 });
        controller.take_events();

        let result = placeholder_result("pitch.mp4");
        controller.apply(UploadUpdate::Finished { submission: id, result: Ok(result.clone()) });
        // a duplicate delivery must not publish twice
        controller.apply(UploadUpdate::Finished { submission: id, result: Ok(result.clone()) });

        let events = controller.take_events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], ControllerEvent::Progress(100));
        assert!(matches!(&events[1], ControllerEvent::Published(r) if **r == result));
        assert!(matches!(
            &events[2],
            ControllerEvent::Notify(n) if n.severity == Severity::Success
        ));
        assert_eq!(events[3], ControllerEvent::NavigateToResults);
        assert_eq!(events[4], ControllerEvent::Progress(0));

        assert_eq!(controller.state(), &UploadState::Idle);
        assert_eq!(controller.progress(), 0);
        assert_eq!(store.current().unwrap().id, result.id);
    }

    #[test]
    fn failure_notifies_and_keeps_previous_analysis() {
        let (mut controller, store) = controller();
        let previous = store.publish(placeholder_result("earlier.mp4"));

        let id = started(&mut controller, &video("pitch.mp4", "video/mp4"));
        controller.apply(UploadUpdate::Progress { submission: id, percent: 20 });
        controller.apply(UploadUpdate::Finished {
            submission: id,
            result: Err("Request timed out".to_string()),
        });

        let events = controller.take_events();
        assert!(events.iter().all(|e| !matches!(e, ControllerEvent::Published(_))));
        assert!(events.iter().all(|e| *e != ControllerEvent::NavigateToResults));
        assert!(events.iter().any(|e| matches!(
            e,
            ControllerEvent::Notify(n) if n.severity == Severity::Error && n.message == "Request timed out"
        )));
        assert_eq!(events.last(), Some(&ControllerEvent::Progress(0)));
        assert_eq!(store.current().unwrap().id, previous.id);
        assert_eq!(controller.state(), &UploadState::Idle);
    }

    #[test]
    fn updates_from_cancelled_submission_are_dropped() {
        let (mut controller, store) = controller();
        let id = started(&mut controller, &video("pitch.mp4", "video/mp4"));

        assert_eq!(controller.cancel(), Some(id));
        assert_eq!(controller.cancel(), None);
        controller.take_events();

        controller.apply(UploadUpdate::Progress { submission: id, percent: 50 });
        controller.apply(UploadUpdate::Finished {
            submission: id,
            result: Ok(placeholder_result("pitch.mp4")),
        });

        assert!(controller.take_events().is_empty());
        assert!(store.is_empty());

        // a fresh submission can start afterwards
        started(&mut controller, &video("again.mp4", "video/mp4"));
    }
}
