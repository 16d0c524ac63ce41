use std::time::Duration;

use tracing::debug;

use super::{
    progress::ProgressTicker,
    SubmissionId,
    UpdateSink,
    UploadUpdate,
};
use crate::{
    api::AnalysisService,
    core::video::VideoFile,
};

/// Runs one accepted submission: simulated progress alongside the analysis call.
///
/// The ticker is stopped before the outcome is delivered, so `Finished` is always
/// the last update for `submission`. If this future is dropped early the ticker's
/// guard aborts the timer instead.
pub async fn run_upload<S: AnalysisService>(
    service: &S,
    file: &VideoFile,
    submission: SubmissionId,
    tick: Duration,
    sink: UpdateSink,
) {
    let ticker = {
        let sink = sink.clone();
        ProgressTicker::start(tick, move |percent| {
            sink(UploadUpdate::Progress { submission, percent });
        })
    };

    let result = service.analyze(file).await;
    ticker.stop().await;

    debug!("Submission {} settled (ok: {})", submission, result.is_ok());
    sink(UploadUpdate::Finished { submission, result: result.map_err(|e| e.to_string()) });
}
