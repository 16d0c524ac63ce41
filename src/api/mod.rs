pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod stub_server;

use std::future::Future;

pub use client::AnalysisClient;

use crate::core::{
    models::{
        AnalysisResult,
        HealthStatus,
    },
    video::VideoFile,
    CoachError,
};

/// The remote analysis operations the upload workflow and the dashboard rely on.
pub trait AnalysisService: Send + Sync + 'static {
    /// Produces a report for `file`. Whether failures surface or are replaced by
    /// the placeholder report is up to the implementation's fallback policy.
    fn analyze(
        &self,
        file: &VideoFile,
    ) -> impl Future<Output = Result<AnalysisResult, CoachError>> + Send;

    /// Past analyses; empty when they can't be fetched.
    fn get_history(&self) -> impl Future<Output = Vec<AnalysisResult>> + Send;

    /// Never fails; an unreachable service is reported as unhealthy.
    fn health_check(&self) -> impl Future<Output = HealthStatus> + Send;
}
