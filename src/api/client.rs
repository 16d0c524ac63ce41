use std::future::Future;

use reqwest::{
    multipart::{
        Form,
        Part,
    },
    Client,
};
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    types::{
        AnalysisResponse,
        HealthResponse,
    },
    AnalysisService,
};
use crate::core::{
    config::{
        ClientConfig,
        FallbackPolicy,
        ANALYZE_PATH,
        HEALTH_PATH,
        HISTORY_PATH,
    },
    errors::TransportError,
    fallback::placeholder_result,
    http::{
        ensure_success,
        http_client,
    },
    models::{
        AnalysisResult,
        HealthStatus,
    },
    video::VideoFile,
    CoachError,
};

const UPLOAD_FIELD: &str = "video";

/// HTTP client for the analysis service.
///
/// The inherent methods surface every failure. The [`AnalysisService`] impl layers
/// the fallback policy and the empty/unhealthy defaults on top of them.
pub struct AnalysisClient {
    http: Client,
    config: ClientConfig,
}

impl AnalysisClient {
    pub fn new(config: ClientConfig) -> Result<Self, CoachError> {
        let http = http_client(config.request_timeout)?;
        info!(
            "Analysis client: {} (analyze timeout {:?}, fallback {:?})",
            config.base_url, config.analyze_timeout, config.fallback_policy
        );
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn request_analysis(&self, file: &VideoFile) -> Result<AnalysisResult, CoachError> {
        let url = self.config.endpoint(ANALYZE_PATH);
        let bytes = tokio::fs::read(&file.path).await?;
        debug!("Uploading {} ({} bytes) to {}", file.name, bytes.len(), url);

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                CoachError::Custom(format!("Invalid MIME type {}: {e}", file.mime_type))
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .http
            .post(&url)
            .timeout(self.config.analyze_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::from)?;
        let resp = ensure_success(resp)?;

        let body = resp.bytes().await.map_err(TransportError::from)?;
        let response: AnalysisResponse = serde_json::from_slice(&body)
            .map_err(|e| CoachError::MalformedResponse(e.to_string()))?;

        response.into_result(&file.name)
    }

    pub async fn fetch_history(&self) -> Result<Vec<AnalysisResult>, CoachError> {
        let url = self.config.endpoint(HISTORY_PATH);
        let resp = self.http.get(&url).send().await.map_err(TransportError::from)?;
        let resp = ensure_success(resp)?;
        let items: Vec<AnalysisResponse> = resp.json().await.map_err(TransportError::from)?;

        let total = items.len();
        let results: Vec<AnalysisResult> = items
            .into_iter()
            .filter_map(|item| match item.into_result("Unknown file") {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping history entry: {}", e);
                    None
                }
            })
            .collect();

        debug!("Fetched {} of {} history entries", results.len(), total);
        Ok(results)
    }

    pub async fn fetch_health(&self) -> Result<HealthStatus, CoachError> {
        let url = self.config.endpoint(HEALTH_PATH);
        let resp = self.http.get(&url).send().await.map_err(TransportError::from)?;
        let resp = ensure_success(resp)?;
        let body: HealthResponse = resp.json().await.map_err(TransportError::from)?;
        Ok(body.into_status())
    }
}

impl AnalysisService for AnalysisClient {
    fn analyze(
        &self,
        file: &VideoFile,
    ) -> impl Future<Output = Result<AnalysisResult, CoachError>> + Send {
        async move {
            match self.request_analysis(file).await {
                Ok(result) => {
                    info!("Analysis received for {} ({})", result.filename, result.id);
                    Ok(result)
                }
                Err(e) => match self.config.fallback_policy {
                    FallbackPolicy::Synthesize => {
                        warn!("Analysis of {} failed, using demo report: {}", file.name, e);
                        Ok(placeholder_result(&file.name))
                    }
                    FallbackPolicy::Propagate => {
                        warn!("Analysis of {} failed: {}", file.name, e);
                        Err(e)
                    }
                },
            }
        }
    }

    fn get_history(&self) -> impl Future<Output = Vec<AnalysisResult>> + Send {
        async move {
            self.fetch_history().await.unwrap_or_else(|e| {
                warn!("Failed to fetch analysis history: {}", e);
                Vec::new()
            })
        }
    }

    fn health_check(&self) -> impl Future<Output = HealthStatus> + Send {
        async move {
            self.fetch_health().await.unwrap_or_else(|e| {
                debug!("Health check failed: {}", e);
                HealthStatus::unhealthy()
            })
        }
    }
}
