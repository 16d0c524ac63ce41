use std::time::Duration;

use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};

use super::video::MAX_UPLOAD_BYTES;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "SALES_COACH_API_URL";
pub const FALLBACK_ENV: &str = "SALES_COACH_FALLBACK";

pub const ANALYZE_PATH: &str = "/api/v1/videos/analyze";
pub const HISTORY_PATH: &str = "/api/v1/videos/history";
pub const HEALTH_PATH: &str = "/health";

const ANALYZE_TIMEOUT: Duration = Duration::from_secs(300);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// What `analyze` does when the service cannot produce a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Swap any transport or parse failure for the placeholder report.
    #[default]
    Synthesize,
    /// Hand the failure to the caller.
    Propagate,
}

impl FallbackPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "synthesize" | "fallback" | "demo" => Some(FallbackPolicy::Synthesize),
            "propagate" | "strict" => Some(FallbackPolicy::Propagate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FallbackPolicy::Synthesize => "Use demo report when the service fails",
            FallbackPolicy::Propagate => "Report service failures",
        }
    }
}

/// User-editable settings persisted to `settings.json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsData {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub analyze_timeout: Duration,
    pub request_timeout: Duration,
    pub fallback_policy: FallbackPolicy,
    pub max_upload_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analyze_timeout: ANALYZE_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            fallback_policy: FallbackPolicy::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn from_env(settings: &SettingsData) -> Self {
        Self::resolve(settings, |key| std::env::var(key).ok())
    }

    /// Environment wins over saved settings, saved settings win over defaults.
    pub fn resolve(settings: &SettingsData, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let candidates = [
            (BASE_URL_ENV, env(BASE_URL_ENV)),
            ("settings.json", settings.api_base_url.clone()),
        ];
        let base_url = candidates.into_iter().find_map(|(source, url)| {
            let url = url.filter(|url| !url.trim().is_empty())?;
            let parsed = parse_base_url(&url);
            if parsed.is_none() {
                tracing::warn!("Ignoring invalid service URL {:?} from {}", url, source);
            }
            parsed
        });
        if let Some(url) = base_url {
            config.base_url = url;
        }

        config.fallback_policy = match env(FALLBACK_ENV) {
            Some(value) => FallbackPolicy::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown {} value {:?}", FALLBACK_ENV, value);
                settings.fallback_policy
            }),
            None => settings.fallback_policy,
        };

        config
    }

    /// Keeps the current URL if `base_url` does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        match parse_base_url(base_url) {
            Some(url) => self.base_url = url,
            None => tracing::warn!("Ignoring invalid service URL {:?}", base_url),
        }
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Parses an http(s) service URL and returns it without a trailing slash.
pub fn parse_base_url(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_localhost_with_long_analyze_timeout() {
        let config = ClientConfig::resolve(&SettingsData::default(), env_from(&[]));
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.analyze_timeout, Duration::from_secs(300));
        assert_eq!(config.fallback_policy, FallbackPolicy::Synthesize);
        assert_eq!(config.endpoint(ANALYZE_PATH), "http://localhost:8000/api/v1/videos/analyze");
    }

    #[test]
    fn environment_overrides_saved_settings() {
        let settings = SettingsData {
            api_base_url: Some("http://saved:9000".to_string()),
            fallback_policy: FallbackPolicy::Synthesize,
        };

        let config = ClientConfig::resolve(
            &settings,
            env_from(&[(BASE_URL_ENV, "https://coach.example.com/"), (FALLBACK_ENV, "propagate")]),
        );
        assert_eq!(config.base_url, "https://coach.example.com");
        assert_eq!(config.fallback_policy, FallbackPolicy::Propagate);

        let config = ClientConfig::resolve(&settings, env_from(&[(FALLBACK_ENV, "bogus")]));
        assert_eq!(config.base_url, "http://saved:9000");
        assert_eq!(config.fallback_policy, FallbackPolicy::Synthesize);
    }

    #[test]
    fn blank_urls_fall_through_to_default() {
        let settings =
            SettingsData { api_base_url: Some("  ".to_string()), ..SettingsData::default() };
        let config = ClientConfig::resolve(&settings, env_from(&[(BASE_URL_ENV, "")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn service_urls_must_be_absolute_http() {
        assert_eq!(parse_base_url("HTTP://coach:8000/"), Some("http://coach:8000".to_string()));
        assert_eq!(
            parse_base_url(" https://coach.example.com/api/ "),
            Some("https://coach.example.com/api".to_string())
        );
        assert_eq!(parse_base_url("localhost:8000"), None);
        assert_eq!(parse_base_url("http://"), None);
        assert_eq!(parse_base_url("http://my host"), None);
        assert_eq!(parse_base_url("ftp://coach"), None);
    }

    #[test]
    fn invalid_urls_fall_through_to_the_next_source() {
        let settings = SettingsData {
            api_base_url: Some("http://saved:9000".to_string()),
            ..SettingsData::default()
        };
        let config =
            ClientConfig::resolve(&settings, env_from(&[(BASE_URL_ENV, "localhost:8000")]));
        assert_eq!(config.base_url, "http://saved:9000");

        let settings =
            SettingsData { api_base_url: Some("http://".to_string()), ..SettingsData::default() };
        let config =
            ClientConfig::resolve(&settings, env_from(&[(BASE_URL_ENV, "localhost:8000")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = ClientConfig::default().with_base_url("not a url");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
