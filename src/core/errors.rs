use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("CoachError: {0}")]
    Custom(String),
}

/// Rejections raised before a file ever reaches the analysis service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{mime_type} is not a video file")]
    NotAVideo { mime_type: String },

    #[error("File is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unable to read file: {0}")]
    Unreadable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<std::io::Error> for CoachError {
    fn from(error: std::io::Error) -> Self {
        CoachError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(error: reqwest::Error) -> Self {
        CoachError::Reqwest(Box::new(error))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = error.status() {
            TransportError::Status {
                status: status.as_u16(),
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if error.is_builder() {
            TransportError::InvalidRequest(error.to_string())
        } else if error.is_connect() || error.is_request() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Body(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_transport_errors_are_not_double_prefixed() {
        let err: CoachError =
            ValidationError::NotAVideo { mime_type: "image/png".to_string() }.into();
        assert_eq!(err.to_string(), "image/png is not a video file");

        let err: CoachError = TransportError::Timeout.into();
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[test]
    fn unbuildable_requests_are_not_reported_as_body_errors() {
        let error = reqwest::Client::new().get("not a url").build().unwrap_err();
        let transport = TransportError::from(error);

        assert!(matches!(transport, TransportError::InvalidRequest(_)));
        assert!(transport.to_string().starts_with("Invalid request"));
    }
}
