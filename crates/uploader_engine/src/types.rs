use bytes::Bytes;
use thiserror::Error;

pub type RequestId = u64;

/// The file sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub media_type: String,
    pub payload: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub status: u16,
    /// Response body with surrounding whitespace trimmed.
    pub label: String,
}

impl Prediction {
    pub fn from_body(status: u16, body: &str) -> Self {
        Self {
            status,
            label: body.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PredictionCompleted {
        request_id: RequestId,
        result: Result<Prediction, PredictError>,
    },
}

/// Failure of a prediction request. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// Endpoint answered with a non-2xx status.
    #[error("{}", http_status_message(.status, .body))]
    HttpStatus { status: u16, body: String },
    /// Connection, TLS or timeout failure; holds the transport's description.
    #[error("{0}")]
    Transport(String),
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("prediction engine unavailable: {0}")]
    EngineUnavailable(String),
}

impl PredictError {
    /// Message shown in the widget's error pane.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn http_status_message(status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}
