use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Network failure or timeout talking to an upstream API.
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// 2xx response whose body did not carry the field we need.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
