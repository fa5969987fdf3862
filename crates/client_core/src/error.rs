use shared::error::ApiErrorBody;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}{}", message_suffix(.message))]
    Api { status: u16, message: Option<String> },
    /// The backend answered with a body we could not decode.
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

impl GatewayError {
    pub fn api(status: u16, body: Option<ApiErrorBody>) -> Self {
        Self::Api {
            status,
            message: body.and_then(|body| body.text().map(str::to_string)),
        }
    }

    /// Server-provided message, when there is one worth showing verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
