//! Gateway error model.
//!
//! Two failure families reach callers: **transport** (no HTTP response was
//! received) and **server** (a response arrived with a non-2xx status). A 401
//! is a server failure with side effects, so it gets its own variant.

use reqwest::StatusCode;
use thiserror::Error;

use auditdesk_auth::CredentialStoreError;

use crate::envelope::Envelope;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, DNS, timeout, ...).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived with a non-2xx status other than 401.
    #[error("server responded with {status}")]
    Server { status: StatusCode, body: Envelope },

    /// The backend answered 401. The stored credential has already been
    /// cleared and the session-expired handler has run.
    #[error("authentication required (401); stored credential cleared")]
    Unauthorized { body: Envelope },

    /// A 2xx envelope reported `success: false` (see [`Envelope::ensure_success`]).
    #[error("request rejected by server: {message}")]
    Rejected { message: String, body: Envelope },

    /// A 2xx response whose body could not be read as the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request could not be assembled (bad header value, unreadable file, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("credential storage failed: {0}")]
    Credentials(#[from] CredentialStoreError),
}

impl GatewayError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// No response was received from the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// A response was received but reported failure.
    pub fn is_server(&self) -> bool {
        matches!(
            self,
            Self::Server { .. } | Self::Unauthorized { .. } | Self::Rejected { .. }
        )
    }

    /// HTTP status of a server-layer failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Body the server sent with the failure, if any.
    pub fn body(&self) -> Option<&Envelope> {
        match self {
            Self::Server { body, .. }
            | Self::Unauthorized { body }
            | Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Text suitable for an alert or inline message in a view.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) if e.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Self::Transport(_) => {
                "Cannot reach the server. Please check that the backend is running.".to_string()
            }
            Self::Unauthorized { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::Server { status, body } => match body.message() {
                Some(message) => message.to_string(),
                None => format!("Request failed with status {}", status.as_u16()),
            },
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_failure_prefers_backend_message() {
        let err = GatewayError::Server {
            status: StatusCode::CONFLICT,
            body: Envelope::new(json!({ "success": false, "message": "Office already exists" })),
        };
        assert!(err.is_server());
        assert!(!err.is_network());
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.user_message(), "Office already exists");
    }

    #[test]
    fn server_failure_without_message_mentions_status() {
        let err = GatewayError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Envelope::new(serde_json::Value::Null),
        };
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn unauthorized_reports_401() {
        let err = GatewayError::Unauthorized {
            body: Envelope::new(json!({ "message": "jwt expired" })),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.user_message().contains("log in again"));
        assert_eq!(err.body().and_then(Envelope::message), Some("jwt expired"));
    }
}
