// ── Core error types ──
//
// User-facing errors from shopdesk-core. The `From<shopdesk_api::Error>`
// impl folds transport-layer failures into these variants; every variant
// can be flattened to the single `{message}` shape the views display.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Access denied: requires the {required} role")]
    Forbidden { required: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("API error: {}", message.as_deref().unwrap_or("request failed"))]
    Api {
        message: Option<String>,
        /// HTTP status code (if a response was received).
        status: Option<u16>,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Flatten to the message shown to the user: the backend's own message
    /// when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(m), ..
            } => m.clone(),
            Self::AuthenticationFailed { message } | Self::ValidationFailed { message } => {
                message.clone()
            }
            _ => fallback.to_owned(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` when the stored token was rejected by the backend.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401) || matches!(self, Self::NotLoggedIn)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shopdesk_api::Error> for CoreError {
    fn from(err: shopdesk_api::Error) -> Self {
        match err {
            shopdesk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            shopdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            shopdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shopdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            shopdesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            shopdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from backend: {message}"))
            }
            shopdesk_api::Error::InvalidRequest(message) => CoreError::ValidationFailed { message },
        }
    }
}
