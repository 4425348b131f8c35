use thiserror::Error;

/// Top-level error type for the `shopdesk-api` crate.
///
/// Covers every failure mode of the REST backend: authentication,
/// transport, structured API errors, and body decoding.
/// `shopdesk-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong credentials, unknown account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the backend's `{message}` field when
    /// the body carried one.
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The request could not be assembled (bad header value, bad multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The human-readable message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            Self::Authentication { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the token was rejected and logging in again might help.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_backend_text() {
        let err = Error::Api {
            status: 400,
            message: Some("Email already exists".into()),
        };
        assert_eq!(err.server_message(), Some("Email already exists"));
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_transient());
    }

    #[test]
    fn empty_api_error_has_no_message() {
        let err = Error::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "API error (HTTP 500): no message");
    }

    #[test]
    fn status_helpers() {
        assert!(
            Error::Api {
                status: 404,
                message: None
            }
            .is_not_found()
        );
        assert!(
            Error::Api {
                status: 401,
                message: None
            }
            .is_auth_expired()
        );
        assert!(
            Error::Api {
                status: 503,
                message: None
            }
            .is_transient()
        );
    }
}
