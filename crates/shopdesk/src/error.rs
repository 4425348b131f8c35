//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use shopdesk_config::ConfigError;
use shopdesk_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(shopdesk::connection_failed),
        help(
            "Check your network connection and the profile's api_root.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(shopdesk::timeout),
        help("Raise the limit with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Session ──────────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(shopdesk::auth_failed),
        help(
            "Check the email and password for this profile.\n\
             Run: shopdesk config set-password --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(shopdesk::not_logged_in),
        help("Run: shopdesk login --profile {profile}")
    )]
    NotLoggedIn { profile: String },

    #[error("This command requires the {required} role")]
    #[diagnostic(
        code(shopdesk::forbidden),
        help("Log in with a {required} account: shopdesk login --email <EMAIL>")
    )]
    Forbidden { required: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(shopdesk::no_credentials),
        help(
            "Configure credentials with: shopdesk config init\n\
             Or set SHOPDESK_EMAIL / SHOPDESK_PASSWORD."
        )
    )]
    NoCredentials { what: String, profile: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(shopdesk::not_found), help("Run the matching `list` command to see valid IDs."))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(shopdesk::api_error))]
    ApiError { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shopdesk::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(shopdesk::profile_not_found),
        help("Create it with: shopdesk config init")
    )]
    ProfileNotFound { name: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(shopdesk::config))]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(shopdesk::config))]
    Figment(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(shopdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(shopdesk::render))]
    Render(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(shopdesk::internal))]
    Internal(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotLoggedIn { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::Forbidden { .. }
            | Self::ApiError {
                status: Some(403),
                ..
            } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Point session-related help text at the active profile.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                message,
                profile: name.to_owned(),
            },
            Self::NotLoggedIn { .. } => Self::NotLoggedIn {
                profile: name.to_owned(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                message,
                profile: "default".into(),
            },
            CoreError::NotLoggedIn => Self::NotLoggedIn {
                profile: "default".into(),
            },
            CoreError::Forbidden { required } => Self::Forbidden { required },
            CoreError::Api {
                message,
                status: Some(404),
            } => Self::NotFound {
                message: message.unwrap_or_else(|| "resource does not exist".into()),
            },
            CoreError::Api {
                message,
                status: Some(401),
            } => Self::AuthFailed {
                message: message.unwrap_or_else(|| "session expired".into()),
                profile: "default".into(),
            },
            CoreError::Api { message, status } => Self::ApiError {
                message: message.unwrap_or_else(|| "request failed".into()),
                status,
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Storage { message } | CoreError::Config { message } => {
                Self::Config { message }
            }
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { what, profile } => Self::NoCredentials {
                what: what.into(),
                profile,
            },
            ConfigError::UnknownProfile(name) => Self::ProfileNotFound { name },
            ConfigError::Figment(err) => Self::Figment(err),
            ConfigError::Io(err) => Self::Io(err),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
