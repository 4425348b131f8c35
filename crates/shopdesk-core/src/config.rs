// ── Client configuration ──
//
// Everything the Controller needs to reach the backend. Built by the
// config crate or directly by embedders; core never reads files.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Default backend API root.
pub const DEFAULT_API_ROOT: &str = "https://crm-backend-wheat-zeta.vercel.app/api";

/// Storage key of the persisted session record.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for a [`Controller`](crate::Controller).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; resource paths (`shops`, `employees`, ...) are appended to it.
    pub api_root: Url,
    pub tls: TlsVerification,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Key under which the session record is persisted.
    pub session_key: String,
}

impl ClientConfig {
    pub fn new(api_root: Url) -> Self {
        Self {
            api_root,
            tls: TlsVerification::default(),
            timeout: None,
            session_key: DEFAULT_SESSION_KEY.to_owned(),
        }
    }

    pub(crate) fn transport(&self) -> shopdesk_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => shopdesk_api::TlsMode::System,
            TlsVerification::CustomCa(path) => shopdesk_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => shopdesk_api::TlsMode::DangerAcceptInvalid,
        };
        shopdesk_api::TransportConfig::default()
            .with_tls(tls)
            .with_timeout(self.timeout)
    }
}
