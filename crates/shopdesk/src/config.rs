//! CLI configuration: thin wrapper around `shopdesk_config`.
//!
//! Adds flag resolution on top of the shared profile types
//! (--api-root, --insecure, --timeout take priority over the profile).

use std::sync::Arc;
use std::time::Duration;

use shopdesk_core::{ClientConfig, Controller, FileStore, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use shopdesk_config::{Config, Profile, config_path, load_config, save_config, session_dir};

/// Everything a backend command needs: the controller plus the resolved
/// profile it was built from.
pub struct Context {
    pub controller: Controller,
    pub profile_name: String,
    pub profile: Profile,
}

/// Resolve the active profile name from flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref())
}

/// Translate a profile plus global flags into a `ClientConfig`.
pub fn resolve_client_config(
    profile: &Profile,
    config: &Config,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut client = shopdesk_config::profile_to_client_config(profile, &config.defaults)?;

    if let Some(ref raw) = global.api_root {
        client.api_root = raw.parse().map_err(|e| CliError::Validation {
            field: "api-root".into(),
            reason: format!("invalid URL {raw}: {e}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    Ok(client)
}

/// Load config, pick the profile and build a controller whose session
/// lives in that profile's session directory.
pub fn build_context(global: &GlobalOpts) -> Result<Context, CliError> {
    let config = load_config()?;
    let profile_name = active_profile_name(global, &config);
    let profile = config.profile(&profile_name)?;
    let client = resolve_client_config(&profile, &config, global)?;

    let store = Arc::new(FileStore::new(session_dir(&profile_name)));
    tracing::debug!(
        profile = %profile_name,
        api_root = %client.api_root,
        "building controller"
    );
    let controller = Controller::new(client, store)?;

    Ok(Context {
        controller,
        profile_name,
        profile,
    })
}
