//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;
use shopdesk_core::DEFAULT_API_ROOT;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref root) = p.api_root {
            let _ = writeln!(out, "api_root = \"{root}\"");
        }
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

fn prompt_password() -> Result<SecretString, CliError> {
    let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pass))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config()?;
            let name = config::active_profile_name(global, &cfg);
            cfg.profile(&name)?;
            let password = prompt_password()?;
            shopdesk_config::store_password(&name, &password)?;
            output::status(global, &format!("Password for '{name}' stored in system keyring"));
            Ok(())
        }
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("shopdesk configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config()?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(prompt_err)?;

    let api_root: String = Input::new()
        .with_prompt("API root")
        .default(DEFAULT_API_ROOT.to_owned())
        .interact_text()
        .map_err(prompt_err)?;
    url::Url::parse(&api_root).map_err(|e| CliError::Validation {
        field: "api_root".into(),
        reason: format!("invalid URL {api_root}: {e}"),
    })?;

    let email: String = Input::new()
        .with_prompt("Login email")
        .interact_text()
        .map_err(prompt_err)?;

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Ask at login",
    ];
    let selection = Select::new()
        .with_prompt("Where to keep the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let password = match selection {
        0 => {
            shopdesk_config::store_password(&profile_name, &prompt_password()?)?;
            eprintln!("   Password stored in system keyring");
            None
        }
        1 => {
            let raw = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            Some(raw).filter(|p| !p.is_empty())
        }
        _ => None,
    };

    let profile = Profile {
        api_root: (api_root != DEFAULT_API_ROOT).then_some(api_root),
        email: Some(email).filter(|e| !e.trim().is_empty()),
        password,
        ..Profile::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(profile_name.clone());
    }

    let path = config::save_config(&cfg)?;
    output::status(
        global,
        &format!("Profile '{profile_name}' saved to {}", path.display()),
    );
    eprintln!("   Next: shopdesk login --profile {profile_name}");
    Ok(())
}
