//! Session command handlers: login, logout, whoami.

use secrecy::SecretString;
use serde::Serialize;
use shopdesk_core::{Command as CoreCommand, CommandResult, Identity, Route};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

/// Serializable view of the session; the token never leaves the store.
#[derive(Debug, Serialize)]
struct WhoAmI<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
    role: &'a str,
    home: Option<&'static str>,
}

impl<'a> From<&'a Identity> for WhoAmI<'a> {
    fn from(id: &'a Identity) -> Self {
        Self {
            name: id.name.as_deref(),
            email: id.email.as_deref(),
            role: id.role.as_str(),
            home: Route::home_for(&id.role).map(Route::path),
        }
    }
}

fn resolve_password(ctx: &Context, prompt: bool) -> Result<SecretString, CliError> {
    if !prompt {
        match shopdesk_config::resolve_password(&ctx.profile, &ctx.profile_name) {
            Ok(secret) => return Ok(secret),
            Err(shopdesk_config::ConfigError::NoCredentials { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }
    let raw = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

pub async fn login(ctx: &Context, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => shopdesk_config::resolve_email(&ctx.profile, &ctx.profile_name)?,
    };
    let password = resolve_password(ctx, args.prompt)?;

    let result = ctx
        .controller
        .execute(CoreCommand::Login { email, password })
        .await?;
    let CommandResult::Identity(identity) = result else {
        return Err(util::unexpected(&result));
    };

    output::status(
        global,
        &format!("Logged in as {} ({})", identity.display_name(), identity.role),
    );
    if !identity.role.is_known() {
        tracing::warn!(role = %identity.role, "role has no screens in this client");
    }
    Ok(())
}

pub async fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    if ctx.controller.identity().is_none() {
        output::status(global, "Not logged in");
        return Ok(());
    }
    ctx.controller.execute(CoreCommand::Logout).await?;
    output::status(global, "Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = ctx.controller.identity().ok_or(CliError::NotLoggedIn {
        profile: ctx.profile_name.clone(),
    })?;
    let view = WhoAmI::from(identity.as_ref());
    let out = output::render_single(
        global.output,
        &view,
        |w| {
            vec![
                ("Name", output::or_dash(w.name)),
                ("Email", output::or_dash(w.email)),
                ("Role", w.role.to_owned()),
                ("Home", output::or_dash(w.home)),
            ]
        },
        |w| w.email.or(w.name).unwrap_or(w.role).to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
