//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use bytes::Bytes;
use shopdesk_core::{CommandResult, EntityId, FilePart, GuardDecision, PayType, Route};

use crate::config::Context;
use crate::error::CliError;

/// Fail unless the logged-in session may open `route`.
///
/// Uses the same guard the route table does, so a command group is only
/// available to the role whose screens it mirrors.
pub fn authorize(ctx: &Context, route: Route) -> Result<(), CliError> {
    match ctx.controller.guard(route.path()) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect(_) => {
            let required = route.required_role().ok_or_else(|| {
                CliError::Internal(format!("route {route} has no required role"))
            })?;
            ctx.controller.require_role(&required)?;
            Err(CliError::Forbidden {
                required: required.to_string(),
            })
        }
    }
}

/// Error for a controller reply that does not match the command sent.
pub fn unexpected(result: &CommandResult) -> CliError {
    CliError::Internal(format!("unexpected command result: {result:?}"))
}

pub fn id(raw: &str) -> EntityId {
    EntityId::from(raw.trim())
}

pub fn opt_id(raw: Option<String>) -> Option<EntityId> {
    raw.as_deref().map(id)
}

pub fn parse_pay_type(raw: &str) -> Result<PayType, CliError> {
    raw.parse::<PayType>()
        .ok()
        .filter(|p| *p != PayType::Unknown)
        .ok_or_else(|| CliError::Validation {
            field: "pay-type".into(),
            reason: format!("expected 'hourly' or 'daily', got '{raw}'"),
        })
}

/// Read an image from disk as the multipart `logo` part.
pub fn read_logo(path: &Path) -> Result<FilePart, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Validation {
            field: "logo".into(),
            reason: format!("not a file: {}", path.display()),
        })?
        .to_owned();
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(image_mime)
        .map(str::to_owned);
    Ok(FilePart {
        field: "logo".into(),
        file_name,
        mime,
        bytes: Bytes::from(bytes),
    })
}

fn image_mime(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}
