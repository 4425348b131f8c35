//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod admins;
pub mod auth;
pub mod config_cmd;
pub mod employees;
pub mod payouts;
pub mod punchings;
pub mod rotas;
pub mod salary;
pub mod shops;
pub mod util;

use shopdesk_core::NotificationLevel;
use tokio::sync::broadcast::error::TryRecvError;

use crate::cli::{Command, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

/// Dispatch a backend-bound command to the appropriate handler.
///
/// Success notifications raised by the controller while the command ran
/// are echoed as status lines; failures surface as the returned error.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let mut notifications = ctx.controller.notifications();

    let result = match cmd {
        Command::Login(args) => auth::login(ctx, args, global).await,
        Command::Logout => auth::logout(ctx, global).await,
        Command::Whoami => auth::whoami(ctx, global),
        Command::Shops(args) => shops::handle(ctx, args, global).await,
        Command::Employees(args) => employees::handle(ctx, args, global).await,
        Command::Rotas(args) => rotas::handle(ctx, args, global).await,
        Command::Punchings(args) => punchings::handle(ctx, args, global).await,
        Command::Payouts(args) => payouts::handle(ctx, args, global).await,
        Command::Admins(args) => admins::handle(ctx, args, global).await,
        Command::Salary(args) => salary::handle(ctx, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    };

    loop {
        match notifications.try_recv() {
            Ok(note) if note.level == NotificationLevel::Success => {
                output::status(global, &note.message);
            }
            Ok(note) => tracing::debug!(message = %note.message, "error notification"),
            Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    result
}
