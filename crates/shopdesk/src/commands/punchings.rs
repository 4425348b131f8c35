//! Punching command handlers.

use std::sync::Arc;

use shopdesk_core::{
    Command as CoreCommand, CommandResult, EntityRef, PunchInRequest, PunchOutRequest, Punching,
    PunchingFilter, Route,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, PunchingsArgs, PunchingsCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PunchingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Shop")]
    shop: String,
    #[tabled(rename = "In")]
    punch_in: String,
    #[tabled(rename = "Out")]
    punch_out: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

impl From<&Arc<Punching>> for PunchingRow {
    fn from(p: &Arc<Punching>) -> Self {
        let stamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
            output::or_dash(t.map(|t| t.format("%Y-%m-%d %H:%M").to_string()))
        };
        Self {
            id: p.id.to_string(),
            employee: output::or_dash(p.employee_ref().map(EntityRef::label)),
            shop: output::or_dash(p.shop_ref().map(EntityRef::label)),
            punch_in: stamp(p.punch_in_datetime),
            punch_out: if p.is_open() {
                "open".into()
            } else {
                stamp(p.punch_out_datetime)
            },
            hours: output::or_dash(p.hours().map(output::fixed2)),
        }
    }
}

pub async fn handle(
    ctx: &Context,
    args: PunchingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::authorize(ctx, Route::ShopPunchings)?;
    let controller = &ctx.controller;

    match args.command {
        PunchingsCommand::List { shop, employee } => {
            let filter = PunchingFilter {
                shop_id: util::opt_id(shop),
                employee_id: util::opt_id(employee),
            };
            let result = controller
                .execute(CoreCommand::ListPunchings(filter))
                .await?;
            let CommandResult::Punchings(punchings) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, &punchings, |x| PunchingRow::from(x), |p| {
                p.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PunchingsCommand::In(punch) => {
            let request = PunchInRequest::now(util::id(&punch.shop), util::id(&punch.employee));
            let result = controller.execute(CoreCommand::PunchIn(request)).await?;
            let CommandResult::Punching(punching) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&punching.id.to_string(), global.quiet);
            Ok(())
        }

        PunchingsCommand::Out(punch) => {
            let request = PunchOutRequest::now(util::id(&punch.shop), util::id(&punch.employee));
            let result = controller.execute(CoreCommand::PunchOut(request)).await?;
            let CommandResult::Punching(punching) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&punching.id.to_string(), global.quiet);
            Ok(())
        }
    }
}
