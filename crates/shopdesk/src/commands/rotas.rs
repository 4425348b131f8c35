//! Rota command handlers.

use std::sync::Arc;

use shopdesk_core::{
    Command as CoreCommand, CommandResult, CreateRotaRequest, EntityRef, Rota, RotaFilter, Route,
    UpdateRotaRequest,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, RotasArgs, RotasCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct RotaRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Shop")]
    shop: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl From<&Arc<Rota>> for RotaRow {
    fn from(r: &Arc<Rota>) -> Self {
        Self {
            id: r.id.to_string(),
            date: output::or_dash(r.shift_day()),
            shift: r.shift_window(),
            employee: output::or_dash(r.employee_ref().map(EntityRef::label)),
            shop: output::or_dash(r.shop_ref().map(EntityRef::label)),
            note: output::or_dash(r.note.as_deref()),
        }
    }
}

pub async fn handle(ctx: &Context, args: RotasArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::authorize(ctx, Route::ShopRotas)?;
    let controller = &ctx.controller;

    match args.command {
        RotasCommand::List { shop, employee } => {
            let filter = RotaFilter {
                shop_id: util::opt_id(shop),
                employee_id: util::opt_id(employee),
            };
            let result = controller.execute(CoreCommand::ListRotas(filter)).await?;
            let CommandResult::Rotas(rotas) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, &rotas, |x| RotaRow::from(x), |r| {
                r.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RotasCommand::Create {
            employee,
            shop,
            date,
            start,
            end,
            note,
        } => {
            let request = CreateRotaRequest {
                employee_id: util::id(&employee),
                shop_id: util::id(&shop),
                shift_date: date,
                scheduled_start: start,
                scheduled_end: end,
                note,
            };
            let result = controller.execute(CoreCommand::CreateRota(request)).await?;
            let CommandResult::Rota(rota) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&rota.id.to_string(), global.quiet);
            Ok(())
        }

        RotasCommand::Update {
            id,
            employee,
            shop,
            date,
            start,
            end,
            note,
        } => {
            let update = UpdateRotaRequest {
                employee_id: util::opt_id(employee),
                shop_id: util::opt_id(shop),
                shift_date: date,
                scheduled_start: start,
                scheduled_end: end,
                note,
            };
            controller
                .execute(CoreCommand::UpdateRota {
                    id: util::id(&id),
                    update,
                })
                .await?;
            Ok(())
        }

        RotasCommand::Delete { id } => {
            if !util::confirm(&format!("Cancel rota '{id}'?"), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteRota { id: util::id(&id) })
                .await?;
            Ok(())
        }
    }
}
