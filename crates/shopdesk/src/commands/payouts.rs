//! Payout command handlers.

use std::sync::Arc;

use chrono::Local;
use shopdesk_core::{
    Command as CoreCommand, CommandResult, CreatePayoutRequest, EntityRef, Payout, PayoutFilter,
    Route,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, PayoutsArgs, PayoutsCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PayoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid")]
    date: String,
    #[tabled(rename = "Period")]
    period: String,
}

fn day(raw: Option<&str>) -> String {
    output::or_dash(raw.map(|d| d.get(..10).unwrap_or(d)))
}

impl From<&Arc<Payout>> for PayoutRow {
    fn from(p: &Arc<Payout>) -> Self {
        let period = match (&p.payout_start_date, &p.payout_end_date) {
            (None, None) => "-".into(),
            (start, end) => format!("{} to {}", day(start.as_deref()), day(end.as_deref())),
        };
        Self {
            id: p.id.to_string(),
            employee: output::or_dash(p.employee_ref().map(EntityRef::label)),
            amount: output::or_dash(p.amount_paid.map(output::fixed2)),
            date: day(p.payout_date.as_deref()),
            period,
        }
    }
}

pub async fn handle(ctx: &Context, args: PayoutsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::authorize(ctx, Route::ShopPayouts)?;
    let controller = &ctx.controller;

    match args.command {
        PayoutsCommand::List { employee } => {
            let filter = PayoutFilter {
                employee_id: util::opt_id(employee),
            };
            let result = controller.execute(CoreCommand::ListPayouts(filter)).await?;
            let CommandResult::Payouts(payouts) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, &payouts, |x| PayoutRow::from(x), |p| {
                p.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PayoutsCommand::Create {
            employee,
            amount,
            date,
            from,
            to,
        } => {
            if amount <= 0.0 {
                return Err(CliError::Validation {
                    field: "amount".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            let request = CreatePayoutRequest {
                employee_id: util::id(&employee),
                amount_paid: amount,
                payout_date: date.unwrap_or_else(|| Local::now().date_naive()),
                payout_start_date: from,
                payout_end_date: to,
            };
            let result = controller
                .execute(CoreCommand::CreatePayout(request))
                .await?;
            let CommandResult::Payout(payout) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&payout.id.to_string(), global.quiet);
            Ok(())
        }

        PayoutsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete payout '{id}'?"), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeletePayout { id: util::id(&id) })
                .await?;
            Ok(())
        }
    }
}
