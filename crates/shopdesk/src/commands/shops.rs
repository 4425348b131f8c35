//! Shop command handlers.

use std::sync::Arc;

use shopdesk_core::{
    Command as CoreCommand, CommandResult, CreateShopRequest, EntityRef, Route, Shop,
    ShopDashboard, UpdateShopRequest,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat, ShopCreateArgs, ShopUpdateArgs, ShopsArgs, ShopsCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Admin")]
    admin: String,
}

impl From<&Arc<Shop>> for ShopRow {
    fn from(s: &Arc<Shop>) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            address: output::or_dash(s.address.as_deref()),
            phone: output::or_dash(s.phone_number.as_deref()),
            hours: output::or_dash(s.opening_hours()),
            admin: output::or_dash(s.admin.as_ref().map(EntityRef::label)),
        }
    }
}

#[derive(Tabled)]
struct ShiftRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Employee")]
    employee: String,
}

fn shop_detail(s: &Arc<Shop>) -> Vec<(&'static str, String)> {
    vec![
        ("ID", s.id.to_string()),
        ("Name", s.name.clone()),
        ("Address", output::or_dash(s.address.as_deref())),
        ("Site", output::or_dash(s.site.as_deref())),
        ("Phone", output::or_dash(s.phone_number.as_deref())),
        ("Rent", output::or_dash(s.rent.map(output::fixed2))),
        ("Bills", output::or_dash(s.bills.map(output::fixed2))),
        ("Hours", output::or_dash(s.opening_hours())),
        ("Logo", output::or_dash(s.logo.as_deref())),
        ("Admin", output::or_dash(s.admin.as_ref().map(EntityRef::label))),
    ]
}

fn dashboard_detail(d: &Arc<ShopDashboard>) -> String {
    let totals = [
        ("Employees", d.total_employees.to_string()),
        ("Punches today", d.todays_punches.to_string()),
        ("Weekly payout", output::fixed2(d.weekly_payout)),
    ];
    let width = totals.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out: Vec<String> = totals
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect();

    if !d.upcoming_shifts.is_empty() {
        let rows: Vec<ShiftRow> = d
            .upcoming_shifts
            .iter()
            .map(|r| ShiftRow {
                date: output::or_dash(r.shift_day()),
                shift: r.shift_window(),
                employee: output::or_dash(r.employee_ref().map(EntityRef::label)),
            })
            .collect();
        out.push(String::new());
        out.push(
            tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string(),
        );
    }
    out.join("\n")
}

// ── Request builders ────────────────────────────────────────────────

fn create_request(args: ShopCreateArgs) -> Result<CreateShopRequest, CliError> {
    Ok(CreateShopRequest {
        logo: util::read_logo(&args.logo)?,
        name: args.name,
        address: args.address,
        site: args.site,
        phone_number: args.phone,
        rent: args.rent,
        bills: args.bills,
        open_time: args.open_time,
        close_time: args.close_time,
        admin_id: util::opt_id(args.admin),
    })
}

fn update_request(args: ShopUpdateArgs) -> Result<UpdateShopRequest, CliError> {
    let logo = args.logo.as_deref().map(util::read_logo).transpose()?;
    Ok(UpdateShopRequest {
        name: args.name,
        logo,
        address: args.address,
        site: args.site,
        phone_number: args.phone,
        rent: args.rent,
        bills: args.bills,
        open_time: args.open_time,
        close_time: args.close_time,
        admin_id: util::opt_id(args.admin),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: ShopsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let controller = &ctx.controller;
    match args.command {
        ShopsCommand::List => {
            util::authorize(ctx, Route::AdminShops)?;
            let result = controller.execute(CoreCommand::ListShops).await?;
            let CommandResult::Shops(shops) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, &shops, |x| ShopRow::from(x), |s| {
                s.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::Get { id } => {
            util::authorize(ctx, Route::AdminShops)?;
            let result = controller
                .execute(CoreCommand::GetShop { id: util::id(&id) })
                .await?;
            let CommandResult::Shop(shop) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_single(global.output, &shop, shop_detail, |s| {
                s.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::Create(create) => {
            util::authorize(ctx, Route::AdminCreateShop)?;
            let request = create_request(create)?;
            let result = controller.execute(CoreCommand::CreateShop(request)).await?;
            let CommandResult::Shop(shop) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&shop.id.to_string(), global.quiet);
            Ok(())
        }

        ShopsCommand::Update(update) => {
            util::authorize(ctx, Route::AdminShops)?;
            let id = util::id(&update.id);
            let update = update_request(update)?;
            controller
                .execute(CoreCommand::UpdateShop { id, update })
                .await?;
            Ok(())
        }

        ShopsCommand::Delete { id } => {
            util::authorize(ctx, Route::AdminShops)?;
            if !util::confirm(
                &format!("Delete shop '{id}'? Its employees and rotas stay on the backend."),
                global.yes,
            )? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteShop { id: util::id(&id) })
                .await?;
            Ok(())
        }

        ShopsCommand::Dashboard => {
            util::authorize(ctx, Route::ShopDashboard)?;
            let result = controller.execute(CoreCommand::FetchShopDashboard).await?;
            let CommandResult::ShopDashboard(dashboard) = result else {
                return Err(util::unexpected(&result));
            };
            let out = match global.output {
                OutputFormat::Table => dashboard_detail(&dashboard),
                format => output::render_single(format, &dashboard, |_| Vec::new(), |d| {
                    d.total_employees.to_string()
                })?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
