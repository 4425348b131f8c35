//! Employee command handlers.

use std::sync::Arc;

use shopdesk_core::{
    Command as CoreCommand, CommandResult, CreateEmployeeRequest, Employee, EntityRef, Route,
    UpdateEmployeeRequest,
};
use tabled::Tabled;

use crate::cli::{
    EmployeeCreateArgs, EmployeeUpdateArgs, EmployeesArgs, EmployeesCommand, GlobalOpts,
};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Pay")]
    pay_type: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Shop")]
    shop: String,
}

impl From<&Arc<Employee>> for EmployeeRow {
    fn from(e: &Arc<Employee>) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name.clone(),
            phone: output::or_dash(e.phone_number.as_deref()),
            pay_type: output::or_dash(e.pay_type),
            rate: output::or_dash(e.effective_rate().map(output::fixed2)),
            shop: output::or_dash(e.shop_ref().map(EntityRef::label)),
        }
    }
}

fn detail(e: &Arc<Employee>) -> Vec<(&'static str, String)> {
    vec![
        ("ID", e.id.to_string()),
        ("Name", e.name.clone()),
        ("Phone", output::or_dash(e.phone_number.as_deref())),
        ("Address", output::or_dash(e.address.as_deref())),
        ("NI number", output::or_dash(e.ni_number.as_deref())),
        ("Share code", output::or_dash(e.share_code.as_deref())),
        ("Shift", output::or_dash(e.shift_timing.as_deref())),
        ("Pay type", output::or_dash(e.pay_type)),
        ("Hourly rate", output::or_dash(e.hourly_rate.map(output::fixed2))),
        ("Daily rate", output::or_dash(e.fixed_daily_rate.map(output::fixed2))),
        ("Effective rate", output::or_dash(e.effective_rate().map(output::fixed2))),
        ("Shop", output::or_dash(e.shop_ref().map(EntityRef::label))),
    ]
}

// ── Request builders ────────────────────────────────────────────────

fn create_request(args: EmployeeCreateArgs) -> Result<CreateEmployeeRequest, CliError> {
    Ok(CreateEmployeeRequest {
        pay_type: util::parse_pay_type(&args.pay_type)?,
        name: args.name,
        phone_number: args.phone,
        address: args.address,
        ni_number: args.ni_number,
        share_code: args.share_code,
        shift_timing: args.shift_timing,
        fixed_daily_rate: args.daily_rate,
        hourly_rate: args.hourly_rate,
        custom_daily_rate: args.custom_daily_rate,
        custom_hourly_rate: args.custom_hourly_rate,
        shop_id: util::opt_id(args.shop),
    })
}

fn update_request(args: EmployeeUpdateArgs) -> Result<UpdateEmployeeRequest, CliError> {
    Ok(UpdateEmployeeRequest {
        pay_type: args
            .pay_type
            .as_deref()
            .map(util::parse_pay_type)
            .transpose()?,
        name: args.name,
        phone_number: args.phone,
        address: args.address,
        ni_number: args.ni_number,
        share_code: args.share_code,
        shift_timing: args.shift_timing,
        fixed_daily_rate: args.daily_rate,
        hourly_rate: args.hourly_rate,
        custom_daily_rate: args.custom_daily_rate,
        custom_hourly_rate: args.custom_hourly_rate,
        shop_id: util::opt_id(args.shop),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &Context,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::authorize(ctx, Route::ShopEmployees)?;
    let controller = &ctx.controller;

    match args.command {
        EmployeesCommand::List => {
            let result = controller.execute(CoreCommand::ListEmployees).await?;
            let CommandResult::Employees(employees) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, &employees, |x| EmployeeRow::from(x), |e| {
                e.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Get { id } => {
            let result = controller
                .execute(CoreCommand::GetEmployee { id: util::id(&id) })
                .await?;
            let CommandResult::Employee(employee) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_single(global.output, &employee, detail, |e| {
                e.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Create(create) => {
            let request = create_request(create)?;
            let result = controller
                .execute(CoreCommand::CreateEmployee(request))
                .await?;
            let CommandResult::Employee(employee) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&employee.id.to_string(), global.quiet);
            Ok(())
        }

        EmployeesCommand::Update(update) => {
            let id = util::id(&update.id);
            let update = update_request(update)?;
            controller
                .execute(CoreCommand::UpdateEmployee { id, update })
                .await?;
            Ok(())
        }

        EmployeesCommand::Delete { id } => {
            if !util::confirm(&format!("Remove employee '{id}'?"), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteEmployee { id: util::id(&id) })
                .await?;
            Ok(())
        }
    }
}
