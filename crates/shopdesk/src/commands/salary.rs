//! Salary command handlers: overview, per-employee summary and export.

use std::sync::Arc;

use shopdesk_core::{
    Command as CoreCommand, CommandResult, DateRange, JsonReport, PlainTextReport, Route,
    SalaryCalculation, SalaryLine, SalaryReport, SalaryReportRenderer, SalarySummary,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat, RangeArgs, ReportFormat, SalaryArgs, SalaryCommand};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SalaryRow {
    #[tabled(rename = "Employee")]
    name: String,
    #[tabled(rename = "Pay")]
    pay_type: String,
    #[tabled(rename = "Days")]
    days: u64,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Salary")]
    salary: String,
}

impl From<&SalaryLine> for SalaryRow {
    fn from(l: &SalaryLine) -> Self {
        Self {
            name: l.employee_name.clone(),
            pay_type: output::or_dash(l.pay_type),
            days: l.days_worked,
            hours: output::fixed2(l.total_hours),
            rate: output::or_dash(l.hourly_rate.or(l.daily_rate).map(output::fixed2)),
            salary: output::fixed2(l.salary),
        }
    }
}

fn range(args: &RangeArgs) -> Result<DateRange, CliError> {
    Ok(DateRange::new(args.from, args.to)?)
}

fn calculation_detail(c: &Arc<SalaryCalculation>) -> Vec<(&'static str, String)> {
    vec![
        ("Employee", output::or_dash(c.employee_name.as_deref())),
        ("Pay type", output::or_dash(c.pay_type)),
        ("Days", c.total_days.to_string()),
        ("Hours", output::fixed2(c.total_hours)),
        ("Salary", output::fixed2(c.salary)),
    ]
}

async fn fetch_summary(
    ctx: &Context,
    id: &str,
    range: DateRange,
) -> Result<Arc<SalarySummary>, CliError> {
    let result = ctx
        .controller
        .execute(CoreCommand::FetchSalarySummary {
            id: util::id(id),
            range,
        })
        .await?;
    match result {
        CommandResult::SalarySummary(summary) => Ok(summary),
        other => Err(util::unexpected(&other)),
    }
}

pub async fn handle(ctx: &Context, args: SalaryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::authorize(ctx, Route::ShopSalary)?;
    let controller = &ctx.controller;

    match args.command {
        SalaryCommand::Overview(dates) => {
            let range = range(&dates)?;
            let result = controller
                .execute(CoreCommand::CalculateAllSalaries { range })
                .await?;
            let CommandResult::SalaryOverview(lines) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(
                global.output,
                lines.as_slice(),
                |l| SalaryRow::from(l),
                |l| format!("{}\t{:.2}", l.employee_id, l.salary),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SalaryCommand::Summary { id, range: dates } => {
            let range = range(&dates)?;
            let summary = fetch_summary(ctx, &id, range).await?;
            let report = SalaryReport::new(summary.as_ref().clone(), range);
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => {
                    let bytes = PlainTextReport.render(&report)?;
                    String::from_utf8_lossy(&bytes).into_owned()
                }
                format => output::render_single(format, &report, |_| Vec::new(), |_| String::new())?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        SalaryCommand::Calc { id, range: dates } => {
            let range = range(&dates)?;
            let result = controller
                .execute(CoreCommand::CalculateEmployeeSalary {
                    id: util::id(&id),
                    range,
                })
                .await?;
            let CommandResult::SalaryCalculation(calc) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_single(global.output, &calc, calculation_detail, |c| {
                output::fixed2(c.salary)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SalaryCommand::Export {
            id,
            range: dates,
            format,
            dir,
        } => {
            let range = range(&dates)?;
            let summary = fetch_summary(ctx, &id, range).await?;
            let report = SalaryReport::new(summary.as_ref().clone(), range);

            let renderer: &dyn SalaryReportRenderer = match format {
                ReportFormat::Text => &PlainTextReport,
                ReportFormat::Json => &JsonReport,
            };
            let bytes = renderer.render(&report)?;
            let path = dir
                .unwrap_or_else(|| ".".into())
                .join(report.file_name(renderer));
            std::fs::write(&path, &bytes)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "salary report written");

            output::status(global, &format!("Report saved to {}", path.display()));
            Ok(())
        }
    }
}
