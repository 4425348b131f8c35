// ── Salary report rendering ──
//
// Turns a fetched `SalarySummary` into a downloadable document. The
// layout is a header block of totals followed by the daily breakdown
// table; renderers decide the byte format.

use std::fmt::Write as _;

use bytes::Bytes;
use serde::Serialize;

use crate::error::CoreError;
use crate::model::{DateRange, SalarySummary};

const COLUMNS: [&str; 5] = ["Date", "Hours", "Source", "Punch In", "Punch Out"];

/// A salary summary for one employee over a date range.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryReport {
    pub summary: SalarySummary,
    pub range: DateRange,
}

impl SalaryReport {
    pub fn new(summary: SalarySummary, range: DateRange) -> Self {
        Self { summary, range }
    }

    pub fn file_name(&self, renderer: &dyn SalaryReportRenderer) -> String {
        report_file_name(&self.summary.employee_name, &self.range, renderer.extension())
    }

    fn rows(&self) -> Vec<[String; 5]> {
        self.summary
            .daily_breakdown
            .iter()
            .map(|day| {
                [
                    day.date.clone(),
                    format!("{:.2}", day.hours),
                    day.source.clone().unwrap_or_else(|| "-".into()),
                    day.punch_in.clone().unwrap_or_else(|| "-".into()),
                    day.punch_out.clone().unwrap_or_else(|| "-".into()),
                ]
            })
            .collect()
    }
}

/// `{name}_Salary_{from}_to_{to}.{ext}`. Path separators in the name are
/// replaced so the result is always a single file name.
pub fn report_file_name(name: &str, range: &DateRange, extension: &str) -> String {
    let name: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{name}_Salary_{}_to_{}.{extension}", range.from, range.to)
}

/// Renders a [`SalaryReport`] into a document.
pub trait SalaryReportRenderer: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;
    fn render(&self, report: &SalaryReport) -> Result<Bytes, CoreError>;
}

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

// ── Plain text ───────────────────────────────────────────────────────

/// Fixed-width text document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReport;

impl SalaryReportRenderer for PlainTextReport {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, report: &SalaryReport) -> Result<Bytes, CoreError> {
        let s = &report.summary;
        let pay_type = s
            .pay_type
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string);

        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| CoreError::Internal(format!("report formatting: {e}"));
        writeln!(out, "Salary Summary - {}", s.employee_name).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "Pay Type: {pay_type}").map_err(fmt_err)?;
        writeln!(out, "Period: {} to {}", report.range.from, report.range.to).map_err(fmt_err)?;
        writeln!(
            out,
            "Hourly Rate: {}    Daily Rate: {}",
            or_dash(s.hourly_rate),
            or_dash(s.daily_rate)
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Total Hours: {:.2}    Days Worked: {}",
            s.total_hours, s.total_days
        )
        .map_err(fmt_err)?;
        writeln!(out, "Salary: {:.2}", s.salary).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;

        let rows = report.rows();
        let mut widths = COLUMNS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 5]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            padded.join("  ").trim_end().to_owned()
        };

        writeln!(out, "{}", line(COLUMNS)).map_err(fmt_err)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "{}", rule.join("  ")).map_err(fmt_err)?;
        for row in &rows {
            let cells = [
                row[0].as_str(),
                row[1].as_str(),
                row[2].as_str(),
                row[3].as_str(),
                row[4].as_str(),
            ];
            writeln!(out, "{}", line(cells)).map_err(fmt_err)?;
        }

        Ok(Bytes::from(out))
    }
}

// ── JSON ─────────────────────────────────────────────────────────────

/// Pretty-printed JSON of the summary and range.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport;

impl SalaryReportRenderer for JsonReport {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &SalaryReport) -> Result<Bytes, CoreError> {
        serde_json::to_vec_pretty(report)
            .map(Bytes::from)
            .map_err(|e| CoreError::Internal(format!("report serialization: {e}")))
    }
}
