// ── Salary types ──
//
// All salary figures are computed by the backend; these types only carry
// them. Requests are bounded by an inclusive `DateRange`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::employee::PayType;
use super::entity_id::EntityId;
use super::lenient;
use crate::error::CoreError;

/// Inclusive date range, serialized as `{from, to}` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::ValidationFailed {
                message: format!("date range starts after it ends ({from} > {to})"),
            });
        }
        Ok(Self { from, to })
    }

    /// Parse two `YYYY-MM-DD` strings.
    pub fn parse(from: &str, to: &str) -> Result<Self, CoreError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| CoreError::ValidationFailed {
                message: format!("invalid date {s:?}: {e}"),
            })
        };
        Self::new(parse(from)?, parse(to)?)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// One row of `GET /employees/all/calc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryLine {
    pub employee_id: EntityId,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub pay_type: Option<PayType>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_hours: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub days_worked: u64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub hourly_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub salary: f64,
}

/// One day of a salary summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBreakdown {
    pub date: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub hours: f64,
    /// Where the hours came from (punching or rota).
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub punch_in: Option<String>,
    #[serde(default)]
    pub punch_out: Option<String>,
}

/// `GET /employees/summary/:id` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub pay_type: Option<PayType>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub hourly_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_hours: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_days: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub salary: f64,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyBreakdown>,
}

/// `GET /employees/employee/:id/calc` payload. Only the totals are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<PayType>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_hours: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero", alias = "daysWorked")]
    pub total_days: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub salary: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
