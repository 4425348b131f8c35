// ── Aggregate dashboards ──

use serde::{Deserialize, Serialize};

use super::lenient;
use super::rota::Rota;

/// `GET /shops/dashboard` payload (the `data` object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopDashboard {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_employees: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub todays_punches: u64,
    #[serde(default)]
    pub upcoming_shifts: Vec<Rota>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub weekly_payout: f64,
}

/// `GET /admin/stats` payload. Every counter defaults to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_shops: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_shop_admins: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_employees: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub rotas_this_week: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub punches_today: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub salaries_generated: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_default_missing_counters() {
        let stats: AdminStats = serde_json::from_value(json!({ "totalShops": 4 })).unwrap();
        assert_eq!(
            stats,
            AdminStats {
                total_shops: 4,
                ..AdminStats::default()
            }
        );
    }

    #[test]
    fn dashboard_decodes_upcoming_shifts() {
        let d: ShopDashboard = serde_json::from_value(json!({
            "totalEmployees": 5,
            "todaysPunches": 2,
            "weeklyPayout": "1250.50",
            "upcomingShifts": [{
                "_id": "r1",
                "shiftDate": "2025-12-02T00:00:00.000Z",
                "scheduledStart": "09:00",
                "scheduledEnd": "17:00",
                "employee": { "_id": "e1", "name": "Alice" }
            }]
        }))
        .unwrap();
        assert_eq!(d.total_employees, 5);
        assert_eq!(d.weekly_payout, 1250.5);
        assert_eq!(d.upcoming_shifts[0].shift_day(), Some("2025-12-02"));
        assert_eq!(d.upcoming_shifts[0].shift_window(), "09:00 - 17:00");
    }
}
