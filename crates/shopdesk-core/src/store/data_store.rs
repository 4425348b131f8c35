// ── Central application state ──
//
// Owns one slice per backend resource plus the auxiliary value slots the
// views read (dashboards, stats, salary reports).

use std::sync::Arc;

use super::slice::{ResourceSlice, SliceState, ValueSlot, ValueState};
use crate::model::{
    Admin, AdminStats, Employee, Payout, Punching, Rota, SalaryCalculation, SalaryLine,
    SalarySummary, Shop, ShopDashboard,
};
use crate::stream::StateStream;

/// Application state for every resource.
pub struct DataStore {
    pub(crate) shops: ResourceSlice<Shop>,
    pub(crate) shop_dashboard: ValueSlot<ShopDashboard>,
    pub(crate) employees: ResourceSlice<Employee>,
    pub(crate) salary_overview: ValueSlot<Vec<SalaryLine>>,
    pub(crate) salary_summary: ValueSlot<SalarySummary>,
    pub(crate) salary_calculation: ValueSlot<SalaryCalculation>,
    pub(crate) rotas: ResourceSlice<Rota>,
    pub(crate) punchings: ResourceSlice<Punching>,
    pub(crate) payouts: ResourceSlice<Payout>,
    pub(crate) admins: ResourceSlice<Admin>,
    pub(crate) unassigned_admins: ValueSlot<Vec<Admin>>,
    pub(crate) admin_stats: ValueSlot<AdminStats>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            shops: ResourceSlice::new("shops"),
            shop_dashboard: ValueSlot::new("shop_dashboard"),
            employees: ResourceSlice::new("employees"),
            salary_overview: ValueSlot::new("salary_overview"),
            salary_summary: ValueSlot::new("salary_summary"),
            salary_calculation: ValueSlot::new("salary_calculation"),
            rotas: ResourceSlice::new("rotas"),
            punchings: ResourceSlice::new("punchings"),
            payouts: ResourceSlice::new("payouts"),
            admins: ResourceSlice::new("admins"),
            unassigned_admins: ValueSlot::new("unassigned_admins"),
            admin_stats: ValueSlot::new("admin_stats"),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn shops_snapshot(&self) -> Arc<SliceState<Shop>> {
        self.shops.snapshot()
    }

    pub fn employees_snapshot(&self) -> Arc<SliceState<Employee>> {
        self.employees.snapshot()
    }

    pub fn rotas_snapshot(&self) -> Arc<SliceState<Rota>> {
        self.rotas.snapshot()
    }

    pub fn punchings_snapshot(&self) -> Arc<SliceState<Punching>> {
        self.punchings.snapshot()
    }

    pub fn payouts_snapshot(&self) -> Arc<SliceState<Payout>> {
        self.payouts.snapshot()
    }

    pub fn admins_snapshot(&self) -> Arc<SliceState<Admin>> {
        self.admins.snapshot()
    }

    pub fn shop_dashboard_snapshot(&self) -> Arc<ValueState<ShopDashboard>> {
        self.shop_dashboard.snapshot()
    }

    pub fn admin_stats_snapshot(&self) -> Arc<ValueState<AdminStats>> {
        self.admin_stats.snapshot()
    }

    pub fn unassigned_admins_snapshot(&self) -> Arc<ValueState<Vec<Admin>>> {
        self.unassigned_admins.snapshot()
    }

    pub fn salary_overview_snapshot(&self) -> Arc<ValueState<Vec<SalaryLine>>> {
        self.salary_overview.snapshot()
    }

    pub fn salary_summary_snapshot(&self) -> Arc<ValueState<SalarySummary>> {
        self.salary_summary.snapshot()
    }

    pub fn salary_calculation_snapshot(&self) -> Arc<ValueState<SalaryCalculation>> {
        self.salary_calculation.snapshot()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_shops(&self) -> StateStream<SliceState<Shop>> {
        StateStream::new(self.shops.subscribe())
    }

    pub fn subscribe_employees(&self) -> StateStream<SliceState<Employee>> {
        StateStream::new(self.employees.subscribe())
    }

    pub fn subscribe_rotas(&self) -> StateStream<SliceState<Rota>> {
        StateStream::new(self.rotas.subscribe())
    }

    pub fn subscribe_punchings(&self) -> StateStream<SliceState<Punching>> {
        StateStream::new(self.punchings.subscribe())
    }

    pub fn subscribe_payouts(&self) -> StateStream<SliceState<Payout>> {
        StateStream::new(self.payouts.subscribe())
    }

    pub fn subscribe_admins(&self) -> StateStream<SliceState<Admin>> {
        StateStream::new(self.admins.subscribe())
    }

    pub fn subscribe_shop_dashboard(&self) -> StateStream<ValueState<ShopDashboard>> {
        StateStream::new(self.shop_dashboard.subscribe())
    }

    pub fn subscribe_admin_stats(&self) -> StateStream<ValueState<AdminStats>> {
        StateStream::new(self.admin_stats.subscribe())
    }

    pub fn subscribe_salary_overview(&self) -> StateStream<ValueState<Vec<SalaryLine>>> {
        StateStream::new(self.salary_overview.subscribe())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
