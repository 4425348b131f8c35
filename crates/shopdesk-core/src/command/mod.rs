// ── Command API ──
//
// Every operation a view can trigger, as a typed value. Commands are
// routed by `Controller::execute` (await the result) or
// `Controller::dispatch` (spawn and continue).

pub mod requests;

use std::sync::Arc;

use secrecy::SecretString;

use crate::model::{
    Admin, AdminStats, DateRange, Employee, EntityId, Identity, Payout, Punching, Rota,
    SalaryCalculation, SalaryLine, SalarySummary, Shop, ShopDashboard,
};
use requests::{
    CreateAdminRequest, CreateEmployeeRequest, CreatePayoutRequest, CreateRotaRequest,
    CreateShopRequest, PayoutFilter, PunchInRequest, PunchOutRequest, PunchingFilter, RotaFilter,
    UpdateAdminRequest, UpdateEmployeeRequest, UpdateRotaRequest, UpdateShopRequest,
};

/// All operations that can be sent through the controller.
#[derive(Debug)]
pub enum Command {
    // ── Session ──────────────────────────────────────────────────
    Login {
        email: String,
        password: SecretString,
    },
    Logout,

    // ── Shops ────────────────────────────────────────────────────
    ListShops,
    GetShop { id: EntityId },
    CreateShop(CreateShopRequest),
    UpdateShop {
        id: EntityId,
        update: UpdateShopRequest,
    },
    DeleteShop { id: EntityId },
    FetchShopDashboard,

    // ── Employees ────────────────────────────────────────────────
    ListEmployees,
    GetEmployee { id: EntityId },
    CreateEmployee(CreateEmployeeRequest),
    UpdateEmployee {
        id: EntityId,
        update: UpdateEmployeeRequest,
    },
    DeleteEmployee { id: EntityId },
    CalculateAllSalaries { range: DateRange },
    FetchSalarySummary { id: EntityId, range: DateRange },
    CalculateEmployeeSalary { id: EntityId, range: DateRange },

    // ── Rotas ────────────────────────────────────────────────────
    ListRotas(RotaFilter),
    GetRota { id: EntityId },
    CreateRota(CreateRotaRequest),
    UpdateRota {
        id: EntityId,
        update: UpdateRotaRequest,
    },
    DeleteRota { id: EntityId },

    // ── Punchings ────────────────────────────────────────────────
    ListPunchings(PunchingFilter),
    PunchIn(PunchInRequest),
    PunchOut(PunchOutRequest),

    // ── Payouts ──────────────────────────────────────────────────
    ListPayouts(PayoutFilter),
    CreatePayout(CreatePayoutRequest),
    DeletePayout { id: EntityId },

    // ── Admins ───────────────────────────────────────────────────
    ListAdmins,
    CreateAdmin(CreateAdminRequest),
    UpdateAdmin {
        id: EntityId,
        update: UpdateAdminRequest,
    },
    DeleteAdmin { id: EntityId },
    FetchUnassignedAdmins,
    FetchAdminStats,
}

/// Result of a successfully executed command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    Identity(Arc<Identity>),
    Removed(EntityId),
    Shop(Arc<Shop>),
    Shops(Vec<Arc<Shop>>),
    ShopDashboard(Arc<ShopDashboard>),
    Employee(Arc<Employee>),
    Employees(Vec<Arc<Employee>>),
    SalaryOverview(Arc<Vec<SalaryLine>>),
    SalarySummary(Arc<SalarySummary>),
    SalaryCalculation(Arc<SalaryCalculation>),
    Rota(Arc<Rota>),
    Rotas(Vec<Arc<Rota>>),
    Punching(Arc<Punching>),
    Punchings(Vec<Arc<Punching>>),
    Payout(Arc<Payout>),
    Payouts(Vec<Arc<Payout>>),
    Admin(Arc<Admin>),
    Admins(Vec<Arc<Admin>>),
    UnassignedAdmins(Arc<Vec<Admin>>),
    AdminStats(Arc<AdminStats>),
}
