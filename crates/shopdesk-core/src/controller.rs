// ── Controller ──
//
// Owns the API client, the DataStore and the session slice. Every view
// action goes through here: resource CRUD via `resource::<R>()`, the
// resource-specific extensions below, and the typed `Command` router.

use std::future::Future;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info};

use crate::command::requests::{NoFilter, PunchInRequest, PunchOutRequest};
use crate::command::{Command, CommandResult};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::guard::{self, GuardDecision};
use crate::model::{
    Admin, AdminStats, DataEnvelope, DateRange, Employee, Entity, EntityId, Identity,
    MaybeEnveloped, Payout, Punching, Role, Rota, SalaryCalculation, SalaryLine, SalarySummary,
    Shop, ShopDashboard,
};
use crate::resource::{Resource, ResourceOps};
use crate::session::{SessionSlice, SessionState};
use crate::storage::KeyValueStore;
use crate::store::{DataStore, ValueSlot};
use crate::stream::StateStream;

use shopdesk_api::ApiClient;

const NOTIFICATION_CHANNEL_SIZE: usize = 64;

// ── Notification ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A user-facing message produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Construction hydrates the
/// session from storage; no request is made until an operation runs.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

pub(crate) struct ControllerInner {
    pub(crate) config: ClientConfig,
    pub(crate) api: ApiClient,
    pub(crate) store: DataStore,
    pub(crate) session: SessionSlice,
    notifications: broadcast::Sender<Notification>,
}

impl ControllerInner {
    pub(crate) fn notify(&self, notification: Notification) {
        // No subscribers is fine.
        let _ = self.notifications.send(notification);
    }
}

impl Controller {
    /// Build a controller whose session is persisted in `storage`.
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, CoreError> {
        let session = SessionSlice::new(storage, config.session_key.clone());
        let api = ApiClient::new(
            config.api_root.clone(),
            &config.transport(),
            Arc::new(session.token_source()),
        )?;
        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_SIZE);

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                store: DataStore::new(),
                session,
                notifications,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    /// Generic CRUD for one resource.
    pub fn resource<R: Resource>(&self) -> ResourceOps<R> {
        ResourceOps::new(Arc::clone(&self.inner))
    }

    /// Subscribe to success / error notifications.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Exchange credentials for a session and persist it.
    ///
    /// On failure the previous identity (if any) is kept.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<Identity>, CoreError> {
        let session = &self.inner.session;
        session.begin_login();

        let result = self
            .inner
            .api
            .login(email, password)
            .await
            .map_err(CoreError::from)
            .and_then(|payload| {
                let identity = Identity::from(payload);
                if identity.token.expose_secret().is_empty() || identity.role.as_str().is_empty() {
                    return Err(CoreError::AuthenticationFailed {
                        message: "login response carried no token or role".into(),
                    });
                }
                Ok(identity)
            });

        result
            .and_then(|identity| session.fulfil_login(identity))
            .map_err(|err| {
                let message = err.user_message("Login failed");
                debug!(error = %err, "login failed");
                self.inner.notify(Notification::error(message.clone()));
                session.reject_login(message);
                err
            })
    }

    /// Drop the session and its persisted record. Cached resource state is
    /// left alone.
    pub fn logout(&self) {
        self.inner.session.logout();
    }

    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.inner.session.identity()
    }

    pub fn session_snapshot(&self) -> Arc<SessionState> {
        self.inner.session.snapshot()
    }

    pub fn subscribe_session(&self) -> StateStream<SessionState> {
        StateStream::new(self.inner.session.subscribe())
    }

    // ── Guard ────────────────────────────────────────────────────────

    /// Guard decision for `path` given the current session.
    pub fn guard(&self, path: &str) -> GuardDecision {
        guard::resolve(self.identity().as_deref(), path)
    }

    /// Fail unless the session holds `role`.
    pub fn require_role(&self, role: &Role) -> Result<Arc<Identity>, CoreError> {
        let identity = self.identity().ok_or(CoreError::NotLoggedIn)?;
        if &identity.role == role {
            Ok(identity)
        } else {
            Err(CoreError::Forbidden {
                required: role.to_string(),
            })
        }
    }

    // ── Shop extensions ──────────────────────────────────────────────

    /// `GET /shops/dashboard`.
    pub async fn fetch_shop_dashboard(&self) -> Result<Arc<ShopDashboard>, CoreError> {
        let client = self.inner.api.resource(Shop::PATH);
        self.load_value(&self.inner.store.shop_dashboard, "Failed to load dashboard", async {
            client
                .fetch::<DataEnvelope<ShopDashboard>, _>(&["dashboard"], &NoFilter)
                .await
                .map(|envelope| envelope.data)
        })
        .await
    }

    // ── Admin extensions ─────────────────────────────────────────────

    /// `GET /admin/stats`.
    pub async fn fetch_admin_stats(&self) -> Result<Arc<AdminStats>, CoreError> {
        let client = self.inner.api.resource(Admin::PATH);
        self.load_value(&self.inner.store.admin_stats, "Failed to fetch stats", async {
            client
                .fetch::<MaybeEnveloped<AdminStats>, _>(&["stats"], &NoFilter)
                .await
                .map(MaybeEnveloped::into_inner)
        })
        .await
    }

    /// `GET /admin/unassigned`: shop admins not yet assigned to a shop.
    pub async fn fetch_unassigned_admins(&self) -> Result<Arc<Vec<Admin>>, CoreError> {
        let client = self.inner.api.resource(Admin::PATH);
        self.load_value(
            &self.inner.store.unassigned_admins,
            "Failed to fetch unassigned admins",
            async {
                client
                    .fetch::<MaybeEnveloped<Vec<Admin>>, _>(&["unassigned"], &NoFilter)
                    .await
                    .map(MaybeEnveloped::into_inner)
            },
        )
        .await
    }

    // ── Salary extensions ────────────────────────────────────────────

    /// `GET /employees/all/calc?from&to`: one line per employee.
    pub async fn calculate_all_salaries(
        &self,
        range: DateRange,
    ) -> Result<Arc<Vec<SalaryLine>>, CoreError> {
        let client = self.inner.api.resource(Employee::PATH);
        self.load_value(
            &self.inner.store.salary_overview,
            "Failed to calculate all salaries",
            async move {
                client
                    .fetch::<DataEnvelope<Vec<SalaryLine>>, _>(&["all", "calc"], &range)
                    .await
                    .map(|envelope| envelope.data)
            },
        )
        .await
    }

    /// `GET /employees/summary/:id?from&to`: totals plus a daily breakdown.
    pub async fn fetch_salary_summary(
        &self,
        id: &EntityId,
        range: DateRange,
    ) -> Result<Arc<SalarySummary>, CoreError> {
        let client = self.inner.api.resource(Employee::PATH);
        self.load_value(
            &self.inner.store.salary_summary,
            "Failed to fetch salary summary",
            async move {
                client
                    .fetch::<DataEnvelope<SalarySummary>, _>(&["summary", id.as_str()], &range)
                    .await
                    .map(|envelope| envelope.data)
            },
        )
        .await
    }

    /// `GET /employees/employee/:id/calc?from&to`.
    pub async fn calculate_employee_salary(
        &self,
        id: &EntityId,
        range: DateRange,
    ) -> Result<Arc<SalaryCalculation>, CoreError> {
        let client = self.inner.api.resource(Employee::PATH);
        self.load_value(
            &self.inner.store.salary_calculation,
            "Failed to calculate salary",
            async move {
                client
                    .fetch::<MaybeEnveloped<SalaryCalculation>, _>(
                        &["employee", id.as_str(), "calc"],
                        &range,
                    )
                    .await
                    .map(MaybeEnveloped::into_inner)
            },
        )
        .await
    }

    // ── Punching extensions ──────────────────────────────────────────

    /// `POST /punchings/in`. The new punching is prepended.
    pub async fn punch_in(&self, request: PunchInRequest) -> Result<Arc<Punching>, CoreError> {
        self.resource::<Punching>().create(request).await
    }

    /// `POST /punchings/out`. The closed punching replaces its open
    /// counterpart by id.
    pub async fn punch_out(&self, request: PunchOutRequest) -> Result<Arc<Punching>, CoreError> {
        let slice = &self.inner.store.punchings;
        slice.begin();
        let result = self
            .inner
            .api
            .resource(Punching::PATH)
            .submit::<Punching, _>(&["out"], &request)
            .await;

        match result {
            Ok(punching) => {
                let punching = slice.fulfil_update(punching);
                info!(id = %punching.id(), "punched out");
                self.inner
                    .notify(Notification::success("Punch out successful"));
                Ok(punching)
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = err.user_message("Punch out failed");
                self.inner.notify(Notification::error(message.clone()));
                slice.reject(message);
                Err(err)
            }
        }
    }

    async fn load_value<V, F>(
        &self,
        slot: &ValueSlot<V>,
        fallback: &str,
        request: F,
    ) -> Result<Arc<V>, CoreError>
    where
        V: Send + Sync + 'static,
        F: Future<Output = Result<V, shopdesk_api::Error>>,
    {
        let ticket = slot.begin();
        match request.await {
            Ok(value) => Ok(slot.fulfil(ticket, value)),
            Err(e) => {
                let err = CoreError::from(e);
                let message = err.user_message(fallback);
                debug!(slot = slot.name(), error = %err, "request failed");
                self.inner.notify(Notification::error(message.clone()));
                slot.reject(ticket, message);
                Err(err)
            }
        }
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a command and await its result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        route_command(self, cmd).await
    }

    /// Start a command without awaiting it. The receiver yields the result
    /// once the command settles; dropping it does not cancel the command.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, cmd: Command) -> oneshot::Receiver<Result<CommandResult, CoreError>> {
        let (tx, rx) = oneshot::channel();
        let controller = self.clone();
        tokio::spawn(async move {
            let result = route_command(&controller, cmd).await;
            let _ = tx.send(result);
        });
        rx
    }
}

// ── Command routing ──────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
async fn route_command(controller: &Controller, cmd: Command) -> Result<CommandResult, CoreError> {
    match cmd {
        // ── Session ──────────────────────────────────────────────
        Command::Login { email, password } => controller
            .login(&email, &password)
            .await
            .map(CommandResult::Identity),
        Command::Logout => {
            controller.logout();
            Ok(CommandResult::Ok)
        }

        // ── Shops ────────────────────────────────────────────────
        Command::ListShops => controller
            .resource::<Shop>()
            .list(&NoFilter)
            .await
            .map(CommandResult::Shops),
        Command::GetShop { id } => controller
            .resource::<Shop>()
            .get(&id)
            .await
            .map(CommandResult::Shop),
        Command::CreateShop(req) => controller
            .resource::<Shop>()
            .create(req)
            .await
            .map(CommandResult::Shop),
        Command::UpdateShop { id, update } => controller
            .resource::<Shop>()
            .update(&id, update)
            .await
            .map(CommandResult::Shop),
        Command::DeleteShop { id } => controller
            .resource::<Shop>()
            .remove(&id)
            .await
            .map(CommandResult::Removed),
        Command::FetchShopDashboard => controller
            .fetch_shop_dashboard()
            .await
            .map(CommandResult::ShopDashboard),

        // ── Employees ────────────────────────────────────────────
        Command::ListEmployees => controller
            .resource::<Employee>()
            .list(&NoFilter)
            .await
            .map(CommandResult::Employees),
        Command::GetEmployee { id } => controller
            .resource::<Employee>()
            .get(&id)
            .await
            .map(CommandResult::Employee),
        Command::CreateEmployee(req) => controller
            .resource::<Employee>()
            .create(req)
            .await
            .map(CommandResult::Employee),
        Command::UpdateEmployee { id, update } => controller
            .resource::<Employee>()
            .update(&id, update)
            .await
            .map(CommandResult::Employee),
        Command::DeleteEmployee { id } => controller
            .resource::<Employee>()
            .remove(&id)
            .await
            .map(CommandResult::Removed),
        Command::CalculateAllSalaries { range } => controller
            .calculate_all_salaries(range)
            .await
            .map(CommandResult::SalaryOverview),
        Command::FetchSalarySummary { id, range } => controller
            .fetch_salary_summary(&id, range)
            .await
            .map(CommandResult::SalarySummary),
        Command::CalculateEmployeeSalary { id, range } => controller
            .calculate_employee_salary(&id, range)
            .await
            .map(CommandResult::SalaryCalculation),

        // ── Rotas ────────────────────────────────────────────────
        Command::ListRotas(filter) => controller
            .resource::<Rota>()
            .list(&filter)
            .await
            .map(CommandResult::Rotas),
        Command::GetRota { id } => controller
            .resource::<Rota>()
            .get(&id)
            .await
            .map(CommandResult::Rota),
        Command::CreateRota(req) => controller
            .resource::<Rota>()
            .create(req)
            .await
            .map(CommandResult::Rota),
        Command::UpdateRota { id, update } => controller
            .resource::<Rota>()
            .update(&id, update)
            .await
            .map(CommandResult::Rota),
        Command::DeleteRota { id } => controller
            .resource::<Rota>()
            .remove(&id)
            .await
            .map(CommandResult::Removed),

        // ── Punchings ────────────────────────────────────────────
        Command::ListPunchings(filter) => controller
            .resource::<Punching>()
            .list(&filter)
            .await
            .map(CommandResult::Punchings),
        Command::PunchIn(req) => controller.punch_in(req).await.map(CommandResult::Punching),
        Command::PunchOut(req) => controller.punch_out(req).await.map(CommandResult::Punching),

        // ── Payouts ──────────────────────────────────────────────
        Command::ListPayouts(filter) => controller
            .resource::<Payout>()
            .list(&filter)
            .await
            .map(CommandResult::Payouts),
        Command::CreatePayout(req) => controller
            .resource::<Payout>()
            .create(req)
            .await
            .map(CommandResult::Payout),
        Command::DeletePayout { id } => controller
            .resource::<Payout>()
            .remove(&id)
            .await
            .map(CommandResult::Removed),

        // ── Admins ───────────────────────────────────────────────
        Command::ListAdmins => controller
            .resource::<Admin>()
            .list(&NoFilter)
            .await
            .map(CommandResult::Admins),
        Command::CreateAdmin(req) => controller
            .resource::<Admin>()
            .create(req)
            .await
            .map(CommandResult::Admin),
        Command::UpdateAdmin { id, update } => controller
            .resource::<Admin>()
            .update(&id, update)
            .await
            .map(CommandResult::Admin),
        Command::DeleteAdmin { id } => controller
            .resource::<Admin>()
            .remove(&id)
            .await
            .map(CommandResult::Removed),
        Command::FetchUnassignedAdmins => controller
            .fetch_unassigned_admins()
            .await
            .map(CommandResult::UnassignedAdmins),
        Command::FetchAdminStats => controller
            .fetch_admin_stats()
            .await
            .map(CommandResult::AdminStats),
    }
}
