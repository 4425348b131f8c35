//! Reactive state layer between `shopdesk-api` and the views (CLI or any
//! other front end).
//!
//! - **[`Controller`]**: Central facade. Owns the API client, the
//!   [`DataStore`] and the session. Runs typed [`Command`]s through
//!   [`execute()`](Controller::execute) or spawns them with
//!   [`dispatch()`](Controller::dispatch), and publishes success / error
//!   [`Notification`]s on a broadcast channel.
//!
//! - **[`ResourceOps<R>`]**: One implementation of list / get / create /
//!   update / remove shared by shops, employees, rotas, punchings, payouts
//!   and admins. Each [`Resource`] binds an entity to its base path and
//!   slice.
//!
//! - **[`DataStore`]**: One [`ResourceSlice`] per collection plus
//!   [`ValueSlot`]s for dashboards, stats and salary reports. Snapshots are
//!   immutable `Arc`s published through `tokio::sync::watch`.
//!
//! - **[`SessionSlice`]**: The logged-in identity, hydrated from and
//!   persisted to a [`KeyValueStore`].
//!
//! - **[`guard`]**: Role-based route decisions.
//!
//! - **[`report`]**: Salary summary documents.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod guard;
pub mod model;
pub mod report;
pub mod resource;
pub mod session;
pub mod storage;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use config::{ClientConfig, DEFAULT_API_ROOT, DEFAULT_SESSION_KEY, TlsVerification};
pub use controller::{Controller, Notification, NotificationLevel};
pub use error::CoreError;
pub use guard::{GuardDecision, Route};
pub use report::{JsonReport, PlainTextReport, SalaryReport, SalaryReportRenderer};
pub use resource::{Mutation, NoUpdate, Payload, Resource, ResourceOps};
pub use session::{PersistedTokenSource, SessionSlice, SessionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{DataStore, Placement, ResourceSlice, SliceState, ValueSlot, ValueState};
pub use stream::{StateStream, StateWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Admin, AdminShop, AdminStats, DailyBreakdown, DateRange, Employee, Entity, EntityId,
    EntityRef, Identity, PayType, Payout, Punching, RefSummary, Role, Rota, SalaryCalculation,
    SalaryLine, SalarySummary, SessionRecord, Shop, ShopDashboard,
};

pub use shopdesk_api::FilePart;
