// ── Domain model ──
//
// Canonical types for every backend resource. Unknown fields are kept in
// each entity's `extra` map so nothing the backend sends is lost.

pub mod admin;
pub mod dashboard;
pub mod employee;
pub mod entity_id;
pub mod identity;
pub(crate) mod lenient;
pub mod payout;
pub mod punching;
pub mod rota;
pub mod salary;
pub mod shop;

use serde::Deserialize;

pub use admin::{Admin, AdminShop};
pub use dashboard::{AdminStats, ShopDashboard};
pub use employee::{Employee, PayType};
pub use entity_id::{EntityId, EntityRef, RefSummary};
pub use identity::{Identity, Role, SessionRecord};
pub use payout::Payout;
pub use punching::Punching;
pub use rota::Rota;
pub use salary::{DailyBreakdown, DateRange, SalaryCalculation, SalaryLine, SalarySummary};
pub use shop::Shop;

/// Anything addressable by an [`EntityId`].
pub trait Entity {
    fn id(&self) -> &EntityId;
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &EntityId {
                &self.id
            }
        })+
    };
}

impl_entity!(Shop, Employee, Rota, Punching, Payout, Admin);

/// `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// A payload that may or may not be wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeEnveloped<T> {
    Wrapped(DataEnvelope<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped(envelope) => envelope.data,
            Self::Bare(value) => value,
        }
    }
}
