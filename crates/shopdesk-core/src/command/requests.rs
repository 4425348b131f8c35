// ── Typed request payloads ──
//
// Input shapes for every create/update operation and list filter. JSON
// payloads serialize straight to the backend's camelCase bodies; shop
// payloads are sent as multipart forms because they carry the logo file.

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use shopdesk_api::{FilePart, MultipartBody};

use crate::model::{EntityId, PayType};

fn expose<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(secret.expose_secret())
}

#[allow(clippy::ref_option)]
fn expose_opt<S: Serializer>(secret: &Option<SecretString>, s: S) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => s.serialize_str(secret.expose_secret()),
        None => s.serialize_none(),
    }
}

#[allow(clippy::ref_option)]
fn blank_secret(secret: &Option<SecretString>) -> bool {
    secret
        .as_ref()
        .is_none_or(|s| s.expose_secret().trim().is_empty())
}

// ── Shop ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateShopRequest {
    pub name: String,
    pub logo: FilePart,
    pub address: String,
    pub site: String,
    pub phone_number: String,
    pub rent: Option<f64>,
    pub bills: Option<f64>,
    /// `HH:MM`.
    pub open_time: String,
    pub close_time: String,
    pub admin_id: Option<EntityId>,
}

impl CreateShopRequest {
    pub fn into_multipart(self) -> MultipartBody {
        MultipartBody::new()
            .text("name", self.name)
            .text("address", self.address)
            .text("site", self.site)
            .text("phoneNumber", self.phone_number)
            .opt_text("rent", self.rent)
            .opt_text("bills", self.bills)
            .text("openTime", self.open_time)
            .text("closeTime", self.close_time)
            .opt_text("adminId", self.admin_id)
            .file(self.logo)
    }
}

/// Partial shop update; only fields that are set are sent.
#[derive(Debug, Clone, Default)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub logo: Option<FilePart>,
    pub address: Option<String>,
    pub site: Option<String>,
    pub phone_number: Option<String>,
    pub rent: Option<f64>,
    pub bills: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub admin_id: Option<EntityId>,
}

impl UpdateShopRequest {
    pub fn into_multipart(self) -> MultipartBody {
        let body = MultipartBody::new()
            .opt_text("name", self.name)
            .opt_text("address", self.address)
            .opt_text("site", self.site)
            .opt_text("phoneNumber", self.phone_number)
            .opt_text("rent", self.rent)
            .opt_text("bills", self.bills)
            .opt_text("openTime", self.open_time)
            .opt_text("closeTime", self.close_time)
            .opt_text("adminId", self.admin_id);
        match self.logo {
            Some(logo) => body.file(logo),
            None => body,
        }
    }
}

// ── Employee ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ni_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_timing: Option<String>,
    pub pay_type: PayType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ni_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_timing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<PayType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
}

// ── Rota ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRotaRequest {
    pub employee_id: EntityId,
    pub shop_id: EntityId,
    pub shift_date: NaiveDate,
    /// `HH:MM`.
    pub scheduled_start: String,
    pub scheduled_end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRotaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ── Punchings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchInRequest {
    pub shop_id: EntityId,
    pub employee_id: EntityId,
    pub punch_in_datetime: DateTime<Utc>,
}

impl PunchInRequest {
    /// Punch in at the current instant.
    pub fn now(shop_id: EntityId, employee_id: EntityId) -> Self {
        Self {
            shop_id,
            employee_id,
            punch_in_datetime: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchOutRequest {
    pub employee_id: EntityId,
    pub shop_id: EntityId,
    pub punch_out_datetime: DateTime<Utc>,
}

impl PunchOutRequest {
    pub fn now(shop_id: EntityId, employee_id: EntityId) -> Self {
        Self {
            employee_id,
            shop_id,
            punch_out_datetime: Utc::now(),
        }
    }
}

// ── Payout ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutRequest {
    pub employee_id: EntityId,
    pub amount_paid: f64,
    pub payout_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_end_date: Option<NaiveDate>,
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Admin update. A blank password is never sent, so the stored one is kept.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAdminRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(serialize_with = "expose_opt", skip_serializing_if = "blank_secret")]
    pub password: Option<SecretString>,
}

// ── List filters ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotaFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityId>,
}

/// Filter for resources whose list takes no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl Serialize for NoFilter {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_none()
    }
}
