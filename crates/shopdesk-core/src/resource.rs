// ── Generic resource operations ──
//
// One implementation of list / get / create / update / remove shared by
// every backend collection. A `Resource` impl binds an entity type to its
// base path, its slice in the DataStore and its payload types; the
// request lifecycle (pending → fulfilled | rejected) lives here once.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopdesk_api::{MultipartBody, ResourceClient};
use tracing::{debug, info};

use crate::command::requests::{
    CreateAdminRequest, CreateEmployeeRequest, CreatePayoutRequest, CreateRotaRequest,
    CreateShopRequest, NoFilter, PayoutFilter, PunchInRequest, PunchingFilter, RotaFilter,
    UpdateAdminRequest, UpdateEmployeeRequest, UpdateRotaRequest, UpdateShopRequest,
};
use crate::controller::{ControllerInner, Notification};
use crate::error::CoreError;
use crate::model::{Admin, Employee, Entity, EntityId, Payout, Punching, Rota, Shop};
use crate::store::{DataStore, Placement, ResourceSlice};

/// Request body for a create or update.
#[derive(Debug)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartBody),
}

impl Payload {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, CoreError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| CoreError::ValidationFailed {
                message: format!("cannot encode request body: {e}"),
            })
    }
}

/// A mutation kind, used to phrase notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Input type for resources the backend never updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoUpdate {}

/// A backend collection managed as a resource slice.
pub trait Resource: Entity + DeserializeOwned + Send + Sync + 'static {
    /// Plural collection name (`"shops"`), used in load failures.
    const NAME: &'static str;
    /// Singular noun (`"shop"`), used in mutation failures.
    const NOUN: &'static str;
    /// Capitalised label for success notifications.
    const LABEL: &'static str;
    /// Base path below the API root.
    const PATH: &'static str;
    /// Sub-path the list lives at, if not the base path itself.
    const LIST_SUBPATH: &'static [&'static str] = &[];
    /// Sub-path creates are posted to. Multipart creates always use the
    /// base path.
    const CREATE_SUBPATH: &'static [&'static str] = &[];
    const CREATE_PLACEMENT: Placement = Placement::Append;

    type Filter: Serialize + Send + Sync;
    type Create: Send;
    type Update: Send;

    fn create_body(input: Self::Create) -> Result<Payload, CoreError>;
    fn update_body(input: Self::Update) -> Result<Payload, CoreError>;
    fn slice(store: &DataStore) -> &ResourceSlice<Self>;

    fn success_message(mutation: Mutation) -> String {
        let past = match mutation {
            Mutation::Create => "created",
            Mutation::Update => "updated",
            Mutation::Delete => "deleted",
        };
        format!("{} {past}", Self::LABEL)
    }

    fn failure_fallback(mutation: Mutation) -> String {
        format!("Failed to {mutation} {}", Self::NOUN)
    }
}

// ── Resource impls ───────────────────────────────────────────────────

impl Resource for Shop {
    const NAME: &'static str = "shops";
    const NOUN: &'static str = "shop";
    const LABEL: &'static str = "Shop";
    const PATH: &'static str = "shops";

    type Filter = NoFilter;
    type Create = CreateShopRequest;
    type Update = UpdateShopRequest;

    fn create_body(input: CreateShopRequest) -> Result<Payload, CoreError> {
        Ok(Payload::Multipart(input.into_multipart()))
    }

    fn update_body(input: UpdateShopRequest) -> Result<Payload, CoreError> {
        Ok(Payload::Multipart(input.into_multipart()))
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.shops
    }
}

impl Resource for Employee {
    const NAME: &'static str = "employees";
    const NOUN: &'static str = "employee";
    const LABEL: &'static str = "Employee";
    const PATH: &'static str = "employees";

    type Filter = NoFilter;
    type Create = CreateEmployeeRequest;
    type Update = UpdateEmployeeRequest;

    fn create_body(input: CreateEmployeeRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn update_body(input: UpdateEmployeeRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.employees
    }
}

impl Resource for Rota {
    const NAME: &'static str = "rotas";
    const NOUN: &'static str = "rota";
    const LABEL: &'static str = "Rota";
    const PATH: &'static str = "rotas";

    type Filter = RotaFilter;
    type Create = CreateRotaRequest;
    type Update = UpdateRotaRequest;

    fn create_body(input: CreateRotaRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn update_body(input: UpdateRotaRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.rotas
    }
}

impl Resource for Punching {
    const NAME: &'static str = "punchings";
    const NOUN: &'static str = "punching";
    const LABEL: &'static str = "Punching";
    const PATH: &'static str = "punchings";
    const CREATE_SUBPATH: &'static [&'static str] = &["in"];
    const CREATE_PLACEMENT: Placement = Placement::Prepend;

    type Filter = PunchingFilter;
    type Create = PunchInRequest;
    type Update = NoUpdate;

    fn create_body(input: PunchInRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn update_body(input: NoUpdate) -> Result<Payload, CoreError> {
        match input {}
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.punchings
    }

    fn success_message(mutation: Mutation) -> String {
        match mutation {
            Mutation::Create => "Punch in successful".into(),
            other => format!("{} {other}d", Self::LABEL),
        }
    }

    fn failure_fallback(mutation: Mutation) -> String {
        match mutation {
            Mutation::Create => "Punch in failed".into(),
            other => format!("Failed to {other} punching"),
        }
    }
}

impl Resource for Payout {
    const NAME: &'static str = "payouts";
    const NOUN: &'static str = "payout";
    const LABEL: &'static str = "Payout";
    const PATH: &'static str = "payouts";

    type Filter = PayoutFilter;
    type Create = CreatePayoutRequest;
    type Update = NoUpdate;

    fn create_body(input: CreatePayoutRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn update_body(input: NoUpdate) -> Result<Payload, CoreError> {
        match input {}
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.payouts
    }
}

impl Resource for Admin {
    const NAME: &'static str = "admins";
    const NOUN: &'static str = "admin";
    const LABEL: &'static str = "Shop admin";
    const PATH: &'static str = "admin";
    const LIST_SUBPATH: &'static [&'static str] = &["with-shops"];
    const CREATE_PLACEMENT: Placement = Placement::Prepend;

    type Filter = NoFilter;
    type Create = CreateAdminRequest;
    type Update = UpdateAdminRequest;

    fn create_body(input: CreateAdminRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn update_body(input: UpdateAdminRequest) -> Result<Payload, CoreError> {
        Payload::json(&input)
    }

    fn slice(store: &DataStore) -> &ResourceSlice<Self> {
        &store.admins
    }
}

// ── ResourceOps ──────────────────────────────────────────────────────

/// Async operations on one resource slice.
///
/// Each operation marks the slice pending, performs the request, then
/// either applies the result through the slice reducers or records the
/// failure message. Mutations also publish a [`Notification`].
pub struct ResourceOps<R: Resource> {
    inner: Arc<ControllerInner>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceOps<R> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.inner))
    }
}

impl<R: Resource> ResourceOps<R> {
    pub(crate) fn new(inner: Arc<ControllerInner>) -> Self {
        Self {
            inner,
            _resource: PhantomData,
        }
    }

    fn client(&self) -> ResourceClient {
        self.inner.api.resource(R::PATH)
    }

    pub fn slice(&self) -> &ResourceSlice<R> {
        R::slice(&self.inner.store)
    }

    fn fail(&self, err: &CoreError, fallback: &str) -> String {
        let message = err.user_message(fallback);
        debug!(resource = R::NAME, error = %err, "request failed");
        self.inner.notify(Notification::error(message.clone()));
        message
    }

    /// Fetch the collection and replace `items` with it.
    ///
    /// A response that arrives after a newer list request was issued is
    /// returned to the caller but not committed to the slice.
    pub async fn list(&self, filter: &R::Filter) -> Result<Vec<Arc<R>>, CoreError> {
        let slice = self.slice();
        let ticket = slice.begin_list();
        let client = self.client();
        let result: Result<Vec<R>, shopdesk_api::Error> = if R::LIST_SUBPATH.is_empty() {
            client.list(filter).await
        } else {
            client.fetch(R::LIST_SUBPATH, filter).await
        };

        match result {
            Ok(items) => {
                let items: Vec<Arc<R>> = items.into_iter().map(Arc::new).collect();
                debug!(resource = R::NAME, count = items.len(), "list fetched");
                slice.fulfil_list(ticket, items.iter().cloned());
                Ok(items)
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = self.fail(&err, &format!("Failed to load {}", R::NAME));
                slice.reject_list(ticket, message);
                Err(err)
            }
        }
    }

    /// Fetch one entity into `selected`. `items` is left untouched.
    pub async fn get(&self, id: &EntityId) -> Result<Arc<R>, CoreError> {
        let slice = self.slice();
        slice.begin();
        match self.client().get::<R>(id.as_str()).await {
            Ok(entity) => Ok(slice.fulfil_one(entity)),
            Err(e) => {
                let err = CoreError::from(e);
                let message = self.fail(&err, &format!("Failed to fetch {}", R::NOUN));
                slice.reject(message);
                Err(err)
            }
        }
    }

    /// Create an entity and insert the server's echo into `items`.
    pub async fn create(&self, input: R::Create) -> Result<Arc<R>, CoreError> {
        let slice = self.slice();
        slice.begin();
        let result = match R::create_body(input) {
            Ok(payload) => self.send_create(payload).await.map_err(CoreError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(entity) => {
                let entity = slice.fulfil_create(entity, R::CREATE_PLACEMENT);
                info!(resource = R::NAME, id = %entity.id(), "created");
                self.inner
                    .notify(Notification::success(R::success_message(Mutation::Create)));
                Ok(entity)
            }
            Err(err) => {
                let message = self.fail(&err, &R::failure_fallback(Mutation::Create));
                slice.reject(message);
                Err(err)
            }
        }
    }

    async fn send_create(&self, payload: Payload) -> Result<R, shopdesk_api::Error> {
        let client = self.client();
        match payload {
            Payload::Json(body) if R::CREATE_SUBPATH.is_empty() => client.create(&body).await,
            Payload::Json(body) => client.submit(R::CREATE_SUBPATH, &body).await,
            Payload::Multipart(body) => client.create_multipart(body).await,
        }
    }

    /// Update an entity and replace it in `items` by id. An id not in
    /// `items` leaves the collection unchanged.
    pub async fn update(&self, id: &EntityId, input: R::Update) -> Result<Arc<R>, CoreError> {
        let slice = self.slice();
        slice.begin();
        let client = self.client();
        let result = match R::update_body(input) {
            Ok(Payload::Json(body)) => client
                .update::<R, _>(id.as_str(), &body)
                .await
                .map_err(CoreError::from),
            Ok(Payload::Multipart(body)) => client
                .update_multipart::<R>(id.as_str(), body)
                .await
                .map_err(CoreError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(entity) => {
                let entity = slice.fulfil_update(entity);
                info!(resource = R::NAME, id = %entity.id(), "updated");
                self.inner
                    .notify(Notification::success(R::success_message(Mutation::Update)));
                Ok(entity)
            }
            Err(err) => {
                let message = self.fail(&err, &R::failure_fallback(Mutation::Update));
                slice.reject(message);
                Err(err)
            }
        }
    }

    /// Delete an entity and drop it from `items`. Returns the removed id.
    pub async fn remove(&self, id: &EntityId) -> Result<EntityId, CoreError> {
        let slice = self.slice();
        slice.begin();
        match self.client().delete(id.as_str()).await {
            Ok(()) => {
                slice.fulfil_remove(id);
                info!(resource = R::NAME, %id, "deleted");
                self.inner
                    .notify(Notification::success(R::success_message(Mutation::Delete)));
                Ok(id.clone())
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = self.fail(&err, &R::failure_fallback(Mutation::Delete));
                slice.reject(message);
                Err(err)
            }
        }
    }
}
