// Per-resource REST client.
//
// Every backend resource group follows the same conventions:
//   GET    /{path}            list (optional query filter)
//   GET    /{path}/{id}       fetch one
//   POST   /{path}            create (JSON or multipart)
//   PUT    /{path}/{id}       update (JSON or multipart)
//   DELETE /{path}/{id}       delete
// plus resource-specific sub-paths reached through `fetch` / `submit`.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::Error;
use crate::request::{ApiRequest, MultipartBody};

/// REST operations for one resource group.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    api: ApiClient,
    path: Vec<String>,
}

impl ResourceClient {
    pub(crate) fn new(api: ApiClient, path: &str) -> Self {
        let path = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self { api, path }
    }

    /// The resource's path segments below the API root.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    fn segments(&self, tail: &[&str]) -> Vec<String> {
        self.path
            .iter()
            .cloned()
            .chain(tail.iter().map(|s| (*s).to_owned()))
            .collect()
    }

    // ── CRUD ─────────────────────────────────────────────────────────

    pub async fn list<T, Q>(&self, query: &Q) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = ApiRequest::get(self.segments(&[])).query(query)?;
        self.api.send(req).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: &str) -> Result<T, Error> {
        self.api.send(ApiRequest::get(self.segments(&[id]))).await
    }

    pub async fn create<T, B>(&self, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = ApiRequest::new(Method::POST, self.segments(&[])).json(body)?;
        self.api.send(req).await
    }

    pub async fn create_multipart<T: DeserializeOwned>(
        &self,
        body: MultipartBody,
    ) -> Result<T, Error> {
        let req = ApiRequest::new(Method::POST, self.segments(&[])).multipart(body);
        self.api.send(req).await
    }

    pub async fn update<T, B>(&self, id: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = ApiRequest::new(Method::PUT, self.segments(&[id])).json(body)?;
        self.api.send(req).await
    }

    pub async fn update_multipart<T: DeserializeOwned>(
        &self,
        id: &str,
        body: MultipartBody,
    ) -> Result<T, Error> {
        let req = ApiRequest::new(Method::PUT, self.segments(&[id])).multipart(body);
        self.api.send(req).await
    }

    /// Delete by id. The response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let req = ApiRequest::new(Method::DELETE, self.segments(&[id]));
        self.api.send_empty(req).await
    }

    // ── Extensions ───────────────────────────────────────────────────

    /// `GET /{path}/{sub...}` with a query filter.
    pub async fn fetch<T, Q>(&self, sub: &[&str], query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = ApiRequest::get(self.segments(sub)).query(query)?;
        self.api.send(req).await
    }

    /// `POST /{path}/{sub...}` with a JSON body.
    pub async fn submit<T, B>(&self, sub: &[&str], body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = ApiRequest::new(Method::POST, self.segments(sub)).json(body)?;
        self.api.send(req).await
    }
}
