// HTTP client for the CRM REST backend
//
// Wraps `reqwest::Client` with URL construction under a single API root,
// per-request bearer injection, and uniform error normalization. Resource
// groups (`/shops`, `/employees`, ...) are reached through `ResourceClient`.

use std::fmt;
use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenSource;
use crate::error::Error;
use crate::request::{ApiRequest, RequestBody};
use crate::resource::ResourceClient;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the CRM backend.
///
/// Cheap to clone: the underlying connection pool and token source are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client rooted at `base_url` (e.g. `https://host/api`).
    pub fn new(
        base_url: Url,
        transport: &TransportConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, tokens))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// A client for one resource group, e.g. `resource("shops")`.
    pub fn resource(&self, path: &str) -> ResourceClient {
        ResourceClient::new(self.clone(), path)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded `segments` to the API root.
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidRequest(format!("{} cannot be a base", self.base_url)))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Send a request and decode the JSON response body.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let resp = self.execute(request).await?;
        self.handle_response(resp).await
    }

    /// Send a request whose response body is irrelevant.
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), Error> {
        let resp = self.execute(request).await?;
        self.handle_empty(resp).await
    }

    async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response, Error> {
        let url = self.url(&request.segments)?;
        if request.query.is_empty() {
            debug!("{} {url}", request.method);
        } else {
            debug!("{} {url} params={:?}", request.method, request.query);
        }

        let mut builder = self.http.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(body) => builder.multipart(body.into_form()?),
        };

        Ok(builder.send().await?)
    }

    // ── Response handling ────────────────────────────────────────────

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty());

        debug!(
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "request failed"
        );

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
