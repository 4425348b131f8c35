// Bearer-token sourcing and the login endpoint.
//
// The client never caches a token: every request asks its `TokenSource`,
// so a login or logout elsewhere takes effect on the very next call.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

/// Supplies the bearer token attached to outgoing requests.
pub trait TokenSource: Send + Sync {
    /// The current token, or `None` when no session exists.
    fn token(&self) -> Option<SecretString>;
}

/// Never attaches a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<SecretString> {
        None
    }
}

/// Always attaches the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<SecretString> {
        Some(self.0.clone())
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful `POST /auth/login` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: SecretString,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// Any non-2xx response becomes [`Error::Authentication`] carrying the
    /// backend's message, or the HTTP status text when the body had none.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthPayload, Error> {
        let url = self.url(&["auth", "login"])?;
        debug!("POST {url} (login as {email})");

        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let resp = self.http().post(url).json(&body).send().await?;

        match self.handle_response(resp).await {
            Ok(payload) => Ok(payload),
            Err(Error::Api { status, message }) => Err(Error::Authentication {
                message: message.unwrap_or_else(|| format!("HTTP {status}")),
            }),
            Err(e) => Err(e),
        }
    }
}
