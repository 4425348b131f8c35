// shopdesk-api: Async Rust client for the shopdesk CRM REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod request;
pub mod resource;
pub mod transport;

pub use auth::{AuthPayload, NoToken, StaticToken, TokenSource};
pub use client::ApiClient;
pub use error::Error;
pub use request::{ApiRequest, FilePart, MultipartBody, RequestBody};
pub use resource::ResourceClient;
pub use transport::{TlsMode, TransportConfig};
