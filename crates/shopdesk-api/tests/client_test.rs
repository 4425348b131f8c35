#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` / `ResourceClient` using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use shopdesk_api::{
    ApiClient, Error, FilePart, MultipartBody, NoToken, StaticToken, TokenSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(tokens: Arc<dyn TokenSource>) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, tokens);
    (server, client)
}

async fn setup() -> (MockServer, ApiClient) {
    setup_with(Arc::new(StaticToken::new("tok-123"))).await
}

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    #[serde(rename = "_id")]
    id: String,
    name: String,
}

// ── Token injection ─────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let items: Vec<Item> = client.resource("shops").list(&()).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_no_token_no_header() {
    let (server, client) = setup_with(Arc::new(NoToken)).await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _: Vec<Item> = client.resource("shops").list(&()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_read_per_request() {
    struct Rotating(std::sync::Mutex<u32>);
    impl TokenSource for Rotating {
        fn token(&self) -> Option<SecretString> {
            let mut n = self.0.lock().unwrap();
            *n += 1;
            Some(SecretString::from(format!("tok-{n}")))
        }
    }

    let (server, client) = setup_with(Arc::new(Rotating(std::sync::Mutex::new(0)))).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rotas = client.resource("rotas");
    let _: Vec<Item> = rotas.list(&()).await.unwrap();
    let _: Vec<Item> = rotas.list(&()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let tokens: Vec<&str> = requests
        .iter()
        .map(|r: &Request| r.headers.get("authorization").unwrap().to_str().unwrap())
        .collect();
    assert_eq!(tokens, vec!["Bearer tok-1", "Bearer tok-2"]);
}

// ── CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_with_query_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rotas"))
        .and(query_param("shopId", "s1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "_id": "r1", "name": "Early" }])),
        )
        .mount(&server)
        .await;

    let items: Vec<Item> = client
        .resource("rotas")
        .list(&json!({ "shopId": "s1", "employeeId": null }))
        .await
        .unwrap();
    assert_eq!(
        items,
        vec![Item {
            id: "r1".into(),
            name: "Early".into()
        }]
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("shopId=s1"));
}

#[tokio::test]
async fn test_create_sends_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({ "name": "Alice" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "_id": "e1", "name": "Alice" })),
        )
        .mount(&server)
        .await;

    let created: Item = client
        .resource("employees")
        .create(&json!({ "name": "Alice" }))
        .await
        .unwrap();
    assert_eq!(created.id, "e1");
}

#[tokio::test]
async fn test_update_and_delete_use_id_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/payouts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_id": "p1", "name": "x" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/payouts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let payouts = client.resource("payouts");
    let _: Item = payouts.update("p1", &json!({ "name": "x" })).await.unwrap();
    payouts.delete("p1").await.unwrap();
}

#[tokio::test]
async fn test_ids_are_percent_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_id": "a/b", "name": "x" })))
        .expect(1)
        .mount(&server)
        .await;

    let item: Item = client.resource("shops").get("a/b").await.unwrap();
    assert_eq!(item.id, "a/b");
}

#[tokio::test]
async fn test_multipart_create() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shops"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "s1", "name": "Corner" })))
        .mount(&server)
        .await;

    let body = MultipartBody::new().text("name", "Corner").file(FilePart {
        field: "logo".into(),
        file_name: "logo.png".into(),
        mime: Some("image/png".into()),
        bytes: bytes::Bytes::from_static(b"\x89PNG"),
    });
    let created: Item = client.resource("shops").create_multipart(body).await.unwrap();
    assert_eq!(created.id, "s1");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
    let raw = String::from_utf8_lossy(&requests[0].body);
    assert!(raw.contains("name=\"name\""));
    assert!(raw.contains("filename=\"logo.png\""));
}

#[tokio::test]
async fn test_fetch_and_submit_sub_paths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/employees/all/calc"))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("to", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/punchings/in"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "_id": "p9", "name": "in" })))
        .mount(&server)
        .await;

    let overview: Value = client
        .resource("employees")
        .fetch(&["all", "calc"], &json!({ "from": "2024-01-01", "to": "2024-01-31" }))
        .await
        .unwrap();
    assert_eq!(overview, json!({ "data": [] }));

    let punched: Item = client
        .resource("punchings")
        .submit(&["in"], &json!({ "employeeId": "e1" }))
        .await
        .unwrap();
    assert_eq!(punched.id, "p9");
}

// ── Error normalization ─────────────────────────────────────────────

#[tokio::test]
async fn test_error_message_extracted() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Email already exists" })),
        )
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.resource("admin").create(&json!({})).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }), "{err:?}");
    assert_eq!(err.server_message(), Some("Email already exists"));
}

#[tokio::test]
async fn test_error_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result: Result<Vec<Item>, _> = client.resource("shops").list(&()).await;
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_deserialization_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result: Result<Vec<Item>, _> = client.resource("shops").list(&()).await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_deserialization_preview_respects_char_boundaries() {
    let (server, client) = setup().await;
    let body = format!("{}é and more", "a".repeat(199));

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let result: Result<Vec<Item>, _> = client.resource("shops").list(&()).await;
    match result {
        Err(Error::Deserialization { message, body: kept }) => {
            assert_eq!(kept, body);
            assert!(message.contains(&format!("{}é", "a".repeat(199))));
            assert!(!message.contains("and more"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let base_url = Url::parse("http://127.0.0.1:1/api").unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, Arc::new(NoToken));

    let result: Result<Vec<Item>, _> = client.resource("shops").list(&()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "{err:?}");
    assert!(err.is_transient());
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup_with(Arc::new(NoToken)).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "a@x.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "role": "ShopAdmin",
            "name": "Ann",
            "email": "a@x.com"
        })))
        .mount(&server)
        .await;

    let secret: SecretString = "pw".to_string().into();
    let auth = client.login("a@x.com", &secret).await.unwrap();
    assert_eq!(auth.token.expose_secret(), "jwt-abc");
    assert_eq!(auth.role, "ShopAdmin");
    assert_eq!(auth.name.as_deref(), Some("Ann"));
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup_with(Arc::new(NoToken)).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret: SecretString = "wrong".to_string().into();
    let result = client.login("a@x.com", &secret).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}
