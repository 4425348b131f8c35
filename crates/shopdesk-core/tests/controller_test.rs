#![allow(clippy::unwrap_used)]
// Integration tests for `Controller` against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use shopdesk_core::{
    ClientConfig, Command, CommandResult, Controller, CoreError, CreateAdminRequest,
    CreateEmployeeRequest, DateRange, Employee, EntityId, FileStore, GuardDecision,
    KeyValueStore, MemoryStore, NoFilter, NotificationLevel, PayType, PunchInRequest, Punching,
    Role, Rota, RotaFilter, Route, Shop, UpdateEmployeeRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(storage: Arc<dyn KeyValueStore>) -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let api_root = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let controller = Controller::new(ClientConfig::new(api_root), storage).unwrap();
    (server, controller)
}

async fn setup() -> (MockServer, Controller) {
    setup_with(Arc::new(MemoryStore::new())).await
}

fn employee(id: &str, name: &str) -> Value {
    json!({ "_id": id, "name": name, "payType": "Hourly", "hourlyRate": 12 })
}

fn rota(id: &str) -> Value {
    json!({
        "_id": id,
        "shiftDate": "2025-12-01T00:00:00.000Z",
        "scheduledStart": "09:00",
        "scheduledEnd": "17:00",
    })
}

fn ids<T: shopdesk_core::Entity>(items: &[Arc<T>]) -> Vec<String> {
    items.iter().map(|e| e.id().to_string()).collect()
}

fn alice_request() -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: "Alice".into(),
        phone_number: None,
        address: None,
        ni_number: None,
        share_code: None,
        shift_timing: None,
        pay_type: PayType::Hourly,
        fixed_daily_rate: None,
        hourly_rate: Some(12.0),
        custom_daily_rate: None,
        custom_hourly_rate: None,
        shop_id: None,
    }
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Resource lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn test_create_into_empty_employees() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({ "name": "Alice", "payType": "Hourly", "hourlyRate": 12.0 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(employee("e1", "Alice")))
        .expect(1)
        .mount(&server)
        .await;

    let employees = controller.resource::<Employee>();
    employees.list(&NoFilter).await.unwrap();
    let created = employees.create(alice_request()).await.unwrap();
    assert_eq!(created.name, "Alice");

    let state = employees.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["e1"]);
    assert_eq!(state.items[0].name, "Alice");
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_create_accepts_plain_id_echo() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(body_json(json!({
            "name": "Alice", "payType": "Hourly", "hourlyRate": 10.0, "shopId": "s1",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "e1", "name": "Alice", "payType": "Hourly", "hourlyRate": 10, "shopId": "s1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let employees = controller.resource::<Employee>();
    employees.list(&NoFilter).await.unwrap();
    let request = CreateEmployeeRequest {
        hourly_rate: Some(10.0),
        shop_id: Some(EntityId::from("s1")),
        ..alice_request()
    };
    employees.create(request).await.unwrap();

    let state = employees.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["e1"]);
    let alice = &state.items[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.pay_type, Some(PayType::Hourly));
    assert_eq!(alice.hourly_rate, Some(10.0));
    assert_eq!(alice.shop_id.as_ref().unwrap().id().as_str(), "s1");
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_create_then_list_includes_entity_once() {
    let (server, controller) = setup().await;
    mount_json(&server, "POST", "/api/employees", employee("e1", "Alice")).await;
    mount_json(&server, "GET", "/api/employees", json!([employee("e1", "Alice")])).await;

    let employees = controller.resource::<Employee>();
    employees.create(alice_request()).await.unwrap();
    employees.list(&NoFilter).await.unwrap();

    assert_eq!(ids(&employees.slice().snapshot().items), vec!["e1"]);
}

#[tokio::test]
async fn test_update_absent_id_is_a_silent_noop() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees", json!([employee("e1", "Alice")])).await;
    mount_json(&server, "PUT", "/api/employees/e9", employee("e9", "Ghost")).await;

    let employees = controller.resource::<Employee>();
    employees.list(&NoFilter).await.unwrap();
    let update = UpdateEmployeeRequest {
        name: Some("Ghost".into()),
        ..UpdateEmployeeRequest::default()
    };
    employees.update(&EntityId::from("e9"), update).await.unwrap();

    let state = employees.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["e1"]);
    assert_eq!(state.items[0].name, "Alice");
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let (server, controller) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/employees",
        json!([employee("e1", "Alice"), employee("e2", "Bob")]),
    )
    .await;
    mount_json(&server, "PUT", "/api/employees/e1", employee("e1", "Alicia")).await;

    let employees = controller.resource::<Employee>();
    employees.list(&NoFilter).await.unwrap();
    let update = UpdateEmployeeRequest {
        name: Some("Alicia".into()),
        ..UpdateEmployeeRequest::default()
    };
    employees.update(&EntityId::from("e1"), update).await.unwrap();

    let state = employees.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["e1", "e2"]);
    assert_eq!(state.items[0].name, "Alicia");
}

#[tokio::test]
async fn test_remove_first_of_two_rotas() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/rotas", json!([rota("r1"), rota("r2")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/rotas/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/rotas/r9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let rotas = controller.resource::<Rota>();
    rotas.list(&RotaFilter::default()).await.unwrap();

    let removed = rotas.remove(&EntityId::from("r1")).await.unwrap();
    assert_eq!(removed.as_str(), "r1");
    assert_eq!(ids(&rotas.slice().snapshot().items), vec!["r2"]);

    rotas.remove(&EntityId::from("r9")).await.unwrap();
    assert_eq!(ids(&rotas.slice().snapshot().items), vec!["r2"]);
}

#[tokio::test]
async fn test_failed_list_keeps_prior_items() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "_id": "s1", "name": "Corner" }])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;

    let shops = controller.resource::<Shop>();
    shops.list(&NoFilter).await.unwrap();
    let err = shops.list(&NoFilter).await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let state = shops.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["s1"]);
    assert_eq!(state.error.as_deref(), Some("db down"));
    assert!(!state.loading);
}

#[tokio::test]
async fn test_failed_list_without_message_uses_fallback() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let shops = controller.resource::<Shop>();
    shops.list(&NoFilter).await.unwrap_err();
    assert_eq!(
        shops.slice().snapshot().error.as_deref(),
        Some("Failed to load shops")
    );
}

#[tokio::test]
async fn test_stale_list_response_is_discarded() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/rotas"))
        .and(query_param("shopId", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([rota("old")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rotas"))
        .and(query_param("shopId", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([rota("new")])))
        .mount(&server)
        .await;

    let rotas = controller.resource::<Rota>();
    let slow = RotaFilter {
        shop_id: Some("slow".into()),
        employee_id: None,
    };
    let fast = RotaFilter {
        shop_id: Some("fast".into()),
        employee_id: None,
    };
    let (older, newer) = tokio::join!(rotas.list(&slow), rotas.list(&fast));

    assert_eq!(ids(&older.unwrap()), vec!["old"]);
    assert_eq!(ids(&newer.unwrap()), vec!["new"]);
    let state = rotas.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["new"]);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_get_fills_selected_only() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees/e7", employee("e7", "Gus")).await;

    let employees = controller.resource::<Employee>();
    employees.get(&EntityId::from("e7")).await.unwrap();

    let state = employees.slice().snapshot();
    assert!(state.items.is_empty());
    assert_eq!(state.selected.as_ref().unwrap().name, "Gus");
}

// ── Placement ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_punch_in_prepends() {
    let (server, controller) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/punchings",
        json!([{ "_id": "p1", "punchInDatetime": "2025-12-01T09:00:00Z" }]),
    )
    .await;
    mount_json(
        &server,
        "POST",
        "/api/punchings/in",
        json!({ "_id": "p2", "punchInDatetime": "2025-12-02T09:00:00Z" }),
    )
    .await;

    let punchings = controller.resource::<Punching>();
    punchings.list(&Default::default()).await.unwrap();
    controller
        .punch_in(PunchInRequest::now("s1".into(), "e1".into()))
        .await
        .unwrap();

    assert_eq!(ids(&punchings.slice().snapshot().items), vec!["p2", "p1"]);
}

#[tokio::test]
async fn test_punch_out_replaces_open_punching() {
    let (server, controller) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/punchings",
        json!([{ "_id": "p1", "punchInDatetime": "2025-12-01T09:00:00Z" }]),
    )
    .await;
    mount_json(
        &server,
        "POST",
        "/api/punchings/out",
        json!({
            "_id": "p1",
            "punchInDatetime": "2025-12-01T09:00:00Z",
            "punchOutDatetime": "2025-12-01T17:00:00Z",
        }),
    )
    .await;

    let punchings = controller.resource::<Punching>();
    punchings.list(&Default::default()).await.unwrap();
    assert!(punchings.slice().snapshot().items[0].is_open());

    controller
        .punch_out(shopdesk_core::PunchOutRequest::now("s1".into(), "e1".into()))
        .await
        .unwrap();

    let state = punchings.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["p1"]);
    assert!(!state.items[0].is_open());
}

#[tokio::test]
async fn test_admin_list_and_prepend() {
    let (server, controller) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/admin/with-shops",
        json!([{ "_id": "a1", "name": "Ann", "email": "ann@example.com" }]),
    )
    .await;
    mount_json(
        &server,
        "POST",
        "/api/admin",
        json!({ "_id": "a2", "name": "Bo", "email": "bo@example.com", "role": "ShopAdmin" }),
    )
    .await;

    let admins = controller.resource::<shopdesk_core::Admin>();
    admins.list(&NoFilter).await.unwrap();
    admins
        .create(CreateAdminRequest {
            name: "Bo".into(),
            email: "bo@example.com".into(),
            password: SecretString::from("pw".to_owned()),
            role: None,
        })
        .await
        .unwrap();

    assert_eq!(ids(&admins.slice().snapshot().items), vec!["a2", "a1"]);
}

// ── Multipart ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_shop_create_sends_multipart() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/shops"))
        .and(|req: &Request| {
            let is_form = req
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("multipart/form-data"));
            let body = String::from_utf8_lossy(&req.body);
            is_form && body.contains("name=\"phoneNumber\"") && body.contains("filename=\"logo.png\"")
        })
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "_id": "s1", "name": "Corner" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = shopdesk_core::CreateShopRequest {
        name: "Corner".into(),
        logo: shopdesk_core::FilePart {
            field: "logo".into(),
            file_name: "logo.png".into(),
            mime: Some("image/png".into()),
            bytes: bytes::Bytes::from_static(b"\x89PNG"),
        },
        address: "1 High St".into(),
        site: "corner.example".into(),
        phone_number: "0123".into(),
        rent: Some(1200.0),
        bills: None,
        open_time: "08:00".into(),
        close_time: "20:00".into(),
        admin_id: None,
    };
    let shop = controller.resource::<Shop>().create(request).await.unwrap();
    assert_eq!(shop.name, "Corner");
}

// ── Extensions ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_shop_dashboard_unwraps_data() {
    let (server, controller) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/shops/dashboard",
        json!({ "data": {
            "totalEmployees": 5,
            "todaysPunches": 2,
            "upcomingShifts": [rota("r1")],
            "weeklyPayout": 840.5,
        }}),
    )
    .await;

    let dashboard = controller.fetch_shop_dashboard().await.unwrap();
    assert_eq!(dashboard.total_employees, 5);
    assert_eq!(dashboard.upcoming_shifts.len(), 1);
    let slot = controller.store().shop_dashboard_snapshot();
    assert!(slot.value.is_some());
    assert!(!slot.loading);
}

#[tokio::test]
async fn test_salary_overview_sends_range() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/employees/all/calc"))
        .and(query_param("from", "2025-12-01"))
        .and(query_param("to", "2025-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{
            "employeeId": "e1",
            "employeeName": "Alice",
            "payType": "Hourly",
            "totalHours": 10.5,
            "daysWorked": 2,
            "hourlyRate": 12,
            "salary": 126,
        }]})))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::parse("2025-12-01", "2025-12-31").unwrap();
    let lines = controller.calculate_all_salaries(range).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert!((lines[0].salary - 126.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_value_slot_failure_keeps_own_error() {
    let (server, controller) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    controller.fetch_admin_stats().await.unwrap_err();
    let slot = controller.store().admin_stats_snapshot();
    assert_eq!(slot.error.as_deref(), Some("Failed to fetch stats"));
    assert_eq!(controller.store().admins_snapshot().error, None);
}

// ── Session ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_persists_and_logout_clears() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let (server, controller) = setup_with(Arc::clone(&storage)).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ann@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-1", "role": "Admin", "name": "Ann", "email": "ann@example.com",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/with-shops"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let identity = controller
        .login("ann@example.com", &SecretString::from("pw".to_owned()))
        .await
        .unwrap();
    assert_eq!(identity.role, Role::Admin);
    assert!(storage.get("user").unwrap().is_some());
    assert_eq!(controller.guard("/login"), GuardDecision::Redirect(Route::AdminDashboard));
    controller.require_role(&Role::Admin).unwrap();

    controller
        .resource::<shopdesk_core::Admin>()
        .list(&NoFilter)
        .await
        .unwrap();

    // A second controller over the same storage starts logged in.
    let api_root = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let rehydrated = Controller::new(ClientConfig::new(api_root), Arc::clone(&storage)).unwrap();
    assert_eq!(rehydrated.identity().unwrap().name.as_deref(), Some("Ann"));

    controller.logout();
    assert!(controller.identity().is_none());
    assert_eq!(storage.get("user").unwrap(), None);
    assert!(matches!(
        controller.require_role(&Role::Admin),
        Err(CoreError::NotLoggedIn)
    ));
}

#[tokio::test]
async fn test_failed_login_sets_error() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = controller
        .login("ann@example.com", &SecretString::from("nope".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));

    let session = controller.session_snapshot();
    assert!(session.identity.is_none());
    assert!(!session.loading);
    assert_eq!(session.error.as_deref(), Some("Invalid credentials"));
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage {
            message: "read-only filesystem".into(),
        })
    }

    fn clear(&self, _key: &str) -> Result<(), CoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_login_fails_when_session_cannot_be_stored() {
    let (server, controller) = setup_with(Arc::new(ReadOnlyStore)).await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-1", "role": "Admin", "name": "Ann",
        })))
        .mount(&server)
        .await;

    let err = controller
        .login("ann@example.com", &SecretString::from("pw".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Storage { .. }));

    let session = controller.session_snapshot();
    assert!(session.identity.is_none());
    assert!(!session.loading);
    assert_eq!(session.error.as_deref(), Some("Login failed"));
    assert_eq!(controller.guard("/admin/dashboard"), GuardDecision::Redirect(Route::Login));
}

// ── Notifications & dispatch ────────────────────────────────────────

#[tokio::test]
async fn test_notifications_follow_mutations() {
    let (server, controller) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(201).set_body_json(employee("e1", "Alice")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "NI number taken" })),
        )
        .mount(&server)
        .await;

    let mut rx = controller.notifications();
    let employees = controller.resource::<Employee>();
    employees.create(alice_request()).await.unwrap();
    employees.create(alice_request()).await.unwrap_err();

    let ok = rx.recv().await.unwrap();
    assert_eq!(ok.level, NotificationLevel::Success);
    assert_eq!(ok.message, "Employee created");
    let failed = rx.recv().await.unwrap();
    assert_eq!(failed.level, NotificationLevel::Error);
    assert_eq!(failed.message, "NI number taken");

    let state = employees.slice().snapshot();
    assert_eq!(ids(&state.items), vec!["e1"]);
    assert_eq!(state.error.as_deref(), Some("NI number taken"));
}

#[tokio::test]
async fn test_dispatch_runs_in_background() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees", json!([employee("e1", "Alice")])).await;

    let rx = controller.dispatch(Command::ListEmployees);
    let result = rx.await.unwrap().unwrap();
    match result {
        CommandResult::Employees(items) => assert_eq!(ids(&items), vec!["e1"]),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(ids(&controller.store().employees_snapshot().items), vec!["e1"]);
}

#[tokio::test]
async fn test_subscribers_see_list_commit() {
    let (server, controller) = setup().await;
    mount_json(&server, "GET", "/api/employees", json!([employee("e1", "Alice")])).await;

    let mut stream = controller.store().subscribe_employees();
    assert!(stream.current().items.is_empty());

    controller.execute(Command::ListEmployees).await.unwrap();
    let latest = stream.latest();
    assert_eq!(ids(&latest.items), vec!["e1"]);
    assert!(stream.changed().await.is_some());
}
