//! Accounts, bookings and the back office
//!
//! Every test runs against its own temporary database, so they can run in
//! parallel without sharing users or settings.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use cargosearch::config::Config;
use cargosearch::database::{init_db, AppState};
use cargosearch::route::create_app;
use cargosearch::seed::seed_reference_data;

const ADMIN_LOGIN: &str = "operator";
const ADMIN_PASSWORD: &str = "s3cret-ops";

fn setup_test_app() -> (Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();
    let db = init_db(db_path).expect("Failed to initialize test database");
    seed_reference_data(&db, true).expect("Failed to seed test database");

    let config = Config {
        admin_login: ADMIN_LOGIN.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        default_webhook_url: "http://127.0.0.1:9/webhook/search".to_string(),
        password_cost: 4,
        ..Config::default()
    };
    (create_app(AppState::new(db, config)), temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

/// Sends one request and returns the status with the JSON body
async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    payload: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let body = match payload {
        Some(payload) => {
            builder = builder.header("content-type", "application/json");
            Body::from(payload.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response.into_body()).await)
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await
}

async fn customer_token(app: &Router, email: &str) -> String {
    let (status, _) = register(app, email, "cargo-2025").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": email, "password": "cargo-2025"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"login": ADMIN_LOGIN, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

fn booking_payload() -> Value {
    json!({
        "route_id": "offer-1",
        "origin_port": "CTU",
        "destination_port": "LED",
        "container_type": "40ft",
        "containers_count": 2,
        "price_usd": 9025.0,
        "company_name": "Silk Freight LLC",
        "contact_person": "Anna Petrova",
        "email": "ops@silkfreight.example",
        "phone": "+7 (495) 123-45-67",
        "pickup_address": "Chengdu, Qingbaijiang district",
        "delivery_address": "Saint Petersburg, Shushary",
        "cargo_description": "Auto parts, 18 pallets",
        "delivery_term": "fca",
        "documents": ["invoice.pdf", "packing-list.xlsx"]
    })
}

#[tokio::test]
async fn test_register_and_login() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = register(&app, "buyer@mail.ru", "cargo-2025").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["user_id"].as_str().unwrap().is_empty());

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "Buyer@Mail.ru ", "password": "cargo-2025"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, _temp_db) = setup_test_app();

    let (status, _) = register(&app, "buyer@mail.ru", "cargo-2025").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = register(&app, "BUYER@mail.ru", "another-pass").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, _temp_db) = setup_test_app();

    let (status, _) = register(&app, "not-an-email", "cargo-2025").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = register(&app, "buyer@mail.ru", "123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 6"));
}

#[tokio::test]
async fn test_register_malformed_body_returns_json_error() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({"email": "buyer@mail.ru"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user() {
    let (app, _temp_db) = setup_test_app();
    register(&app, "buyer@mail.ru", "cargo-2025").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "buyer@mail.ru", "password": "wrong-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "nobody@mail.ru", "password": "cargo-2025"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_admin_login_rejects_bad_credentials() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"login": ADMIN_LOGIN, "password": "guess"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect login or password");

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"login": "root", "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect login or password");
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let (app, _temp_db) = setup_test_app();

    let (status, body) = call(&app, "GET", "/api/admin/routes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = call(&app, "GET", "/api/admin/routes", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A customer token carries the wrong role
    let customer = customer_token(&app, "buyer@mail.ru").await;
    let (status, _) = call(&app, "GET", "/api/admin/routes", Some(&customer), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = admin_token(&app).await;
    let (status, body) = call(&app, "GET", "/api/admin/routes", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_requires_customer_token() {
    let (app, _temp_db) = setup_test_app();

    let (status, _) = call(&app, "POST", "/api/booking", None, Some(booking_payload())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = admin_token(&app).await;
    let (status, _) = call(
        &app,
        "POST",
        "/api/booking",
        Some(&admin),
        Some(booking_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_created_and_listed_for_admin() {
    let (app, _temp_db) = setup_test_app();
    let customer = customer_token(&app, "buyer@mail.ru").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/booking",
        Some(&customer),
        Some(booking_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    let booking_id = body["booking_id"].as_str().unwrap().to_string();

    let admin = admin_token(&app).await;
    let (status, body) = call(&app, "GET", "/api/admin/bookings", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], booking_id);
    assert_eq!(bookings[0]["user_email"], "buyer@mail.ru");
    assert_eq!(bookings[0]["delivery_term"], "FCA");
    assert_eq!(bookings[0]["containers_count"], 2);
    assert_eq!(bookings[0]["documents"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_booking_validation() {
    let (app, _temp_db) = setup_test_app();
    let customer = customer_token(&app, "buyer@mail.ru").await;

    let mut payload = booking_payload();
    payload["phone"] = json!("123");
    let (status, body) = call(&app, "POST", "/api/booking", Some(&customer), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Enter a valid phone number");

    let mut payload = booking_payload();
    payload["company_name"] = json!("  ");
    let (status, body) = call(&app, "POST", "/api/booking", Some(&customer), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("company_name"));

    let mut payload = booking_payload();
    payload["delivery_term"] = json!("XYZ");
    let (status, _) = call(&app, "POST", "/api/booking", Some(&customer), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let admin = admin_token(&app).await;
    let (_, body) = call(&app, "GET", "/api/admin/bookings", Some(&admin), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_container_type_crud() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, created) = call(
        &app,
        "POST",
        "/api/admin/container-types",
        Some(&admin),
        Some(json!({
            "name": "40ft HC",
            "size": "40ft HC",
            "capacity_m3": 76.4,
            "max_weight_kg": 28560,
            "description": "High cube"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["price_modifier"], 1.0);

    let (_, body) = call(&app, "GET", "/api/container-types", None, None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["20ft", "40ft", "40ft HC"]);

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/api/admin/container-types/{}", id),
        Some(&admin),
        Some(json!({
            "id": "ignored",
            "name": "40ft HC",
            "size": "40ft HC",
            "capacity_m3": 76.4,
            "max_weight_kg": 28560,
            "price_modifier": 1.15
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["price_modifier"], 1.15);

    let uri = format!("/api/admin/container-types/{}", id);
    let (status, _) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Container type not found");
}

#[tokio::test]
async fn test_admin_container_type_requires_name() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/container-types",
        Some(&admin),
        Some(json!({"name": "  ", "size": "45ft", "capacity_m3": 86.0, "max_weight_kg": 29000})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Container name is required");

    let (_, listed) = call(&app, "GET", "/api/container-types", None, None).await;
    let id = listed[0]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/admin/container-types/{}", id),
        Some(&admin),
        Some(json!({"name": "", "size": "20ft", "capacity_m3": 33.2, "max_weight_kg": 28200})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Container name is required");

    let (_, listed) = call(&app, "GET", "/api/container-types", None, None).await;
    assert_eq!(listed[0]["name"], "20ft");
}

#[tokio::test]
async fn test_admin_update_unknown_container_type() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, _) = call(
        &app,
        "PUT",
        "/api/admin/container-types/missing",
        Some(&admin),
        Some(json!({
            "name": "45ft",
            "size": "45ft",
            "capacity_m3": 86.0,
            "max_weight_kg": 29000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_route_crud() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (_, before) = call(&app, "GET", "/api/admin/routes", Some(&admin), None).await;
    let seeded = before.as_array().unwrap().len();

    let (status, created) = call(
        &app,
        "POST",
        "/api/admin/routes",
        Some(&admin),
        Some(json!({
            "origin_port": "XIY",
            "destination_port": "MSQ",
            "transport_type": "ЖД",
            "carrier": "Xi'an Express",
            "transit_time_days": 14,
            "base_price_usd": 880.0,
            "available_container_types": ["40ft"],
            "frequency": "Weekly"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    let (_, after) = call(&app, "GET", "/api/admin/routes", Some(&admin), None).await;
    let routes = after.as_array().unwrap();
    assert_eq!(routes.len(), seeded + 1);
    assert_eq!(routes[routes.len() - 1]["id"], id.as_str());

    let uri = format!("/api/admin/routes/{}", id);
    let (status, _) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, "DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_route_rejects_identical_endpoints() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/admin/routes",
        Some(&admin),
        Some(json!({
            "origin_port": "MSQ",
            "destination_port": "MSQ",
            "carrier": "Belarus Railways",
            "transit_time_days": 1,
            "base_price_usd": 100.0,
            "available_container_types": ["20ft"],
            "frequency": "Daily"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_webhook_settings() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, body) = call(&app, "GET", "/api/admin/webhook", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["webhook_url"], "http://127.0.0.1:9/webhook/search");

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/webhook",
        Some(&admin),
        Some(json!({"webhook_url": "  https://hooks.example.com/search  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (_, body) = call(&app, "GET", "/api/admin/webhook", Some(&admin), None).await;
    assert_eq!(body["webhook_url"], "https://hooks.example.com/search");
}

#[tokio::test]
async fn test_admin_webhook_rejects_blank_url() {
    let (app, _temp_db) = setup_test_app();
    let admin = admin_token(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/webhook",
        Some(&admin),
        Some(json!({"webhook_url": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Webhook URL is required");

    let (_, body) = call(&app, "GET", "/api/admin/webhook", Some(&admin), None).await;
    assert_eq!(body["webhook_url"], "http://127.0.0.1:9/webhook/search");
}
