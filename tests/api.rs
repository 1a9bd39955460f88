use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use tour_booking_backend::{
    config::Config, entities::tour::TourStatus, routes::create_router, seed::Dataset,
    store::DomainStore, AppState,
};

const UPCOMING_TOUR: i64 = 10;

fn test_config() -> Config {
    Config {
        jwt_secret: "integration-secret".to_string(),
        jwt_expiration_hours: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        seed_url: None,
        seed_file: None,
        cancellation_window_days: 7,
        rate_limit_enabled: false,
    }
}

/// Builtin seed plus one active tour a month ahead.
fn app() -> Router {
    let mut dataset = Dataset::builtin().unwrap();
    let mut upcoming = dataset.tours[0].clone();
    upcoming.id = UPCOMING_TOUR;
    upcoming.status = TourStatus::Active;
    upcoming.start_datetime = Utc::now().naive_utc() + Duration::days(30);
    dataset.tours.push(upcoming);

    let store = DomainStore::from_dataset(dataset).unwrap();
    create_router(AppState::new(store, test_config()))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

fn registration(email: &str) -> Value {
    json!({
        "firstName": "Anna",
        "lastName": "Petrova",
        "email": email,
        "password": "secret",
        "birthDate": "1995-04-12"
    })
}

#[tokio::test]
async fn test_register_then_login() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(registration("anna@example.com"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], 4);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].is_string());

    let token = login(&app, "anna@example.com", "secret").await;
    let (status, profile) = send(&app, Method::GET, "/api/account/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["email"], "anna@example.com");
    assert_eq!(profile["tourBookings"], json!([]));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(registration("ivan@example.com"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "x@example.com", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ivan@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_account_routes_require_token() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/account/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/bookings/tours", Some("garbage"), Some(json!({ "tourId": 1 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_book_tour_once_then_conflict() {
    let app = app();
    let token = login(&app, "ivan@example.com", "password123").await;

    let (status, booking) = send(
        &app,
        Method::POST,
        "/api/bookings/tours",
        Some(&token),
        Some(json!({ "tourId": UPCOMING_TOUR })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["id"], 4);
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["finalPrice"], 5000.0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/bookings/tours",
        Some(&token),
        Some(json!({ "tourId": UPCOMING_TOUR })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Cancelling far ahead of the start is allowed
    let (status, cancelled) = send(&app, Method::DELETE, "/api/bookings/tours/4", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
}

#[tokio::test]
async fn test_archived_tour_is_not_bookable() {
    let app = app();
    let token = login(&app, "hotel_admin@example.com", "adminHotel").await;

    let (status, body) = send(&app, Method::POST, "/api/bookings/tours", Some(&token), Some(json!({ "tourId": 3 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cancel_other_users_booking_is_forbidden() {
    let app = app();
    let token = login(&app, "tour_admin@example.com", "adminTour").await;

    let (status, _) = send(&app, Method::DELETE, "/api/bookings/tours/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_hotel_request_is_pending_then_cancelled() {
    let app = app();
    let token = login(&app, "ivan@example.com", "password123").await;
    let check_in = Utc::now().date_naive() + Duration::days(20);
    let check_out = check_in + Duration::days(3);

    let (status, booking) = send(
        &app,
        Method::POST,
        "/api/bookings/hotel",
        Some(&token),
        Some(json!({
            "roomId": 201,
            "checkInDate": check_in.to_string(),
            "checkOutDate": check_out.to_string()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["id"], 3);
    assert_eq!(booking["status"], "pending");

    let (status, cancelled) = send(&app, Method::DELETE, "/api/bookings/hotel/3", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
}

#[tokio::test]
async fn test_hotel_request_missing_dates_is_rejected() {
    let app = app();
    let token = login(&app, "ivan@example.com", "password123").await;

    let (status, _) = send(&app, Method::POST, "/api/bookings/hotel", Some(&token), Some(json!({ "roomId": 201 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_admin_routes_check_role() {
    let app = app();
    let user = login(&app, "ivan@example.com", "password123").await;

    let (status, _) = send(&app, Method::GET, "/api/hotel-admin/bookings", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, "/api/tour-admin/tours/1/bookings", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let tour_admin = login(&app, "tour_admin@example.com", "adminTour").await;
    let (status, participants) = send(&app, Method::GET, "/api/tour-admin/tours/1/bookings", Some(&tour_admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hotel_admin_approves_pending_request() {
    let app = app();
    let token = login(&app, "hotel_admin@example.com", "adminHotel").await;

    let (status, booking) = send(
        &app,
        Method::PUT,
        "/api/hotel-admin/bookings/2/status",
        Some(&token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "approved");

    // Only pending requests can be reviewed
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/hotel-admin/bookings/2/status",
        Some(&token),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_data_snapshot_hides_passwords() {
    let app = app();

    let (status, data) = send(&app, Method::GET, "/api/data", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["users"].as_array().unwrap().len(), 3);
    assert!(data["users"][0].get("password_hash").is_none());
    assert_eq!(data["hotelBookings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tour_listing_skips_archived_but_details_resolve() {
    let app = app();

    let (status, tours) = send(&app, Method::GET, "/api/tours", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = tours
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&3));
    assert!(ids.contains(&UPCOMING_TOUR));

    let (status, tour) = send(&app, Method::GET, "/api/tours/3", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tour["status"], "archived");

    let (status, _) = send(&app, Method::GET, "/api/tours/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_navigation_and_logout() {
    let app = app();
    let token = login(&app, "ivan@example.com", "password123").await;

    let (status, session) = send(
        &app,
        Method::POST,
        "/api/account/session/navigate",
        Some(&token),
        Some(json!({ "page": "tour-details", "id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["currentPage"], "tour-details");
    assert_eq!(session["selectedTourId"], 1);

    let (status, _) = send(&app, Method::POST, "/api/account/logout", Some(&token), None).await;
    assert!(status.is_success());

    let (_, session) = send(&app, Method::GET, "/api/account/session", Some(&token), None).await;
    assert_eq!(session["currentPage"], "udmurtia");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = app();
    let token = login(&app, "ivan@example.com", "password123").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bookings/tours")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    // Valid JSON, wrong shape
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bookings/tours",
        Some(&token),
        Some(json!({ "tourId": "ten" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/tours/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(&app, Method::GET, "/api/tours/search?q=x&lang=de", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
