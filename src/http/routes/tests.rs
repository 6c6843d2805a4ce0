use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app_system::LogisticsSystem;
use crate::auth::TokenKeys;
use crate::config::AdminSeed;
use crate::http::router;

struct Harness {
    app: Router,
    admin_token: String,
}

async fn harness() -> Harness {
    let system = LogisticsSystem::in_memory();
    let admin = system
        .seed_admin(&AdminSeed {
            email: "root@fleet.test".into(),
            password: "hunter22".into(),
            name: "Root".into(),
        })
        .await
        .unwrap();

    let tokens = TokenKeys::new("test-secret", Duration::from_secs(3600));
    let admin_token = tokens.issue(&admin).unwrap();
    let app = router(system.app_state(tokens, Duration::from_millis(500)));
    Harness { app, admin_token }
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

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

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": "Asha", "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["role"], "USER");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_duplicate_email() {
    let h = harness().await;
    register(&h.app, "asha@example.com").await;

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ASHA@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["user"].get("passwordHash").is_none());

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "asha@example.com", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": "Other", "email": "asha@example.com", "password": "secret2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn bookings_require_a_token() {
    let h = harness().await;
    let (status, body) = call(&h.app, Method::GET, "/api/bookings/my-bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = call(&h.app, Method::GET, "/api/bookings/my-bookings", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_cannot_reach_admin_routes() {
    let h = harness().await;
    let token = register(&h.app, "asha@example.com").await;

    let (status, body) = call(&h.app, Method::GET, "/api/admin/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn booking_validation_errors_are_bad_requests() {
    let h = harness().await;
    let token = register(&h.app, "asha@example.com").await;

    let (status, body) = call(
        &h.app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(json!({ "pickupLocation": "A", "dropLocation": "B", "loadType": "Grain", "weight": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");

    let (status, _) = call(
        &h.app,
        Method::POST,
        "/api/bookings",
        Some(&token),
        Some(json!({ "pickupLocation": "A", "dropLocation": "B", "loadType": "Grain", "weight": "heavy" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_users_bookings_are_not_found() {
    let h = harness().await;
    let owner = register(&h.app, "owner@example.com").await;
    let stranger = register(&h.app, "stranger@example.com").await;

    let (_, booking) = call(
        &h.app,
        Method::POST,
        "/api/bookings",
        Some(&owner),
        Some(json!({ "pickupLocation": "A", "dropLocation": "B", "loadType": "Grain", "weight": 2.5 })),
    )
    .await;
    let uri = format!("/api/bookings/{}", booking["id"].as_str().unwrap());

    let (status, _) = call(&h.app, Method::GET, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&h.app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&h.app, Method::GET, &uri, Some(&h.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let h = harness().await;
    let user = register(&h.app, "asha@example.com").await;
    let admin = h.admin_token.as_str();

    // Booking
    let (status, booking) = call(
        &h.app,
        Method::POST,
        "/api/bookings",
        Some(&user),
        Some(json!({ "pickupLocation": "A", "dropLocation": "B", "loadType": "Grain", "weight": 2.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "PENDING");
    assert!(booking["price"].as_f64().unwrap() > 0.0);
    assert!(booking["distance"].as_f64().unwrap() > 0.0);
    let booking_id = booking["id"].as_str().unwrap().to_string();

    // Fleet
    let (status, truck) = call(
        &h.app,
        Method::POST,
        "/api/admin/trucks",
        Some(admin),
        Some(json!({ "truckNumber": "MH-12-4455", "type": "Flatbed", "capacity": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(truck["availabilityStatus"], "AVAILABLE");
    let truck_id = truck["id"].as_str().unwrap().to_string();

    let (status, driver) = call(
        &h.app,
        Method::POST,
        "/api/admin/drivers",
        Some(admin),
        Some(json!({ "name": "Ravi", "phone": "98450 00000", "licenseNumber": "DL-0420" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let driver_id = driver["id"].as_str().unwrap().to_string();

    // Assign
    let (status, assigned) = call(
        &h.app,
        Method::PUT,
        &format!("/api/admin/bookings/{booking_id}/assign?driverId={driver_id}&truckId={truck_id}"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{assigned}");
    assert_eq!(assigned["status"], "ASSIGNED");
    assert_eq!(assigned["truckNumber"], "MH-12-4455");

    let (_, truck) = call(&h.app, Method::GET, &format!("/api/admin/trucks/{truck_id}"), Some(admin), None).await;
    assert_eq!(truck["availabilityStatus"], "ASSIGNED");

    let (status, body) = call(
        &h.app,
        Method::PUT,
        &format!("/api/admin/trucks/{truck_id}"),
        Some(admin),
        Some(json!({ "truckNumber": "MH-12-9999" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    // Illegal jump
    let (status, body) = call(
        &h.app,
        Method::PUT,
        &format!("/api/admin/bookings/{booking_id}/status?status=DELIVERED"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INVALID_TRANSITION");

    // Unknown status
    let (status, _) = call(
        &h.app,
        Method::PUT,
        &format!("/api/admin/bookings/{booking_id}/status?status=SHIPPED"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for next in ["IN_TRANSIT", "DELIVERED"] {
        let (status, body) = call(
            &h.app,
            Method::PUT,
            &format!("/api/admin/bookings/{booking_id}/status?status={next}"),
            Some(admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["status"], next);
    }

    let (_, truck) = call(&h.app, Method::GET, &format!("/api/admin/trucks/{truck_id}"), Some(admin), None).await;
    assert_eq!(truck["availabilityStatus"], "AVAILABLE");

    // Dashboard
    let (status, stats) = call(&h.app, Method::GET, "/api/admin/dashboard", Some(admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalUsers"], 2);
    assert_eq!(stats["totalBookings"], 1);
    assert_eq!(stats["completedBookings"], 1);
    assert_eq!(stats["totalRevenue"], booking["price"]);

    // Delete now that nothing active references the truck
    let (status, _) = call(&h.app, Method::DELETE, &format!("/api/admin/drivers/{driver_id}"), Some(admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&h.app, Method::DELETE, &format!("/api/admin/trucks/{truck_id}"), Some(admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn assign_query_must_name_truck_and_driver() {
    let h = harness().await;
    let (status, body) = call(
        &h.app,
        Method::PUT,
        "/api/admin/bookings/booking_1/assign?truckId=truck_1",
        Some(&h.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn health_reports_every_actor() {
    let h = harness().await;
    let (status, body) = call(&h.app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert_eq!(body["components"].as_array().unwrap().len(), 5);
}
