//! JSON-over-HTTP surface.

mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::TokenKeys;
use crate::clients::{BookingClient, DispatchClient, FleetClient, UserClient};

/// Everything a handler can reach. Cloned per request; all members are
/// cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingClient,
    pub fleet: FleetClient,
    pub users: UserClient,
    pub dispatch: DispatchClient,
    pub tokens: Arc<TokenKeys>,
    pub health_timeout: Duration,
}

pub fn router(state: AppState) -> Router {
    use routes::{admin, auth, bookings, health};

    let api = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/bookings", post(bookings::create))
        .route("/bookings/my-bookings", get(bookings::mine))
        .route("/bookings/:id", get(bookings::get_one))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/bookings", get(admin::list_bookings))
        .route("/admin/bookings/:id/assign", put(admin::assign_booking))
        .route("/admin/bookings/:id/status", put(admin::update_status))
        .route("/admin/trucks", get(admin::list_trucks).post(admin::create_truck))
        .route(
            "/admin/trucks/:id",
            get(admin::get_truck).put(admin::update_truck).delete(admin::delete_truck),
        )
        .route("/admin/trucks/:id/maintenance", put(admin::set_maintenance))
        .route("/admin/drivers", get(admin::list_drivers).post(admin::create_driver))
        .route(
            "/admin/drivers/:id",
            get(admin::get_driver).put(admin::update_driver).delete(admin::delete_driver),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
