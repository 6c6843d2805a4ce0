use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::auth::AdminSession;
use crate::domain::{Booking, BookingStatus, DashboardStats, Driver, Truck};
use crate::driver_actor::{DriverCreate, DriverPatch};
use crate::error::LogisticsResult;
use crate::http::AppState;
use crate::truck_actor::{TruckCreate, TruckPatch};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignParams {
    pub driver_id: String,
    pub truck_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceParams {
    pub active: bool,
}

pub async fn dashboard(State(state): State<AppState>, _admin: AdminSession) -> LogisticsResult<Json<DashboardStats>> {
    let total_users = state.users.count_users().await?;
    let bookings = state.bookings.list_all().await?;
    Ok(Json(DashboardStats::compute(total_users, &bookings)))
}

// --- Bookings ---

pub async fn list_bookings(State(state): State<AppState>, _admin: AdminSession) -> LogisticsResult<Json<Vec<Booking>>> {
    Ok(Json(state.bookings.list_all().await?))
}

#[instrument(skip(state, _admin, params))]
pub async fn assign_booking(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    params: Result<Query<AssignParams>, QueryRejection>,
) -> LogisticsResult<Json<Booking>> {
    let Query(params) = params?;
    let booking = state
        .dispatch
        .assign_booking(id, params.truck_id, params.driver_id)
        .await?;
    Ok(Json(booking))
}

#[instrument(skip(state, _admin, params))]
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> LogisticsResult<Json<Booking>> {
    let Query(params) = params?;
    let status: BookingStatus = params.status.parse()?;
    Ok(Json(state.dispatch.update_status(id, status).await?))
}

// --- Trucks ---

pub async fn list_trucks(State(state): State<AppState>, _admin: AdminSession) -> LogisticsResult<Json<Vec<Truck>>> {
    Ok(Json(state.fleet.list_trucks().await?))
}

pub async fn get_truck(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> LogisticsResult<Json<Truck>> {
    Ok(Json(state.fleet.fetch_truck(id).await?))
}

#[instrument(skip_all)]
pub async fn create_truck(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<TruckCreate>, JsonRejection>,
) -> LogisticsResult<(StatusCode, Json<Truck>)> {
    let Json(params) = payload?;
    let truck = state.fleet.create_truck(params).await?;
    info!(truck_id = %truck.id, "Truck registered");
    Ok((StatusCode::CREATED, Json(truck)))
}

pub async fn update_truck(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<TruckPatch>, JsonRejection>,
) -> LogisticsResult<Json<Truck>> {
    let Json(patch) = payload?;
    Ok(Json(state.dispatch.update_truck(id, patch).await?))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> LogisticsResult<StatusCode> {
    state.dispatch.delete_truck(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_maintenance(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    params: Result<Query<MaintenanceParams>, QueryRejection>,
) -> LogisticsResult<Json<Truck>> {
    let Query(params) = params?;
    Ok(Json(state.dispatch.set_maintenance(id, params.active).await?))
}

// --- Drivers ---

pub async fn list_drivers(State(state): State<AppState>, _admin: AdminSession) -> LogisticsResult<Json<Vec<Driver>>> {
    Ok(Json(state.fleet.list_drivers().await?))
}

pub async fn get_driver(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> LogisticsResult<Json<Driver>> {
    Ok(Json(state.fleet.fetch_driver(id).await?))
}

#[instrument(skip_all)]
pub async fn create_driver(
    State(state): State<AppState>,
    _admin: AdminSession,
    payload: Result<Json<DriverCreate>, JsonRejection>,
) -> LogisticsResult<(StatusCode, Json<Driver>)> {
    let Json(params) = payload?;
    let driver = state.dispatch.create_driver(params).await?;
    info!(driver_id = %driver.id, "Driver registered");
    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn update_driver(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    payload: Result<Json<DriverPatch>, JsonRejection>,
) -> LogisticsResult<Json<Driver>> {
    let Json(patch) = payload?;
    Ok(Json(state.dispatch.update_driver(id, patch).await?))
}

pub async fn delete_driver(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> LogisticsResult<StatusCode> {
    state.dispatch.delete_driver(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
