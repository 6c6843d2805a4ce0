use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::auth::Session;
use crate::domain::{Booking, BookingDraft};
use crate::error::{LogisticsError, LogisticsResult};
use crate::http::AppState;

#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<BookingDraft>, JsonRejection>,
) -> LogisticsResult<(StatusCode, Json<Booking>)> {
    let Json(draft) = payload?;
    let booking = state.bookings.create_booking(session.requester(), draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn mine(State(state): State<AppState>, session: Session) -> LogisticsResult<Json<Vec<Booking>>> {
    Ok(Json(state.bookings.list_by_requester(&session.user_id).await?))
}

/// Other users' bookings are reported as missing, not forbidden.
#[instrument(skip(state, session), fields(user_id = %session.user_id))]
pub async fn get_one(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> LogisticsResult<Json<Booking>> {
    match state.bookings.get_booking(id.clone()).await? {
        Some(booking) if session.is_admin() || booking.user_id == session.user_id => Ok(Json(booking)),
        _ => Err(LogisticsError::not_found("Booking", id)),
    }
}
