use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::auth::{hash_password, verify_password};
use crate::domain::{Role, User, UserCreate};
use crate::error::{LogisticsError, LogisticsResult};
use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> LogisticsResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = payload?;

    let password_hash = hash_password(&request.password)?;
    let user = state
        .users
        .register(UserCreate {
            name: request.name,
            email: request.email,
            phone: request.phone,
            role: Role::User,
            password_hash,
        })
        .await?;
    info!(user_id = %user.id, "Account registered");

    let token = state.tokens.issue(&user)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> LogisticsResult<Json<AuthResponse>> {
    let Json(request) = payload?;
    let rejected = || LogisticsError::Unauthorized("Invalid email or password".to_string());

    let user = state.users.find_by_email(&request.email).await?.ok_or_else(|| {
        warn!("Login for unknown email");
        rejected()
    })?;
    if !verify_password(&request.password, &user.password_hash) {
        warn!(user_id = %user.id, "Login with wrong password");
        return Err(rejected());
    }

    let token = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "Logged in");
    Ok(Json(AuthResponse { token, user }))
}
