use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::{Requester, Role};
use crate::error::LogisticsError;
use crate::http::AppState;

/// The authenticated caller of one request, decoded from its bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn requester(&self) -> Requester {
        Requester {
            user_id: self.user_id.clone(),
            user_name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = LogisticsError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| LogisticsError::Unauthorized("Missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LogisticsError::Unauthorized("Malformed authorization header".to_string()))?;

        let claims = state.tokens.verify(token)?;
        Ok(Session {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// A session that holds the ADMIN role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = LogisticsError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if !session.is_admin() {
            return Err(LogisticsError::Forbidden("Administrator access required".to_string()));
        }
        Ok(AdminSession(session))
    }
}
