use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, services::auth_service::verify_token, state::AppState};

/// An admin authenticated by a bearer token.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    pub username: String,
}

fn bearer_token(parts: &axum::http::request::Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token provided".into()))?;

        let claims = verify_token(&state.config.jwt_secret, token).map_err(|err| {
            tracing::debug!(error = %err, "token rejected");
            AppError::Unauthorized("Invalid token".into())
        })?;

        Ok(AuthAdmin {
            admin_id: claims.id,
            username: claims.username,
        })
    }
}
