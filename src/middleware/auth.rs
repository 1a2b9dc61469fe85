use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

pub const AUTH_HEADER: &str = "x-auth-token";

/// Authenticated principal extracted from the `x-auth-token` JWT.
///
/// Private handlers take this as an argument; extraction runs before the
/// handler body, so a missing or invalid token rejects the request with 401
/// without invoking any downstream logic.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

        let claims = auth::decode_jwt(token, &state.config.security.jwt_secret)
            .map_err(|_| ApiError::unauthorized("Token is not valid"))?;

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}
