use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::profile::ProfileWithUser;
use crate::error::ApiError;
use crate::services::{GithubService, ProfileService};
use crate::state::AppState;

/// GET /api/profile - list every profile with joined user name/avatar
pub async fn profiles_get(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileWithUser>>, ApiError> {
    let service = ProfileService::new(state.pool.clone());
    let profiles = service.list_with_users().await?;
    Ok(Json(profiles))
}

/// GET /api/profile/user/:user_id - profile by user id
pub async fn profile_by_user_get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileWithUser>, ApiError> {
    // A malformed id is deliberately indistinguishable from a missing
    // profile on the client side.
    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        return Err(ApiError::bad_request("Profile not found"));
    };

    let service = ProfileService::new(state.pool.clone());
    let profile = service
        .find_with_user(user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Profile not found"))?;
    Ok(Json(profile))
}

/// GET /api/profile/github/:username - proxy to the GitHub repositories API
pub async fn github_repos_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let service = GithubService::new(state.http.clone(), state.config.github.clone());
    let repos = service.user_repos(&username).await?;
    Ok(Json(repos))
}
