use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::profile::{Education, Experience, Profile, ProfileWithUser, SocialLinks};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::profile_service::{parse_skills, ProfileService, ProfileUpdate};
use crate::state::AppState;

/// Record a field error when a required string is missing or blank, and
/// hand back the trimmed-presence value otherwise.
fn require_field(
    value: Option<&String>,
    name: &str,
    message: &str,
    errors: &mut HashMap<String, String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => {
            errors.insert(name.to_string(), message.to_string());
            None
        }
    }
}

/// GET /api/profile/me - the authenticated user's profile
pub async fn profile_me_get(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileWithUser>, ApiError> {
    let service = ProfileService::new(state.pool.clone());
    let profile = service
        .find_with_user(user.user_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("There is no profile for this user"))?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub status: Option<String>,
    /// Comma-separated; parsed into a trimmed list.
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// POST /api/profile - create or update the authenticated user's profile
pub async fn profile_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = HashMap::new();
    let status = require_field(body.status.as_ref(), "status", "Status is required", &mut errors);
    let skills = require_field(body.skills.as_ref(), "skills", "Skills is required", &mut errors);

    let (Some(status), Some(skills)) = (status, skills) else {
        return Err(ApiError::validation_error("Missing required fields", errors));
    };

    let update = ProfileUpdate {
        status,
        skills: parse_skills(&skills),
        company: body.company,
        website: body.website,
        location: body.location,
        bio: body.bio,
        githubusername: body.githubusername,
        social: SocialLinks {
            youtube: body.youtube,
            twitter: body.twitter,
            facebook: body.facebook,
            linkedin: body.linkedin,
            instagram: body.instagram,
        },
    };

    let service = ProfileService::new(state.pool.clone());
    let profile = service.upsert(user.user_id, update).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile - remove the user's posts, profile and user record.
/// Best-effort sequence; see `ProfileService::delete_account`.
pub async fn profile_delete(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let service = ProfileService::new(state.pool.clone());
    service.delete_account(user.user_id).await?;
    Ok(Json(json!({ "msg": "User deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct AddExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// PUT /api/profile/experience - prepend a work experience entry
pub async fn experience_put(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<AddExperienceRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = HashMap::new();
    let title = require_field(body.title.as_ref(), "title", "Title is required", &mut errors);
    let company = require_field(body.company.as_ref(), "company", "Company is required", &mut errors);
    if body.from.is_none() {
        errors.insert("from".to_string(), "From date is required".to_string());
    }

    let (Some(title), Some(company), Some(from)) = (title, company, body.from) else {
        return Err(ApiError::validation_error("Missing required fields", errors));
    };

    let entry = Experience {
        id: Uuid::new_v4(),
        title,
        company,
        location: body.location,
        from,
        to: body.to,
        current: body.current,
        description: body.description,
    };

    let service = ProfileService::new(state.pool.clone());
    let profile = service.add_experience(user.user_id, entry).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/experience/:exp_id - remove an entry by id
pub async fn experience_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let service = ProfileService::new(state.pool.clone());
    let profile = service.remove_experience(user.user_id, &exp_id).await?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct AddEducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// PUT /api/profile/education - prepend an education entry
pub async fn education_put(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<AddEducationRequest>,
) -> Result<Json<Profile>, ApiError> {
    let mut errors = HashMap::new();
    let school = require_field(body.school.as_ref(), "school", "School is required", &mut errors);
    let degree = require_field(body.degree.as_ref(), "degree", "Degree is required", &mut errors);
    let fieldofstudy = require_field(
        body.fieldofstudy.as_ref(),
        "fieldofstudy",
        "Field of study is required",
        &mut errors,
    );

    let (Some(school), Some(degree), Some(fieldofstudy)) = (school, degree, fieldofstudy) else {
        return Err(ApiError::validation_error("Missing required fields", errors));
    };

    let entry = Education {
        id: Uuid::new_v4(),
        school,
        degree,
        fieldofstudy,
        from: body.from,
        to: body.to,
        current: body.current,
        description: body.description,
    };

    let service = ProfileService::new(state.pool.clone());
    let profile = service.add_education(user.user_id, entry).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/education/:edu_id - remove an entry by id
pub async fn education_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let service = ProfileService::new(state.pool.clone());
    let profile = service.remove_education(user.user_id, &edu_id).await?;
    Ok(Json(profile))
}
