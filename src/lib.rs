pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    extract::State,
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{protected, public};
use state::AppState;

/// Build the full application router. Kept in the library so integration
/// tests can drive it in-process.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Mixed tier: listing is public, mutation requires a token
        .route(
            "/api/profile",
            get(public::profiles_get)
                .post(protected::profile_post)
                .delete(protected::profile_delete),
        )
        // Protected
        .route("/api/profile/me", get(protected::profile_me_get))
        .route("/api/profile/experience", put(protected::experience_put))
        .route(
            "/api/profile/experience/:exp_id",
            delete(protected::experience_delete),
        )
        .route("/api/profile/education", put(protected::education_put))
        .route(
            "/api/profile/education/:edu_id",
            delete(protected::education_delete),
        )
        // Public
        .route("/api/profile/user/:user_id", get(public::profile_by_user_get))
        .route("/api/profile/github/:username", get(public::github_repos_get))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "profile-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "me": "GET /api/profile/me (private)",
            "upsert": "POST /api/profile (private)",
            "list": "GET /api/profile (public)",
            "by_user": "GET /api/profile/user/:user_id (public)",
            "delete": "DELETE /api/profile (private)",
            "experience": "PUT /api/profile/experience, DELETE /api/profile/experience/:exp_id (private)",
            "education": "PUT /api/profile/education, DELETE /api/profile/education/:edu_id (private)",
            "github": "GET /api/profile/github/:username (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string(),
            })),
        ),
    }
}
