use axum::Router;
use uuid::Uuid;

use profile_api::auth::{generate_jwt, Claims};
use profile_api::config::{
    AppConfig, DatabaseConfig, GithubConfig, SecurityConfig, ServerConfig, DEFAULT_GITHUB_API_BASE,
};
use profile_api::state::AppState;
use profile_api::{app, database};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Config pointing the store at an unroutable port so any request that
/// reaches the database fails fast with a connection error.
pub fn test_config(github_api_base: Option<String>) -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: "postgres://postgres@127.0.0.1:9/profiles_test".to_string(),
            max_connections: 2,
        },
        security: SecurityConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiry_hours: 1,
        },
        github: GithubConfig {
            client_id: String::new(),
            client_secret: String::new(),
            api_base: github_api_base.unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
        },
    }
}

pub fn test_app(config: AppConfig) -> Router {
    let pool = database::connect(&config.database).expect("lazy pool");
    app(AppState::new(config, pool))
}

#[allow(dead_code)]
pub fn auth_token(user_id: Uuid) -> String {
    generate_jwt(&Claims::new(user_id, 1), TEST_SECRET).expect("token")
}
