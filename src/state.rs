use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared per-process state injected into handlers and extractors.
/// Constructed once at startup; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            http: reqwest::Client::new(),
        }
    }
}
