use profile_api::{app, config::AppConfig, database, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("configuration error: {}", e));
    let pool = database::connect(&config.database)
        .unwrap_or_else(|e| panic!("failed to build database pool: {}", e));

    if let Err(e) = sqlx::migrate!().run(&pool).await {
        panic!("database migration failed: {}", e);
    }

    let port = config.server.port;
    let state = AppState::new(config, pool);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("profile API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}
