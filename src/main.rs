use eshop_api::{app, config::AppConfig, database, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eshop_api=debug,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting eshop API in {:?} mode", config.environment);

    // Storage comes up before the listener: pool, schema, uploads directory
    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;
    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, pool);
    let router = app::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
