//! products-api server: picks the backend from the environment and serves the product routes.

use products_api::{app, ensure_database_exists, ensure_products_table, AppConfig, AppState, Backend, JsonFileStore, PgProductStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match &config.backend {
        Backend::File { path } => {
            tracing::info!(path = %path.display(), "using JSON file backend");
            AppState::new(JsonFileStore::new(path.clone()))
        }
        Backend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!("using PostgreSQL backend");
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            ensure_products_table(&pool).await?;
            AppState::new(PgProductStore::new(pool))
        }
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
