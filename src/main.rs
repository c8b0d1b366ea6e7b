//! Server binary: loads settings from the environment (and `.env`), prepares the
//! SQLite tables, and serves the catalog routes.

use library_catalog::{app, connect, ensure_tables, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("library_catalog=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = connect(&settings).await?;
    ensure_tables(&pool).await?;

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(pool))).await?;
    Ok(())
}
