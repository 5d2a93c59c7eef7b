use anyhow::Context;

use breeze_api::config::AppConfig;
use breeze_api::database::Db;
use breeze_api::{app, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = Db::connect(&config.database_url).await.context("database connection failed")?;
    db.ensure_schema().await.context("schema setup failed")?;

    let port = config.port;
    let ctx = AppContext::new(db, config);
    let router = app(ctx);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("breeze-api listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
