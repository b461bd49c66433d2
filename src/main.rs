//! Storefront Homepage - homepage aggregation service

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storefront_homepage::{router, store::{PgBannerStore, PgProductCatalog}, AppConfig, AppState, HomepageAggregator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = AppConfig::from_env()?;
    let db = PgPoolOptions::new().max_connections(config.max_connections).connect(config.database_url()?).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let homepage = HomepageAggregator::new(
        Arc::new(PgBannerStore::new(db.clone())),
        Arc::new(PgProductCatalog::new(db)),
        config.origin(),
        config.homepage.clone(),
    );
    let app = router(AppState::new(homepage).with_uploads_dir(&config.uploads_dir), &config.cors);

    tracing::info!(origin = %config.origin(), "storefront homepage listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
