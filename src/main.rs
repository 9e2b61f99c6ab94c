use std::sync::Arc;

use marquee_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        pipeline::QueryPipeline, providers::tmdb::TmdbProvider, render::RenderClient,
        similarity::SimilarityClient,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.image_base_url.clone(),
    ));
    let pipeline = Arc::new(QueryPipeline::new(
        provider,
        SimilarityClient::new(config.similarity_api_url.clone()),
        RenderClient::new(config.render_api_url.clone()),
    ));

    let app = create_router(AppState { pipeline });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "marquee-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
