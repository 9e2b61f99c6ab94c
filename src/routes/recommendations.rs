use axum::{extract::State, response::Html, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::pipeline::PipelineStatus,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub title: String,
}

/// Runs the full pipeline for one query and returns the rendered fragment
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Html<String>> {
    let fragment = state.pipeline.run(&request.title).await?;
    Ok(Html(fragment))
}

/// Returns the currently committed fragment (the results region)
pub async fn results(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .pipeline
        .current_fragment()
        .await
        .map(Html)
        .ok_or_else(|| AppError::NotFound("No results rendered yet".to_string()))
}

/// Reports the pipeline phase and generation of the current query
pub async fn status(State(state): State<AppState>) -> Json<PipelineStatus> {
    Json(state.pipeline.status().await)
}
