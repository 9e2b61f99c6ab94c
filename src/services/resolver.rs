use crate::{
    error::{AppError, AppResult},
    models::ResolvedTitle,
    services::providers::MovieMetadataProvider,
};
use std::sync::Arc;

/// Resolves a free-text query to a canonical movie identifier and title
///
/// The top-ranked search match wins; there is no fuzzy scoring beyond the
/// provider's own ranking. An empty result set is `NotFound` and no further
/// pipeline stage runs.
pub async fn resolve_title(
    provider: Arc<dyn MovieMetadataProvider>,
    query: &str,
) -> AppResult<ResolvedTitle> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let results = provider.search_movies(query).await?;

    let first = results.into_iter().next().ok_or_else(|| {
        AppError::NotFound(format!("No movies matched query '{}'", query))
    })?;

    tracing::info!(movie_id = first.id, title = %first.title, "Title resolved");

    Ok(ResolvedTitle {
        id: first.id,
        title: first.title,
    })
}
