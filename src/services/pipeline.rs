/// Query pipeline
///
/// Drives one query through the four stages in order:
/// resolve title → fetch recommendations → aggregate details → render.
///
/// Every query takes a generation token from a monotonically increasing
/// counter. Starting a new query supersedes all older generations: a
/// superseded query refuses its next phase transition and its results are
/// discarded instead of overwriting the newer query's view. The committed
/// view (the rendered fragment) is owned by the current generation only.
use crate::{
    error::{AppError, AppResult},
    services::{
        aggregator::DetailAggregator, providers::MovieMetadataProvider, render::RenderClient,
        resolver, similarity::SimilarityClient,
    },
};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Token identifying which query cycle an in-flight operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Per-query stage, surfaced via the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Idle,
    Resolving,
    FetchingRecs,
    Aggregating,
    Submitting,
    Done,
    Failed,
}

/// Snapshot of the pipeline's externally visible state
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipelineStatus {
    pub phase: QueryPhase,
    pub generation: u64,
}

struct ViewState {
    phase: QueryPhase,
    generation: u64,
    fragment: Option<String>,
}

pub struct QueryPipeline {
    provider: Arc<dyn MovieMetadataProvider>,
    aggregator: DetailAggregator,
    similarity: SimilarityClient,
    render: RenderClient,
    generation: AtomicU64,
    view: RwLock<ViewState>,
}

impl QueryPipeline {
    pub fn new(
        provider: Arc<dyn MovieMetadataProvider>,
        similarity: SimilarityClient,
        render: RenderClient,
    ) -> Self {
        Self {
            aggregator: DetailAggregator::new(provider.clone()),
            provider,
            similarity,
            render,
            generation: AtomicU64::new(0),
            view: RwLock::new(ViewState {
                phase: QueryPhase::Idle,
                generation: 0,
                fragment: None,
            }),
        }
    }

    /// Runs one query end to end, returning the rendered fragment
    pub async fn run(&self, query: &str) -> AppResult<String> {
        let generation = self.begin();
        let query_id = Uuid::new_v4();

        tracing::info!(
            %query_id,
            generation = generation.value(),
            query = %query,
            "Query started"
        );

        let result = self.run_to_completion(generation, query).await;

        if let Err(error) = &result {
            tracing::warn!(
                %query_id,
                generation = generation.value(),
                error = %error,
                "Query failed"
            );
            // A superseded query must not clobber the newer query's phase.
            if !matches!(error, AppError::Stale { .. }) {
                let _ = self.checkpoint(generation, QueryPhase::Failed).await;
            }
        }

        result
    }

    async fn run_to_completion(&self, generation: Generation, query: &str) -> AppResult<String> {
        self.checkpoint(generation, QueryPhase::Resolving).await?;
        let resolved = resolver::resolve_title(self.provider.clone(), query).await?;

        self.checkpoint(generation, QueryPhase::FetchingRecs).await?;
        let recommended = self.similarity.fetch_recommendations(&resolved.title).await?;

        self.checkpoint(generation, QueryPhase::Aggregating).await?;
        let record = self.aggregator.aggregate(&resolved, &recommended).await?;

        self.checkpoint(generation, QueryPhase::Submitting).await?;
        let fragment = self.render.render(&record).await?;

        self.commit(generation, fragment).await
    }

    /// Takes the next generation token, superseding every older query
    fn begin(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Advances the state machine on behalf of `generation`
    ///
    /// Refuses with `Stale` when a newer query has taken over, so a
    /// superseded query stops before issuing further external calls or
    /// touching shared state.
    async fn checkpoint(&self, generation: Generation, phase: QueryPhase) -> AppResult<()> {
        let mut view = self.view.write().await;
        let current = self.generation.load(Ordering::SeqCst);
        if current != generation.value() {
            return Err(AppError::Stale {
                query: generation.value(),
                current,
            });
        }

        tracing::debug!(
            generation = generation.value(),
            phase = ?phase,
            "Pipeline phase transition"
        );

        view.generation = generation.value();
        view.phase = phase;
        Ok(())
    }

    /// Commits the rendered fragment, unless this query has been superseded
    async fn commit(&self, generation: Generation, fragment: String) -> AppResult<String> {
        let mut view = self.view.write().await;
        let current = self.generation.load(Ordering::SeqCst);
        if current != generation.value() {
            tracing::info!(
                generation = generation.value(),
                current,
                "Discarding stale render result"
            );
            return Err(AppError::Stale {
                query: generation.value(),
                current,
            });
        }

        view.generation = generation.value();
        view.phase = QueryPhase::Done;
        view.fragment = Some(fragment.clone());
        Ok(fragment)
    }

    /// The currently committed fragment, if any query has completed
    pub async fn current_fragment(&self) -> Option<String> {
        self.view.read().await.fragment.clone()
    }

    pub async fn status(&self) -> PipelineStatus {
        let view = self.view.read().await;
        PipelineStatus {
            phase: view.phase,
            generation: view.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMovieMetadataProvider;

    fn pipeline_with(provider: MockMovieMetadataProvider) -> QueryPipeline {
        QueryPipeline::new(
            Arc::new(provider),
            SimilarityClient::new("http://127.0.0.1:9".to_string()),
            RenderClient::new("http://127.0.0.1:9".to_string()),
        )
    }

    #[tokio::test]
    async fn begin_hands_out_monotonic_generations() {
        let pipeline = pipeline_with(MockMovieMetadataProvider::new());
        assert_eq!(pipeline.begin().value(), 1);
        assert_eq!(pipeline.begin().value(), 2);
        assert_eq!(pipeline.begin().value(), 3);
    }

    #[tokio::test]
    async fn checkpoint_refuses_superseded_generation() {
        let pipeline = pipeline_with(MockMovieMetadataProvider::new());
        let first = pipeline.begin();
        let _second = pipeline.begin();

        let error = pipeline
            .checkpoint(first, QueryPhase::Resolving)
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::Stale { query: 1, current: 2 }));
    }

    #[tokio::test]
    async fn commit_discards_stale_fragment() {
        let pipeline = pipeline_with(MockMovieMetadataProvider::new());
        let first = pipeline.begin();
        let second = pipeline.begin();

        pipeline
            .commit(second, "<fresh/>".to_string())
            .await
            .unwrap();
        let error = pipeline
            .commit(first, "<stale/>".to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::Stale { .. }));
        assert_eq!(pipeline.current_fragment().await, Some("<fresh/>".to_string()));
    }

    #[tokio::test]
    async fn failed_query_sets_failed_phase() {
        let mut provider = MockMovieMetadataProvider::new();
        provider.expect_search_movies().returning(|_| Ok(vec![]));

        let pipeline = pipeline_with(provider);
        let error = pipeline.run("unknown movie").await.unwrap_err();

        assert!(matches!(error, AppError::NotFound(_)));
        let status = pipeline.status().await;
        assert_eq!(status.phase, QueryPhase::Failed);
        assert_eq!(status.generation, 1);
    }

    #[tokio::test]
    async fn status_starts_idle() {
        let pipeline = pipeline_with(MockMovieMetadataProvider::new());
        let status = pipeline.status().await;
        assert_eq!(status.phase, QueryPhase::Idle);
        assert_eq!(status.generation, 0);
        assert_eq!(pipeline.current_fragment().await, None);
    }

    // The full resolve-recommend-aggregate-render flow, including the
    // stale-generation race, is covered in tests/pipeline_tests.rs against
    // mock HTTP services.
}
