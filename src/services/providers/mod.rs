/// Movie metadata provider abstraction
///
/// The pipeline only ever talks to the metadata API through this trait, so
/// tests can substitute a mock and a different metadata source can be wired
/// in without touching the aggregation logic.
use crate::{
    error::AppResult,
    models::{CastMember, MovieDetails, MovieSummary, PersonRecord},
};

pub mod tmdb;

/// The four metadata lookups the pipeline performs
///
/// Implementations return display-ready image URLs (absolute, not raw paths)
/// so downstream stages never need to know the provider's image host.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieMetadataProvider: Send + Sync {
    /// Search for movies by free-text query, in the provider's ranking order
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Fetch the full metadata record for one movie
    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Fetch the full cast list for one movie, in billing order
    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<CastMember>>;

    /// Fetch the biographical record for one person
    async fn person_details(&self, person_id: u64) -> AppResult<PersonRecord>;
}
