//! Raw wire types for the movie metadata API (TMDB)
//!
//! These mirror the JSON shapes of the four endpoints the pipeline touches:
//! movie search, movie details, movie credits, and person details. Anything
//! the upstream marks nullable is an `Option` here.

use serde::Deserialize;

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// A single search result entry
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub original_title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    pub cast: Vec<CreditEntry>,
}

/// One cast entry, in source billing order
#[derive(Debug, Clone, Deserialize)]
pub struct CreditEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response from GET /person/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct PersonResponse {
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
}
