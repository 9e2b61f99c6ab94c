use serde::{Deserialize, Serialize};

pub mod tmdb;

/// Canonical identifier and title resolved from a free-text query
///
/// Produced by the title resolver (first search match wins) and consumed by
/// the recommendation fetcher and the detail aggregator. Lives for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTitle {
    pub id: u64,
    pub title: String,
}

/// A single movie search match with its poster resolved to an absolute URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
}

/// Full metadata for one movie, with image paths already absolutized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub imdb_id: Option<String>,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub status: Option<String>,
}

/// One credited cast member in source billing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_url: Option<String>,
}

/// Biographical record for one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub birthday: Option<String>,
    pub biography: Option<String>,
    pub place_of_birth: Option<String>,
}

/// Top-billed cast projected into parallel arrays
///
/// The Nth entry of every array refers to the same person; the renderer
/// depends on that alignment, so the arrays only ever grow together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastList {
    pub ids: Vec<u64>,
    pub names: Vec<String>,
    pub characters: Vec<String>,
    pub profile_urls: Vec<Option<String>>,
}

impl CastList {
    pub fn push(&mut self, member: CastMember) {
        self.ids.push(member.id);
        self.names.push(member.name);
        self.characters.push(member.character);
        self.profile_urls.push(member.profile_url);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Per-person biographical details, index-aligned with [`CastList`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonDetails {
    pub birth_dates: Vec<String>,
    pub biographies: Vec<String>,
    pub birthplaces: Vec<String>,
}

impl PersonDetails {
    pub fn len(&self) -> usize {
        self.birth_dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birth_dates.is_empty()
    }
}

/// The fully aggregated payload handed to the fragment renderer
///
/// Scalar fields arrive pre-formatted for display (runtime, vote count,
/// release date); missing upstream values degrade to empty strings. Built
/// once per query, submitted once, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailRecord {
    pub title: String,
    pub imdb_id: String,
    pub poster_url: String,
    pub overview: String,
    pub genres: String,
    pub rating: f64,
    pub vote_count: String,
    pub release_date: String,
    pub runtime: String,
    pub status: String,
    pub cast: CastList,
    pub people: PersonDetails,
    pub recommended_titles: Vec<String>,
    pub recommended_poster_urls: Vec<String>,
}
