/// Detail aggregator
///
/// Turns a resolved movie plus its recommended titles into one flat
/// [`MovieDetailRecord`]. After the base detail fetch, the poster and cast
/// sub-pipelines run concurrently (they touch disjoint fields); the
/// biography sub-pipeline waits on the cast ids it depends on.
///
/// Both fan-outs join with all-or-nothing semantics: one failed lookup fails
/// the whole sub-pipeline and the query, never a partial list.
use crate::{
    error::{AppError, AppResult},
    models::{CastList, MovieDetailRecord, MovieDetails, PersonDetails, ResolvedTitle},
    services::{format, providers::MovieMetadataProvider},
};
use futures::future::try_join_all;
use std::sync::Arc;

/// Cast entries kept from the full credits list, in billing order
const TOP_CAST_LIMIT: usize = 10;

pub struct DetailAggregator {
    provider: Arc<dyn MovieMetadataProvider>,
}

impl DetailAggregator {
    pub fn new(provider: Arc<dyn MovieMetadataProvider>) -> Self {
        Self { provider }
    }

    pub async fn aggregate(
        &self,
        resolved: &ResolvedTitle,
        recommended: &[String],
    ) -> AppResult<MovieDetailRecord> {
        let details = self.provider.movie_details(resolved.id).await?;

        let (recommended_posters, cast) = tokio::try_join!(
            self.fetch_posters(recommended),
            self.fetch_cast(resolved.id),
        )?;

        let people = self.fetch_person_details(&cast.ids).await?;

        tracing::info!(
            movie_id = resolved.id,
            cast = cast.len(),
            recommendations = recommended.len(),
            "Detail aggregation completed"
        );

        Ok(build_record(
            resolved,
            details,
            cast,
            people,
            recommended,
            recommended_posters,
        ))
    }

    /// Poster sub-pipeline: one search per recommended title, issued
    /// concurrently. Output order matches input order.
    async fn fetch_posters(&self, titles: &[String]) -> AppResult<Vec<String>> {
        let lookups = titles.iter().map(|title| self.provider.search_movies(title));
        let responses = try_join_all(lookups).await?;

        titles
            .iter()
            .zip(responses)
            .map(|(title, results)| {
                results
                    .into_iter()
                    .next()
                    .and_then(|summary| summary.poster_url)
                    .ok_or_else(|| {
                        AppError::ExternalApi(format!(
                            "No poster found for recommended title '{}'",
                            title
                        ))
                    })
            })
            .collect()
    }

    /// Cast sub-pipeline: full credits truncated to the top billed entries
    async fn fetch_cast(&self, movie_id: u64) -> AppResult<CastList> {
        let members = self.provider.movie_credits(movie_id).await?;

        let mut cast = CastList::default();
        for member in members.into_iter().take(TOP_CAST_LIMIT) {
            cast.push(member);
        }

        Ok(cast)
    }

    /// Biography sub-pipeline: one person lookup per cast id, issued
    /// concurrently. The result arrays stay index-aligned with the input ids.
    async fn fetch_person_details(&self, ids: &[u64]) -> AppResult<PersonDetails> {
        let lookups = ids.iter().map(|id| self.provider.person_details(*id));
        let records = try_join_all(lookups).await?;

        let mut people = PersonDetails::default();
        for record in records {
            people.birth_dates.push(
                record
                    .birthday
                    .as_deref()
                    .and_then(format::display_date)
                    .unwrap_or_default(),
            );
            people.biographies.push(record.biography.unwrap_or_default());
            people
                .birthplaces
                .push(record.place_of_birth.unwrap_or_default());
        }

        Ok(people)
    }
}

fn build_record(
    resolved: &ResolvedTitle,
    details: MovieDetails,
    cast: CastList,
    people: PersonDetails,
    recommended: &[String],
    recommended_posters: Vec<String>,
) -> MovieDetailRecord {
    MovieDetailRecord {
        title: resolved.title.clone(),
        imdb_id: details.imdb_id.unwrap_or_default(),
        poster_url: details.poster_url.unwrap_or_default(),
        overview: details.overview.unwrap_or_default(),
        genres: details.genres.join(", "),
        rating: details.vote_average,
        vote_count: format::group_thousands(details.vote_count),
        release_date: details
            .release_date
            .as_deref()
            .and_then(format::display_date)
            .unwrap_or_default(),
        runtime: format::runtime(details.runtime.unwrap_or(0)),
        status: details.status.unwrap_or_default(),
        cast,
        people,
        recommended_titles: recommended.to_vec(),
        recommended_poster_urls: recommended_posters,
    }
}
