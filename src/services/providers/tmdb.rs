/// TMDB metadata provider
///
/// Wraps the four TMDB endpoints the pipeline needs:
/// 1. Search: /search/movie → ranked matches with poster paths
/// 2. Details: /movie/{id} → genres, runtime, rating, release date
/// 3. Credits: /movie/{id}/credits → cast in billing order
/// 4. Person: /person/{id} → birthday, biography, birthplace
///
/// Poster and profile paths are joined onto the configured image base URL
/// before they leave this module.
use crate::{
    error::{AppError, AppResult},
    models::{
        tmdb::{CreditsResponse, DetailsResponse, PersonResponse, SearchResponse},
        CastMember, MovieDetails, MovieSummary, PersonRecord,
    },
    services::providers::MovieMetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, image_base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            image_base_url,
        }
    }

    /// Issues one GET request and deserializes the JSON body.
    /// Non-2xx responses become `ExternalApi` with the status and body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Joins a TMDB image path (leading slash included) onto the image base
    fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.image_base_url, path)
    }
}

#[async_trait::async_trait]
impl MovieMetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let url = format!("{}/search/movie", self.api_url);
        let response: SearchResponse = self.fetch_json(url, &[("query", query)]).await?;

        let summaries: Vec<MovieSummary> = response
            .results
            .into_iter()
            .map(|result| MovieSummary {
                id: result.id,
                title: result.original_title,
                poster_url: result.poster_path.map(|p| self.image_url(&p)),
            })
            .collect();

        tracing::info!(
            query = %query,
            results = summaries.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(summaries)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let details: DetailsResponse = self.fetch_json(url, &[]).await?;

        tracing::info!(movie_id, provider = "tmdb", "Movie details fetched");

        Ok(MovieDetails {
            imdb_id: details.imdb_id,
            poster_url: details.poster_path.map(|p| self.image_url(&p)),
            overview: details.overview,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            release_date: details.release_date,
            runtime: details.runtime,
            status: details.status,
        })
    }

    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<CastMember>> {
        let url = format!("{}/movie/{}/credits", self.api_url, movie_id);
        let credits: CreditsResponse = self.fetch_json(url, &[]).await?;

        tracing::info!(
            movie_id,
            cast = credits.cast.len(),
            provider = "tmdb",
            "Movie credits fetched"
        );

        Ok(credits
            .cast
            .into_iter()
            .map(|entry| CastMember {
                id: entry.id,
                name: entry.name,
                character: entry.character,
                profile_url: entry.profile_path.map(|p| self.image_url(&p)),
            })
            .collect())
    }

    async fn person_details(&self, person_id: u64) -> AppResult<PersonRecord> {
        let url = format!("{}/person/{}", self.api_url, person_id);
        let person: PersonResponse = self.fetch_json(url, &[]).await?;

        Ok(PersonRecord {
            birthday: person.birthday,
            biography: person.biography,
            place_of_birth: person.place_of_birth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(api_url: String) -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            api_url,
            "https://images.test".to_string(),
        )
    }

    #[test]
    fn test_image_url_joins_base_and_path() {
        let provider = test_provider("http://api.test".to_string());
        assert_eq!(
            provider.image_url("/inception.jpg"),
            "https://images.test/inception.jpg"
        );
    }

    #[tokio::test]
    async fn search_movies_returns_ranked_summaries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("query", "Inception"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 27205, "original_title": "Inception", "poster_path": "/a.jpg"},
                    {"id": 64956, "original_title": "Inception: The Cobol Job", "poster_path": null}
                ]
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let results = provider.search_movies("Inception").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 27205);
        assert_eq!(
            results[0].poster_url,
            Some("https://images.test/a.jpg".to_string())
        );
        assert_eq!(results[1].poster_url, None);
    }

    #[tokio::test]
    async fn movie_details_maps_genres_to_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/27205"))
            .and(query_param("api_key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "imdb_id": "tt1375666",
                "poster_path": "/p.jpg",
                "overview": "A thief who steals corporate secrets.",
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                "vote_average": 8.3,
                "vote_count": 34512,
                "release_date": "2010-07-16",
                "runtime": 148,
                "status": "Released"
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let details = provider.movie_details(27205).await.unwrap();

        assert_eq!(details.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(details.runtime, Some(148));
        assert_eq!(
            details.poster_url,
            Some("https://images.test/p.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn movie_credits_preserves_billing_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/27205/credits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cast": [
                    {"id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb", "profile_path": "/leo.jpg"},
                    {"id": 24045, "name": "Joseph Gordon-Levitt", "character": "Arthur", "profile_path": null}
                ]
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let cast = provider.movie_credits(27205).await.unwrap();

        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].name, "Leonardo DiCaprio");
        assert_eq!(
            cast[0].profile_url,
            Some("https://images.test/leo.jpg".to_string())
        );
        assert_eq!(cast[1].profile_url, None);
    }

    #[tokio::test]
    async fn person_details_returns_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/person/6193"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "birthday": "1974-11-11",
                "biography": "An American actor.",
                "place_of_birth": "Los Angeles, California, USA"
            })))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let person = provider.person_details(6193).await.unwrap();

        assert_eq!(person.birthday, Some("1974-11-11".to_string()));
    }

    #[tokio::test]
    async fn non_success_status_becomes_external_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let provider = test_provider(server.uri());
        let error = provider.movie_details(1).await.unwrap_err();

        assert!(matches!(error, AppError::ExternalApi(_)));
        assert!(error.to_string().contains("404"));
    }
}
