/// Similarity recommendation client
///
/// The similarity service is a plain-text protocol: POST the canonical title
/// as the `name` form field and get back either a fixed "not in our
/// database" sentinel string or a `---`-delimited list of recommended
/// titles, best match first.
use crate::error::{AppError, AppResult};
use reqwest::Client as HttpClient;

/// Exact body the service returns for a title it does not know
pub const NOT_IN_DATABASE_SENTINEL: &str =
    "Sorry! The movie you requested is not in our database.";

/// Literal separator between recommended titles in the response body
const TITLE_DELIMITER: &str = "---";

#[derive(Clone)]
pub struct SimilarityClient {
    http_client: HttpClient,
    api_url: String,
}

impl SimilarityClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// Fetches the ordered list of titles similar to `title`
    ///
    /// The sentinel body maps to `NotFound` so the pipeline halts cleanly
    /// without treating it as a transport failure.
    pub async fn fetch_recommendations(&self, title: &str) -> AppResult<Vec<String>> {
        let url = format!("{}/similarity", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .form(&[("name", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Similarity service returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let titles = parse_recommendations(&body)?;

        tracing::info!(
            title = %title,
            recommendations = titles.len(),
            "Recommendations fetched"
        );

        Ok(titles)
    }
}

/// Decodes a similarity response body into an ordered title list
///
/// Empty segments produced by a stray delimiter are kept as-is and passed
/// through to the caller (see DESIGN.md, open questions).
pub(crate) fn parse_recommendations(body: &str) -> AppResult<Vec<String>> {
    if body == NOT_IN_DATABASE_SENTINEL {
        return Err(AppError::NotFound(
            "Title not in the similarity database".to_string(),
        ));
    }

    Ok(body.split(TITLE_DELIMITER).map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_recommendations_splits_in_order() {
        let titles = parse_recommendations("A---B---C").unwrap();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_recommendations_single_title() {
        let titles = parse_recommendations("The Prestige").unwrap();
        assert_eq!(titles, vec!["The Prestige"]);
    }

    #[test]
    fn test_parse_recommendations_keeps_empty_segments() {
        // A trailing delimiter yields an empty entry; it is propagated, not
        // filtered.
        let titles = parse_recommendations("A---B---").unwrap();
        assert_eq!(titles, vec!["A", "B", ""]);
    }

    #[test]
    fn test_parse_recommendations_sentinel_is_not_found() {
        let error = parse_recommendations(NOT_IN_DATABASE_SENTINEL).unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn fetch_recommendations_posts_title_as_form_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/similarity"))
            .and(body_string_contains("name=Inception"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Interstellar---The Prestige"))
            .mount(&server)
            .await;

        let client = SimilarityClient::new(server.uri());
        let titles = client.fetch_recommendations("Inception").await.unwrap();

        assert_eq!(titles, vec!["Interstellar", "The Prestige"]);
    }

    #[tokio::test]
    async fn fetch_recommendations_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/similarity"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = SimilarityClient::new(server.uri());
        let error = client.fetch_recommendations("Inception").await.unwrap_err();

        assert!(matches!(error, AppError::ExternalApi(_)));
    }
}
