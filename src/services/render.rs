/// Fragment renderer client (payload submitter)
///
/// The renderer accepts the aggregated record as form fields and returns a
/// pre-rendered HTML fragment. The fragment is opaque to this component and
/// is handed back verbatim. No retry; a failed submission fails the query.
use crate::{
    error::{AppError, AppResult},
    models::MovieDetailRecord,
};
use reqwest::Client as HttpClient;
use serde::Serialize;

#[derive(Clone)]
pub struct RenderClient {
    http_client: HttpClient,
    api_url: String,
}

impl RenderClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// Submits the record and returns the rendered fragment body
    pub async fn render(&self, record: &MovieDetailRecord) -> AppResult<String> {
        let url = format!("{}/recommend", self.api_url);
        let fields = form_fields(record)?;

        let response = self.http_client.post(&url).form(&fields).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Render service returned status {}: {}",
                status, body
            )));
        }

        let fragment = response.text().await?;

        tracing::info!(
            title = %record.title,
            fragment_bytes = fragment.len(),
            "Fragment rendered"
        );

        Ok(fragment)
    }
}

/// Flattens the record into the renderer's form fields
///
/// Every array-valued field is independently JSON-encoded to a string; the
/// renderer decodes each one on its side. Field names are the renderer's
/// contract and must not change.
pub(crate) fn form_fields(record: &MovieDetailRecord) -> AppResult<Vec<(&'static str, String)>> {
    Ok(vec![
        ("title", record.title.clone()),
        ("cast_ids", encode(&record.cast.ids)?),
        ("cast_names", encode(&record.cast.names)?),
        ("cast_chars", encode(&record.cast.characters)?),
        ("cast_profiles", encode(&record.cast.profile_urls)?),
        ("cast_bdays", encode(&record.people.birth_dates)?),
        ("cast_bios", encode(&record.people.biographies)?),
        ("cast_places", encode(&record.people.birthplaces)?),
        ("imdb_id", record.imdb_id.clone()),
        ("poster", record.poster_url.clone()),
        ("genres", record.genres.clone()),
        ("overview", record.overview.clone()),
        ("rating", record.rating.to_string()),
        ("vote_count", record.vote_count.clone()),
        ("release_date", record.release_date.clone()),
        ("runtime", record.runtime.clone()),
        ("status", record.status.clone()),
        ("rec_movies", encode(&record.recommended_titles)?),
        ("rec_posters", encode(&record.recommended_poster_urls)?),
    ])
}

fn encode<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Payload serialization error: {}", e)))
}
