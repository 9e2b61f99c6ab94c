use serde::Deserialize;

/// Application configuration loaded from environment variables
///
/// The metadata API key is the one secret and has no default: it stays on the
/// server and is never shipped to a client.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Movie metadata API key (TMDB)
    pub tmdb_api_key: String,

    /// Movie metadata API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL for poster and profile images
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Similarity recommendation service base URL
    #[serde(default = "default_similarity_api_url")]
    pub similarity_api_url: String,

    /// HTML fragment renderer base URL
    #[serde(default = "default_render_api_url")]
    pub render_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_similarity_api_url() -> String {
    "https://movierecommendationbyzuned.streamlit.app".to_string()
}

fn default_render_api_url() -> String {
    "https://movierecommendationbyzuned.streamlit.app".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
