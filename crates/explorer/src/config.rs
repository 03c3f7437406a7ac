use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of every environment variable read by `ExplorerConfig`
pub const ENV_PREFIX: &str = "MOVIE_GRAPH_";

/// Explorer configuration loaded from `MOVIE_GRAPH_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Directory holding movies.dat, features.dat and directed_by.dat
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Upper bound for a single graph store query, in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Recommendations returned per movie
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/catalog")
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

fn default_recommendation_limit() -> usize {
    ranking::DEFAULT_LIMIT
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            query_timeout_ms: default_query_timeout_ms(),
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Self>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}
