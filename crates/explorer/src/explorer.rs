//! # Movie Explorer
//!
//! Wires search, recommendation and random pick to one graph store and
//! runs the browse flow a front end needs:
//! 1. Search the catalog by title fragment
//! 2. Fetch recommendations for every match, concurrently
//! 3. Return each match with its recommendations, in search order
//!
//! A failed recommendation call is reported on its own match; the other
//! matches keep their results. Only a failed search fails the whole call.
//!
//! Every store query goes through a `TimeoutStore`, so a stalled store
//! surfaces as `StoreError::Timeout` instead of hanging the caller.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use catalog::{MovieSummary, ScoredMovie};
use graph_store::{GraphStore, InMemoryGraphStore, TimeoutStore};
use ranking::{CatalogSearch, RandomPicker, SimilarityRanker};

use crate::config::ExplorerConfig;

/// A search match together with its recommendations
#[derive(Debug, Clone, Serialize)]
pub struct Exploration {
    pub movie: MovieSummary,
    pub recommendations: Vec<ScoredMovie>,
    /// Why recommendations are missing for this movie, if they are
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Entry point for front ends
#[derive(Clone)]
pub struct MovieExplorer {
    search: CatalogSearch,
    ranker: SimilarityRanker,
    picker: RandomPicker,
    limit: usize,
}

impl MovieExplorer {
    /// Build an explorer over any graph store.
    ///
    /// The store is wrapped so that each query is bounded by
    /// `config.query_timeout()`.
    pub fn new(store: Arc<dyn GraphStore>, config: &ExplorerConfig) -> Self {
        let store: Arc<dyn GraphStore> =
            Arc::new(TimeoutStore::new(store, config.query_timeout()));
        Self {
            search: CatalogSearch::new(store.clone()),
            ranker: SimilarityRanker::new(store.clone()),
            picker: RandomPicker::new(store),
            limit: config.recommendation_limit,
        }
    }

    /// Load the catalog from `config.data_dir` into an in-memory store
    pub fn load(config: &ExplorerConfig) -> Result<Self> {
        let start = Instant::now();
        let store = InMemoryGraphStore::load_from_dir(&config.data_dir)
            .with_context(|| format!("Failed to load catalog from {}", config.data_dir.display()))?;
        info!("Catalog ready in {:.2?}", start.elapsed());
        Ok(Self::new(Arc::new(store), config))
    }

    /// Recommendations per movie used by `explore` and `recommend_default`
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn search(&self, fragment: &str) -> Result<Vec<MovieSummary>> {
        self.search
            .search(fragment)
            .await
            .with_context(|| format!("Failed to search for '{}'", fragment))
    }

    pub async fn recommend(&self, title: &str, limit: usize) -> Result<Vec<ScoredMovie>> {
        self.ranker
            .recommend(title, limit)
            .await
            .with_context(|| format!("Failed to fetch recommendations for '{}'", title))
    }

    pub async fn recommend_default(&self, title: &str) -> Result<Vec<ScoredMovie>> {
        self.recommend(title, self.limit).await
    }

    /// One random movie, or `None` when the catalog is empty
    pub async fn surprise(&self) -> Result<Option<MovieSummary>> {
        self.picker
            .pick_random()
            .await
            .context("Failed to pick a random movie")
    }

    /// Search, then recommend for every match.
    ///
    /// Recommendation calls run concurrently. A failed call leaves an
    /// `error` on that match and an empty recommendation list.
    #[instrument(skip(self))]
    pub async fn explore(&self, fragment: &str) -> Result<Vec<Exploration>> {
        let start_time = Instant::now();

        let matches = self.search(fragment).await?;
        info!("Search returned {} movies", matches.len());

        let mut tasks = JoinSet::new();
        for (position, movie) in matches.iter().enumerate() {
            let ranker = self.ranker.clone();
            let title = movie.title.clone();
            let limit = self.limit;
            tasks.spawn(async move { (position, ranker.recommend(&title, limit).await) });
        }

        let mut outcomes: Vec<Option<Result<Vec<ScoredMovie>, String>>> = vec![None; matches.len()];
        while let Some(joined) = tasks.join_next().await {
            let (position, result) = joined.context("Recommendation task panicked")?;
            let outcome = result.map_err(|e| {
                warn!(title = %matches[position].title, error = %e, "Recommendation failed");
                format!("Failed to fetch recommendations: {}", e)
            });
            outcomes[position] = Some(outcome);
        }

        let explorations: Vec<Exploration> = matches
            .into_iter()
            .zip(outcomes)
            .map(|(movie, outcome)| match outcome {
                Some(Ok(recommendations)) => Exploration {
                    movie,
                    recommendations,
                    error: None,
                },
                Some(Err(error)) => Exploration {
                    movie,
                    recommendations: Vec::new(),
                    error: Some(error),
                },
                None => Exploration {
                    movie,
                    recommendations: Vec::new(),
                    error: Some("Recommendation task did not report".to_string()),
                },
            })
            .collect();

        let failed = explorations.iter().filter(|e| e.error.is_some()).count();
        info!(
            "Explored {} movies ({} failed) in {:.2?}",
            explorations.len(),
            failed,
            start_time.elapsed()
        );
        Ok(explorations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::MovieRecord;
    use graph_store::{StoreError, StoreResult};
    use std::time::Duration;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_store() -> Arc<dyn GraphStore> {
        let store = InMemoryGraphStore::from_records(vec![
            MovieRecord::new("Alien", Some(1979), Some("Horror"))
                .with_actors(["Sigourney Weaver", "Tom Skerritt"])
                .with_directors(["Ridley Scott"]),
            MovieRecord::new("Aliens", Some(1986), Some("Action"))
                .with_actors(["Sigourney Weaver", "Michael Biehn"])
                .with_directors(["James Cameron"]),
            MovieRecord::new("The Terminator", Some(1984), Some("Action"))
                .with_actors(["Michael Biehn", "Linda Hamilton"])
                .with_directors(["James Cameron"]),
            MovieRecord::new("Blade Runner", Some(1982), Some("Sci-Fi"))
                .with_actors(["Harrison Ford"])
                .with_directors(["Ridley Scott"]),
        ])
        .unwrap();
        Arc::new(store)
    }

    fn test_config() -> ExplorerConfig {
        ExplorerConfig {
            query_timeout_ms: 1_000,
            recommendation_limit: 2,
            ..ExplorerConfig::default()
        }
    }

    /// Answers title lookups but never finishes the catalog scan
    struct SlowScanStore {
        inner: Arc<dyn GraphStore>,
    }

    #[async_trait]
    impl GraphStore for SlowScanStore {
        async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>> {
            self.inner.find_movies_by_title_fragment(fragment).await
        }

        async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>> {
            self.inner.find_movie_by_exact_title(title).await
        }

        async fn all_movies_except(&self, _title: &str) -> StoreResult<Vec<MovieRecord>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![])
        }

        async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
            self.inner.random_movie().await
        }
    }

    /// Fails exact-title lookups for one title, or every fragment search
    struct PartlyBrokenStore {
        inner: Arc<dyn GraphStore>,
        broken_title: &'static str,
        search_down: bool,
    }

    fn refused() -> StoreError {
        StoreError::Unavailable {
            reason: "connection refused".to_string(),
        }
    }

    #[async_trait]
    impl GraphStore for PartlyBrokenStore {
        async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>> {
            if self.search_down {
                return Err(refused());
            }
            self.inner.find_movies_by_title_fragment(fragment).await
        }

        async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>> {
            if title == self.broken_title {
                return Err(refused());
            }
            self.inner.find_movie_by_exact_title(title).await
        }

        async fn all_movies_except(&self, title: &str) -> StoreResult<Vec<MovieRecord>> {
            self.inner.all_movies_except(title).await
        }

        async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
            self.inner.random_movie().await
        }
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[tokio::test]
    async fn test_explore_keeps_search_order() {
        let explorer = MovieExplorer::new(build_test_store(), &test_config());

        let explorations = explorer.explore("Alien").await.unwrap();
        let titles: Vec<_> = explorations.iter().map(|e| e.movie.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Aliens"]);

        for exploration in &explorations {
            assert!(exploration.error.is_none());
            assert_eq!(exploration.recommendations.len(), 2);
            assert!(exploration
                .recommendations
                .iter()
                .all(|r| r.title != exploration.movie.title));
        }

        // Aliens shares Sigourney Weaver with Alien; The Terminator shares
        // Michael Biehn, James Cameron and the genre with Aliens
        assert_eq!(explorations[1].recommendations[0].title, "The Terminator");
    }

    #[tokio::test]
    async fn test_explore_without_matches() {
        let explorer = MovieExplorer::new(build_test_store(), &test_config());
        assert!(explorer.explore("Predator").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recommend_default_uses_configured_limit() {
        let explorer = MovieExplorer::new(build_test_store(), &test_config());

        assert_eq!(explorer.limit(), 2);
        assert_eq!(explorer.recommend_default("Alien").await.unwrap().len(), 2);
        assert_eq!(explorer.recommend("Alien", 10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_surprise() {
        let explorer = MovieExplorer::new(build_test_store(), &test_config());
        let movie = explorer.surprise().await.unwrap().unwrap();
        assert!(!movie.title.is_empty());
    }

    #[tokio::test]
    async fn test_slow_store_surfaces_timeout() {
        let store = Arc::new(SlowScanStore {
            inner: build_test_store(),
        });
        let config = ExplorerConfig {
            query_timeout_ms: 200,
            ..test_config()
        };
        let explorer = MovieExplorer::new(store, &config);

        let err = explorer.recommend("Alien", 2).await.unwrap_err();
        let store_err = err
            .downcast_ref::<StoreError>()
            .expect("store error should be preserved");
        assert!(store_err.is_timeout());
        assert!(err.to_string().contains("Failed to fetch recommendations"));

        // Search still answers, so every match carries its own timeout
        let explorations = explorer.explore("Alien").await.unwrap();
        assert_eq!(explorations.len(), 2);
        for exploration in &explorations {
            assert!(exploration.recommendations.is_empty());
            assert!(exploration.error.as_deref().unwrap().contains("timed out"));
        }
    }

    #[tokio::test]
    async fn test_one_failed_match_keeps_the_others() {
        let store = Arc::new(PartlyBrokenStore {
            inner: build_test_store(),
            broken_title: "Aliens",
            search_down: false,
        });
        let explorer = MovieExplorer::new(store, &test_config());

        let explorations = explorer.explore("Alien").await.unwrap();
        assert_eq!(explorations.len(), 2);

        let alien = &explorations[0];
        assert_eq!(alien.movie.title, "Alien");
        assert!(alien.error.is_none());
        assert_eq!(alien.recommendations.len(), 2);
        assert_eq!(alien.recommendations[0].title, "Blade Runner");

        let aliens = &explorations[1];
        assert_eq!(aliens.movie.title, "Aliens");
        assert!(aliens.recommendations.is_empty());
        assert!(aliens.error.as_deref().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_failed_search_fails_explore() {
        let store = Arc::new(PartlyBrokenStore {
            inner: build_test_store(),
            broken_title: "",
            search_down: true,
        });
        let explorer = MovieExplorer::new(store, &test_config());

        let err = explorer.explore("Alien").await.unwrap_err();
        assert!(err.to_string().contains("Failed to search for 'Alien'"));
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_exploration_json_omits_missing_error() {
        let exploration = Exploration {
            movie: MovieRecord::new("Heat", Some(1995), Some("Crime")).into(),
            recommendations: Vec::new(),
            error: None,
        };
        let json = serde_json::to_value(&exploration).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["movie"]["title"], "Heat");
    }

    #[test]
    fn test_load_missing_directory() {
        let config = ExplorerConfig {
            data_dir: "/definitely/not/here".into(),
            ..ExplorerConfig::default()
        };
        let err = MovieExplorer::load(&config).err().expect("load should fail");
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
