//! In-memory `GraphStore` over a loaded `CatalogGraph`.
//!
//! Each query clones the shared `Arc<CatalogGraph>` into a blocking task,
//! runs the scan there (in parallel with Rayon), and drops the clone when the
//! task ends. Dropping the returned future abandons the query; the blocking
//! task finishes on its own and holds nothing else.

use crate::error::{StoreError, StoreResult};
use crate::GraphStore;
use async_trait::async_trait;
use catalog::{CatalogGraph, MovieRecord};
use rand::Rng;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

/// Graph store backed by an in-process `CatalogGraph`
#[derive(Clone)]
pub struct InMemoryGraphStore {
    /// Shared, read-only graph (no lock needed)
    graph: Arc<CatalogGraph>,
}

impl InMemoryGraphStore {
    pub fn new(graph: Arc<CatalogGraph>) -> Self {
        Self { graph }
    }

    /// Load the data files in `data_dir` and serve them
    pub fn load_from_dir(data_dir: &Path) -> StoreResult<Self> {
        let graph = CatalogGraph::load_from_dir(data_dir)?;
        Ok(Self::new(Arc::new(graph)))
    }

    /// Build a store directly from records (one movie node per record)
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> StoreResult<Self> {
        let graph = CatalogGraph::from_records(records)?;
        Ok(Self::new(Arc::new(graph)))
    }

    pub fn graph(&self) -> &Arc<CatalogGraph> {
        &self.graph
    }

    /// Run a query against the graph on the blocking pool
    async fn run<T, F>(&self, operation: &'static str, query: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&CatalogGraph) -> T + Send + 'static,
    {
        let graph = Arc::clone(&self.graph);
        tokio::task::spawn_blocking(move || query(&graph))
            .await
            .map_err(|e| {
                error!("In-memory query '{}' failed: {}", operation, e);
                StoreError::Unavailable {
                    reason: format!("query '{}' did not complete: {}", operation, e),
                }
            })
    }
}

/// Movies whose title contains `fragment` (case-sensitive), hydrated
pub fn match_fragment(graph: &CatalogGraph, fragment: &str) -> Vec<MovieRecord> {
    graph
        .movies()
        .par_iter()
        .filter(|movie| fragment.is_empty() || movie.title.contains(fragment))
        .map(|movie| graph.hydrate(movie))
        .collect()
}

/// First movie node carrying exactly `title`, hydrated
pub fn exact_title(graph: &CatalogGraph, title: &str) -> Option<MovieRecord> {
    let &id = graph.movies_titled(title).first()?;
    graph.get_movie(id).map(|movie| graph.hydrate(movie))
}

/// Every movie whose title is not `title`, hydrated
pub fn all_except(graph: &CatalogGraph, title: &str) -> Vec<MovieRecord> {
    graph
        .movies()
        .par_iter()
        .filter(|movie| movie.title != title)
        .map(|movie| graph.hydrate(movie))
        .collect()
}

/// One movie drawn uniformly from the whole catalog, hydrated
pub fn uniform_pick(graph: &CatalogGraph) -> Option<MovieRecord> {
    let movies = graph.movies();
    if movies.is_empty() {
        return None;
    }
    let idx = rand::rng().random_range(0..movies.len());
    Some(graph.hydrate(&movies[idx]))
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>> {
        let fragment = fragment.to_string();
        let records = self
            .run("find_movies_by_title_fragment", move |graph| {
                match_fragment(graph, &fragment)
            })
            .await?;
        debug!("Fragment query matched {} movies", records.len());
        Ok(records)
    }

    async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>> {
        let title = title.to_string();
        self.run("find_movie_by_exact_title", move |graph| {
            exact_title(graph, &title)
        })
        .await
    }

    async fn all_movies_except(&self, title: &str) -> StoreResult<Vec<MovieRecord>> {
        let title = title.to_string();
        let records = self
            .run("all_movies_except", move |graph| all_except(graph, &title))
            .await?;
        debug!("Loaded {} comparison movies", records.len());
        Ok(records)
    }

    async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
        self.run("random_movie", uniform_pick).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_store() -> InMemoryGraphStore {
        InMemoryGraphStore::from_records(vec![
            MovieRecord::new("The Matrix", Some(1999), Some("Sci-Fi"))
                .with_actors(["Keanu Reeves", "Carrie-Anne Moss"])
                .with_directors(["Lana Wachowski", "Lilly Wachowski"]),
            MovieRecord::new("The Matrix Reloaded", Some(2003), Some("Sci-Fi"))
                .with_actors(["Keanu Reeves"])
                .with_directors(["Lana Wachowski"]),
            MovieRecord::new("Speed", Some(1994), Some("Action")).with_actors(["Keanu Reeves"]),
            MovieRecord::new("Unknown Film", None, None),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_fragment_search() {
        let store = create_test_store();

        let records = store.find_movies_by_title_fragment("Matrix").await.unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["The Matrix", "The Matrix Reloaded"]);

        let matrix = &records[0];
        assert_eq!(matrix.actors.len(), 2);
        assert_eq!(matrix.directors.len(), 2);
    }

    #[tokio::test]
    async fn test_fragment_search_is_case_sensitive() {
        let store = create_test_store();

        assert!(store.find_movies_by_title_fragment("matrix").await.unwrap().is_empty());
        assert_eq!(store.find_movies_by_title_fragment("Matrix").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_fragment_returns_everything() {
        let store = create_test_store();
        let records = store.find_movies_by_title_fragment("").await.unwrap();
        assert_eq!(records.len(), 4);
    }

    #[tokio::test]
    async fn test_exact_title() {
        let store = create_test_store();

        let speed = store.find_movie_by_exact_title("Speed").await.unwrap().unwrap();
        assert_eq!(speed.year, Some(1994));
        assert!(speed.directors.is_empty());

        // Substring is not enough
        assert!(store.find_movie_by_exact_title("The Matrix Re").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_movies_except() {
        let store = create_test_store();
        let records = store.all_movies_except("The Matrix").await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.title != "The Matrix"));
    }

    #[tokio::test]
    async fn test_random_movie_on_empty_catalog() {
        let store = InMemoryGraphStore::new(Arc::new(CatalogGraph::new()));
        assert!(store.random_movie().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_random_movie_is_roughly_uniform() {
        let store = create_test_store();
        let mut counts: HashMap<String, u32> = HashMap::new();

        for _ in 0..4000 {
            let record = store.random_movie().await.unwrap().unwrap();
            *counts.entry(record.title).or_insert(0) += 1;
        }

        // Expected 1000 each; 800..1200 is > 7 standard deviations wide
        assert_eq!(counts.len(), 4);
        for (title, count) in &counts {
            assert!(
                (800..=1200).contains(count),
                "{} picked {} times out of 4000",
                title,
                count
            );
        }
    }

    #[test]
    fn test_uniform_pick_only_returns_catalog_movies() {
        let store = create_test_store();
        for _ in 0..100 {
            let record = uniform_pick(store.graph()).unwrap();
            assert!(!store.graph().movies_titled(&record.title).is_empty());
        }
    }
}
