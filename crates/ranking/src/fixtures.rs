//! Shared test stores.

use async_trait::async_trait;
use catalog::MovieRecord;
use graph_store::{GraphStore, InMemoryGraphStore, StoreError, StoreResult};
use std::sync::Arc;

/// Movie A (Drama, 2000, {X, Y}, {D1}), Movie B (Drama, 2003, {Y, Z}, {D1}),
/// Movie C (Comedy, 1990, {}, {D2})
pub(crate) fn scenario_store() -> Arc<dyn GraphStore> {
    let store = InMemoryGraphStore::from_records(vec![
        MovieRecord::new("Movie A", Some(2000), Some("Drama"))
            .with_actors(["X", "Y"])
            .with_directors(["D1"]),
        MovieRecord::new("Movie B", Some(2003), Some("Drama"))
            .with_actors(["Y", "Z"])
            .with_directors(["D1"]),
        MovieRecord::new("Movie C", Some(1990), Some("Comedy")).with_directors(["D2"]),
    ])
    .unwrap();
    Arc::new(store)
}

/// A store whose connection is gone
pub(crate) struct UnavailableStore;

fn refused() -> StoreError {
    StoreError::Unavailable {
        reason: "connection refused".to_string(),
    }
}

#[async_trait]
impl GraphStore for UnavailableStore {
    async fn find_movies_by_title_fragment(&self, _fragment: &str) -> StoreResult<Vec<MovieRecord>> {
        Err(refused())
    }

    async fn find_movie_by_exact_title(&self, _title: &str) -> StoreResult<Option<MovieRecord>> {
        Err(refused())
    }

    async fn all_movies_except(&self, _title: &str) -> StoreResult<Vec<MovieRecord>> {
        Err(refused())
    }

    async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
        Err(refused())
    }
}
