//! Graph store interface consumed by the search and ranking components.
//!
//! This crate provides:
//! - the `GraphStore` trait: four read-only queries over movie, actor and
//!   director nodes joined by FEATURES / DIRECTED_BY
//! - `InMemoryGraphStore`, an adapter over a loaded `CatalogGraph`
//! - `TimeoutStore`, a decorator that bounds every query in time
//!
//! Every query returns hydrated `MovieRecord`s: movie attributes plus the
//! distinct actor and director names attached to it.
//!
//! ## Example Usage
//! ```ignore
//! use graph_store::{GraphStore, InMemoryGraphStore, TimeoutStore};
//! use std::time::Duration;
//!
//! let store = InMemoryGraphStore::load_from_dir("data/catalog".as_ref())?;
//! let store = TimeoutStore::new(store, Duration::from_secs(5));
//! let matches = store.find_movies_by_title_fragment("Matrix").await?;
//! ```

pub mod error;
pub mod memory;
pub mod timeout;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryGraphStore;
pub use timeout::TimeoutStore;

use async_trait::async_trait;
use catalog::MovieRecord;
use std::sync::Arc;

/// Read-only queries over the movie graph.
///
/// ## Contract
/// - All operations are pure reads.
/// - Title matching is case-sensitive.
/// - No ordering is promised for multi-row results.
/// - `Send + Sync` so one store can serve concurrent callers.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Every movie whose title contains `fragment`; all movies when
    /// `fragment` is empty
    async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>>;

    /// The movie with exactly this title, if any
    async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>>;

    /// Every movie whose title differs from `title`
    async fn all_movies_except(&self, title: &str) -> StoreResult<Vec<MovieRecord>>;

    /// One movie chosen uniformly at random; `None` for an empty catalog
    async fn random_movie(&self) -> StoreResult<Option<MovieRecord>>;
}

#[async_trait]
impl<T: GraphStore + ?Sized> GraphStore for Arc<T> {
    async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>> {
        (**self).find_movies_by_title_fragment(fragment).await
    }

    async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>> {
        (**self).find_movie_by_exact_title(title).await
    }

    async fn all_movies_except(&self, title: &str) -> StoreResult<Vec<MovieRecord>> {
        (**self).all_movies_except(title).await
    }

    async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
        (**self).random_movie().await
    }
}
