//! Time-bounded store decorator.
//!
//! A store that stops answering must not hang the caller: every query
//! through `TimeoutStore` either finishes within `limit` or fails with
//! `StoreError::Timeout`. The decorator never retries.

use crate::error::{StoreError, StoreResult};
use crate::GraphStore;
use async_trait::async_trait;
use catalog::MovieRecord;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

pub struct TimeoutStore<S> {
    inner: S,
    limit: Duration,
}

impl<S: GraphStore> TimeoutStore<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        query: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.limit, query).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, limit_ms = self.limit.as_millis() as u64, "Graph store query timed out");
                Err(StoreError::Timeout {
                    operation,
                    limit: self.limit,
                })
            }
        }
    }
}

#[async_trait]
impl<S: GraphStore> GraphStore for TimeoutStore<S> {
    async fn find_movies_by_title_fragment(&self, fragment: &str) -> StoreResult<Vec<MovieRecord>> {
        self.bounded(
            "find_movies_by_title_fragment",
            self.inner.find_movies_by_title_fragment(fragment),
        )
        .await
    }

    async fn find_movie_by_exact_title(&self, title: &str) -> StoreResult<Option<MovieRecord>> {
        self.bounded(
            "find_movie_by_exact_title",
            self.inner.find_movie_by_exact_title(title),
        )
        .await
    }

    async fn all_movies_except(&self, title: &str) -> StoreResult<Vec<MovieRecord>> {
        self.bounded("all_movies_except", self.inner.all_movies_except(title))
            .await
    }

    async fn random_movie(&self) -> StoreResult<Option<MovieRecord>> {
        self.bounded("random_movie", self.inner.random_movie()).await
    }
}
