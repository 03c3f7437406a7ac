//! RandomPicker - one movie drawn uniformly from the catalog.

use crate::records::accept;
use catalog::MovieSummary;
use graph_store::{GraphStore, StoreResult};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct RandomPicker {
    store: Arc<dyn GraphStore>,
}

impl RandomPicker {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// A uniformly random movie with its cast and crew, or `None` when the
    /// catalog is empty
    #[instrument(skip(self))]
    pub async fn pick_random(&self) -> StoreResult<Option<MovieSummary>> {
        let picked = self
            .store
            .random_movie()
            .await?
            .and_then(|record| accept(record, "pick_random"))
            .map(MovieSummary::from);

        match &picked {
            Some(movie) => debug!("Picked '{}'", movie.title),
            None => debug!("No movie available"),
        }
        Ok(picked)
    }
}
