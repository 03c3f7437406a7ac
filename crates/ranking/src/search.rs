//! CatalogSearch - resolve a title fragment to hydrated movies.

use crate::records::well_formed;
use catalog::MovieSummary;
use graph_store::{GraphStore, StoreResult};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Title search over the catalog.
///
/// Matching is a case-sensitive substring test; an empty fragment lists the
/// whole catalog. "No match" is an empty vector, not an error.
#[derive(Clone)]
pub struct CatalogSearch {
    store: Arc<dyn GraphStore>,
}

impl CatalogSearch {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Every movie whose title contains `fragment`, with its cast and crew.
    ///
    /// Movies sharing a title are all returned.
    #[instrument(skip(self))]
    pub async fn search(&self, fragment: &str) -> StoreResult<Vec<MovieSummary>> {
        let records = self.store.find_movies_by_title_fragment(fragment).await?;
        let summaries: Vec<MovieSummary> = well_formed(records, "search")
            .map(MovieSummary::from)
            .collect();
        debug!("Search matched {} movies", summaries.len());
        Ok(summaries)
    }
}
