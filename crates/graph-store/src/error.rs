//! Errors surfaced by graph store adapters.
//!
//! "Nothing found" is never an error here: queries return empty vectors or
//! `None` for that. Only failures to reach or query the store are errors.

use catalog::CatalogError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or the query could not run
    #[error("Graph store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The store did not answer within the configured limit
    #[error("Graph store query '{operation}' timed out after {limit:?}")]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },

    /// The store's backing data could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl StoreError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
