//! # Ranking Crate
//!
//! The three read-only operations offered to a front end:
//!
//! - **CatalogSearch**: movies whose title contains a fragment
//! - **SimilarityRanker**: the movies most similar to a reference movie,
//!   by a fixed weighted formula over shared cast, shared directors,
//!   genre and release year
//! - **RandomPicker**: one uniformly random movie
//!
//! Each component holds only an `Arc<dyn GraphStore>`, so components are
//! cheap to clone and safe to call from concurrent tasks. Nothing is cached
//! between calls.
//!
//! ## Example Usage
//! ```ignore
//! use ranking::{CatalogSearch, SimilarityRanker, RandomPicker};
//!
//! let search = CatalogSearch::new(store.clone());
//! let ranker = SimilarityRanker::new(store.clone());
//!
//! for movie in search.search("Matrix").await? {
//!     let recs = ranker.recommend_default(&movie.title).await?;
//!     println!("{}: {} recommendations", movie.title, recs.len());
//! }
//!
//! let surprise = RandomPicker::new(store).pick_random().await?;
//! ```

mod records;
pub mod random;
pub mod search;
pub mod similarity;

#[cfg(test)]
mod fixtures;

pub use random::RandomPicker;
pub use search::CatalogSearch;
pub use similarity::{DEFAULT_LIMIT, SimilarityRanker};
