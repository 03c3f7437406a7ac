//! Front-end facing layer over the movie graph.
//!
//! `MovieExplorer` bundles search, recommendation and random pick over one
//! shared graph store and bounds every store query with a timeout.
//! `ExplorerConfig` holds the knobs, read from `MOVIE_GRAPH_*` variables.

pub mod config;
pub mod explorer;

pub use config::ExplorerConfig;
pub use explorer::{Exploration, MovieExplorer};
