//! # Catalog Crate
//!
//! The movie graph: movie, actor and director nodes joined by FEATURES and
//! DIRECTED_BY relationships, plus the value types that queries return.
//!
//! ## Main Components
//!
//! - **types**: Nodes, query result types, and the in-memory `CatalogGraph`
//! - **parser**: Parse the `::`-delimited data files
//! - **index**: Build and validate a `CatalogGraph` from a data directory
//! - **error**: Error types for loading and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogGraph;
//! use std::path::Path;
//!
//! let graph = CatalogGraph::load_from_dir(Path::new("data/catalog"))?;
//! let heat = graph.get_movie(graph.movies_titled("Heat")[0]).unwrap();
//! let record = graph.hydrate(heat);
//! println!("{} features {} actors", record.title, record.actors.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogError, Result};
pub use index::{DIRECTED_BY_FILE, FEATURES_FILE, MOVIES_FILE};
pub use types::{
    // Type aliases
    ActorId,
    DirectorId,
    MovieId,
    Year,
    // Nodes and relationships
    Actor,
    Director,
    Movie,
    RelationshipKind,
    // Query results
    MovieRecord,
    MovieSummary,
    ScoredMovie,
    SimilarityBreakdown,
    // Graph
    CatalogGraph,
};
