//! Building a `CatalogGraph` from data files.
//!
//! The three files are parsed in parallel, then movie nodes are inserted
//! before any edge so that every edge can be resolved by title.

use crate::error::{CatalogError, Result};
use crate::parser::{self, EdgeLine};
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

pub const MOVIES_FILE: &str = "movies.dat";
pub const FEATURES_FILE: &str = "features.dat";
pub const DIRECTED_BY_FILE: &str = "directed_by.dat";

impl CatalogGraph {
    /// Load the whole catalog from a directory holding movies.dat,
    /// features.dat and directed_by.dat
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading catalog graph from {:?}", data_dir);

        let movies_path = data_dir.join(MOVIES_FILE);
        let features_path = data_dir.join(FEATURES_FILE);
        let directed_by_path = data_dir.join(DIRECTED_BY_FILE);

        let (movies, (features, directed_by)) = rayon::join(
            || parser::parse_movies(&movies_path),
            || {
                rayon::join(
                    || parser::parse_edges(&features_path, RelationshipKind::Features),
                    || parser::parse_edges(&directed_by_path, RelationshipKind::DirectedBy),
                )
            },
        );
        let movies = movies?;
        let features = features?;
        let directed_by = directed_by?;

        debug!(
            "Parsed {} movies, {} FEATURES lines, {} DIRECTED_BY lines",
            movies.len(),
            features.len(),
            directed_by.len()
        );

        let mut graph = CatalogGraph::new();
        for movie in movies {
            graph.insert_movie(movie.title, movie.year, movie.genre);
        }
        for edge in features.iter().chain(directed_by.iter()) {
            graph.link_edge(edge)?;
        }

        graph.validate()?;

        let (movie_count, actor_count, director_count, edge_count) = graph.counts();
        info!(
            "Catalog graph loaded: {} movies, {} actors, {} directors, {} edges",
            movie_count, actor_count, director_count, edge_count
        );
        Ok(graph)
    }

    /// Build a graph from already-hydrated records, one movie node per record.
    ///
    /// Records are taken as-is; this does not run `validate`.
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> Result<Self> {
        let mut graph = CatalogGraph::new();
        for record in records {
            let id = graph.insert_movie(record.title, record.year, record.genre);
            for actor in &record.actors {
                graph.link_actor(id, actor)?;
            }
            for director in &record.directors {
                graph.link_director(id, director)?;
            }
        }
        Ok(graph)
    }

    /// Resolve an edge line by title and link every movie carrying it
    fn link_edge(&mut self, edge: &EdgeLine) -> Result<()> {
        let targets = self.movies_titled(&edge.title).to_vec();
        if targets.is_empty() {
            return Err(CatalogError::MissingReference {
                entity: "Movie".to_string(),
                key: format!("'{}' ({} edge, line {})", edge.title, edge.kind, edge.line),
            });
        }
        for movie_id in targets {
            match edge.kind {
                RelationshipKind::Features => self.link_actor(movie_id, &edge.name)?,
                RelationshipKind::DirectedBy => self.link_director(movie_id, &edge.name)?,
            };
        }
        Ok(())
    }

    /// Check graph integrity:
    /// - every movie has a non-blank title
    /// - every edge points at existing nodes
    pub fn validate(&self) -> Result<()> {
        for movie in &self.movies {
            if movie.title.trim().is_empty() {
                return Err(CatalogError::MalformedRecord {
                    reason: format!("movie {} has no title", movie.id),
                });
            }
        }
        for (&movie_id, actor_ids) in &self.features {
            self.check_edge(movie_id, RelationshipKind::Features)?;
            if let Some(&bad) = actor_ids.iter().find(|&&id| id as usize >= self.actors.len()) {
                return Err(CatalogError::MissingReference {
                    entity: "Actor".to_string(),
                    key: bad.to_string(),
                });
            }
        }
        for (&movie_id, director_ids) in &self.directed_by {
            self.check_edge(movie_id, RelationshipKind::DirectedBy)?;
            if let Some(&bad) = director_ids
                .iter()
                .find(|&&id| id as usize >= self.directors.len())
            {
                return Err(CatalogError::MissingReference {
                    entity: "Director".to_string(),
                    key: bad.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_edge(&self, movie_id: MovieId, kind: RelationshipKind) -> Result<()> {
        if self.get_movie(movie_id).is_none() {
            return Err(CatalogError::ValidationError(format!(
                "{} edge starts at unknown movie {}",
                kind, movie_id
            )));
        }
        Ok(())
    }
}
