//! Core domain types for the movie graph.
//!
//! Nodes (`Movie`, `Actor`, `Director`) live inside a `CatalogGraph` and are
//! connected by the two relationship kinds in `RelationshipKind`. Queries do
//! not hand out nodes; they hand out hydrated value objects (`MovieRecord`,
//! `MovieSummary`, `ScoredMovie`) that own their data.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::{CatalogError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Node identifier of a movie inside one `CatalogGraph`
pub type MovieId = u32;

/// Node identifier of an actor inside one `CatalogGraph`
pub type ActorId = u32;

/// Node identifier of a director inside one `CatalogGraph`
pub type DirectorId = u32;

/// Release year
pub type Year = u16;

// =============================================================================
// Nodes
// =============================================================================

/// A movie node.
///
/// `year` and `genre` are optional: `None` means "unknown" and is never
/// replaced by a placeholder value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<Year>,
    pub genre: Option<String>,
}

/// An actor node, identified within the catalog by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

/// A director node, identified within the catalog by its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
}

/// The typed relationships a movie node can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Movie -> Actor
    Features,
    /// Movie -> Director
    DirectedBy,
}

impl RelationshipKind {
    /// Relationship type name as written in graph query languages
    pub fn label(self) -> &'static str {
        match self {
            RelationshipKind::Features => "FEATURES",
            RelationshipKind::DirectedBy => "DIRECTED_BY",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Query Results
// =============================================================================

/// A movie with its attributes and the distinct names reachable through
/// FEATURES and DIRECTED_BY. This is the row every store query returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: Option<Year>,
    pub genre: Option<String>,
    pub actors: BTreeSet<String>,
    pub directors: BTreeSet<String>,
}

impl MovieRecord {
    /// Build a record without any relationships
    pub fn new(title: impl Into<String>, year: Option<Year>, genre: Option<&str>) -> Self {
        Self {
            title: title.into(),
            year,
            genre: genre.map(str::to_string),
            actors: BTreeSet::new(),
            directors: BTreeSet::new(),
        }
    }

    /// Attach actor names (duplicates collapse)
    pub fn with_actors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors.extend(names.into_iter().map(Into::into));
        self
    }

    /// Attach director names (duplicates collapse)
    pub fn with_directors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directors.extend(names.into_iter().map(Into::into));
        self
    }

    /// Reject records that break the data invariants.
    ///
    /// A record without a title cannot be shown or used as a lookup key.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::MalformedRecord {
                reason: "missing title".to_string(),
            });
        }
        Ok(())
    }
}

/// What search and random pick hand back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: String,
    pub year: Option<Year>,
    pub genre: Option<String>,
    pub actors: BTreeSet<String>,
    pub directors: BTreeSet<String>,
}

impl From<MovieRecord> for MovieSummary {
    fn from(record: MovieRecord) -> Self {
        Self {
            title: record.title,
            year: record.year,
            genre: record.genre,
            actors: record.actors,
            directors: record.directors,
        }
    }
}

/// The four factors behind a similarity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub shared_actors: u32,
    pub shared_directors: u32,
    pub genre_match: bool,
    pub year_proximity: bool,
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMovie {
    pub title: String,
    pub score: f64,
    pub genre: Option<String>,
    pub year: Option<Year>,
    pub breakdown: SimilarityBreakdown,
}

// =============================================================================
// CatalogGraph - The In-Memory Graph
// =============================================================================

/// Movies, actors and directors plus the FEATURES / DIRECTED_BY edges.
///
/// Movie ids are dense (`0..movie_count`), so the movie table is a `Vec`
/// indexed by id. Actor and director nodes are deduplicated by name.
/// Edge sets are `BTreeSet`s, so a repeated edge is stored once.
#[derive(Debug, Default)]
pub struct CatalogGraph {
    pub(crate) movies: Vec<Movie>,
    pub(crate) actors: Vec<Actor>,
    pub(crate) directors: Vec<Director>,

    // Name -> node lookups
    pub(crate) title_index: HashMap<String, Vec<MovieId>>,
    pub(crate) actor_index: HashMap<String, ActorId>,
    pub(crate) director_index: HashMap<String, DirectorId>,

    // Outgoing edges per movie
    pub(crate) features: HashMap<MovieId, BTreeSet<ActorId>>,
    pub(crate) directed_by: HashMap<MovieId, BTreeSet<DirectorId>>,
}

impl CatalogGraph {
    /// Creates a new, empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie node by id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id as usize)
    }

    /// All movie nodes in insertion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Ids of every movie node carrying exactly this title
    pub fn movies_titled(&self, title: &str) -> &[MovieId] {
        self.title_index
            .get(title)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Look up an actor node by name
    pub fn get_actor(&self, name: &str) -> Option<&Actor> {
        self.actor_index
            .get(name)
            .and_then(|&id| self.actors.get(id as usize))
    }

    /// Distinct actor names reachable from a movie through FEATURES
    pub fn actor_names(&self, movie_id: MovieId) -> BTreeSet<String> {
        self.features
            .get(&movie_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.actors.get(id as usize))
                    .map(|actor| actor.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct director names reachable from a movie through DIRECTED_BY
    pub fn director_names(&self, movie_id: MovieId) -> BTreeSet<String> {
        self.directed_by
            .get(&movie_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.directors.get(id as usize))
                    .map(|director| director.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attach relationships to a movie node, producing a query row
    pub fn hydrate(&self, movie: &Movie) -> MovieRecord {
        MovieRecord {
            title: movie.title.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            actors: self.actor_names(movie.id),
            directors: self.director_names(movie.id),
        }
    }

    // Mutators, used only while loading

    /// Insert a movie node and return its id.
    ///
    /// Titles are not required to be unique; a second movie with the same
    /// title becomes a separate node.
    pub fn insert_movie(
        &mut self,
        title: impl Into<String>,
        year: Option<Year>,
        genre: Option<String>,
    ) -> MovieId {
        let id = self.movies.len() as MovieId;
        let title = title.into();
        self.title_index.entry(title.clone()).or_default().push(id);
        self.movies.push(Movie {
            id,
            title,
            year,
            genre,
        });
        id
    }

    /// Add a FEATURES edge from a movie to the actor with this name,
    /// creating the actor node on first use
    pub fn link_actor(&mut self, movie_id: MovieId, name: &str) -> Result<ActorId> {
        self.ensure_movie(movie_id)?;
        let actor_id = match self.actor_index.get(name) {
            Some(&id) => id,
            None => {
                let id = self.actors.len() as ActorId;
                self.actors.push(Actor {
                    id,
                    name: name.to_string(),
                });
                self.actor_index.insert(name.to_string(), id);
                id
            }
        };
        self.features.entry(movie_id).or_default().insert(actor_id);
        Ok(actor_id)
    }

    /// Add a DIRECTED_BY edge from a movie to the director with this name,
    /// creating the director node on first use
    pub fn link_director(&mut self, movie_id: MovieId, name: &str) -> Result<DirectorId> {
        self.ensure_movie(movie_id)?;
        let director_id = match self.director_index.get(name) {
            Some(&id) => id,
            None => {
                let id = self.directors.len() as DirectorId;
                self.directors.push(Director {
                    id,
                    name: name.to_string(),
                });
                self.director_index.insert(name.to_string(), id);
                id
            }
        };
        self.directed_by
            .entry(movie_id)
            .or_default()
            .insert(director_id);
        Ok(director_id)
    }

    fn ensure_movie(&self, movie_id: MovieId) -> Result<()> {
        if self.get_movie(movie_id).is_none() {
            return Err(CatalogError::MissingReference {
                entity: "Movie".to_string(),
                key: movie_id.to_string(),
            });
        }
        Ok(())
    }

    /// Counts for logging: (movies, actors, directors, edges)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let edges = self.features.values().map(|s| s.len()).sum::<usize>()
            + self.directed_by.values().map(|s| s.len()).sum::<usize>();
        (
            self.movies.len(),
            self.actors.len(),
            self.directors.len(),
            edges,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
