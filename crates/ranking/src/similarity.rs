//! SimilarityRanker - movies most similar to a reference movie.
//!
//! ## Algorithm
//! 1. Resolve the reference movie by exact title (absent -> no results)
//! 2. Score every other movie:
//!    - `shared_actors`: names in both actor sets
//!    - `shared_directors`: names in both director sets
//!    - `genre_match`: both genres known and equal
//!    - `year_proximity`: both years known and at most 5 years apart
//!    - `score = 0.2*shared_actors + 0.3*shared_directors
//!              + 0.4*genre_match + 0.1*year_proximity`
//! 3. Sort by score descending, then title ascending
//! 4. Keep the first `limit`
//!
//! Shared counts are not capped, so a movie with a large shared cast can
//! score above 1.0. There is no minimum score.

use crate::records::{accept, well_formed};
use catalog::{MovieRecord, ScoredMovie, SimilarityBreakdown};
use graph_store::{GraphStore, StoreResult};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const ACTOR_WEIGHT: f64 = 0.2;
pub const DIRECTOR_WEIGHT: f64 = 0.3;
pub const GENRE_WEIGHT: f64 = 0.4;
pub const YEAR_WEIGHT: f64 = 0.1;

/// Largest year gap that still counts as "close"
pub const YEAR_WINDOW: u16 = 5;

/// Number of recommendations returned when the caller doesn't say
pub const DEFAULT_LIMIT: usize = 5;

/// Ranks catalog movies by similarity to a reference movie
#[derive(Clone)]
pub struct SimilarityRanker {
    store: Arc<dyn GraphStore>,
}

impl SimilarityRanker {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Top `limit` movies most similar to `reference_title`.
    ///
    /// Returns an empty vector when the reference movie doesn't exist.
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        reference_title: &str,
        limit: usize,
    ) -> StoreResult<Vec<ScoredMovie>> {
        let reference = match self.store.find_movie_by_exact_title(reference_title).await? {
            Some(record) => match accept(record, "recommend") {
                Some(record) => record,
                None => return Ok(Vec::new()),
            },
            None => {
                debug!("Reference movie not found");
                return Ok(Vec::new());
            }
        };

        let candidates: Vec<MovieRecord> =
            well_formed(self.store.all_movies_except(&reference.title).await?, "recommend")
                .filter(|candidate| candidate.title != reference.title)
                .collect();
        debug!("Scoring {} candidate movies", candidates.len());

        let mut scored = score_candidates(&reference, candidates);
        scored.sort_by(rank_order);
        scored.truncate(limit);

        debug!("Returning {} recommendations", scored.len());
        Ok(scored)
    }

    /// `recommend` with `DEFAULT_LIMIT`
    pub async fn recommend_default(&self, reference_title: &str) -> StoreResult<Vec<ScoredMovie>> {
        self.recommend(reference_title, DEFAULT_LIMIT).await
    }
}

/// The four similarity factors between two movies.
///
/// An unknown genre or year on either side is simply not a match.
pub fn compare(reference: &MovieRecord, candidate: &MovieRecord) -> SimilarityBreakdown {
    let genre_match = match (&reference.genre, &candidate.genre) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let year_proximity = match (reference.year, candidate.year) {
        (Some(a), Some(b)) => a.abs_diff(b) <= YEAR_WINDOW,
        _ => false,
    };

    SimilarityBreakdown {
        shared_actors: reference.actors.intersection(&candidate.actors).count() as u32,
        shared_directors: reference.directors.intersection(&candidate.directors).count() as u32,
        genre_match,
        year_proximity,
    }
}

/// Weighted sum of the similarity factors
pub fn score(breakdown: &SimilarityBreakdown) -> f64 {
    ACTOR_WEIGHT * breakdown.shared_actors as f64
        + DIRECTOR_WEIGHT * breakdown.shared_directors as f64
        + GENRE_WEIGHT * indicator(breakdown.genre_match)
        + YEAR_WEIGHT * indicator(breakdown.year_proximity)
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Score every candidate against the reference in parallel (unsorted)
pub fn score_candidates(reference: &MovieRecord, candidates: Vec<MovieRecord>) -> Vec<ScoredMovie> {
    candidates
        .into_par_iter()
        .map(|candidate| {
            let breakdown = compare(reference, &candidate);
            ScoredMovie {
                score: score(&breakdown),
                title: candidate.title,
                genre: candidate.genre,
                year: candidate.year,
                breakdown,
            }
        })
        .collect()
}

/// Score descending, then title ascending, then year ascending
pub fn rank_order(a: &ScoredMovie, b: &ScoredMovie) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.year.cmp(&b.year))
}
