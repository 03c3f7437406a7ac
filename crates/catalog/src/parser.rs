//! Parser for catalog data files.
//!
//! Three `::`-delimited UTF-8 files describe the graph:
//! - movies.dat: title::year::genre (year and genre may be empty)
//! - features.dat: title::actor name
//! - directed_by.dat: title::director name
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::error::{CatalogError, Result};
use crate::types::{RelationshipKind, Year};
use std::fs;
use std::path::Path;
use tracing::warn;

/// A parsed line of movies.dat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieLine {
    pub title: String,
    pub year: Option<Year>,
    pub genre: Option<String>,
}

/// A parsed line of features.dat or directed_by.dat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLine {
    pub kind: RelationshipKind,
    pub title: String,
    pub name: String,
    pub line: usize,
}

fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim().to_string()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file.
///
/// A line with a blank title is skipped with a warning rather than loaded
/// as an untitled movie.
pub fn parse_movies(path: &Path) -> Result<Vec<MovieLine>> {
    let file = file_name(path);
    let mut movies = Vec::new();

    for (line_no, line) in read_lines(path)? {
        match parse_movie_line(&line, &file, line_no)? {
            Some(movie) => movies.push(movie),
            None => warn!(file = %file, line = line_no, "Skipping movie without a title"),
        }
    }
    Ok(movies)
}

/// Parse one movies.dat line. `Ok(None)` means the title was blank.
fn parse_movie_line(line: &str, file: &str, line_no: usize) -> Result<Option<MovieLine>> {
    let mut parts = line.split("::");

    let title = parts.next().unwrap_or_default().trim();
    let year = parts.next().ok_or_else(|| CatalogError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing year field".to_string(),
    })?;
    let genre = parts.next().ok_or_else(|| CatalogError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing genre field".to_string(),
    })?;
    let extra = parts.count();
    if extra > 0 {
        return Err(CatalogError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Expected 3 fields, found {}", 3 + extra),
        });
    }

    if title.is_empty() {
        return Ok(None);
    }

    Ok(Some(MovieLine {
        title: title.to_string(),
        year: parse_year(year).map_err(|reason| CatalogError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason,
        })?,
        genre: non_empty(genre),
    }))
}

/// Parse features.dat or directed_by.dat
pub fn parse_edges(path: &Path, kind: RelationshipKind) -> Result<Vec<EdgeLine>> {
    let file = file_name(path);
    let mut edges = Vec::new();

    for (line_no, line) in read_lines(path)? {
        let mut parts = line.splitn(2, "::");
        let title = parts.next().unwrap_or_default().trim();
        let name = parts
            .next()
            .ok_or_else(|| CatalogError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: format!("Missing {} target", kind),
            })?
            .trim();

        if title.is_empty() || name.is_empty() {
            return Err(CatalogError::ParseError {
                file: file.clone(),
                line: line_no,
                reason: format!("Blank endpoint on {} edge", kind),
            });
        }

        edges.push(EdgeLine {
            kind,
            title: title.to_string(),
            name: name.to_string(),
            line: line_no,
        });
    }
    Ok(edges)
}

/// Empty means unknown; anything else must be a valid year
fn parse_year(s: &str) -> std::result::Result<Option<Year>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<Year>()
        .map(Some)
        .map_err(|e| format!("Invalid year '{}': {}", s, e))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
