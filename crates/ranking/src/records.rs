//! Guarding against records that break the data invariants.

use catalog::MovieRecord;
use tracing::warn;

/// Keep a record only if it is well formed, logging the ones dropped
pub(crate) fn accept(record: MovieRecord, operation: &'static str) -> Option<MovieRecord> {
    match record.validate() {
        Ok(()) => Some(record),
        Err(e) => {
            warn!(operation, error = %e, year = ?record.year, "Skipping malformed movie record");
            None
        }
    }
}

/// `accept` applied to a whole result set
pub(crate) fn well_formed(
    records: Vec<MovieRecord>,
    operation: &'static str,
) -> impl Iterator<Item = MovieRecord> {
    records
        .into_iter()
        .filter_map(move |record| accept(record, operation))
}
