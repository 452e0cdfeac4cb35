//! Per-site scraping routines.
//!
//! Each module exposes pure `parse_*` functions taking the page body, so they
//! can be exercised against saved HTML without touching the network.

pub mod calendar;
pub mod cboe;
pub mod marketbeat;
pub mod marketwatch;
pub mod watchlists;
pub mod yahoo;

use crate::error::Result;
use crate::html::row_cells;
use scraper::ElementRef;
use tracing::debug;

/// Runs `build` over every data row, skipping header rows (no `td` cells) and
/// rows `build` rejects. Skipped rows are logged and counted per source.
pub(crate) fn collect_rows<'a, T, I, F>(source: &'static str, rows: I, mut build: F) -> Vec<T>
where
    I: IntoIterator<Item = ElementRef<'a>>,
    F: FnMut(&[String], ElementRef<'a>) -> Result<T>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        let cells = row_cells(row);
        if cells.is_empty() {
            continue;
        }
        match build(&cells, row) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                debug!(source, error = %e, cells = ?cells, "skipping row");
            }
        }
    }

    debug!(source, parsed = records.len(), skipped, "parsed table rows");
    crate::metrics::record_rows(source, records.len(), skipped);
    records
}
