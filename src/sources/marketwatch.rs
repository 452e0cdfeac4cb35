use crate::constants::MARKETWATCH_SOURCE;
use crate::error::Result;
use crate::html::{find_first, parse_document, select_within, RowSchema};
use crate::types::AnalystRating;
use chrono::NaiveDate;
use tracing::instrument;

static RATINGS_SCHEMA: RowSchema = RowSchema::new(
    MARKETWATCH_SOURCE,
    &["date", "ticker", "company", "rating", "analyst"],
);

/// Analyst column placeholder used when no firm is named.
fn named_analyst(text: &str) -> Option<String> {
    match text {
        "" | "None" => None,
        other => Some(other.to_string()),
    }
}

/// Analyst upgrades and downgrades, most recent first as listed on the page.
#[instrument(skip_all)]
pub fn parse_analyst_ratings(html: &str) -> Result<Vec<AnalystRating>> {
    let document = parse_document(html);
    let table = find_first(&document, "table")?;
    let rows = select_within(table, "tr")?;

    Ok(super::collect_rows(RATINGS_SCHEMA.source, rows, |cells, _| {
        let row = RATINGS_SCHEMA.bind(cells);
        let date_text = row.text("date")?;
        Ok(AnalystRating {
            date_text: date_text.to_string(),
            date: NaiveDate::parse_from_str(date_text, "%m/%d/%Y").ok(),
            ticker: row.text("ticker")?.to_string(),
            company: row.text("company")?.to_string(),
            rating: row.text("rating")?.to_string(),
            analyst: named_analyst(row.text("analyst")?),
        })
    }))
}
