use crate::constants::WATCHLIST_SOURCE;
use crate::error::Result;
use crate::html::{find_first, parse_document, row_cells, select_within};
use tracing::{debug, instrument};

/// Has at least one letter and no lowercase ones: `"AAPL"`, `"BRK-B"`.
fn is_uppercase_symbol(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

fn first_column(html: &str, table_css: &str) -> Result<Vec<String>> {
    let document = parse_document(html);
    let table = find_first(&document, table_css)?;
    let rows = select_within(table, "tr")?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row_cells(row).into_iter().next())
        .collect())
}

/// Symbols from a curated Yahoo watchlist page.
#[instrument(skip_all)]
pub fn parse_watchlist(html: &str) -> Result<Vec<String>> {
    let symbols: Vec<String> = first_column(html, "table.cwl-symbols")?
        .into_iter()
        .filter(|symbol| is_uppercase_symbol(symbol))
        .collect();
    debug!(source = WATCHLIST_SOURCE, count = symbols.len(), "parsed watchlist");
    Ok(symbols)
}

/// Symbols from the trending tickers table, without crypto pairs and
/// foreign listings.
#[instrument(skip_all)]
pub fn parse_trending_watchlist(html: &str) -> Result<Vec<String>> {
    let symbols: Vec<String> = first_column(html, r#"table[class="W(100%)"]"#)?
        .into_iter()
        .filter(|symbol| !symbol.contains('-') && !symbol.contains('.'))
        .collect();
    debug!(source = WATCHLIST_SOURCE, count = symbols.len(), "parsed trending watchlist");
    Ok(symbols)
}
