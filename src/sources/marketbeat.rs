use crate::constants::MARKETBEAT_SOURCE;
use crate::error::{Result, ScraperError};
use crate::html::{element_text, find_first, parse_document, row_cell_elements, select_within};
use crate::normalize::{try_float, try_int, NormalizeError, NumericNormalizer};
use crate::types::{OptionSide, UnusualOptionActivity};
use scraper::ElementRef;
use tracing::instrument;

/// Ticker, price/change, option volume, average option volume, relative
/// increase, average stock volume, catalysts.
const COLUMN_COUNT: usize = 7;

/// The ticker sits in the first or second `div` of the company cell depending
/// on how the row was rendered.
fn ticker_from_cell(cell: ElementRef<'_>) -> Result<String> {
    let divs: Vec<String> = select_within(cell, "div")?
        .into_iter()
        .map(element_text)
        .collect();
    let (first, second) = match divs.as_slice() {
        [first, second, ..] => (first, second),
        _ => return Err(ScraperError::MissingField("ticker".into())),
    };

    if first.is_empty() {
        if second.is_empty() {
            return Err(ScraperError::MissingField("ticker".into()));
        }
        return Ok(second.clone());
    }
    if first.chars().last().is_some_and(|c| c.is_uppercase()) {
        Ok(first.clone())
    } else {
        Err(ScraperError::MissingField(format!("ticker in {:?}", first)))
    }
}

/// `"$12.34+1.23%"` → `(12.34, 1.23)`, `"$12.34-1.23%"` → `(12.34, -1.23)`.
fn price_and_change(text: &str) -> Result<(f64, f64)> {
    let (price, percent, sign) = if let Some((price, percent)) = text.split_once('+') {
        (price, percent, 1.0)
    } else if let Some((price, percent)) = text.split_once('-') {
        (price, percent, -1.0)
    } else {
        return Err(NormalizeError::malformed(text).into());
    };
    Ok((try_float(price)?, sign * try_float(percent)?))
}

/// Comma-grouped integer such as `"12,345"`.
fn grouped_int(text: &str) -> Result<i64> {
    Ok(try_int(&text.replace(',', ""))?)
}

fn catalysts(cell: ElementRef<'_>) -> Result<Vec<String>> {
    Ok(select_within(cell, "a")?
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect())
}

/// Unusual call or put volume table. Rows missing any column are skipped.
#[instrument(skip(html, normalizer))]
pub fn parse_unusual_option_volume(
    html: &str,
    side: OptionSide,
    normalizer: &NumericNormalizer,
) -> Result<Vec<UnusualOptionActivity>> {
    let document = parse_document(html);
    let body = find_first(&document, "tbody")?;
    let rows = select_within(body, "tr")?;

    Ok(super::collect_rows(MARKETBEAT_SOURCE, rows, |cells, row| {
        if cells.len() != COLUMN_COUNT {
            return Err(ScraperError::MissingField(format!(
                "expected {} columns, found {}",
                COLUMN_COUNT,
                cells.len()
            )));
        }
        let elements = row_cell_elements(row);
        let (cur_stock_price, stock_percent_gain) = price_and_change(&cells[1])?;

        Ok(UnusualOptionActivity {
            ticker: ticker_from_cell(elements[0])?,
            side,
            cur_stock_price,
            stock_percent_gain,
            todays_option_volume: grouped_int(&cells[2])?,
            avg_option_volume: grouped_int(&cells[3])?,
            relative_volume_increase: try_float(cells[4].as_str())?,
            avg_stock_volume: normalizer.try_worded_magnitude(&cells[5])?,
            catalyst_events: catalysts(elements[6])?,
        })
    }))
}

/// Calls and puts together, smallest option volume first.
pub fn merge_sides(
    mut calls: Vec<UnusualOptionActivity>,
    puts: Vec<UnusualOptionActivity>,
) -> Vec<UnusualOptionActivity> {
    calls.extend(puts);
    calls.sort_by_key(|activity| activity.todays_option_volume);
    calls
}
