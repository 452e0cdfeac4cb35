//! Macro report release schedules.

use crate::constants::{BLS_CPI_SOURCE, RETAIL_SALES_SOURCE};
use crate::error::{Result, ScraperError};
use crate::html::{find_first, parse_document, row_cells, select_within};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

/// CPI figures are published at 8:30 in the morning; releases are stamped at
/// 08:00 so they read as "today" before the number is out.
const CPI_RELEASE_HOUR: u32 = 8;

/// `"Jan. 12, 2022"`, `"Sept. 13, 2023"`, `"May 10, 2024"`
static RELEASE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{3})[A-Za-z]*\.?\s+(\d{1,2}),?\s+(\d{4})")
        .expect("release date pattern is valid")
});

fn month_from_abbreviation(abbreviation: &str) -> Option<u32> {
    let month = match abbreviation.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let caps = RELEASE_DATE.captures(text.trim())?;
    let month = month_from_abbreviation(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Release times from the BLS CPI schedule (second column of each row).
#[instrument(skip_all)]
pub fn parse_cpi_release_dates(html: &str) -> Result<Vec<NaiveDateTime>> {
    let document = parse_document(html);
    let body = find_first(&document, "tbody")?;
    let release_time = NaiveTime::from_hms_opt(CPI_RELEASE_HOUR, 0, 0)
        .ok_or_else(|| ScraperError::Config("invalid CPI release hour".into()))?;

    let mut releases = Vec::new();
    for row in select_within(body, "tr")? {
        let cells = row_cells(row);
        match cells.get(1).and_then(|text| parse_release_date(text)) {
            Some(date) => releases.push(date.and_time(release_time)),
            None => debug!(source = BLS_CPI_SOURCE, cells = ?cells, "skipping schedule row"),
        }
    }
    Ok(releases)
}

/// Release days from the retail sales calendar (first column, `YYYY-MM-DD`).
#[instrument(skip_all)]
pub fn parse_retail_sales_dates(html: &str) -> Result<Vec<NaiveDateTime>> {
    let document = parse_document(html);
    let table = find_first(&document, "table#calendar")?;

    let mut releases = Vec::new();
    for row in select_within(table, "tr")? {
        let cells = row_cells(row);
        let Some(first) = cells.first() else {
            continue;
        };
        match NaiveDate::parse_from_str(first, "%Y-%m-%d") {
            Ok(date) => releases.push(date.and_time(NaiveTime::default())),
            Err(e) => debug!(
                source = RETAIL_SALES_SOURCE,
                cell = %first,
                error = %e,
                "skipping calendar row"
            ),
        }
    }
    Ok(releases)
}

/// Earliest release strictly after `now`.
pub fn next_release(
    releases: &[NaiveDateTime],
    now: NaiveDateTime,
    report: &str,
) -> Result<NaiveDateTime> {
    releases
        .iter()
        .copied()
        .filter(|release| *release > now)
        .min()
        .ok_or_else(|| ScraperError::NoUpcomingRelease(report.to_string()))
}
