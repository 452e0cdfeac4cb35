use crate::constants::CBOE_SOURCE;
use crate::error::{Result, ScraperError};
use crate::html::{find_first, parse_document, row_cells, select_within};
use crate::normalize::to_float;
use crate::types::PutCallRatios;
use std::collections::HashMap;
use tracing::{debug, instrument};

const TOTAL_LABEL: &str = "TOTAL PUT/CALL RATIO";
const INDEX_LABEL: &str = "INDEX PUT/CALL RATIO";
const VIX_LABEL: &str = "CBOE VOLATILITY INDEX (VIX) PUT/CALL RATIO";
const ETP_LABEL: &str = "EXCHANGE TRADED PRODUCTS PUT/CALL RATIO";

/// Daily market statistics. A P/C ratio of .7 or lower is usually read as
/// bullish.
#[instrument(skip_all)]
pub fn parse_put_call_ratios(html: &str) -> Result<PutCallRatios> {
    let document = parse_document(html);
    let stats = find_first(&document, "div#daily-market-stats-data")?;

    let mut by_label: HashMap<String, String> = HashMap::new();
    for row in select_within(stats, "tr")? {
        if let [label, value, ..] = row_cells(row).as_slice() {
            by_label
                .entry(label.to_uppercase())
                .or_insert_with(|| value.clone());
        }
    }
    debug!(source = CBOE_SOURCE, labels = by_label.len(), "collected ratio rows");

    let ratio = |label: &str| -> Result<f64> {
        by_label
            .get(label)
            .map(|value| to_float(value.as_str()))
            .ok_or_else(|| ScraperError::MissingField(label.to_string()))
    };

    Ok(PutCallRatios {
        total: ratio(TOTAL_LABEL)?,
        index: ratio(INDEX_LABEL)?,
        vix: ratio(VIX_LABEL)?,
        exchange_traded_products: ratio(ETP_LABEL)?,
    })
}
