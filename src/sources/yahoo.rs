use crate::constants::*;
use crate::error::Result;
use crate::html::{find_first, parse_document, select_within, RowSchema};
use crate::normalize::NumericNormalizer;
use crate::types::{CryptoQuote, EquityQuote, FuturesQuote, IndexQuote};
use tracing::{debug, instrument};

static FUTURES_SCHEMA: RowSchema = RowSchema::new(
    YAHOO_FUTURES_SOURCE,
    &[
        "symbol",
        "name",
        "currentPrice",
        "marketTime",
        "changeDollar",
        "changePercent",
        "volume",
        "openInterest",
    ],
);

static INDEX_SCHEMA: RowSchema = RowSchema::new(
    YAHOO_INDICES_SOURCE,
    &["symbol", "name", "lastPrice", "changeDollar", "changePercent", "volume"],
);

static CRYPTO_SCHEMA: RowSchema = RowSchema::new(
    YAHOO_CRYPTO_SOURCE,
    &[
        "symbol",
        "name",
        "lastPrice",
        "changeDollar",
        "changePercent",
        "marketCap",
        "volumeSinceMidnight",
        "volumeLast24hr",
        "totalVolumeAllCurrencies",
        "volumeInCirculation",
    ],
);

static TRENDING_SCHEMA: RowSchema = RowSchema::new(
    YAHOO_TRENDING_SOURCE,
    &[
        "symbol",
        "name",
        "lastPrice",
        "marketTime",
        "changeDollar",
        "changePercent",
        "volume",
        "avgVolumeThreeMonth",
        "marketCap",
    ],
);

static SCREENER_SCHEMA: RowSchema = RowSchema::new(
    YAHOO_SCREENER_SOURCE,
    &[
        "symbol",
        "name",
        "lastPrice",
        "changeDollar",
        "changePercent",
        "volume",
        "avgVolumeThreeMonth",
        "marketCap",
        "peRatioTTM",
    ],
);

const LIST_TABLE: &str = r#"section[data-test="yfin-list-table"]"#;
const SCREENER_TABLE: &str = "div#scr-res-table";

/// Commodity and index futures.
#[instrument(skip_all)]
pub fn parse_futures(html: &str, normalizer: &NumericNormalizer) -> Result<Vec<FuturesQuote>> {
    let document = parse_document(html);
    let table = find_first(&document, LIST_TABLE)?;
    let rows = select_within(table, "tr")?;

    Ok(super::collect_rows(FUTURES_SCHEMA.source, rows, |cells, _| {
        let row = FUTURES_SCHEMA.bind(cells);
        let volume_text = row.text("volume")?;
        Ok(FuturesQuote {
            symbol: row.text("symbol")?.to_string(),
            name: row.text("name")?.to_string(),
            current_price: normalizer.parse_strict_numeric(row.text("currentPrice")?),
            change_dollar: normalizer.parse_strict_numeric(row.text("changeDollar")?),
            change_percent: normalizer.parse_strict_numeric(row.text("changePercent")?),
            volume_text: volume_text.to_string(),
            volume: normalizer.parse_magnitude_suffixed(volume_text),
            open_interest: normalizer.parse_magnitude_suffixed(row.text("openInterest")?),
        })
    }))
}

/// World indices.
#[instrument(skip_all)]
pub fn parse_indices(html: &str, normalizer: &NumericNormalizer) -> Result<Vec<IndexQuote>> {
    let document = parse_document(html);
    let table = find_first(&document, LIST_TABLE)?;
    let rows = select_within(table, "tr")?;

    Ok(super::collect_rows(INDEX_SCHEMA.source, rows, |cells, _| {
        let row = INDEX_SCHEMA.bind(cells);
        Ok(IndexQuote {
            symbol: row.text("symbol")?.to_string(),
            name: row.text("name")?.to_string(),
            last_price: normalizer.parse_strict_numeric(row.text("lastPrice")?),
            change_dollar: normalizer.parse_strict_numeric(row.text("changeDollar")?),
            change_percent: normalizer.parse_strict_numeric(row.text("changePercent")?),
            volume: normalizer.parse_magnitude_suffixed(row.text("volume")?),
        })
    }))
}

pub fn find_vix(indices: &[IndexQuote]) -> Option<&IndexQuote> {
    indices.iter().find(|q| q.symbol == VIX_SYMBOL)
}

#[instrument(skip_all)]
pub fn parse_crypto(html: &str, normalizer: &NumericNormalizer) -> Result<Vec<CryptoQuote>> {
    let document = parse_document(html);
    let table = find_first(&document, SCREENER_TABLE)?;
    let rows = select_within(table, "tbody tr")?;

    Ok(super::collect_rows(CRYPTO_SCHEMA.source, rows, |cells, _| {
        let row = CRYPTO_SCHEMA.bind(cells);
        Ok(CryptoQuote {
            symbol: row.text("symbol")?.to_string(),
            name: row.text("name")?.to_string(),
            last_price: normalizer.parse_strict_numeric(row.text("lastPrice")?),
            change_dollar: normalizer.parse_strict_numeric(row.text("changeDollar")?),
            change_percent: normalizer.parse_strict_numeric(row.text("changePercent")?),
            market_cap: normalizer.parse_magnitude_suffixed(row.text("marketCap")?),
            volume_since_midnight: normalizer
                .parse_magnitude_suffixed(row.text("volumeSinceMidnight")?),
            volume_last_24hr: normalizer.parse_magnitude_suffixed(row.text("volumeLast24hr")?),
            volume_in_circulation: normalizer
                .parse_magnitude_suffixed(row.text("volumeInCirculation")?),
        })
    }))
}

/// Symbols for currency pairs, futures, indices and foreign listings.
fn is_plain_equity_symbol(symbol: &str) -> bool {
    !symbol.contains(['-', '=', '^', '.'])
}

/// Most-searched tickers, restricted to plain equity symbols.
#[instrument(skip_all)]
pub fn parse_trending(html: &str, normalizer: &NumericNormalizer) -> Result<Vec<EquityQuote>> {
    let document = parse_document(html);
    let section = find_first(&document, "section#yfin-list")?;
    let rows = select_within(section, "table tr")?;

    let quotes = super::collect_rows(TRENDING_SCHEMA.source, rows, |cells, _| {
        let row = TRENDING_SCHEMA.bind(cells);
        Ok(EquityQuote {
            symbol: row.text("symbol")?.to_string(),
            name: row.text("name")?.to_string(),
            last_price: normalizer.parse_strict_numeric(row.text("lastPrice")?),
            change_dollar: normalizer.parse_strict_numeric(row.text("changeDollar")?),
            change_percent: normalizer.parse_strict_numeric(row.text("changePercent")?),
            volume: normalizer.parse_magnitude_suffixed(row.text("volume")?),
            avg_volume_three_month: normalizer
                .parse_magnitude_suffixed(row.text("avgVolumeThreeMonth")?),
            market_cap: None,
            pe_ratio_ttm: None,
        })
    });

    let before = quotes.len();
    let quotes: Vec<EquityQuote> = quotes
        .into_iter()
        .filter(|q| is_plain_equity_symbol(&q.symbol))
        .collect();
    debug!(dropped = before - quotes.len(), "dropped non-equity trending symbols");
    Ok(quotes)
}

/// Most active, top gainers and top losers share this layout.
#[instrument(skip_all)]
pub fn parse_screener(html: &str, normalizer: &NumericNormalizer) -> Result<Vec<EquityQuote>> {
    let document = parse_document(html);
    let container = find_first(&document, SCREENER_TABLE)?;
    let rows = select_within(container, "table tr")?;

    let quotes = super::collect_rows(SCREENER_SCHEMA.source, rows, |cells, _| {
        let row = SCREENER_SCHEMA.bind(cells);
        Ok(EquityQuote {
            symbol: row.text("symbol")?.to_string(),
            name: row.text("name")?.to_string(),
            last_price: normalizer.parse_strict_numeric(row.text("lastPrice")?),
            change_dollar: normalizer.parse_strict_numeric(row.text("changeDollar")?),
            change_percent: normalizer.parse_strict_numeric(row.text("changePercent")?),
            volume: normalizer.parse_magnitude_suffixed(row.text("volume")?),
            avg_volume_three_month: normalizer
                .parse_magnitude_suffixed(row.text("avgVolumeThreeMonth")?),
            market_cap: Some(normalizer.parse_magnitude_suffixed(row.text("marketCap")?)),
            pe_ratio_ttm: Some(normalizer.parse_strict_numeric(row.text("peRatioTTM")?)),
        })
    });

    // The most-active page repeats its header as a data row
    Ok(quotes.into_iter().filter(|q| q.symbol != "Symbol").collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Number, SignPolicy};

    const FUTURES_HTML: &str = r#"
        <html><body>
        <section data-test="yfin-list-table">
          <table>
            <thead><tr><th>Symbol</th><th>Name</th><th>Last Price</th></tr></thead>
            <tbody>
              <tr><td>ES=F</td><td>S&amp;P Futures</td><td>4,512.25</td><td>10:02AM EDT</td>
                  <td>-12.50</td><td>-0.28%</td><td>1.234M</td><td>2.5M</td><td></td></tr>
              <tr><td>GC=F</td><td>Gold</td><td>1,950.10</td><td>10:02AM EDT</td>
                  <td>+3.20</td><td>+0.16%</td><td>214.5K</td><td>N/A</td><td></td></tr>
            </tbody>
          </table>
        </section>
        </body></html>"#;

    #[test]
    fn futures_rows_are_normalized() {
        let quotes = parse_futures(FUTURES_HTML, &NumericNormalizer::default()).unwrap();
        assert_eq!(quotes.len(), 2);

        let es = &quotes[0];
        assert_eq!(es.symbol, "ES=F");
        assert_eq!(es.name, "S&P Futures");
        assert_eq!(es.current_price, Number::Float(4512.25));
        assert_eq!(es.change_dollar, Number::Float(-12.5));
        assert_eq!(es.change_percent, Number::Float(-0.28));
        assert_eq!(es.volume_text, "1.234M");
        assert_eq!(es.volume, 1_234_000);
        assert_eq!(es.open_interest, 2_500_000);

        let gold = &quotes[1];
        assert_eq!(gold.change_dollar, Number::Float(3.2));
        assert_eq!(gold.volume, 214_500);
        assert_eq!(gold.open_interest, 0);
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = parse_futures("<html><body></body></html>", &NumericNormalizer::default());
        assert!(err.is_err());
    }

    const INDICES_HTML: &str = r#"
        <section data-test="yfin-list-table"><table>
          <tr><th>Symbol</th></tr>
          <tr><td>^GSPC</td><td>S&amp;P 500</td><td>4,400.12</td><td>+10.5</td><td>+0.24%</td><td>2.1B</td></tr>
          <tr><td>^VIX</td><td>CBOE Volatility Index</td><td>17.35</td><td>-0.40</td><td>-2.25%</td><td>0</td></tr>
          <tr><td>^BAD</td><td>Short row</td></tr>
        </table></section>"#;

    #[test]
    fn indices_skip_short_rows_and_find_vix() {
        let quotes = parse_indices(INDICES_HTML, &NumericNormalizer::default()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].volume, 2_100_000_000);

        let vix = find_vix(&quotes).unwrap();
        assert_eq!(vix.last_price, Number::Float(17.35));
        assert_eq!(vix.change_percent, Number::Float(-2.25));
    }

    #[test]
    fn crypto_rows_scale_market_caps() {
        let html = r#"
            <div id="scr-res-table"><table><tbody>
              <tr><td>BTC-USD</td><td>Bitcoin USD</td><td>43,210.55</td><td>+512.30</td><td>+1.20%</td>
                  <td>846.2B</td><td>12.3B</td><td>25.6B</td><td>25.6B</td><td>19.6M</td><td></td><td></td></tr>
            </tbody></table></div>"#;
        let quotes = parse_crypto(html, &NumericNormalizer::default()).unwrap();
        assert_eq!(quotes.len(), 1);
        let btc = &quotes[0];
        assert_eq!(btc.market_cap, 846_200_000_000);
        assert_eq!(btc.volume_since_midnight, 12_300_000_000);
        assert_eq!(btc.volume_last_24hr, 25_600_000_000);
        assert_eq!(btc.volume_in_circulation, 19_600_000);
    }

    #[test]
    fn trending_drops_non_equity_symbols() {
        let html = r#"
            <section id="yfin-list"><table>
              <tr><td>TSLA</td><td>Tesla</td><td>251.30</td><td>4:00PM</td><td>-5.10</td><td>-1.99%</td><td>98.7M</td><td>110.2M</td><td>798.1B</td></tr>
              <tr><td>EURUSD=X</td><td>EUR/USD</td><td>1.09</td><td>4:00PM</td><td>0.01</td><td>0.5%</td><td>0</td><td>0</td><td>-</td></tr>
              <tr><td>BRK.B</td><td>Berkshire</td><td>350.00</td><td>4:00PM</td><td>1</td><td>0.3%</td><td>3M</td><td>3.5M</td><td>780B</td></tr>
              <tr><td>^DJI</td><td>Dow</td><td>34,000</td><td>4:00PM</td><td>10</td><td>0.1%</td><td>300M</td><td>310M</td><td>-</td></tr>
            </table></section>"#;
        let quotes = parse_trending(html, &NumericNormalizer::default()).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "TSLA");
        assert_eq!(quotes[0].volume, 98_700_000);
        assert_eq!(quotes[0].market_cap, None);
    }

    #[test]
    fn screener_rows_keep_market_cap_and_pe() {
        let html = r#"
            <div id="scr-res-table"><table>
              <tr><td>Symbol</td><td>Name</td><td>Price</td><td>Change</td><td>% Change</td><td>Volume</td><td>Avg</td><td>Cap</td><td>PE</td></tr>
              <tr><td>AAPL</td><td>Apple Inc.</td><td>189.50</td><td>+1.25</td><td>+0.66%</td><td>51.2M</td><td>58.1M</td><td>2.95T</td><td>29.40</td><td></td></tr>
              <tr><td>XYZ</td><td>Loss Maker</td><td>3.10</td><td>-0.9</td><td>-22.50%</td><td>12.3M</td><td>1M</td><td>45.6M</td><td>N/A</td><td></td></tr>
            </table></div>"#;
        let quotes = parse_screener(html, &NumericNormalizer::default()).unwrap();
        assert_eq!(quotes.len(), 2);

        let aapl = &quotes[0];
        assert_eq!(aapl.market_cap, Some(2_950_000_000_000));
        assert_eq!(aapl.pe_ratio_ttm, Some(Number::Float(29.4)));
        assert_eq!(aapl.avg_volume_three_month, 58_100_000);

        let loser = &quotes[1];
        assert_eq!(loser.change_percent, Number::Float(-22.5));
        assert_eq!(loser.pe_ratio_ttm, Some(Number::Int(0)));
    }

    #[test]
    fn length_gated_policy_flows_through_parsers() {
        let html = r#"
            <div id="scr-res-table"><table>
              <tr><td>ABC</td><td>Abc Corp</td><td>9.00</td><td>-5</td><td>-35.71%</td><td>1M</td><td>1M</td><td>1B</td><td>4</td></tr>
            </table></div>"#;
        let normalizer = NumericNormalizer::new(SignPolicy::LengthGated);
        let quotes = parse_screener(html, &normalizer).unwrap();
        assert_eq!(quotes[0].change_dollar, Number::Int(5));
        assert_eq!(quotes[0].change_percent, Number::Float(-35.71));
    }
}
