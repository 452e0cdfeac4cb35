use crate::normalize::Number;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which MarketBeat unusual-volume table a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Calls,
    Puts,
}

/// Which unusual-volume tables to scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OptionSideFilter {
    Calls,
    Puts,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusualOptionActivity {
    pub ticker: String,
    pub side: OptionSide,
    pub cur_stock_price: f64,
    pub stock_percent_gain: f64,
    pub todays_option_volume: i64,
    pub avg_option_volume: i64,
    pub relative_volume_increase: f64,
    pub avg_stock_volume: i64,
    pub catalyst_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesQuote {
    pub symbol: String,
    pub name: String,
    pub current_price: Number,
    pub change_dollar: Number,
    pub change_percent: Number,
    /// Volume cell as displayed, e.g. `"214.5K"`
    pub volume_text: String,
    pub volume: i64,
    pub open_interest: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    pub symbol: String,
    pub name: String,
    pub last_price: Number,
    pub change_dollar: Number,
    pub change_percent: Number,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoQuote {
    pub symbol: String,
    pub name: String,
    pub last_price: Number,
    pub change_dollar: Number,
    pub change_percent: Number,
    pub market_cap: i64,
    pub volume_since_midnight: i64,
    pub volume_last_24hr: i64,
    pub volume_in_circulation: i64,
}

/// Row of the trending and screener (most active, gainers, losers) tables.
/// Trending rows carry neither market cap nor P/E.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityQuote {
    pub symbol: String,
    pub name: String,
    pub last_price: Number,
    pub change_dollar: Number,
    pub change_percent: Number,
    pub volume: i64,
    pub avg_volume_three_month: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<i64>,
    #[serde(rename = "peRatioTTM", skip_serializing_if = "Option::is_none")]
    pub pe_ratio_ttm: Option<Number>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutCallRatios {
    pub total: f64,
    pub index: f64,
    pub vix: f64,
    pub exchange_traded_products: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystRating {
    /// Date cell as displayed (`MM/DD/YYYY`)
    pub date_text: String,
    pub date: Option<NaiveDate>,
    pub ticker: String,
    pub company: String,
    pub rating: String,
    pub analyst: Option<String>,
}

/// Yahoo screener pages sharing one table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenerList {
    MostActive,
    Gainers,
    Losers,
}

/// Yahoo curated watchlists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Watchlist {
    MostWatched,
    #[value(name = "biggest-52wk-gains")]
    Biggest52WeekGains,
    #[value(name = "recent-52wk-highs")]
    Recent52WeekHighs,
    #[value(name = "biggest-52wk-losses")]
    Biggest52WeekLosses,
    MostShorted,
    MostNewlyAdded,
    Trending,
}

impl Watchlist {
    /// Path segment under the watchlists base URL. `Trending` is scraped from
    /// the trending tickers page instead and has no slug.
    pub fn slug(self) -> Option<&'static str> {
        match self {
            Watchlist::MostWatched => Some("most-watched"),
            Watchlist::Biggest52WeekGains => Some("fiftytwo-wk-gain"),
            Watchlist::Recent52WeekHighs => Some("fiftytwo-wk-high"),
            Watchlist::Biggest52WeekLosses => Some("fiftytwo-wk-loss"),
            Watchlist::MostShorted => Some("stocks-with-the-highest-short-interest"),
            Watchlist::MostNewlyAdded => Some("most-added"),
            Watchlist::Trending => None,
        }
    }
}
