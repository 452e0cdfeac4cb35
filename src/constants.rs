/// Source names used in logs, metrics labels and row schemas
pub const MARKETBEAT_SOURCE: &str = "marketbeat_unusual_options";
pub const YAHOO_FUTURES_SOURCE: &str = "yahoo_futures";
pub const YAHOO_INDICES_SOURCE: &str = "yahoo_indices";
pub const YAHOO_CRYPTO_SOURCE: &str = "yahoo_crypto";
pub const YAHOO_TRENDING_SOURCE: &str = "yahoo_trending";
pub const YAHOO_SCREENER_SOURCE: &str = "yahoo_screener";
pub const CBOE_SOURCE: &str = "cboe_put_call";
pub const BLS_CPI_SOURCE: &str = "bls_cpi_schedule";
pub const RETAIL_SALES_SOURCE: &str = "retail_sales_calendar";
pub const MARKETWATCH_SOURCE: &str = "marketwatch_ratings";
pub const WATCHLIST_SOURCE: &str = "yahoo_watchlist";

// Default page locations. All of them can be overridden under `[urls]` in config.toml.
pub const MARKETBEAT_UNUSUAL_CALLS_URL: &str =
    "https://www.marketbeat.com/market-data/unusual-call-options-volume/";
pub const MARKETBEAT_UNUSUAL_PUTS_URL: &str =
    "https://www.marketbeat.com/market-data/unusual-put-options-volume/";
pub const YAHOO_FUTURES_URL: &str = "https://finance.yahoo.com/commodities";
pub const YAHOO_INDICES_URL: &str = "https://finance.yahoo.com/world-indices";
pub const YAHOO_CRYPTO_URL: &str = "https://finance.yahoo.com/cryptocurrencies";
pub const YAHOO_TRENDING_URL: &str = "https://finance.yahoo.com/trending-tickers";
pub const YAHOO_MOST_ACTIVE_URL: &str = "https://finance.yahoo.com/most-active";
pub const YAHOO_GAINERS_URL: &str = "https://finance.yahoo.com/gainers";
pub const YAHOO_LOSERS_URL: &str = "https://finance.yahoo.com/losers";
pub const YAHOO_WATCHLISTS_BASE_URL: &str = "https://finance.yahoo.com/u/yahoo-finance/watchlists/";
pub const CBOE_PUT_CALL_URL: &str = "https://markets.cboe.com/us/options/market_statistics/daily/";
pub const BLS_CPI_SCHEDULE_URL: &str = "https://www.bls.gov/schedule/news_release/cpi.htm";
pub const RETAIL_SALES_CALENDAR_URL: &str =
    "https://tradingeconomics.com/united-states/retail-sales";
pub const MARKETWATCH_RATINGS_URL: &str = "https://www.marketwatch.com/tools/upgrades-downgrades";

/// Browser user agent; several of the sites above reject the reqwest default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/93.0.4577.82 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "MARKET_SCRAPER_CONFIG";

/// Index symbol looked up by the VIX shortcut
pub const VIX_SYMBOL: &str = "^VIX";
