//! Fetch-and-parse facade over every source.

use crate::app::ports::HttpClientPort;
use crate::config::{Config, SourceUrls};
use crate::constants::VIX_SYMBOL;
use crate::error::{Result, ScraperError};
use crate::infra::ReqwestHttp;
use crate::normalize::NumericNormalizer;
use crate::sources::{calendar, cboe, marketbeat, marketwatch, watchlists, yahoo};
use crate::types::*;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct MarketDataScraper {
    http: Arc<dyn HttpClientPort>,
    urls: SourceUrls,
    normalizer: NumericNormalizer,
}

impl MarketDataScraper {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        urls: SourceUrls,
        normalizer: NumericNormalizer,
    ) -> Self {
        Self { http, urls, normalizer }
    }

    /// Scraper backed by reqwest with the configured user agent and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = ReqwestHttp::new(&config.http)?;
        Ok(Self::new(
            Arc::new(http),
            config.urls.clone(),
            config.normalizer.normalizer(),
        ))
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        self.http.get_text(url).await
    }

    async fn unusual_side(&self, side: OptionSide) -> Result<Vec<UnusualOptionActivity>> {
        let url = match side {
            OptionSide::Calls => &self.urls.marketbeat_unusual_calls,
            OptionSide::Puts => &self.urls.marketbeat_unusual_puts,
        };
        let body = self.fetch(url).await?;
        marketbeat::parse_unusual_option_volume(&body, side, &self.normalizer)
    }

    /// Unusual option volume. With [`OptionSideFilter::Both`] the two tables
    /// are merged and ordered by today's option volume.
    #[instrument(skip(self))]
    pub async fn unusual_option_volume(
        &self,
        filter: OptionSideFilter,
    ) -> Result<Vec<UnusualOptionActivity>> {
        let activity = match filter {
            OptionSideFilter::Calls => self.unusual_side(OptionSide::Calls).await?,
            OptionSideFilter::Puts => self.unusual_side(OptionSide::Puts).await?,
            OptionSideFilter::Both => {
                let calls = self.unusual_side(OptionSide::Calls).await?;
                let puts = self.unusual_side(OptionSide::Puts).await?;
                marketbeat::merge_sides(calls, puts)
            }
        };
        info!(count = activity.len(), "scraped unusual option volume");
        Ok(activity)
    }

    #[instrument(skip(self))]
    pub async fn futures(&self) -> Result<Vec<FuturesQuote>> {
        let body = self.fetch(&self.urls.yahoo_futures).await?;
        yahoo::parse_futures(&body, &self.normalizer)
    }

    #[instrument(skip(self))]
    pub async fn indices(&self) -> Result<Vec<IndexQuote>> {
        let body = self.fetch(&self.urls.yahoo_indices).await?;
        yahoo::parse_indices(&body, &self.normalizer)
    }

    /// The `^VIX` row of the world indices table.
    #[instrument(skip(self))]
    pub async fn vix(&self) -> Result<IndexQuote> {
        let indices = self.indices().await?;
        yahoo::find_vix(&indices).cloned().ok_or_else(|| {
            ScraperError::ElementNotFound(format!("{} row in world indices", VIX_SYMBOL))
        })
    }

    #[instrument(skip(self))]
    pub async fn crypto(&self) -> Result<Vec<CryptoQuote>> {
        let body = self.fetch(&self.urls.yahoo_crypto).await?;
        yahoo::parse_crypto(&body, &self.normalizer)
    }

    #[instrument(skip(self))]
    pub async fn trending(&self) -> Result<Vec<EquityQuote>> {
        let body = self.fetch(&self.urls.yahoo_trending).await?;
        yahoo::parse_trending(&body, &self.normalizer)
    }

    #[instrument(skip(self))]
    pub async fn screener(&self, list: ScreenerList) -> Result<Vec<EquityQuote>> {
        let url = match list {
            ScreenerList::MostActive => &self.urls.yahoo_most_active,
            ScreenerList::Gainers => &self.urls.yahoo_gainers,
            ScreenerList::Losers => &self.urls.yahoo_losers,
        };
        let body = self.fetch(url).await?;
        yahoo::parse_screener(&body, &self.normalizer)
    }

    #[instrument(skip(self))]
    pub async fn put_call_ratios(&self) -> Result<PutCallRatios> {
        let body = self.fetch(&self.urls.cboe_put_call).await?;
        cboe::parse_put_call_ratios(&body)
    }

    #[instrument(skip(self))]
    pub async fn next_cpi_release(&self, now: NaiveDateTime) -> Result<NaiveDateTime> {
        let body = self.fetch(&self.urls.bls_cpi_schedule).await?;
        let releases = calendar::parse_cpi_release_dates(&body)?;
        calendar::next_release(&releases, now, "CPI")
    }

    #[instrument(skip(self))]
    pub async fn next_retail_sales_release(&self, now: NaiveDateTime) -> Result<NaiveDateTime> {
        let body = self.fetch(&self.urls.retail_sales_calendar).await?;
        let releases = calendar::parse_retail_sales_dates(&body)?;
        calendar::next_release(&releases, now, "retail sales")
    }

    #[instrument(skip(self))]
    pub async fn analyst_ratings(&self) -> Result<Vec<AnalystRating>> {
        let body = self.fetch(&self.urls.marketwatch_ratings).await?;
        marketwatch::parse_analyst_ratings(&body)
    }

    #[instrument(skip(self))]
    pub async fn watchlist(&self, list: Watchlist) -> Result<Vec<String>> {
        match list.slug() {
            Some(slug) => {
                let url = format!("{}{}", self.urls.yahoo_watchlists_base, slug);
                let body = self.fetch(&url).await?;
                watchlists::parse_watchlist(&body)
            }
            None => {
                let body = self.fetch(&self.urls.yahoo_trending).await?;
                watchlists::parse_trending_watchlist(&body)
            }
        }
    }
}
