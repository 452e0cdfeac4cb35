#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use market_scraper::app::ports::HttpClientPort;
    use market_scraper::config::SourceUrls;
    use market_scraper::types::{OptionSide, OptionSideFilter, ScreenerList, Watchlist};
    use market_scraper::{MarketDataScraper, Number, NumericNormalizer, Result, ScraperError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Serves canned pages by URL and remembers what was requested.
    #[derive(Default)]
    struct FakeHttp {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeHttp {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl HttpClientPort for FakeHttp {
        async fn get_text(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| ScraperError::Api {
                message: format!("GET {} returned 404 Not Found", url),
            })
        }
    }

    fn scraper(http: FakeHttp) -> (MarketDataScraper, Arc<FakeHttp>) {
        let http = Arc::new(http);
        let scraper = MarketDataScraper::new(
            http.clone(),
            SourceUrls::default(),
            NumericNormalizer::default(),
        );
        (scraper, http)
    }

    fn unusual_table(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(ticker, volume)| {
                format!(
                    "<tr><td><div>{}</div><div>Company</div></td><td>$10.00+1.00%</td><td>{}</td>\
                     <td>1,000</td><td>250%</td><td>2.5 million</td><td></td></tr>",
                    ticker, volume
                )
            })
            .collect();
        format!("<table><tbody>{}</tbody></table>", body)
    }

    const INDICES_HTML: &str = r#"
        <section data-test="yfin-list-table"><table>
          <tr><th>Symbol</th><th>Name</th></tr>
          <tr><td>^GSPC</td><td>S&amp;P 500</td><td>4,400.12</td><td>+10.5</td><td>+0.24%</td><td>2.1B</td></tr>
          <tr><td>^VIX</td><td>CBOE Volatility Index</td><td>17.35</td><td>-0.40</td><td>-2.25%</td><td>0</td></tr>
        </table></section>"#;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_both_sides_are_fetched_and_merged() {
        let urls = SourceUrls::default();
        let http = FakeHttp::default()
            .with_page(
                &urls.marketbeat_unusual_calls,
                &unusual_table(&[("AAPL", "5,000"), ("MSFT", "900")]),
            )
            .with_page(&urls.marketbeat_unusual_puts, &unusual_table(&[("TSLA", "2,500")]));
        let (scraper, _) = scraper(http);

        let merged = scraper.unusual_option_volume(OptionSideFilter::Both).await.unwrap();
        let tickers: Vec<&str> = merged.iter().map(|a| a.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["MSFT", "TSLA", "AAPL"]);
        assert_eq!(merged[1].side, OptionSide::Puts);
        assert_eq!(merged[0].avg_stock_volume, 2_500_000);

        let puts = scraper.unusual_option_volume(OptionSideFilter::Puts).await.unwrap();
        assert_eq!(puts.len(), 1);
    }

    #[tokio::test]
    async fn test_vix_is_picked_from_indices() {
        let urls = SourceUrls::default();
        let http = FakeHttp::default().with_page(&urls.yahoo_indices, INDICES_HTML);
        let (scraper, _) = scraper(http);

        let vix = scraper.vix().await.unwrap();
        assert_eq!(vix.symbol, "^VIX");
        assert_eq!(vix.last_price, Number::Float(17.35));
        assert_eq!(vix.change_percent, Number::Float(-2.25));

        let indices = scraper.indices().await.unwrap();
        assert_eq!(indices[0].volume, 2_100_000_000);
    }

    #[tokio::test]
    async fn test_missing_vix_row_is_reported() {
        let urls = SourceUrls::default();
        let html = INDICES_HTML.replace("^VIX", "^FTSE");
        let (scraper, _) = scraper(FakeHttp::default().with_page(&urls.yahoo_indices, &html));

        let err = scraper.vix().await.unwrap_err();
        assert!(matches!(err, ScraperError::ElementNotFound(_)));
    }

    #[tokio::test]
    async fn test_screener_uses_the_list_url() {
        let urls = SourceUrls::default();
        let html = r#"<div id="scr-res-table"><table>
            <tr><td>NVDA</td><td>NVIDIA</td><td>450.00</td><td>+12.00</td><td>+2.74%</td><td>40M</td><td>45M</td><td>1.1T</td><td>110.5</td></tr>
        </table></div>"#;
        let (scraper, http) = scraper(FakeHttp::default().with_page(&urls.yahoo_gainers, html));

        let gainers = scraper.screener(ScreenerList::Gainers).await.unwrap();
        assert_eq!(gainers.len(), 1);
        assert_eq!(gainers[0].market_cap, Some(1_100_000_000_000));
        assert_eq!(http.requested.lock().unwrap().as_slice(), &[urls.yahoo_gainers.clone()]);
    }

    #[tokio::test]
    async fn test_next_retail_sales_release_is_after_now() {
        let urls = SourceUrls::default();
        let html = r#"<table id="calendar">
            <tr><td>2024-05-15</td><td>Retail Sales MoM</td></tr>
            <tr><td>2024-06-18</td><td>Retail Sales MoM</td></tr>
        </table>"#;
        let http = FakeHttp::default().with_page(&urls.retail_sales_calendar, html);
        let (scraper, _) = scraper(http);

        let next = scraper.next_retail_sales_release(at(2024, 5, 20, 9)).await.unwrap();
        assert_eq!(next, at(2024, 6, 18, 0));

        let err = scraper.next_retail_sales_release(at(2024, 7, 1, 0)).await.unwrap_err();
        assert!(matches!(err, ScraperError::NoUpcomingRelease(_)));
    }

    #[tokio::test]
    async fn test_watchlists_route_by_slug() {
        let urls = SourceUrls::default();
        let most_watched = format!("{}most-watched", urls.yahoo_watchlists_base);
        let http = FakeHttp::default()
            .with_page(
                &most_watched,
                r#"<table class="cwl-symbols"><tr><td>AAPL</td></tr><tr><td>AMZN</td></tr></table>"#,
            )
            .with_page(
                &urls.yahoo_trending,
                r#"<table class="W(100%)"><tr><td>GME</td></tr><tr><td>ETH-USD</td></tr></table>"#,
            );
        let (scraper, _) = scraper(http);

        assert_eq!(scraper.watchlist(Watchlist::MostWatched).await.unwrap(), vec!["AAPL", "AMZN"]);
        assert_eq!(scraper.watchlist(Watchlist::Trending).await.unwrap(), vec!["GME"]);
    }

    #[tokio::test]
    async fn test_fetch_failures_propagate() {
        let (scraper, _) = scraper(FakeHttp::default());
        let err = scraper.put_call_ratios().await.unwrap_err();
        assert!(matches!(err, ScraperError::Api { .. }));
    }
}
