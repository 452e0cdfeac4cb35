//! Prometheus counters for scrape and normalization health.
//!
//! Recording is always cheap: without an installed recorder the `metrics`
//! macros are no-ops, which is what library users and unit tests get.

use std::net::SocketAddr;
use tracing::{info, warn};

pub const NORMALIZE_FAILURES: &str = "market_scraper_normalize_failures_total";
pub const ROWS_PARSED: &str = "market_scraper_rows_parsed_total";
pub const ROWS_SKIPPED: &str = "market_scraper_rows_skipped_total";
pub const REQUESTS: &str = "market_scraper_requests_total";

pub const METRICS_ADDR_ENV: &str = "MARKET_SCRAPER_METRICS_ADDR";

/// Installs the Prometheus exporter when `MARKET_SCRAPER_METRICS_ADDR` is set.
pub fn init_metrics() {
    let Ok(addr_str) = std::env::var(METRICS_ADDR_ENV) else {
        return;
    };
    let addr: SocketAddr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics addr '{}': {}", addr_str, e);
            return;
        }
    };
    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed: {}", e),
    }
}

pub fn record_normalize_failure(operation: &'static str) {
    ::metrics::counter!(NORMALIZE_FAILURES, "operation" => operation).increment(1);
}

pub fn record_rows(source: &'static str, parsed: usize, skipped: usize) {
    ::metrics::counter!(ROWS_PARSED, "source" => source).increment(parsed as u64);
    ::metrics::counter!(ROWS_SKIPPED, "source" => source).increment(skipped as u64);
}

pub fn record_request(outcome: &'static str) {
    ::metrics::counter!(REQUESTS, "outcome" => outcome).increment(1);
}
