pub mod config;
pub mod constants;
pub mod error;
pub mod html;
pub mod logging;
pub mod market_data;
pub mod metrics;
pub mod normalize;
pub mod sources;
pub mod types;

// Layered boundaries: ports the scraper depends on, and their reqwest-backed implementations
pub mod app;
pub mod infra;

pub use config::Config;
pub use error::{Result, ScraperError};
pub use market_data::MarketDataScraper;
pub use normalize::{NormalizeError, Number, NumericNormalizer, SignPolicy};
