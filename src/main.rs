use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use market_scraper::logging::init_logging;
use market_scraper::metrics::init_metrics;
use market_scraper::normalize::{self, NumericNormalizer};
use market_scraper::types::{OptionSideFilter, ScreenerList, Watchlist};
use market_scraper::{Config, MarketDataScraper};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "market_scraper")]
#[command(about = "Scrapes market data pages and prints normalized JSON")]
#[command(version)]
struct Cli {
    /// Config file; defaults to $MARKET_SCRAPER_CONFIG or ./config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Scrape(ScrapeCommand),
    /// Run a numeric normalizer over a piece of text
    Normalize {
        #[arg(value_enum)]
        mode: NormalizeMode,
        text: String,
    },
}

/// Commands that fetch and parse one page
#[derive(Subcommand)]
enum ScrapeCommand {
    /// Unusual call/put option volume from MarketBeat
    Options {
        #[arg(long, value_enum, default_value_t = OptionSideFilter::Both)]
        side: OptionSideFilter,
    },
    /// Commodity futures quotes
    Futures,
    /// World index quotes
    Indices,
    /// The VIX row of the world indices table
    Vix,
    /// Cryptocurrency quotes
    Crypto,
    /// Trending tickers
    Trending,
    /// Most active, top gainers or top losers
    Screener {
        #[arg(value_enum)]
        list: ScreenerList,
    },
    /// CBOE daily put/call ratios
    PutCall,
    /// Next CPI release
    Cpi,
    /// Next retail sales release
    RetailSales,
    /// Analyst upgrades and downgrades
    Ratings,
    /// Symbols on a Yahoo watchlist
    Watchlist {
        #[arg(value_enum)]
        name: Watchlist,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NormalizeMode {
    Float,
    Int,
    Strict,
    Magnitude,
    Worded,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_normalize(
    normalizer: &NumericNormalizer,
    mode: NormalizeMode,
    text: &str,
) -> anyhow::Result<()> {
    match mode {
        NormalizeMode::Float => print_json(&normalize::try_float(text)?),
        NormalizeMode::Int => print_json(&normalize::try_int(text)?),
        NormalizeMode::Strict => print_json(&normalizer.try_strict_numeric(text)?),
        NormalizeMode::Magnitude => print_json(&normalizer.try_magnitude_suffixed(text)?),
        NormalizeMode::Worded => print_json(&normalizer.try_worded_magnitude(text)?),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    match cli.command {
        Commands::Normalize { mode, text } => {
            run_normalize(&config.normalizer.normalizer(), mode, &text)
        }
        Commands::Scrape(command) => run_scrape(&config, command).await,
    }
}

async fn run_scrape(config: &Config, command: ScrapeCommand) -> anyhow::Result<()> {
    let scraper = MarketDataScraper::from_config(config)?;
    let now = Local::now().naive_local();

    match command {
        ScrapeCommand::Options { side } => print_json(&scraper.unusual_option_volume(side).await?),
        ScrapeCommand::Futures => print_json(&scraper.futures().await?),
        ScrapeCommand::Indices => print_json(&scraper.indices().await?),
        ScrapeCommand::Vix => print_json(&scraper.vix().await?),
        ScrapeCommand::Crypto => print_json(&scraper.crypto().await?),
        ScrapeCommand::Trending => print_json(&scraper.trending().await?),
        ScrapeCommand::Screener { list } => print_json(&scraper.screener(list).await?),
        ScrapeCommand::PutCall => print_json(&scraper.put_call_ratios().await?),
        ScrapeCommand::Cpi => print_json(&scraper.next_cpi_release(now).await?),
        ScrapeCommand::RetailSales => print_json(&scraper.next_retail_sales_release(now).await?),
        ScrapeCommand::Ratings => print_json(&scraper.analyst_ratings().await?),
        ScrapeCommand::Watchlist { name } => print_json(&scraper.watchlist(name).await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = init_logging();
    init_metrics();

    let cli = Cli::parse();
    info!("market_scraper starting");

    if let Err(e) = run(cli).await {
        error!(error = %e, "command failed");
        return Err(e);
    }
    Ok(())
}
