use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use common::constants::{
    BASE_URL, BRAND_DIRECTORY_URL, CRAWL_COOLDOWN_SECS, MAX_PAGES_PER_BRAND, OUTPUT_FILE,
};
use crawler::config::{BROWSER_USER_AGENT, CrawlerConfig, MAX_RETRY, PAGE_TIMEOUT_SECONDS};
use url::Url;

use crate::clients::pagination_client::WalkSettings;

/// What to do with a page whose request timed out after the transport
/// used up its retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TimeoutPolicy {
    /// Log it and stop the current brand, the crawl moves on to the next brand
    Skip,
    /// Fail the whole run
    Abort,
}

#[derive(Debug, Parser)]
#[command(
    name = "indexer",
    version,
    about = "Crawls every brand of a catalog into a name,price file"
)]
pub(crate) struct IndexerArgs {
    /// Site root that relative brand and page links are resolved against
    #[arg(long, env = "INDEXER_BASE_URL", default_value = BASE_URL)]
    pub(crate) base_url: Url,

    /// Page listing every brand of the catalog
    #[arg(long, env = "INDEXER_BRAND_DIRECTORY_URL", default_value = BRAND_DIRECTORY_URL)]
    pub(crate) brand_directory_url: Url,

    /// Output file, overwritten on every run
    #[arg(short, long, env = "INDEXER_OUTPUT", default_value = OUTPUT_FILE)]
    pub(crate) output: PathBuf,

    #[arg(long, env = "INDEXER_USER_AGENT", default_value = BROWSER_USER_AGENT)]
    pub(crate) user_agent: String,

    #[arg(long, env = "INDEXER_TIMEOUT_SECS", default_value_t = PAGE_TIMEOUT_SECONDS)]
    pub(crate) timeout_secs: u64,

    /// Retries for transient failures (timeouts included) before giving up on a page
    #[arg(long, env = "INDEXER_MAX_RETRIES", default_value_t = MAX_RETRY)]
    pub(crate) max_retries: u32,

    #[arg(long, env = "INDEXER_ON_TIMEOUT", value_enum, default_value_t = TimeoutPolicy::Skip)]
    pub(crate) on_timeout: TimeoutPolicy,

    /// Upper bound on pages walked for a single brand
    #[arg(
        long,
        env = "INDEXER_MAX_PAGES",
        default_value_t = MAX_PAGES_PER_BRAND,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(crate) max_pages: u64,

    /// Pause between two page requests of the same brand
    #[arg(long, env = "INDEXER_COOLDOWN_SECS", default_value_t = CRAWL_COOLDOWN_SECS)]
    pub(crate) cooldown_secs: u64,

    /// Push crawl counters to the OTLP endpoint at PROMETHEUS_HOST:PROMETHEUS_PORT
    #[arg(long, env = "INDEXER_EXPORT_METRICS")]
    pub(crate) export_metrics: bool,
}

impl IndexerArgs {
    pub(crate) fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::default()
            .with_user_agent(self.user_agent.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_retries(self.max_retries)
    }

    pub(crate) fn walk_settings(&self) -> WalkSettings {
        WalkSettings {
            max_pages: self.max_pages,
            cooldown: Duration::from_secs(self.cooldown_secs),
            on_timeout: self.on_timeout,
        }
    }
}
