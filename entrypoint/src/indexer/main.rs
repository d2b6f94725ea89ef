mod clients;
mod config;
mod errors;
mod sink;
#[cfg(test)]
mod test_utils;

use std::process;

use clap::Parser;
use crawler::http_crawler::HttpCrawler;
use retailers::html::macys::Macys;
use tracing::{error, info};
use utils::logger::configure_logger;

use crate::{
    clients::catalog_client::CatalogClient, config::IndexerArgs, errors::IndexerError,
    sink::RecordSink,
};

#[tokio::main]
async fn main() {
    configure_logger();

    let args = IndexerArgs::parse();

    if args.export_metrics {
        metrics::enable();
    }

    let crawl_state = run(args).await;

    metrics::shutdown();

    if let Err(err) = crawl_state {
        error!("Crawl aborted: {err}");
        process::exit(1);
    }
}

async fn run(args: IndexerArgs) -> Result<(), IndexerError> {
    let crawler = HttpCrawler::new(&args.crawler_config())?;
    let retailer = Macys::new(args.base_url.clone(), args.brand_directory_url.clone());
    let mut sink = RecordSink::create(&args.output).await?;

    let catalog_client = CatalogClient::new(&crawler, &retailer, args.walk_settings());
    let summary = catalog_client.crawl(&mut sink).await?;

    info!(
        "Process complete: {} brands ({} incomplete), {} pages, {} items written to {}",
        summary.brands_crawled,
        summary.brands_incomplete,
        summary.pages_visited,
        summary.records_written,
        args.output.display()
    );

    Ok(())
}
