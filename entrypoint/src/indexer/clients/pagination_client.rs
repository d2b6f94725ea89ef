use std::{collections::HashSet, time::Duration};

use common::constants::{CRAWL_COOLDOWN_SECS, MAX_PAGES_PER_BRAND};
use crawler::traits::Fetcher;
use metrics::{Metrics, put_metric};
use retailers::structures::{CatalogRetailer, PageMarker};
use tokio::{io::AsyncWrite, time::sleep};
use tracing::{debug, error, trace, warn};

use crate::{config::TimeoutPolicy, errors::IndexerError, sink::RecordSink};

#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkSettings {
    pub(crate) max_pages: u64,
    pub(crate) cooldown: Duration,
    pub(crate) on_timeout: TimeoutPolicy,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES_PER_BRAND,
            cooldown: Duration::from_secs(CRAWL_COOLDOWN_SECS),
            on_timeout: TimeoutPolicy::Skip,
        }
    }
}

/// Why a brand's walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkStop {
    /// First page had no pagination at all
    SinglePage,
    /// Reached a page whose next-page marker is hidden
    Terminal,
    /// Pagination said more pages exist but gave no way to reach them
    MalformedPagination,
    PageLimit,
    /// Next link pointed back at an already visited page
    Cycle,
    /// A page timed out and was skipped
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WalkSummary {
    pub(crate) pages_visited: u64,
    pub(crate) records_written: u64,
    pub(crate) stop: WalkStop,
}

/// Walks one brand's listing forward, page by page, writing every page's
/// products before looking at where the next page is.
pub(crate) struct PaginationClient<'a> {
    crawler: &'a dyn Fetcher,
    retailer: &'a dyn CatalogRetailer,
    settings: WalkSettings,
}

impl<'a> PaginationClient<'a> {
    pub(crate) fn new(
        crawler: &'a dyn Fetcher,
        retailer: &'a dyn CatalogRetailer,
        settings: WalkSettings,
    ) -> Self {
        Self {
            crawler,
            retailer,
            settings,
        }
    }

    pub(crate) async fn walk<W: AsyncWrite + Unpin>(
        &self,
        start_url: &str,
        sink: &mut RecordSink<W>,
    ) -> Result<WalkSummary, IndexerError> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current_url = start_url.to_string();
        let mut pages_visited: u64 = 0;
        let written_before = sink.records_written();

        let stop = loop {
            if pages_visited >= self.settings.max_pages {
                warn!(
                    "Stopping {start_url} after {pages_visited} pages, {current_url} is past the page limit"
                );
                break WalkStop::PageLimit;
            }

            if !visited.insert(current_url.clone()) {
                warn!("Stopping {start_url}, pagination loops back to {current_url}");
                break WalkStop::Cycle;
            }

            let Some(response) = self.fetch_page(&current_url).await? else {
                break WalkStop::Timeout;
            };
            trace!("{response:?}");

            pages_visited += 1;

            let records = self.retailer.parse_response(&response)?;
            for record in records.iter() {
                sink.write_record(record).await?;
            }

            let retailer_name = self.retailer.get_retailer_name().to_string();
            put_metric!(Metrics::CrawledPage, 1, "retailer" => retailer_name.clone());
            put_metric!(Metrics::CrawledProduct, records.len() as u64, "retailer" => retailer_name);

            match self.retailer.get_page_marker(&response)? {
                PageMarker::Absent if pages_visited == 1 => {
                    debug!("{current_url} has no pagination, brand fits on one page");
                    break WalkStop::SinglePage;
                }
                PageMarker::Absent => {
                    warn!("{current_url} lost its pagination mid walk");
                    break WalkStop::MalformedPagination;
                }
                PageMarker::LastPage => {
                    debug!("{current_url} is the last page");
                    break WalkStop::Terminal;
                }
                PageMarker::MorePages {
                    next_url: Some(next_url),
                } => {
                    debug!("Moving from {current_url} to {next_url}");
                    current_url = next_url;
                }
                PageMarker::MorePages { next_url: None } => {
                    warn!("{current_url} claims more pages but has no next page link");
                    break WalkStop::MalformedPagination;
                }
                PageMarker::Unrecognized(classes) => {
                    warn!("{current_url} has a next page marker with {classes} classes");
                    break WalkStop::MalformedPagination;
                }
            }

            if !self.settings.cooldown.is_zero() {
                sleep(self.settings.cooldown).await;
            }
        };

        Ok(WalkSummary {
            pages_visited,
            records_written: sink.records_written() - written_before,
            stop,
        })
    }

    /// `None` when the page timed out and the policy says to move on
    async fn fetch_page(&self, url: &str) -> Result<Option<String>, IndexerError> {
        let request = self.retailer.build_page_request(url);

        match self.crawler.make_web_request(request).await {
            Ok(response) => Ok(Some(response.body)),
            Err(err) if err.is_timeout() => {
                error!("A timeout occurred at {url}");
                put_metric!(Metrics::PageTimeout, 1, "retailer" => self.retailer.get_retailer_name().to_string());

                match self.settings.on_timeout {
                    TimeoutPolicy::Skip => Ok(None),
                    TimeoutPolicy::Abort => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}
