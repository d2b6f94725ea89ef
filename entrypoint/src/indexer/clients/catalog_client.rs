use std::collections::BTreeSet;

use crawler::traits::Fetcher;
use metrics::{Metrics, put_metric};
use retailers::structures::CatalogRetailer;
use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::{
    clients::pagination_client::{PaginationClient, WalkSettings, WalkStop, WalkSummary},
    errors::IndexerError,
    sink::RecordSink,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CrawlSummary {
    pub(crate) brands_crawled: u64,
    /// Brands whose walk ended before a terminal or single page
    pub(crate) brands_incomplete: u64,
    pub(crate) pages_visited: u64,
    pub(crate) records_written: u64,
}

impl CrawlSummary {
    fn add(&mut self, walk: &WalkSummary) {
        self.brands_crawled += 1;
        self.pages_visited += walk.pages_visited;
        self.records_written += walk.records_written;

        if !matches!(walk.stop, WalkStop::SinglePage | WalkStop::Terminal) {
            self.brands_incomplete += 1;
        }
    }
}

/// Drives a whole catalog: reads the brand directory, then walks every
/// brand in sorted order into the one shared sink.
pub(crate) struct CatalogClient<'a> {
    crawler: &'a dyn Fetcher,
    retailer: &'a dyn CatalogRetailer,
    settings: WalkSettings,
}

impl<'a> CatalogClient<'a> {
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

    pub(crate) async fn collect_brand_links(&self) -> Result<BTreeSet<String>, IndexerError> {
        let request = self.retailer.build_directory_request();
        let response = self.crawler.make_web_request(request).await?;

        Ok(self.retailer.parse_brand_links(&response.body)?)
    }

    pub(crate) async fn crawl<W: AsyncWrite + Unpin>(
        &self,
        sink: &mut RecordSink<W>,
    ) -> Result<CrawlSummary, IndexerError> {
        let retailer_name = self.retailer.get_retailer_name();
        let brand_links = self.collect_brand_links().await?;

        info!("Crawling {} brands from {retailer_name}", brand_links.len());

        let pagination_client = PaginationClient::new(self.crawler, self.retailer, self.settings);
        let mut summary = CrawlSummary::default();

        for brand_link in brand_links.iter() {
            let walk = pagination_client.walk(brand_link, sink).await?;

            match walk.stop {
                WalkStop::SinglePage | WalkStop::Terminal => info!(
                    "{brand_link} completed crawling ({} pages, {} items)",
                    walk.pages_visited, walk.records_written
                ),
                stop => warn!(
                    "{brand_link} stopped early ({stop:?}) after {} pages, {} items",
                    walk.pages_visited, walk.records_written
                ),
            }

            put_metric!(Metrics::CrawledBrand, 1, "retailer" => retailer_name.to_string());
            summary.add(&walk);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use crawler::errors::CrawlerError;
    use retailers::html::macys::Macys;

    use crate::{
        config::TimeoutPolicy,
        test_utils::{FakeFetcher, Pagination, listing_page, thumbnail},
    };

    use super::*;

    const DIRECTORY: &str =
        "https://www.macys.com/shop/all-brands?id=63538&cm_sp=us_hdr-_-brands-_-63538_brands";
    const ALPHA: &str = "https://www.macys.com/shop/b/alpha?id=1";
    const ALPHA_PAGE_2: &str = "https://www.macys.com/shop/b/alpha?id=1&Pageindex=2";
    const BETA: &str = "https://www.macys.com/shop/b/beta?id=2";

    fn directory_page() -> String {
        r#"<html><body><div id="localContentContainer">
            <a href="/shop/b/beta?id=2">Beta</a>
            <a href="/shop/b/alpha?id=1">Alpha</a>
            <a href="/shop/b/alpha?id=1">Alpha (featured)</a>
        </div></body></html>"#
            .into()
    }

    fn alpha_page_1() -> String {
        listing_page(
            &[
                thumbnail("Product One", "discount", "Sale $19.99"),
                thumbnail("Product Two", "regular", "$30.00"),
            ],
            Some(Pagination::Next("/shop/b/alpha?id=1&Pageindex=2")),
        )
    }

    fn beta_page() -> String {
        listing_page(&[thumbnail("Beta Hat", "regular", "$8")], None)
    }

    async fn crawl(
        fetcher: &FakeFetcher,
        settings: WalkSettings,
    ) -> (Result<CrawlSummary, IndexerError>, String) {
        let retailer = Macys::try_default().unwrap();
        let client = CatalogClient::new(fetcher, &retailer, settings);
        let mut sink = RecordSink::new(Vec::new());

        let summary = client.crawl(&mut sink).await;

        (summary, String::from_utf8(sink.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_collect_brand_links_dedupes() {
        let fetcher = FakeFetcher::default().with_page(DIRECTORY, directory_page());
        let retailer = Macys::try_default().unwrap();
        let client = CatalogClient::new(&fetcher, &retailer, WalkSettings::default());

        let links = client.collect_brand_links().await.unwrap();

        assert_eq!(links.into_iter().collect::<Vec<_>>(), vec![ALPHA, BETA]);
    }

    #[tokio::test]
    async fn test_two_page_brand_end_to_end() {
        let fetcher = FakeFetcher::default()
            .with_page(DIRECTORY, directory_page())
            .with_page(ALPHA, alpha_page_1())
            .with_page(
                ALPHA_PAGE_2,
                listing_page(
                    &[thumbnail("Product Three", "edv", "$12.50")],
                    Some(Pagination::Last("/shop/b/alpha?id=1&Pageindex=3")),
                ),
            )
            .with_page(BETA, beta_page());

        let (summary, output) = crawl(&fetcher, WalkSettings::default()).await;

        assert_eq!(
            summary.unwrap(),
            CrawlSummary {
                brands_crawled: 2,
                brands_incomplete: 0,
                pages_visited: 3,
                records_written: 4,
            }
        );
        assert_eq!(
            output,
            "Product One,19.99\nProduct Two,30.00\nProduct Three,12.50\nBeta Hat,8\n"
        );
        assert_eq!(
            fetcher.requested(),
            vec![DIRECTORY, ALPHA, ALPHA_PAGE_2, BETA]
        );
    }

    #[tokio::test]
    async fn test_skipped_timeout_moves_to_next_brand() {
        let fetcher = FakeFetcher::default()
            .with_page(DIRECTORY, directory_page())
            .with_page(ALPHA, alpha_page_1())
            .with_timeout(ALPHA_PAGE_2)
            .with_page(BETA, beta_page());

        let (summary, output) = crawl(&fetcher, WalkSettings::default()).await;

        assert_eq!(
            summary.unwrap(),
            CrawlSummary {
                brands_crawled: 2,
                brands_incomplete: 1,
                pages_visited: 2,
                records_written: 3,
            }
        );
        assert_eq!(output, "Product One,19.99\nProduct Two,30.00\nBeta Hat,8\n");
    }

    #[tokio::test]
    async fn test_aborted_timeout_keeps_written_lines() {
        let fetcher = FakeFetcher::default()
            .with_page(DIRECTORY, directory_page())
            .with_page(ALPHA, alpha_page_1())
            .with_timeout(ALPHA_PAGE_2);
        let settings = WalkSettings {
            on_timeout: TimeoutPolicy::Abort,
            ..Default::default()
        };

        let (summary, output) = crawl(&fetcher, settings).await;

        assert!(matches!(
            summary,
            Err(IndexerError::Crawler(CrawlerError::Timeout(_)))
        ));
        assert_eq!(output, "Product One,19.99\nProduct Two,30.00\n");
        assert_eq!(fetcher.requested(), vec![DIRECTORY, ALPHA, ALPHA_PAGE_2]);
    }

    #[tokio::test]
    async fn test_directory_failure_is_fatal() {
        let fetcher = FakeFetcher::default().with_timeout(DIRECTORY);

        let (summary, output) = crawl(&fetcher, WalkSettings::default()).await;

        assert!(matches!(summary, Err(IndexerError::Crawler(_))));
        assert!(output.is_empty());
    }
}
