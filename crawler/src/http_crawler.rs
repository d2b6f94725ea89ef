use async_trait::async_trait;
use reqwest::ClientBuilder as BaseClientBuilder;
use reqwest_middleware::{ClientBuilder as RetryableClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, info, warn};

use crate::{
    config::CrawlerConfig,
    errors::CrawlerError,
    request::Request,
    traits::{CrawlerResponse, Fetcher},
};

/// Plain HTTP crawler holding one session (cookie jar and connection pool)
/// for the whole run.
#[derive(Clone)]
pub struct HttpCrawler {
    client: ClientWithMiddleware,
}

impl HttpCrawler {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlerError> {
        let base_client = BaseClientBuilder::new()
            .gzip(true)
            .cookie_store(true)
            .http1_ignore_invalid_headers_in_responses(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        let retry_strat = ExponentialBackoff::builder()
            .retry_bounds(config.min_backoff, config.max_backoff)
            .build_with_max_retries(config.max_retries);
        let retry_middleware = RetryTransientMiddleware::new_with_policy(retry_strat);

        let client = RetryableClientBuilder::new(base_client)
            .with(retry_middleware)
            .build();

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpCrawler {
    async fn make_web_request(&self, request: Request) -> Result<CrawlerResponse, CrawlerError> {
        info!("Sending request to {}", request.url);

        let response = self
            .client
            .get(&request.url)
            .send()
            .await
            .map_err(|err| CrawlerError::from_middleware(&request.url, err))?;

        debug!("{response:?}");

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with {status}", request.url);
        }

        let body = response
            .text()
            .await
            .map_err(|err| CrawlerError::from_reqwest(&request.url, err))?;

        Ok(CrawlerResponse { body })
    }
}
