use async_trait::async_trait;

use crate::{errors::CrawlerError, request::Request};

#[derive(Debug, Clone)]
pub struct CrawlerResponse {
    pub body: String,
}

/// Anything that can turn a [`Request`] into a page body.
///
/// The clients only ever see this trait, so the HTTP stack can be swapped
/// for an in-memory site in tests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn make_web_request(&self, request: Request) -> Result<CrawlerResponse, CrawlerError>;
}
