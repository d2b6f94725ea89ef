use crawler::errors::CrawlerError;
use retailers::errors::RetailerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum IndexerError {
    #[error("Failed to fetch page: {0}")]
    Crawler(#[from] CrawlerError),
    #[error("Failed to read page: {0}")]
    Retailer(#[from] RetailerError),
    #[error("Failed to write records: {0}")]
    Sink(#[from] std::io::Error),
}
