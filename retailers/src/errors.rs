use crawler::errors::CrawlerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetailerError {
    #[error("Failed to make request")]
    CrawlerFailed(#[from] CrawlerError),
    #[error("Invalid URL {0}")]
    InvalidUrl(String, #[source] url::ParseError),
    #[error("Missing attribute {0} from element {1}")]
    HtmlElementMissingAttribute(String, String),
    #[error("Invalid selector {0}")]
    InvalidSelector(String),
    #[error("Missing element {0} from HTML")]
    HtmlMissingElement(String),
    #[error("Product {0} has no discount, regular or everyday value price")]
    MissingPrice(String),
}
