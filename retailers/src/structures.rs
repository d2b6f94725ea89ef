use std::collections::BTreeSet;

use common::result::base::ProductRecord;
use crawler::request::Request;

use crate::errors::RetailerError;

/// What a listing page says about the pages after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMarker {
    /// No current-page marker, the brand fits on a single page
    Absent,
    /// Next-page marker with one class, `next_url` is `None` when the
    /// next-page marker is missing or has no usable link
    MorePages { next_url: Option<String> },
    /// Next-page marker hidden with a second class
    LastPage,
    /// Next-page marker with any other number of classes
    Unrecognized(usize),
}

/// Site knowledge needed to crawl a brand catalog: where the brand
/// directory lives, and how to read brand links, products and pagination
/// out of raw page bodies.
pub trait CatalogRetailer: Send + Sync {
    fn get_retailer_name(&self) -> &str;

    fn build_directory_request(&self) -> Request;

    fn parse_brand_links(&self, response: &str) -> Result<BTreeSet<String>, RetailerError>;

    fn build_page_request(&self, url: &str) -> Request;

    fn parse_response(&self, response: &str) -> Result<Vec<ProductRecord>, RetailerError>;

    fn get_page_marker(&self, response: &str) -> Result<PageMarker, RetailerError>;
}
