use std::{collections::BTreeSet, sync::LazyLock};

use common::{
    constants::{BASE_URL, BRAND_DIRECTORY_URL},
    result::{base::ProductRecord, price::PriceField},
};
use crawler::request::{Request, RequestBuilder};
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, error, warn};
use url::Url;

use crate::{
    errors::RetailerError,
    structures::{CatalogRetailer, PageMarker},
    utils::{
        conversions::{normalize_price, normalize_title},
        html::{element_extract_attr, extract_element_from_element, find_element_text, selector},
    },
};

const RETAILER_NAME: &str = "Macy's";

const DIRECTORY_CONTAINER: &str = "#localContentContainer";
const DIRECTORY_LINK: &str = "#localContentContainer a[href]";

const PRODUCT_THUMBNAIL: &str = ".sortableGrid li.productThumbnailItem";
const PRODUCT_DESC_LINK: &str = "a.productDescLink";
const DISCOUNT_PRICE: &str = "span.discount";
const REGULAR_PRICE: &str = "span.regular";
const EVERYDAY_VALUE_PRICE: &str = "span.edv";

const CURRENT_PAGE: &str = ".sortableGrid li.currentPage";
// the last page renders "nextPage hiddenVisibility", so match loosely
const NEXT_PAGE: &str = r#".sortableGrid li[class*="nextPag"]"#;
const NEXT_PAGE_LINK: &str = "a[href]";

static SHOP_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/shop/*").expect("Regex should compile as nothing has changed"));

pub struct Macys {
    base_url: Url,
    directory_url: Url,
}

impl Macys {
    pub fn new(base_url: Url, directory_url: Url) -> Self {
        Self {
            base_url,
            directory_url,
        }
    }

    pub fn try_default() -> Result<Self, RetailerError> {
        let parse = |url: &str| {
            Url::parse(url).map_err(|err| RetailerError::InvalidUrl(url.to_string(), err))
        };

        Ok(Self::new(parse(BASE_URL)?, parse(BRAND_DIRECTORY_URL)?))
    }

    fn resolve(&self, href: &str) -> Option<String> {
        match self.base_url.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                warn!("Skipping link {href}, failed to resolve against {}: {err}", self.base_url);
                None
            }
        }
    }

    fn parse_product(element: ElementRef) -> Result<ProductRecord, RetailerError> {
        let desc_link = extract_element_from_element(element, PRODUCT_DESC_LINK)?;
        let title = normalize_title(&element_extract_attr(desc_link, "title")?);

        let price = PriceField::select(
            find_element_text(element, DISCOUNT_PRICE)?,
            find_element_text(element, REGULAR_PRICE)?,
            find_element_text(element, EVERYDAY_VALUE_PRICE)?,
        );

        debug!("{title}: using {price} price");

        let Some(price_text) = price.into_text() else {
            error!("No price found for {title} in {:?}", element);
            return Err(RetailerError::MissingPrice(title));
        };

        Ok(ProductRecord::new(title, normalize_price(&price_text)))
    }

    fn find_next_page_url(&self, next_page: ElementRef) -> Result<Option<String>, RetailerError> {
        let Some(next_link) = next_page.select(&selector(NEXT_PAGE_LINK)?).next() else {
            return Ok(None);
        };

        Ok(next_link.attr("href").and_then(|href| self.resolve(href)))
    }
}

impl CatalogRetailer for Macys {
    fn get_retailer_name(&self) -> &str {
        RETAILER_NAME
    }

    fn build_directory_request(&self) -> Request {
        RequestBuilder::new()
            .set_url(self.directory_url.as_str())
            .build()
    }

    fn parse_brand_links(&self, response: &str) -> Result<BTreeSet<String>, RetailerError> {
        let html = Html::parse_document(response);
        let mut links = BTreeSet::new();

        if html.select(&selector(DIRECTORY_CONTAINER)?).next().is_none() {
            warn!("Brand directory has no {DIRECTORY_CONTAINER}, no brands to crawl");
            return Ok(links);
        }

        for anchor in html.select(&selector(DIRECTORY_LINK)?) {
            let Some(href) = anchor.attr("href") else {
                continue;
            };

            if !SHOP_LINK.is_match(href) {
                continue;
            }

            if let Some(link) = self.resolve(href) {
                links.insert(link);
            }
        }

        debug!("Found {} unique brand links", links.len());

        Ok(links)
    }

    fn build_page_request(&self, url: &str) -> Request {
        debug!("Setting page to {}", url);

        RequestBuilder::new().set_url(url).build()
    }

    fn parse_response(&self, response: &str) -> Result<Vec<ProductRecord>, RetailerError> {
        let mut results: Vec<ProductRecord> = Vec::new();

        let html = Html::parse_document(response);

        for product in html.select(&selector(PRODUCT_THUMBNAIL)?) {
            results.push(Self::parse_product(product)?);
        }

        Ok(results)
    }

    fn get_page_marker(&self, response: &str) -> Result<PageMarker, RetailerError> {
        let html = Html::parse_document(response);

        if html.select(&selector(CURRENT_PAGE)?).next().is_none() {
            return Ok(PageMarker::Absent);
        }

        let Some(next_page) = html.select(&selector(NEXT_PAGE)?).next() else {
            return Ok(PageMarker::MorePages { next_url: None });
        };

        // the hidden marker on the last page still carries a link, never follow it
        let marker = match next_page.value().classes().count() {
            1 => PageMarker::MorePages {
                next_url: self.find_next_page_url(next_page)?,
            },
            2 => PageMarker::LastPage,
            count => PageMarker::Unrecognized(count),
        };

        Ok(marker)
    }
}
