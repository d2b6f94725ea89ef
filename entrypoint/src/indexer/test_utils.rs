use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use crawler::{
    errors::CrawlerError,
    request::Request,
    traits::{CrawlerResponse, Fetcher},
};

enum FakePage {
    Body(String),
    Timeout,
}

/// In-memory site, answers known URLs and records every request it sees
#[derive(Default)]
pub(crate) struct FakeFetcher {
    pages: HashMap<String, FakePage>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), FakePage::Body(body.into()));

        self
    }

    pub(crate) fn with_timeout(mut self, url: &str) -> Self {
        self.pages.insert(url.into(), FakePage::Timeout);

        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn make_web_request(&self, request: Request) -> Result<CrawlerResponse, CrawlerError> {
        let url = request.url().to_string();
        self.requested.lock().unwrap().push(url.clone());

        match self.pages.get(&url) {
            Some(FakePage::Body(body)) => Ok(CrawlerResponse { body: body.clone() }),
            Some(FakePage::Timeout) => Err(CrawlerError::Timeout(url)),
            None => panic!("unexpected request to {url}"),
        }
    }
}

pub(crate) fn thumbnail(title: &str, price_class: &str, price: &str) -> String {
    format!(
        r#"<li class="productThumbnailItem">
            <a class="productDescLink" href="/shop/product/{title}" title="{title}">{title}</a>
            <span class="{price_class}">{price}</span>
        </li>"#
    )
}

/// Pagination rendered under a listing grid
pub(crate) enum Pagination<'a> {
    /// Visible next-page marker linking to the href
    Next(&'a str),
    /// Hidden next-page marker, its anchor still points at the href
    Last(&'a str),
    /// Current-page marker with no next-page marker at all
    CurrentOnly,
}

/// Listing grid with the given products, `None` renders no pagination
pub(crate) fn listing_page(products: &[String], pagination: Option<Pagination>) -> String {
    let current_page = r##"<li class="currentPage"><a href="#">current</a></li>"##;
    let next_page = |class: &str, href: &str| {
        format!(r#"<li class="{class}"><a href="{href}">Next</a></li>"#)
    };

    let pager = match pagination {
        None => String::new(),
        Some(Pagination::Next(href)) => format!("{current_page}{}", next_page("nextPage", href)),
        Some(Pagination::Last(href)) => format!(
            "{current_page}{}",
            next_page("nextPage hiddenVisibility", href)
        ),
        Some(Pagination::CurrentOnly) => current_page.to_string(),
    };

    format!(
        r#"<html><body><div class="sortableGrid">
            <ul>{}</ul>
            <ul class="paginationSpacer">{pager}</ul>
        </div></body></html>"#,
        products.join("")
    )
}
