#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) url: String,
}

pub struct RequestBuilder {
    request: Request,
}

impl Request {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            request: Request {
                url: Default::default(),
            },
        }
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();

        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
