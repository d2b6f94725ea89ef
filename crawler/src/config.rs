use std::time::Duration;

pub const PAGE_TIMEOUT_SECONDS: u64 = 30;
pub const PAGE_MIN_SECS_BACKOFF: u64 = 1;
pub const PAGE_MAX_SECS_BACKOFF: u64 = 10;
pub const MAX_RETRY: u32 = 1;

// the catalog rejects default client identifiers, so look like a desktop browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36";

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub min_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.into(),
            timeout: Duration::from_secs(PAGE_TIMEOUT_SECONDS),
            max_retries: MAX_RETRY,
            min_backoff: Duration::from_secs(PAGE_MIN_SECS_BACKOFF),
            max_backoff: Duration::from_secs(PAGE_MAX_SECS_BACKOFF),
        }
    }
}

impl CrawlerConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();

        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;

        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;

        self
    }
}
