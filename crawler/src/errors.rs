use reqwest_retry::RetryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Request to {0} timed out")]
    Timeout(String),
    #[error("Crawler middleware error for {0}")]
    MiddlewareGeneralError(String, #[source] reqwest_middleware::Error),
    #[error("Crawler transport error for {0}")]
    GeneralError(String, #[source] reqwest::Error),
    #[error("Failed to build HTTP client")]
    ClientBuildFailed(#[from] reqwest::Error),
}

impl CrawlerError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Splits timeouts out of everything else the transport can fail with
    pub(crate) fn from_middleware(url: &str, err: reqwest_middleware::Error) -> Self {
        if timed_out(&err) {
            return Self::Timeout(url.into());
        }

        match err {
            reqwest_middleware::Error::Reqwest(inner) => Self::GeneralError(url.into(), inner),
            other => Self::MiddlewareGeneralError(url.into(), other),
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(url.into());
        }

        Self::GeneralError(url.into(), err)
    }
}

/// The retry middleware wraps the last attempt's error in a [`RetryError`],
/// so look through it for the transport error underneath
fn timed_out(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(inner) => inner.is_timeout(),
        reqwest_middleware::Error::Middleware(inner) => match inner.downcast_ref::<RetryError>() {
            Some(RetryError::WithRetries { err, .. } | RetryError::Error(err)) => timed_out(err),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_classified() {
        let err = CrawlerError::Timeout("https://www.example.com/shop/a".into());

        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Request to https://www.example.com/shop/a timed out"
        );
    }

    #[test]
    fn test_wrapped_middleware_error_is_not_timeout() {
        let inner = reqwest_middleware::Error::middleware(std::io::Error::other("refused"));
        let err = CrawlerError::from_middleware(
            "https://www.example.com/shop/a",
            reqwest_middleware::Error::middleware(RetryError::Error(inner)),
        );

        assert!(!err.is_timeout());
        assert!(matches!(err, CrawlerError::MiddlewareGeneralError(..)));
    }
}
