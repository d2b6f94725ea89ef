pub mod config;
pub mod errors;
pub mod http_crawler;
pub mod request;
pub mod traits;
