//! HTTP adapters

mod reqwest_fetcher;

pub use reqwest_fetcher::ReqwestJsonFetcher;
