//! JSON fetcher port
//!
//! Unauthenticated HTTP GET returning a parsed JSON body.

use crate::ports::price_source::SourceError;
use async_trait::async_trait;

#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` with the given query parameters and parse the body as JSON.
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// reported as [`SourceError`].
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, SourceError>;
}
