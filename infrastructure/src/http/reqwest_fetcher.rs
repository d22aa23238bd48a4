//! reqwest-backed [`JsonFetcher`]

use async_trait::async_trait;
use cloudcorp_application::{JsonFetcher, SourceError};
use std::time::Duration;
use tracing::debug;

/// Plain unauthenticated JSON GETs
#[derive(Debug, Clone)]
pub struct ReqwestJsonFetcher {
    client: reqwest::Client,
}

impl ReqwestJsonFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("cloudcorp/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl JsonFetcher for ReqwestJsonFetcher {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, SourceError> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SourceError::Parse(format!("Invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the base URL plus
    /// a handle yielding the raw request line.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{}/api/retail/prices", addr), handle)
    }

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let (url, server) = serve_once("200 OK", r#"{"Items":[{"retailPrice":0.018}]}"#).await;
        let fetcher = ReqwestJsonFetcher::new(Some(Duration::from_secs(5))).unwrap();

        let body = fetcher
            .get_json(&url, &[("$filter", "armSkuName eq 'Basic_A1'")])
            .await
            .unwrap();

        assert_eq!(body["Items"][0]["retailPrice"], 0.018);
        let request_line = server.await.unwrap();
        let expected = "GET /api/retail/prices?%24filter=armSkuName";
        assert!(request_line.starts_with(expected));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (url, _server) = serve_once("503 Service Unavailable", "{}").await;
        let fetcher = ReqwestJsonFetcher::new(Some(Duration::from_secs(5))).unwrap();

        let err = fetcher.get_json(&url, &[]).await.unwrap_err();
        assert_eq!(err, SourceError::Http { status: 503 });
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let (url, _server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let fetcher = ReqwestJsonFetcher::new(Some(Duration::from_secs(5))).unwrap();

        let err = fetcher.get_json(&url, &[]).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = ReqwestJsonFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let err = fetcher
            .get_json(&format!("http://{}/", addr), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Transport(_)));
    }
}
