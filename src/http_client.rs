// ============================================================================
// File: src/http_client.rs
// HTTP transport used by the search pipeline
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::FetchError;

/// Status line and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Reason phrase for a status code, empty when the code is unknown.
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET with the given query pairs appended to `url`.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// transport failures produce `Err`.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, FetchError>;
}

/// Production client backed by reqwest.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, FetchError> {
        // The query carries the API key, so strip the URL from reqwest errors.
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.without_url().to_string()))?;

        let status = response.status();
        let body = if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| FetchError::InvalidEncoding(e.without_url().to_string()))?
        } else {
            // Callers only need the status line of a failed request.
            response.text().await.unwrap_or_default()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status_text(status.as_u16()),
            body,
        })
    }
}

#[cfg(test)]
pub use mock::MockClient;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 200,
            status_text: status_text(200),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn status_text_uses_reason_phrase() {
        assert_eq!(status_text(404), "Not Found");
        assert_eq!(status_text(500), "Internal Server Error");
        assert_eq!(status_text(599), "");
    }

    #[tokio::test]
    async fn mock_records_requests_and_defaults_to_not_found() {
        let mock = MockClient::new().with_status("http://test/ok", 200, "{}");
        let query = vec![("a".to_string(), "1".to_string())];

        let ok = mock.get("http://test/ok", &query).await.unwrap();
        assert_eq!(ok.status, 200);
        let missing = mock.get("http://test/missing", &[]).await.unwrap();
        assert_eq!(missing.status, 404);

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].param("a"), Some("1"));
    }

    /// Serves one canned raw HTTP response on a local port.
    async fn serve_once(raw: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(raw.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/recipes/complexSearch", addr)
    }

    #[tokio::test]
    async fn truncated_error_body_keeps_status() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial",
        )
        .await;
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();

        let response = client.get(&url, &[]).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(response.status_text, "Service Unavailable");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn truncated_success_body_is_an_error() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"results\"").await;
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();

        let err = client.get(&url, &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidEncoding(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();

        let err = client
            .get(&format!("http://{}/", addr), &[("apiKey".to_string(), "secret".to_string())])
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Connection(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
