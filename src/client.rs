//! Async HTTP transport for forecast queries.

use crate::request::query_builder::ForecastQuery;
use crate::response::raw_response::RawResponse;
use crate::ForecastError;
use bon::bon;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("onacc-forecast/", env!("CARGO_PKG_VERSION"));

/// Sends [`ForecastQuery`]s and returns the status and body untouched.
///
/// Status codes are not turned into errors here: a 4xx or 5xx answer is a
/// normal [`RawResponse`] whose reason is extracted during normalization.
/// Only transport failures (DNS, connect, timeout, broken body) are errors.
///
/// # Examples
///
/// ```rust
/// # use onacc_forecast::{ForecastClient, ForecastError};
/// # use std::time::Duration;
/// # fn run() -> Result<(), ForecastError> {
/// let client = ForecastClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
}

#[bon]
impl ForecastClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.timeout(Duration)`: Optional. Whole-request timeout, defaults to 30 seconds.
    /// * `.user_agent(String)`: Optional. Defaults to `onacc-forecast/<version>`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::HttpClient`] if the TLS backend cannot be initialized.
    #[builder]
    pub fn new(
        timeout: Option<Duration>,
        #[builder(into)] user_agent: Option<String>,
    ) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .build()
            .map_err(ForecastError::HttpClient)?;
        Ok(Self { http })
    }

    /// Sends `query` as a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::NetworkRequest`] if the request cannot be sent
    /// or its body cannot be read.
    pub async fn fetch(&self, query: &ForecastQuery) -> Result<RawResponse, ForecastError> {
        let url = query.endpoint.clone();
        info!("Requesting {} ({} parameters)", url, query.params.len());

        let response = self
            .http
            .get(&url)
            .query(&query.params)
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url, e))?;

        Ok(RawResponse::new(status.as_u16(), body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response and hands back the request head.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{address}/v1/forecast"), handle)
    }

    fn query(endpoint: String) -> ForecastQuery {
        ForecastQuery {
            endpoint,
            params: vec![
                ("latitude".to_string(), "3.84,4.05".to_string()),
                ("longitude".to_string(), "11.50,9.76".to_string()),
            ],
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_error_status_as_response() -> Result<(), ForecastError> {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let client = ForecastClient::builder().build()?;

        let raw = client.fetch(&query(endpoint)).await?;
        assert_eq!(raw.status, 404);
        assert_eq!(raw.body, b"not found");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /v1/forecast?latitude=3.84%2C4.05&longitude=11.50%2C9.76 "));
        assert!(request.to_lowercase().contains("user-agent: onacc-forecast/"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() -> Result<(), ForecastError> {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = ForecastClient::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        let result = client
            .fetch(&query(format!("http://{address}/v1/forecast")))
            .await;
        assert!(matches!(result, Err(ForecastError::NetworkRequest(..))));
        Ok(())
    }
}
