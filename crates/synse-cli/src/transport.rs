//! HTTP transport and its request-logging decorator.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use thiserror::Error;
use tracing::debug;

/// Failures that prevent a response from being obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client failed (DNS, connect, timeout, ...).
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// No host is configured, so there is nowhere to send the request.
    #[error("no active host configured (use --host, --address, or set active_host in the config file)")]
    NoActiveHost,
    /// The request URL could not be built.
    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL text that failed to parse.
        url: String,
        /// Parser error message.
        reason: String,
    },
}

/// Executes a fully-built request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the server's response.
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

/// Transport backed by a `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Wrap an already-configured client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        Ok(self.client.execute(request).await?)
    }
}

/// Decorator that traces every request dispatched through the inner transport.
#[derive(Clone, Debug)]
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: Transport> LoggingTransport<T> {
    /// Decorate `inner` with request logging.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for LoggingTransport<T> {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(method = %method, url = %url, "request: start");

        let start = Instant::now();
        let result = self.inner.execute(request).await;
        let elapsed = start.elapsed();

        let status = result
            .as_ref()
            .map(|response| response.status().to_string())
            .unwrap_or_default();
        debug!(duration = ?elapsed, url = %url, status = %status, "request: complete");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::{Method, Url};
    use std::sync::Mutex;

    struct RecordingTransport {
        seen: Mutex<Vec<(Method, String)>>,
        inner: HttpTransport,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(&self, request: Request) -> Result<Response, TransportError> {
            self.seen
                .lock()
                .expect("recording lock")
                .push((request.method().clone(), request.url().to_string()));
            self.inner.execute(request).await
        }
    }

    #[tokio::test]
    async fn logging_transport_passes_request_through_unchanged() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/synse/2.0/scan");
            then.status(200).body("{}");
        });

        let recorder = RecordingTransport {
            seen: Mutex::new(Vec::new()),
            inner: HttpTransport::default(),
        };
        let transport = LoggingTransport::new(recorder);
        let url: Url = server.url("/synse/2.0/scan").parse().expect("valid URL");

        let response = transport
            .execute(Request::new(Method::GET, url.clone()))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), 200);
        mock.assert();
        let seen = transport.inner.seen.lock().expect("recording lock");
        assert_eq!(seen.as_slice(), [(Method::GET, url.to_string())]);
    }

    #[tokio::test]
    async fn logging_transport_returns_connection_errors() {
        let transport = LoggingTransport::new(HttpTransport::default());
        let url: Url = "http://127.0.0.1:1/synse/2.0/scan"
            .parse()
            .expect("valid URL");

        let err = transport
            .execute(Request::new(Method::GET, url))
            .await
            .expect_err("nothing listens on port 1");
        assert!(matches!(err, TransportError::Http(_)));
    }

    fn log_line<'a>(logs: &'a str, message: &str) -> &'a str {
        logs.lines()
            .find(|line| line.contains(message))
            .unwrap_or_else(|| panic!("no '{message}' event in logs: {logs}"))
    }

    #[tokio::test]
    async fn logging_transport_traces_failed_request_with_empty_status() {
        let (logs, _guard) = crate::test_logs::capture();
        let transport = LoggingTransport::new(HttpTransport::default());
        let url: Url = "http://127.0.0.1:1/synse/2.0/scan"
            .parse()
            .expect("valid URL");

        let result = transport.execute(Request::new(Method::GET, url)).await;
        assert!(result.is_err());

        let logs = logs.contents();
        let start = log_line(&logs, "request: start");
        assert!(start.contains("method=GET"), "start: {start}");
        assert!(
            start.contains("url=http://127.0.0.1:1/synse/2.0/scan"),
            "start: {start}"
        );
        let complete = log_line(&logs, "request: complete");
        assert!(complete.contains("duration="), "complete: {complete}");
        assert!(
            complete.contains("url=http://127.0.0.1:1/synse/2.0/scan"),
            "complete: {complete}"
        );
        assert!(complete.ends_with("status="), "complete: {complete}");
        assert!(logs.find("request: start") < logs.find("request: complete"));
    }

    #[tokio::test]
    async fn logging_transport_traces_response_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/synse/2.0/write/rack-1/board-1/device-3");
            then.status(404);
        });
        let (logs, _guard) = crate::test_logs::capture();
        let transport = LoggingTransport::new(HttpTransport::default());
        let url: Url = server
            .url("/synse/2.0/write/rack-1/board-1/device-3")
            .parse()
            .expect("valid URL");

        let response = transport
            .execute(Request::new(Method::POST, url))
            .await
            .expect("response arrives");
        assert_eq!(response.status(), 404);

        let logs = logs.contents();
        assert!(log_line(&logs, "request: start").contains("method=POST"));
        assert!(log_line(&logs, "request: complete").ends_with("status=404 Not Found"));
    }
}
