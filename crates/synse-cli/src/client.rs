//! Request construction, response classification, and the shared API client.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use synse_api_models::ErrorResponse;
use synse_config::{CliConfig, OutputFormat};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::transport::{Transport, TransportError};

/// Endpoint type segment of every request path.
pub const ENDPOINT_TYPE: &str = "synse";
/// API version segment of versioned request paths.
pub const API_VERSION: &str = "2.0";

/// Join path segments with `/`, without any normalization.
///
/// Empty segments and segments that already contain separators are kept as-is,
/// so `["foo/", "/bar"]` becomes `foo///bar`.
#[must_use]
pub fn make_uri(segments: &[&str]) -> String {
    segments.join("/")
}

/// Turn a completed exchange into either the response or a typed error.
///
/// Transport failures take precedence; statuses of 400 and above consume the
/// body to build a server error. Successful bodies are left for the caller.
pub async fn check(outcome: Result<Response, TransportError>) -> CliResult<Response> {
    let response = outcome.map_err(|err| CliError::transport(err.to_string()))?;
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let body = failure_body(status, response.bytes().await.map(|bytes| bytes.to_vec()));
    Err(classify_failure(status, &body))
}

/// Body of a failed response, or empty when it could not be read.
fn failure_body(status: StatusCode, read: reqwest::Result<Vec<u8>>) -> Vec<u8> {
    read.unwrap_or_else(|err| {
        debug!(status = %status, error = %err, "failed to read error response body");
        Vec::new()
    })
}

/// Build the server error for a failed status from its (possibly empty) body.
#[must_use]
pub fn classify_failure(status: StatusCode, body: &[u8]) -> CliError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(payload) => {
            let message = payload
                .summary()
                .unwrap_or_else(|| format!("request failed with status {}", payload.http_code));
            CliError::server(payload.http_code, message)
        }
        Err(_) => CliError::server_status(status),
    }
}

/// Client for the Synse Server HTTP API.
pub struct ApiClient<T> {
    transport: T,
    address: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// Client that sends requests to `address` (`host:port`) through `transport`.
    ///
    /// With no address every request fails before dispatch.
    pub fn new(transport: T, address: Option<String>) -> Self {
        Self { transport, address }
    }

    /// Base URL of versioned routes, e.g. `http://host:5000/synse/2.0/`.
    fn versioned_base(&self) -> Option<String> {
        self.address
            .as_deref()
            .map(|address| format!("http://{address}/{ENDPOINT_TYPE}/{API_VERSION}/"))
    }

    /// Base URL of unversioned routes, e.g. `http://host:5000/synse/`.
    fn unversioned_base(&self) -> Option<String> {
        self.address
            .as_deref()
            .map(|address| format!("http://{address}/{ENDPOINT_TYPE}/"))
    }

    /// `GET` a versioned route and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or server error, or a decode error.
    pub async fn get<R: DeserializeOwned>(&self, segments: &[&str]) -> CliResult<R> {
        let url = build_url(self.versioned_base(), segments);
        self.send(url.map(|url| Request::new(Method::GET, url))).await
    }

    /// `GET` an unversioned route and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or server error, or a decode error.
    pub async fn get_unversioned<R: DeserializeOwned>(&self, segments: &[&str]) -> CliResult<R> {
        let url = build_url(self.unversioned_base(), segments);
        self.send(url.map(|url| Request::new(Method::GET, url))).await
    }

    /// `POST` a JSON body to a versioned route and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or server error, or a decode error.
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> CliResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|err| CliError::transport(format!("failed to encode request body: {err}")))?;
        let request = build_url(self.versioned_base(), segments).map(|url| {
            let mut request = Request::new(Method::POST, url);
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(payload.into());
            request
        });
        self.send(request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        request: Result<Request, TransportError>,
    ) -> CliResult<R> {
        let outcome = match request {
            Ok(request) => self.transport.execute(request).await,
            Err(err) => Err(err),
        };
        let response = check(outcome).await?;
        response.json::<R>().await.map_err(|err| CliError::Decode {
            message: err.to_string(),
        })
    }
}

fn build_url(base: Option<String>, segments: &[&str]) -> Result<Url, TransportError> {
    let base = base.ok_or(TransportError::NoActiveHost)?;
    let raw = format!("{base}{}", make_uri(segments));
    raw.parse::<Url>()
        .map_err(|err| TransportError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })
}

/// Per-invocation state handed to command handlers.
pub struct AppContext<T> {
    /// API client bound to the active host.
    pub client: ApiClient<T>,
    /// Selected output mode.
    pub format: OutputFormat,
    /// Resolved configuration.
    pub config: CliConfig,
}

impl<T: Transport> AppContext<T> {
    /// Build the context from a resolved configuration.
    pub fn new(transport: T, config: CliConfig, format: OutputFormat) -> Self {
        let address = config
            .active_host
            .as_ref()
            .map(|host| host.address.clone());
        Self {
            client: ApiClient::new(transport, address),
            format,
            config,
        }
    }
}
