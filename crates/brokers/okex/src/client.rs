use async_trait::async_trait;
use okbridge_core::*;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::OkexConfig;
use crate::endpoints;
use crate::signing;

const ACCESS_KEY_HEADER: &str = "OK-ACCESS-KEY";
const ACCESS_SIGN_HEADER: &str = "OK-ACCESS-SIGN";
const ACCESS_TIMESTAMP_HEADER: &str = "OK-ACCESS-TIMESTAMP";
const ACCESS_PASSPHRASE_HEADER: &str = "OK-ACCESS-PASSPHRASE";
const SIMULATED_TRADING_HEADER: &str = "x-simulated-trading";

/// OKEx v5 REST client.
///
/// Holds read-only credentials and a pooled HTTP client, so one instance can
/// be shared across tasks. No timeouts, retries or status checks are applied.
pub struct OkexClient {
    credentials: Credentials,
    config: OkexConfig,
    http: reqwest::Client,
}

impl OkexClient {
    pub fn new(credentials: Credentials, config: OkexConfig) -> Self {
        Self {
            credentials,
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Execute a request descriptor.
    pub async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse, ExchangeError> {
        self.execute(
            request.method,
            &request.path,
            Some(request.params.as_slice()),
            request.body.as_deref(),
            request.auth,
        )
        .await
    }

    /// Perform one HTTP call against `base_url + path`.
    ///
    /// With `auth`, the key, signature, timestamp and passphrase headers are
    /// attached. The signature covers `path` as given; `params` are appended
    /// to the URL afterwards and are not signed. The body is returned as JSON
    /// when it parses and as raw text otherwise, whatever the status code.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: Option<&[(String, String)]>,
        data: Option<&str>,
        auth: bool,
    ) -> Result<ApiResponse, ExchangeError> {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!(method = %method, path, auth, "Sending request");

        let mut builder = self
            .http
            .request(to_http_method(method), &url)
            .header(CONTENT_TYPE, "application/json");

        if auth {
            let timestamp = signing::timestamp_millis();
            let signature = signing::sign(
                &self.credentials.api_secret,
                method.as_str(),
                path,
                &timestamp,
                data.unwrap_or_default(),
            );
            builder = builder
                .header(ACCESS_KEY_HEADER, &self.credentials.api_key)
                .header(ACCESS_SIGN_HEADER, signature)
                .header(ACCESS_TIMESTAMP_HEADER, timestamp)
                .header(ACCESS_PASSPHRASE_HEADER, &self.credentials.passphrase);
        }

        if self.config.is_demo() {
            builder = builder.header(SIMULATED_TRADING_HEADER, "1");
        }

        if let Some(params) = params.filter(|p| !p.is_empty()) {
            builder = builder.query(params);
        }

        if let Some(data) = data {
            builder = builder.body(data.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(format!("{} {}: {}", method, path, e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(format!("Failed to read body: {}", e)))?;

        let decoded = ApiResponse::from_body(text);
        if !decoded.is_json() {
            debug!(status = %status, path, "Response body is not JSON, returning raw text");
        }
        Ok(decoded)
    }
}

fn to_http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Exchange for OkexClient {
    async fn spot_balances(&self) -> Result<ApiResponse, ExchangeError> {
        self.send(&endpoints::spot_balances()).await
    }

    async fn spot_ticker(&self, symbol: &str) -> Result<ApiResponse, ExchangeError> {
        self.send(&endpoints::ticker(symbol)).await
    }

    async fn futures_balances(&self, symbol: &str) -> Result<ApiResponse, ExchangeError> {
        self.send(&endpoints::futures_balances(symbol)).await
    }

    async fn futures_ticker(&self, symbol: &str) -> Result<ApiResponse, ExchangeError> {
        self.send(&endpoints::ticker(symbol)).await
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<ApiResponse, ExchangeError> {
        let request = endpoints::place_order(order)?;
        self.send(&request).await
    }
}
