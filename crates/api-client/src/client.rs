// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Timeout-bounded fetch primitive shared by every marketplace façade

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use reqwest::{
    Client, Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{ApiError, ApiResult, ClientConfig, TransportError, query::encode_query};

static GLOBAL_CLIENT: OnceLock<ApiClient> = OnceLock::new();

const API_KEY_HEADER: &str = "x-api-key";

/// Per-request options for [`ApiClient::fetch_with_timeout`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// HTTP method
    pub method: Method,
    /// Query parameters, appended in order
    pub params: Vec<(String, String)>,
    /// Extra headers; these override the client defaults
    pub headers: HeaderMap,
    /// JSON body
    pub body: Option<Value>,
    /// Timeout for this request; falls back to the configured default
    pub timeout: Option<Duration>,
    /// Caller-supplied cancellation
    pub cancellation: Option<CancellationToken>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl FetchOptions {
    /// Options for a plain `GET`
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            params: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            cancellation: None,
        }
    }

    /// Options for a `POST` with a JSON body
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get()
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Set a header, replacing any default of the same name
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the timeout for this request
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the request when `token` is cancelled
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Compact description used in error messages
    ///
    /// Headers are left out so credentials never reach logs.
    pub fn describe(&self) -> String {
        let params: serde_json::Map<String, Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let mut description = serde_json::json!({ "method": self.method.as_str() });
        if !params.is_empty() {
            description["params"] = Value::Object(params);
        }
        if let Some(body) = &self.body {
            description["body"] = body.clone();
        }
        description.to_string()
    }
}

/// REST client for the marketplace API
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ClientConfig>,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Create a client from an explicit configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key.as_str())
                .map_err(|e| ApiError::config(format!("API key is not a valid header: {e}")))?;
            value.set_sensitive(true);
            default_headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        Ok(Self {
            http,
            config: Arc::new(config),
            default_headers,
        })
    }

    /// Initialise the process-wide client
    ///
    /// The first successful call wins; later calls return the existing
    /// client and their configuration is ignored.
    pub fn init(config: ClientConfig) -> ApiResult<&'static ApiClient> {
        if let Some(existing) = GLOBAL_CLIENT.get() {
            debug!("global API client already initialised, keeping existing configuration");
            return Ok(existing);
        }

        let client = Self::new(config)?;
        Ok(GLOBAL_CLIENT.get_or_init(|| client))
    }

    /// The process-wide client, if [`ApiClient::init`] has been called
    pub fn global() -> Option<&'static ApiClient> {
        GLOBAL_CLIENT.get()
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET` a path with no options
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch_with_timeout(path, FetchOptions::get()).await
    }

    /// Perform one request against `{api_url}{path}` and decode the JSON body
    ///
    /// Exactly one request is sent. Any failure (timeout, cancellation,
    /// transport, non-2xx status or undecodable body) is returned as
    /// [`ApiError::Request`] carrying the path and a description of the
    /// options.
    #[instrument(
        skip(self, options),
        fields(request_id = %Uuid::new_v4(), method = %options.method)
    )]
    pub async fn fetch_with_timeout<T: DeserializeOwned>(
        &self,
        path: &str,
        options: FetchOptions,
    ) -> ApiResult<T> {
        let timeout_duration = options.timeout.unwrap_or(self.config.timeout);

        let result = match &options.cancellation {
            Some(token) => token
                .run_until_cancelled(self.execute(path, &options, timeout_duration))
                .await
                .unwrap_or(Err(TransportError::Cancelled)),
            None => self.execute(path, &options, timeout_duration).await,
        };

        result.map_err(|source| {
            warn!(error = %source, "marketplace API request failed");
            ApiError::Request {
                path: path.to_string(),
                options: options.describe(),
                source,
            }
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &FetchOptions,
        timeout_duration: Duration,
    ) -> Result<T, TransportError> {
        let mut url = format!("{}{}", self.config.api_base(), path);
        if !options.params.is_empty() {
            url.push(if path.contains('?') { '&' } else { '?' });
            url.push_str(&encode_query(&options.params));
        }

        let mut headers = self.default_headers.clone();
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        debug!(url, "sending marketplace API request");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, TransportError>((status, body))
        };

        let (status, body) = timeout(timeout_duration, exchange)
            .await
            .map_err(|_| TransportError::Timeout {
                timeout_ms: u64::try_from(timeout_duration.as_millis()).unwrap_or(u64::MAX),
            })??;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body = if body.trim().is_empty() { "null" } else { &body };
        Ok(serde_json::from_str(body)?)
    }
}

/// Prefer the `message` field of a JSON error body, fall back to the raw text
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(Value::String(message)) = map.get("message")
    {
        return message.clone();
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
