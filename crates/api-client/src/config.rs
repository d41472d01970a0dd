// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! [`ClientConfig`] is an explicit value handed to [`crate::ApiClient`] and to
//! the contract interaction builders. Network defaults come from
//! [`Chain`]; every field can be overridden with the `with_*` methods or
//! loaded from a configuration file.

use std::{path::Path, time::Duration};

use anyhow::ensure;
use config::{Config, Environment, File};
use serde::Deserialize;
use shared_types::{Chain, ContractAddresses};
use url::Url;

use crate::{ApiError, ApiResult, NonEmptyString};

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 40_000;

/// Upper bound accepted for the request timeout in milliseconds
pub const MAX_TIMEOUT_MS: u64 = 300_000;

const DEFAULT_USER_AGENT: &str = "marketplace-sdk/0.1.0";
const ENV_PREFIX: &str = "MARKETPLACE";

/// Configuration shared by the REST client and the interaction builders
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace REST API
    pub api_url: Url,
    /// API key sent as `X-Api-Key`, if any
    pub api_key: Option<NonEmptyString>,
    /// Network the client talks to
    pub chain: Chain,
    /// Addresses of the fixed marketplace contracts
    pub contract_addresses: ContractAddresses,
    /// Gateway used for read-only contract queries
    pub gateway_url: Url,
    /// Location of the contract interface descriptions
    pub abi_base_url: Url,
    /// Default timeout applied to every request
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: NonEmptyString,
}

/// File representation of [`ClientConfig`]; every field is optional
#[derive(Debug, Default, Deserialize)]
struct RawClientConfig {
    chain: Option<Chain>,
    api_url: Option<Url>,
    api_key: Option<String>,
    gateway_url: Option<Url>,
    abi_base_url: Option<Url>,
    timeout_ms: Option<u64>,
    user_agent: Option<String>,
    contract_addresses: Option<ContractAddresses>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Chain::default())
    }
}

impl ClientConfig {
    /// Create a configuration with the defaults of `chain`
    #[allow(clippy::missing_panics_doc)]
    pub fn new(chain: Chain) -> Self {
        // Static URLs are compile-time constants and always parse
        Self {
            api_url: Url::parse(chain.default_api_url()).expect("default API URL is valid"),
            api_key: None,
            chain,
            contract_addresses: chain.default_contract_addresses(),
            gateway_url: Url::parse(chain.default_gateway_url())
                .expect("default gateway URL is valid"),
            abi_base_url: Url::parse(chain.default_abi_base_url())
                .expect("default ABI URL is valid"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: NonEmptyString::new(DEFAULT_USER_AGENT).expect("known to be non-empty"),
        }
    }

    /// Override the REST API base URL
    pub fn with_api_url(mut self, api_url: &str) -> ApiResult<Self> {
        self.api_url = parse_url("api_url", api_url)?;
        Ok(self)
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> ApiResult<Self> {
        self.api_key = Some(NonEmptyString::new(api_key).map_err(ApiError::config)?);
        Ok(self)
    }

    /// Override the gateway URL
    pub fn with_gateway_url(mut self, gateway_url: &str) -> ApiResult<Self> {
        self.gateway_url = parse_url("gateway_url", gateway_url)?;
        Ok(self)
    }

    /// Override the ABI base URL
    pub fn with_abi_base_url(mut self, abi_base_url: &str) -> ApiResult<Self> {
        self.abi_base_url = parse_url("abi_base_url", abi_base_url)?;
        Ok(self)
    }

    /// Override the contract address table
    #[must_use]
    pub fn with_contract_addresses(mut self, contract_addresses: ContractAddresses) -> Self {
        self.contract_addresses = contract_addresses;
        self
    }

    /// Override the default request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> ApiResult<Self> {
        self.timeout = validate_timeout_ms(timeout_ms).map_err(ApiError::config)?;
        Ok(self)
    }

    /// API base URL without a trailing slash, ready for path concatenation
    pub fn api_base(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// Gateway base URL without a trailing slash
    pub fn gateway_base(&self) -> &str {
        self.gateway_url.as_str().trim_end_matches('/')
    }

    /// ABI base URL without a trailing slash
    pub fn abi_base(&self) -> &str {
        self.abi_base_url.as_str().trim_end_matches('/')
    }

    /// Load configuration from a file (TOML, JSON or YAML by extension)
    ///
    /// Missing fields fall back to the defaults of the configured `chain`.
    pub fn from_file(path: impl AsRef<Path>) -> ApiResult<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| ApiError::config(format!("failed to load configuration: {e}")))?;

        Self::from_settings(&settings)
    }

    /// Load configuration from a file, then apply `MARKETPLACE__*` overrides
    ///
    /// Environment variables use `__` as separator, for example
    /// `MARKETPLACE__API_KEY` or `MARKETPLACE__CONTRACT_ADDRESSES__MARKET`.
    pub fn load(path: impl AsRef<Path>) -> ApiResult<Self> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| ApiError::config(format!("failed to load configuration: {e}")))?;

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> ApiResult<Self> {
        let raw: RawClientConfig = settings
            .clone()
            .try_deserialize()
            .map_err(|e| ApiError::config(format!("invalid configuration: {e}")))?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawClientConfig) -> ApiResult<Self> {
        let mut config = Self::new(raw.chain.unwrap_or_default());

        if let Some(api_url) = raw.api_url {
            config.api_url = api_url;
        }
        if let Some(api_key) = raw.api_key {
            config = config.with_api_key(api_key)?;
        }
        if let Some(gateway_url) = raw.gateway_url {
            config.gateway_url = gateway_url;
        }
        if let Some(abi_base_url) = raw.abi_base_url {
            config.abi_base_url = abi_base_url;
        }
        if let Some(timeout_ms) = raw.timeout_ms {
            config = config.with_timeout_ms(timeout_ms)?;
        }
        if let Some(user_agent) = raw.user_agent {
            config.user_agent = NonEmptyString::new(user_agent).map_err(ApiError::config)?;
        }
        if let Some(contract_addresses) = raw.contract_addresses {
            config.contract_addresses = contract_addresses;
        }

        Ok(config)
    }
}

fn parse_url(field: &str, value: &str) -> ApiResult<Url> {
    Url::parse(value).map_err(|e| ApiError::config(format!("invalid {field} '{value}': {e}")))
}

fn validate_timeout_ms(timeout_ms: u64) -> anyhow::Result<Duration> {
    ensure!(timeout_ms != 0, "timeout must be greater than 0");
    ensure!(
        timeout_ms <= MAX_TIMEOUT_MS,
        "timeout cannot exceed {MAX_TIMEOUT_MS} ms"
    );
    Ok(Duration::from_millis(timeout_ms))
}
