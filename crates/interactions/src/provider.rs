// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only contract queries
//!
//! [`GatewayProvider`] runs view functions through the network gateway's
//! `vm-values/query` endpoint. Other transports (a local simulator, a test
//! double) implement [`QueryProvider`].

use std::{future::Future, time::Duration};

use alloy_primitives::U256;
use api_client::ClientConfig;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::{
    abi::duration_ms,
    address::Address,
    codec::hex_arg,
    error::{InteractionError, InteractionResult},
};

/// One view-function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractQuery {
    /// Contract to query
    pub address: Address,
    /// View function name
    pub function: String,
    /// Top-level encoded arguments
    pub args: Vec<Vec<u8>>,
    /// Optional caller, for views that depend on it
    pub caller: Option<Address>,
    /// Optional EGLD value
    pub value: Option<U256>,
}

impl ContractQuery {
    /// Query `function` on `address` with no arguments
    pub fn new(address: Address, function: impl Into<String>) -> Self {
        Self {
            address,
            function: function.into(),
            args: Vec::new(),
            caller: None,
            value: None,
        }
    }

    /// Set encoded arguments
    pub fn with_args(mut self, args: Vec<Vec<u8>>) -> Self {
        self.args = args;
        self
    }

    /// Set the caller
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }
}

/// Runs contract queries and returns the raw result buffers
pub trait QueryProvider: Send + Sync {
    /// Execute `query`; `null` results come back as empty buffers
    fn query(
        &self,
        query: &ContractQuery,
    ) -> impl Future<Output = InteractionResult<Vec<Vec<u8>>>> + Send;
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VmQueryRequest {
    sc_address: String,
    func_name: String,
    args: Vec<String>,
    caller: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VmQueryEnvelope {
    #[serde(default)]
    data: Option<VmQueryData>,
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct VmQueryData {
    data: VmOutput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmOutput {
    #[serde(default)]
    return_data: Option<Vec<Option<String>>>,
    #[serde(default)]
    return_code: String,
    #[serde(default)]
    return_message: String,
}

const SUCCESS_CODE: &str = "successful";
const RETURN_OK: &str = "ok";

/// Query provider backed by the network gateway
#[derive(Debug, Clone)]
pub struct GatewayProvider {
    http: Client,
    gateway: String,
    timeout: Duration,
}

impl GatewayProvider {
    /// Provider for `config.gateway_url` with the configured timeout
    pub fn new(config: &ClientConfig) -> InteractionResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            gateway: config.gateway_base().to_string(),
            timeout: config.timeout,
        })
    }

    async fn post(&self, body: &VmQueryRequest) -> InteractionResult<(u16, String)> {
        let url = format!("{}/vm-values/query", self.gateway);
        let request = async {
            let response = self.http.post(&url).json(body).send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };
        Ok(tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| InteractionError::timeout(duration_ms(self.timeout)))??)
    }
}

impl QueryProvider for GatewayProvider {
    #[instrument(
        skip(self, query),
        fields(
            request_id = %Uuid::new_v4(),
            contract = %query.address,
            function = %query.function,
        )
    )]
    async fn query(&self, query: &ContractQuery) -> InteractionResult<Vec<Vec<u8>>> {
        let body = VmQueryRequest {
            sc_address: query.address.to_bech32(),
            func_name: query.function.clone(),
            args: query.args.iter().map(|a| hex_arg(a)).collect(),
            caller: query.caller.map(|c| c.to_bech32()),
            value: query.value.map(|v| v.to_string()),
        };
        debug!(args = body.args.len(), "Querying contract");

        let (status, text) = self.post(&body).await.inspect_err(|e| {
            error!(error = %e, "Contract query request failed");
        })?;

        let envelope: Option<VmQueryEnvelope> = serde_json::from_str(&text).ok();
        let Some(envelope) = envelope else {
            warn!(status, "Gateway returned a non-JSON body");
            return Err(InteractionError::query(format!(
                "{}: gateway returned status {status}",
                query.function
            )));
        };

        if !(200..300).contains(&status) || envelope.code != SUCCESS_CODE {
            warn!(
                status,
                code = %envelope.code,
                error = %envelope.error,
                "Contract query rejected"
            );
            let reason = if envelope.error.is_empty() {
                format!("gateway returned status {status}")
            } else {
                envelope.error
            };
            return Err(InteractionError::query(format!(
                "{}: {reason}",
                query.function
            )));
        }

        let output = envelope
            .data
            .map(|d| d.data)
            .ok_or_else(|| InteractionError::query(format!("{}: empty response", query.function)))?;

        if output.return_code != RETURN_OK {
            warn!(
                return_code = %output.return_code,
                return_message = %output.return_message,
                "Contract query failed"
            );
            return Err(InteractionError::query(format!(
                "{}: {} ({})",
                query.function, output.return_message, output.return_code
            )));
        }

        output
            .return_data
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item {
                None => Ok(Vec::new()),
                Some(encoded) => STANDARD.decode(encoded).map_err(|e| {
                    InteractionError::query(format!("{}: invalid return data: {e}", query.function))
                }),
            })
            .collect()
    }
}
