// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! ABI-checked contract handle

use std::sync::Arc;

use shared_types::Chain;
use tracing::debug;

use crate::{
    abi::Abi,
    address::Address,
    codec::{decode_results, encode_args},
    error::{InteractionError, InteractionResult},
    provider::{ContractQuery, QueryProvider},
    transaction::{CallBuilder, Payment},
    types::TypedValue,
};

/// A deployed contract together with its interface
///
/// Every call and query is checked against the ABI before anything is
/// encoded: the endpoint must exist, the arguments must have the declared
/// types and the payment must be accepted.
#[derive(Debug, Clone)]
pub struct SmartContract {
    address: Address,
    abi: Arc<Abi>,
    chain_id: String,
}

impl SmartContract {
    #[allow(missing_docs)]
    pub fn new(address: Address, abi: Arc<Abi>, chain: Chain) -> Self {
        Self {
            address,
            abi,
            chain_id: chain.chain_id().to_string(),
        }
    }

    /// Contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Contract interface
    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    /// Chain identifier written into drafts
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Start a call to `endpoint`
    pub fn call(
        &self,
        endpoint: &str,
        args: &[TypedValue],
        payment: Payment,
        gas_limit: u64,
    ) -> InteractionResult<CallBuilder> {
        let abi_endpoint = self.abi.endpoint(endpoint)?;
        abi_endpoint.check_args(&self.abi, args)?;
        abi_endpoint.check_payment(&payment)?;

        Ok(CallBuilder::new(self.address, endpoint, self.chain_id.as_str())
            .args(args)?
            .payment(payment)
            .gas_limit(gas_limit))
    }

    /// Run the view function `endpoint` and decode its outputs
    pub async fn query<P: QueryProvider>(
        &self,
        provider: &P,
        endpoint: &str,
        args: &[TypedValue],
    ) -> InteractionResult<Vec<TypedValue>> {
        let abi_endpoint = self.abi.endpoint(endpoint)?;
        abi_endpoint.check_args(&self.abi, args)?;
        let outputs = abi_endpoint.output_types()?;

        let query = ContractQuery::new(self.address, endpoint).with_args(encode_args(args)?);
        let results = provider.query(&query).await?;
        debug!(endpoint, results = results.len(), "Decoding query results");

        decode_results(&results, &outputs, &self.abi)
    }

    /// Like [`Self::query`] for views returning a single value
    pub async fn query_single<P: QueryProvider>(
        &self,
        provider: &P,
        endpoint: &str,
        args: &[TypedValue],
    ) -> InteractionResult<TypedValue> {
        self.query(provider, endpoint, args)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                InteractionError::abi(format!("{endpoint} declares no outputs"))
            })
    }
}
