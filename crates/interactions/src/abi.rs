// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Contract interface descriptions (ABI)
//!
//! Only the parts needed to build calls and decode query results are
//! modelled: endpoints with their inputs, outputs and accepted payments,
//! and the struct and enum definitions referenced by them.

use std::{collections::HashMap, path::Path, time::Duration};

use api_client::ClientConfig;
use reqwest::Client;
use serde::Deserialize;
use shared_types::ContractCategory;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{InteractionError, InteractionResult},
    transaction::Payment,
    types::{TypeExpr, TypedValue},
};

/// Parsed contract ABI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Abi {
    /// Contract name
    #[serde(default)]
    pub name: String,
    /// Callable endpoints
    #[serde(default)]
    pub endpoints: Vec<AbiEndpoint>,
    /// Custom types referenced by endpoints
    #[serde(default)]
    pub types: HashMap<String, AbiTypeDef>,
}

/// Whether an endpoint changes state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// View function, only callable through queries
    Readonly,
    /// State-changing endpoint
    #[default]
    Mutable,
}

/// One contract endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEndpoint {
    /// Function name used in call data
    pub name: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub mutability: Mutability,
    /// Accepted payment tokens, `*` for any
    #[serde(default)]
    pub payable_in_tokens: Vec<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
}

/// Endpoint input or output
#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    /// Parameter name, absent for most outputs
    #[serde(default)]
    pub name: String,
    /// ABI type string
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Custom type definition
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum AbiTypeDef {
    Struct {
        #[serde(default)]
        fields: Vec<AbiField>,
    },
    Enum {
        #[serde(default)]
        variants: Vec<AbiVariant>,
    },
}

/// Struct field or enum variant field
#[derive(Debug, Clone, Deserialize)]
pub struct AbiField {
    #[allow(missing_docs)]
    pub name: String,
    /// ABI type string
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Enum variant
#[derive(Debug, Clone, Deserialize)]
pub struct AbiVariant {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub discriminant: u8,
    #[allow(missing_docs)]
    #[serde(default)]
    pub fields: Vec<AbiField>,
}

impl Abi {
    /// Parse an ABI document
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        serde_json::from_str(json).map_err(|e| InteractionError::abi(format!("invalid ABI: {e}")))
    }

    /// Read and parse an ABI file
    pub async fn from_file(path: impl AsRef<Path>) -> InteractionResult<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    /// Look up an endpoint by name
    pub fn endpoint(&self, name: &str) -> InteractionResult<&AbiEndpoint> {
        self.endpoints
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| {
                InteractionError::abi(format!("endpoint {name} not found in {}", self.name))
            })
    }

    /// Look up a custom type definition
    pub fn type_def(&self, name: &str) -> Option<&AbiTypeDef> {
        self.types.get(name)
    }

    /// Check that `value` has type `ty`, resolving struct and enum names
    /// through this ABI
    pub fn check_value(&self, ty: &TypeExpr, value: &TypedValue) -> InteractionResult<()> {
        self.check_at(ty, value, "value")
    }

    fn check_at(&self, ty: &TypeExpr, value: &TypedValue, path: &str) -> InteractionResult<()> {
        let mismatch = || {
            InteractionError::validation(format!(
                "{path}: expected {ty}, found {}",
                value.kind()
            ))
        };
        let in_range = |fits: bool| {
            if fits {
                Ok(())
            } else {
                Err(InteractionError::validation(format!(
                    "{path}: value out of range for {ty}"
                )))
            }
        };

        match (ty, value) {
            (TypeExpr::U8, TypedValue::U8(_))
            | (TypeExpr::U16, TypedValue::U16(_))
            | (TypeExpr::U32, TypedValue::U32(_))
            | (TypeExpr::U64, TypedValue::U64(_))
            | (TypeExpr::I8, TypedValue::I8(_))
            | (TypeExpr::I16, TypedValue::I16(_))
            | (TypeExpr::I32, TypedValue::I32(_))
            | (TypeExpr::I64, TypedValue::I64(_))
            | (TypeExpr::BigInt, TypedValue::BigInt(_))
            | (TypeExpr::BigUint, TypedValue::BigUint(_))
            | (TypeExpr::Bool, TypedValue::Bool(_))
            | (TypeExpr::Address, TypedValue::Address(_))
            | (TypeExpr::TokenIdentifier, TypedValue::TokenIdentifier(_))
            | (
                TypeExpr::EgldOrEsdtTokenIdentifier,
                TypedValue::EgldOrEsdt(_) | TypedValue::TokenIdentifier(_),
            )
            | (TypeExpr::Bytes, TypedValue::Bytes(_))
            | (TypeExpr::Option(_), TypedValue::Option(None)) => Ok(()),
            (TypeExpr::Option(inner), TypedValue::Option(Some(v))) => {
                self.check_at(inner, v, path)
            }
            (TypeExpr::List(inner), TypedValue::List(items))
            | (TypeExpr::Variadic(inner), TypedValue::Variadic(items)) => self.check_items(
                items.iter().map(|item| (&**inner, item)),
                path,
            ),
            (TypeExpr::Array(len, inner), TypedValue::FixedBytes(bytes))
                if **inner == TypeExpr::U8 =>
            {
                in_range(bytes.len() == *len)
            }
            (TypeExpr::Array(len, inner), TypedValue::Tuple(items)) => {
                in_range(items.len() == *len)?;
                self.check_items(items.iter().map(|item| (&**inner, item)), path)
            }
            (TypeExpr::Tuple(types), TypedValue::Tuple(items))
            | (TypeExpr::Multi(types), TypedValue::Multi(items)) => {
                if types.len() != items.len() {
                    return Err(InteractionError::validation(format!(
                        "{path}: expected {} items for {ty}, found {}",
                        types.len(),
                        items.len()
                    )));
                }
                self.check_items(types.iter().zip(items), path)
            }
            (TypeExpr::Optional(_), TypedValue::OptionalArg(None)) => Ok(()),
            (TypeExpr::Optional(inner), TypedValue::OptionalArg(Some(v))) => {
                self.check_at(inner, v, path)
            }
            (TypeExpr::Named(name), TypedValue::Struct { fields, .. }) => {
                match self.type_def(name) {
                    Some(AbiTypeDef::Struct { fields: declared }) => {
                        self.check_fields(name, declared, fields, path)
                    }
                    Some(AbiTypeDef::Enum { .. }) => Err(mismatch()),
                    None => Err(undefined(name, &self.name)),
                }
            }
            (
                TypeExpr::Named(name),
                TypedValue::Enum {
                    discriminant,
                    fields,
                    ..
                },
            ) => match self.type_def(name) {
                Some(AbiTypeDef::Enum { variants }) => {
                    let variant = variants
                        .iter()
                        .find(|v| v.discriminant == *discriminant)
                        .ok_or_else(|| {
                            InteractionError::validation(format!(
                                "{path}: {name} has no variant with discriminant {discriminant}"
                            ))
                        })?;
                    self.check_fields(name, &variant.fields, fields, path)
                }
                Some(AbiTypeDef::Struct { .. }) => Err(mismatch()),
                None => Err(undefined(name, &self.name)),
            },
            _ => Err(mismatch()),
        }
    }

    fn check_items<'v>(
        &self,
        pairs: impl Iterator<Item = (&'v TypeExpr, &'v TypedValue)>,
        path: &str,
    ) -> InteractionResult<()> {
        for (index, (ty, item)) in pairs.enumerate() {
            self.check_at(ty, item, &format!("{path}[{index}]"))?;
        }
        Ok(())
    }

    fn check_fields(
        &self,
        type_name: &str,
        declared: &[AbiField],
        fields: &[(String, TypedValue)],
        path: &str,
    ) -> InteractionResult<()> {
        if declared.len() != fields.len() {
            return Err(InteractionError::validation(format!(
                "{path}: {type_name} has {} fields, found {}",
                declared.len(),
                fields.len()
            )));
        }
        for (field, (name, value)) in declared.iter().zip(fields) {
            if field.name != *name {
                return Err(InteractionError::validation(format!(
                    "{path}: expected field {} of {type_name}, found {name}",
                    field.name
                )));
            }
            let ty = TypeExpr::parse(&field.type_name)?;
            self.check_at(&ty, value, &format!("{path}.{name}"))?;
        }
        Ok(())
    }
}

fn undefined(name: &str, abi: &str) -> InteractionError {
    InteractionError::abi(format!("type {name} is not defined in {abi}"))
}

impl AbiEndpoint {
    /// Parsed input types
    pub fn input_types(&self) -> InteractionResult<Vec<TypeExpr>> {
        self.inputs
            .iter()
            .map(|p| TypeExpr::parse(&p.type_name))
            .collect()
    }

    /// Parsed output types
    pub fn output_types(&self) -> InteractionResult<Vec<TypeExpr>> {
        self.outputs
            .iter()
            .map(|p| TypeExpr::parse(&p.type_name))
            .collect()
    }

    /// Whether the endpoint accepts any payment
    pub fn is_payable(&self) -> bool {
        !self.payable_in_tokens.is_empty()
    }

    /// Whether `token` is accepted as payment
    pub fn accepts(&self, token: &str) -> bool {
        self.payable_in_tokens
            .iter()
            .any(|accepted| accepted == "*" || accepted == token)
    }

    /// Check that `args` line up with the declared inputs
    ///
    /// Trailing `variadic` and `optional` inputs may be left out; every other
    /// input must be present. A trailing variadic input takes either one
    /// `Variadic` value or its items as separate arguments. Every argument
    /// must have the declared type.
    pub fn check_args(&self, abi: &Abi, args: &[TypedValue]) -> InteractionResult<()> {
        let types = self.input_types()?;
        let required = types.iter().filter(|t| !t.is_multi_arg()).count();
        let has_variadic = types.iter().any(|t| matches!(t, TypeExpr::Variadic(_)));

        let too_few = args.len() < required;
        let too_many = !has_variadic && args.len() > types.len();
        if too_few || too_many {
            return Err(InteractionError::validation(format!(
                "{} expects {} arguments, got {}",
                self.name,
                if has_variadic || required != types.len() {
                    format!("{required} to {}", types.len())
                } else {
                    required.to_string()
                },
                args.len()
            )));
        }

        let mut remaining = args.iter();
        for (param, ty) in self.inputs.iter().zip(&types) {
            let path = format!("{} argument {}", self.name, param.name);
            match ty {
                TypeExpr::Variadic(inner) => {
                    for (index, arg) in remaining.by_ref().enumerate() {
                        match arg {
                            TypedValue::Variadic(_) => abi.check_at(ty, arg, &path)?,
                            item => abi.check_at(inner, item, &format!("{path}[{index}]"))?,
                        }
                    }
                }
                TypeExpr::Optional(inner) => match remaining.next() {
                    None => {}
                    Some(arg @ TypedValue::OptionalArg(_)) => abi.check_at(ty, arg, &path)?,
                    Some(arg) => abi.check_at(inner, arg, &path)?,
                },
                _ => {
                    if let Some(arg) = remaining.next() {
                        abi.check_at(ty, arg, &path)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Check that `payment` is acceptable for this endpoint
    pub fn check_payment(&self, payment: &Payment) -> InteractionResult<()> {
        let tokens = payment.token_identifiers();
        if tokens.is_empty() {
            return Ok(());
        }
        if !self.is_payable() {
            return Err(InteractionError::validation(format!(
                "{} does not accept payments",
                self.name
            )));
        }
        if let Some(rejected) = tokens.iter().find(|t| !self.accepts(t)) {
            return Err(InteractionError::validation(format!(
                "{} does not accept {rejected}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Fetches ABI documents from the configured ABI base URL
#[derive(Debug, Clone)]
pub struct AbiLoader {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl AbiLoader {
    /// Create a loader for `config.abi_base_url`
    pub fn new(config: &ClientConfig) -> InteractionResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            http,
            base_url: config.abi_base().to_string(),
            timeout: config.timeout,
        })
    }

    /// URL of the ABI document for `category`
    pub fn url_for(&self, category: ContractCategory) -> String {
        format!("{}/{}", self.base_url, category.abi_file_name())
    }

    /// Download and parse the ABI for `category`
    #[instrument(skip(self), fields(category = %category))]
    pub async fn fetch(&self, category: ContractCategory) -> InteractionResult<Abi> {
        let url = self.url_for(category);
        debug!(url = %url, "Fetching contract ABI");

        let request = async {
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| InteractionError::timeout(duration_ms(self.timeout)))??;

        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "ABI request failed");
            return Err(InteractionError::http(format!(
                "GET {url} returned {status}"
            )));
        }

        let abi = Abi::from_json(&body)?;
        info!(
            name = %abi.name,
            endpoints = abi.endpoints.len(),
            "Loaded contract ABI"
        );
        Ok(abi)
    }
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
