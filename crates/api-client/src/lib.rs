// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! REST client and request conventions for the marketplace API
//!
//! This crate provides the pieces every marketplace façade builds on.
//!
//! # Core Abstractions
//!
//! - **[`ClientConfig`]**: API URL, key, network and contract address table, passed explicitly
//! - **[`ApiClient`]**: a single timeout-bounded fetch primitive over `reqwest`
//! - **[`pagination`]**: `top`/`skip` paging, ceilings and the next-page payload
//! - **[`query`]**: base64 and JSON filter encodings used by listing endpoints
//! - **[`ApiError`]**: validation, unsupported-option and transport failures
//!
//! There is no retry and no response caching: every call issues exactly one
//! request and surfaces the first failure to the caller.

use thiserror::Error;

pub mod client;
pub mod config;
pub mod non_empty_string;
pub mod pagination;
pub mod query;

pub use client::{ApiClient, FetchOptions};
pub use config::ClientConfig;
pub use non_empty_string::NonEmptyString;
pub use pagination::{MAX_TOP_EXTENDED, MAX_TOP_STANDARD, Page, Paginated, Paging, RawPage};
pub use query::{
    decode_base64_json, encode_base64_json, encode_component, encode_json, encode_query,
};

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the marketplace API client and façades
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Input rejected before any request was made
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Option recognised but not supported by this SDK
    #[error("Unsupported option: {message}")]
    Unsupported { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Request payload could not be encoded
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// Request failed; carries the path and options for context
    #[error("Error fetching {path} with options {options}: {source}")]
    Request {
        path: String,
        options: String,
        #[source]
        source: TransportError,
    },
}

/// Failures of a single HTTP exchange
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    /// Request aborted because the timeout elapsed
    #[error("Request aborted after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Request aborted by the caller's cancellation token
    #[error("Request cancelled")]
    Cancelled,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body could not be parsed
    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a validation error
    pub fn validation<T: ToString>(message: T) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create an unsupported-option error
    pub fn unsupported<T: ToString>(message: T) -> Self {
        Self::Unsupported {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create an encoding error
    pub fn encoding<T: ToString>(message: T) -> Self {
        Self::Encoding {
            message: message.to_string(),
        }
    }

    /// Check if this error was raised before any network I/O
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the request was aborted by its timeout
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Request {
                source: TransportError::Timeout { .. },
                ..
            }
        )
    }

    /// HTTP status returned by the server, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request {
                source: TransportError::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

impl From<shared_types::IdentifierError> for ApiError {
    fn from(value: shared_types::IdentifierError) -> Self {
        Self::validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let error = ApiError::validation("Top cannot be greater than 25");
        assert_eq!(
            error.to_string(),
            "Validation error: Top cannot be greater than 25"
        );

        let error = ApiError::Request {
            path: "/nft/ABC-123456-01".to_string(),
            options: "GET".to_string(),
            source: TransportError::Status {
                status: 404,
                message: "NFT not found".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Error fetching /nft/ABC-123456-01 with options GET: API error: 404 - NFT not found"
        );
        assert_eq!(error.status(), Some(404));
        assert!(!error.is_timeout());
    }

    #[test]
    fn identifier_errors_become_validation_errors() {
        let error: ApiError = shared_types::IdentifierError::InvalidTicker("x".to_string()).into();
        assert!(error.is_validation());
    }

    #[test]
    fn timeout_classification() {
        let error = ApiError::Request {
            path: "/x".to_string(),
            options: "GET".to_string(),
            source: TransportError::Timeout { timeout_ms: 10 },
        };
        assert!(error.is_timeout());
        assert_eq!(error.status(), None);
    }
}
