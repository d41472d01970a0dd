// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for contract interactions
//!
//! Input problems (unknown endpoint, wrong argument count, unsupported
//! marketplace) are raised before any network call. Query and transport
//! failures are logged by the provider and then returned unchanged.

use thiserror::Error;

/// Result type alias for interaction operations
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Errors raised while building transactions or querying contracts
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum InteractionError {
    /// Input rejected before any call was built
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Option recognised but not supported
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// Interface description missing, malformed or not matching the call
    #[error("ABI error: {message}")]
    Abi { message: String },

    /// Value could not be encoded or decoded
    #[error("Codec error: {message}")]
    Codec { message: String },

    /// Address could not be decoded or encoded
    #[error("Invalid address: {message}")]
    Address { message: String },

    /// Contract query returned an error
    #[error("Query failed: {message}")]
    Query { message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Request timeout
    #[error("Request timeout after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// JSON serialization or deserialization error
    #[error("JSON error: {message}")]
    Json { message: String },

    /// I/O error (file operations)
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl InteractionError {
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

    /// Create an ABI error
    pub fn abi<T: ToString>(message: T) -> Self {
        Self::Abi {
            message: message.to_string(),
        }
    }

    /// Create a codec error
    pub fn codec<T: ToString>(message: T) -> Self {
        Self::Codec {
            message: message.to_string(),
        }
    }

    /// Create an address error
    pub fn address<T: ToString>(message: T) -> Self {
        Self::Address {
            message: message.to_string(),
        }
    }

    /// Create a query error
    pub fn query<T: ToString>(message: T) -> Self {
        Self::Query {
            message: message.to_string(),
        }
    }

    /// Create an HTTP error
    pub fn http<T: ToString>(message: T) -> Self {
        Self::Http {
            message: message.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Create a JSON error
    pub fn json<T: ToString>(message: T) -> Self {
        Self::Json {
            message: message.to_string(),
        }
    }

    /// Create an I/O error
    pub fn io<T: ToString>(message: T) -> Self {
        Self::Io {
            message: message.to_string(),
        }
    }

    /// Check if this error was raised before any network call
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Unsupported { .. } | Self::Address { .. }
        )
    }
}

impl From<reqwest::Error> for InteractionError {
    fn from(error: reqwest::Error) -> Self {
        Self::http(error)
    }
}

impl From<serde_json::Error> for InteractionError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error)
    }
}

impl From<std::io::Error> for InteractionError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error)
    }
}

impl From<shared_types::IdentifierError> for InteractionError {
    fn from(error: shared_types::IdentifierError) -> Self {
        Self::validation(error)
    }
}
