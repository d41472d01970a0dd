// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string wrapper used for credentials and identifiers in configuration
//!
//! An API key or user agent that is present must carry at least one
//! non-whitespace character. [`NonEmptyString`] enforces that at construction
//! and when deserializing configuration files, so the client never sends an
//! empty `X-Api-Key` header.
//!
//! ```rust
//! use api_client::NonEmptyString;
//!
//! let api_key = NonEmptyString::new("sk-1234567890").expect("valid key");
//! assert_eq!(api_key.as_str(), "sk-1234567890");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new("   \t\n  ").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string that contains at least one non-whitespace character
///
/// Uses `Box<str>` internally; the value is immutable after construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString` from any string-like input
    ///
    /// Leading and trailing whitespace is kept; whitespace-only input is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Credentials end up in this type; keep them out of debug output.
impl fmt::Debug for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NonEmptyString")
            .field(&format_args!("<{} chars>", self.0.len()))
            .finish()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new(" \t ").is_err());
        assert!(NonEmptyString::new(" key ").is_ok());
    }

    #[test]
    fn debug_hides_contents() {
        let key = NonEmptyString::new("secret-key").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("10 chars"));
    }

    #[test]
    fn deserialize_validates() {
        let parsed: Result<NonEmptyString, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
        let parsed: NonEmptyString = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed.as_str(), "abc");
    }
}
