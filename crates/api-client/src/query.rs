// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Filter encodings used by listing endpoints
//!
//! Some endpoints take the filter as a JSON string in a `filter` query
//! parameter, others as base64-encoded JSON in a path segment.

use base64::{Engine, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ApiError, ApiResult};

/// Characters escaped in query components: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one query key or value, spaces as `%20`
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `key=value` pairs joined with `&`, each side percent-encoded
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Serialize a filter to compact JSON
pub fn encode_json<T: Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(ApiError::encoding)
}

/// Serialize a filter to JSON, then encode it with standard base64
pub fn encode_base64_json<T: Serialize>(value: &T) -> ApiResult<String> {
    Ok(STANDARD.encode(encode_json(value)?))
}

/// Inverse of [`encode_base64_json`]
pub fn decode_base64_json<T: DeserializeOwned>(encoded: &str) -> ApiResult<T> {
    let bytes = STANDARD.decode(encoded).map_err(ApiError::encoding)?;
    serde_json::from_slice(&bytes).map_err(ApiError::encoding)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn base64_json_matches_standard_alphabet() {
        let filter = json!({ "top": 1 });
        // {"top":1}
        assert_eq!(encode_base64_json(&filter).unwrap(), "eyJ0b3AiOjF9");
    }

    #[test]
    fn decode_restores_filter() {
        let filter = json!({ "filters": { "collection": ["ABC-123456"] }, "skip": 0 });
        let encoded = encode_base64_json(&filter).unwrap();
        let decoded: Value = decode_base64_json(&encoded).unwrap();
        assert_eq!(decoded, filter);
    }

    #[test]
    fn query_components_keep_unreserved_marks() {
        assert_eq!(encode_component("a b+c"), "a%20b%2Bc");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("ü/?&="), "%C3%BC%2F%3F%26%3D");

        let filter = encode_json(&json!({ "name": "Bad Apes" })).unwrap();
        let query = encode_query(&[
            ("filter".to_string(), filter),
            ("top".to_string(), "25".to_string()),
        ]);
        assert_eq!(
            query,
            "filter=%7B%22name%22%3A%22Bad%20Apes%22%7D&top=25"
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        let result: ApiResult<Value> = decode_base64_json("!!!");
        assert!(matches!(result, Err(ApiError::Encoding { .. })));
    }
}
