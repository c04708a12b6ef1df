//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::Scalar;
use crate::error::Result;

/// Request body for creating an entry (POST /cache/)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    /// The cache key
    pub key: Scalar,
    /// The value to store
    pub value: Scalar,
}

/// Request body for updating an entry (PUT /cache/{key})
///
/// The path addresses the entry; `key` is optional and only used to keep
/// its typed form when it matches the path.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    /// Optional typed key
    #[serde(default)]
    pub key: Option<Scalar>,
    /// The value to store
    pub value: Scalar,
}

/// Decodes a JSON request body.
///
/// Bodies are parsed from raw bytes so that clients which omit the
/// `Content-Type` header are still served.
pub fn parse_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_create_request_deserialize() {
        let req: CreateRequest = parse_body(br#"{"key": 100, "value": "dolla billllllllz!"}"#).unwrap();
        assert_eq!(req.key, Scalar::Integer(100));
        assert_eq!(req.value, Scalar::from("dolla billllllllz!"));
    }

    #[test]
    fn test_create_request_missing_value() {
        let result = parse_body::<CreateRequest>(br#"{"key": "foo"}"#);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_create_request_rejects_null_key() {
        let result = parse_body::<CreateRequest>(br#"{"key": null, "value": 1}"#);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_update_request_key_optional() {
        let req: UpdateRequest = parse_body(br#"{"value": 101}"#).unwrap();
        assert!(req.key.is_none());
        assert_eq!(req.value, Scalar::Integer(101));

        let req: UpdateRequest = parse_body(br#"{"key": 99, "value": 101}"#).unwrap();
        assert_eq!(req.key, Some(Scalar::Integer(99)));
    }

    #[test]
    fn test_parse_body_malformed_json() {
        let result = parse_body::<UpdateRequest>(br#"{"invalid json"#);
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }
}
