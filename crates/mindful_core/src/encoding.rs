//! Serde adapters for binary payloads.
//!
//! Binary media is persisted as standard base64 strings so the JSON store
//! stays human-inspectable.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serializer};

/// Encode bytes as a base64 string.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a base64 string into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}

/// `#[serde(with = "base64_bytes")]` for `Vec<u8>` fields.
pub mod base64_bytes {
    use super::*;

    /// Serialize bytes as a base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(data))
    }

    /// Deserialize bytes from a base64 string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(serde::de::Error::custom)
    }
}
