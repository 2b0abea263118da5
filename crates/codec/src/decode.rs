//! Local payload decoding.
//!
//! Only the plaintext JSON encodings are decoded here. Ciphertext and
//! unknown encodings are never interpreted client-side; they come back as
//! [`DecodedValue::Raw`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hindsight_interchange::{DecodedValue, Payload};
use std::fmt;

/// Metadata key holding the base64-encoded encoding tag.
pub const ENCODING_KEY: &str = "encoding";

/// The versioned set of payload encodings the system knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Encoding {
    JsonPlain,
    JsonProtobuf,
    BinaryEncrypted,
    BinaryNull,
    Unknown(String),
}

impl Encoding {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "json/plain" => Encoding::JsonPlain,
            "json/protobuf" => Encoding::JsonProtobuf,
            "binary/encrypted" => Encoding::BinaryEncrypted,
            "binary/null" => Encoding::BinaryNull,
            other => Encoding::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Encoding::JsonPlain => "json/plain",
            Encoding::JsonProtobuf => "json/protobuf",
            Encoding::BinaryEncrypted => "binary/encrypted",
            Encoding::BinaryNull => "binary/null",
            Encoding::Unknown(tag) => tag,
        }
    }

    /// Both JSON encodings carry JSON-serialized data and share one
    /// extraction path.
    pub fn has_plaintext_decoder(&self) -> bool {
        matches!(self, Encoding::JsonPlain | Encoding::JsonProtobuf)
    }

    /// Read a payload's declared encoding. `None` when the metadata entry
    /// is missing or is not valid base64 / UTF-8.
    pub fn of(payload: &Payload) -> Option<Self> {
        let raw = payload.metadata_value(ENCODING_KEY)?;
        let bytes = BASE64.decode(raw).ok()?;
        let tag = String::from_utf8(bytes).ok()?;
        Some(Encoding::from_tag(&tag))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a single payload. Never fails: anything that cannot be safely
/// decoded is returned unchanged as [`DecodedValue::Raw`].
pub fn decode_payload(payload: &Payload) -> DecodedValue {
    try_decode(payload).unwrap_or_else(|| DecodedValue::Raw(payload.clone()))
}

fn try_decode(payload: &Payload) -> Option<DecodedValue> {
    let encoding = Encoding::of(payload)?;
    if !encoding.has_plaintext_decoder() {
        return None;
    }

    let data = payload.data.as_deref()?;
    let bytes = BASE64.decode(data).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    Some(DecodedValue::from_json_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(metadata: &[(&str, &str)], data: Option<&str>) -> Payload {
        Payload {
            metadata: metadata
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            data: data.map(|d| d.to_string()),
        }
    }

    const BASE64_DECODED: &str = "test@test.com";

    fn encrypted() -> Payload {
        payload(
            &[
                ("encoding", "YmluYXJ5L2VuY3J5cHRlZA=="),
                ("encryption-key-id", ""),
            ],
            Some("dlSjfJltMHoITwMRv4gqQZsf3yXLo5UVtroA7ZXM3Eeggnrkzc+h6+xhQm2TQ6z8rska0QtWu7Ye3AhYfGw+8mY6/5NN+La4TJmKOe5/EKfL2znMbIXBzXLaeK4MjjIrxo2gI1weYHBb"),
        )
    }

    #[test]
    fn encrypted_payload_is_returned_unchanged() {
        let p = encrypted();
        assert_eq!(decode_payload(&p), DecodedValue::Raw(p));
    }

    #[test]
    fn binary_null_without_data_is_returned_unchanged() {
        let p = payload(&[("encoding", "YmluYXJ5L251bGw=")], None);
        assert_eq!(decode_payload(&p), DecodedValue::Raw(p));
    }

    #[test]
    fn json_plain_is_decoded() {
        let p = payload(
            &[("encoding", "anNvbi9wbGFpbg=="), ("type", "S2V5d29yZA==")],
            Some("InRlc3RAdGVzdC5jb20i"),
        );
        assert_eq!(
            decode_payload(&p),
            DecodedValue::Text(BASE64_DECODED.to_string())
        );
    }

    #[test]
    fn json_protobuf_is_decoded() {
        let p = payload(
            &[("encoding", "anNvbi9wcm90b2J1Zg=="), ("type", "S2V5d29yZA==")],
            Some("InRlc3RAdGVzdC5jb20i"),
        );
        assert_eq!(
            decode_payload(&p),
            DecodedValue::Text(BASE64_DECODED.to_string())
        );
    }

    #[test]
    fn json_objects_decode_to_json() {
        // {"amount":3}
        let p = payload(&[("encoding", "anNvbi9wbGFpbg==")], Some("eyJhbW91bnQiOjN9"));
        assert_eq!(
            decode_payload(&p),
            DecodedValue::Json(serde_json::json!({"amount": 3}))
        );
    }

    #[test]
    fn json_plain_without_data_is_unchanged() {
        let p = payload(&[("encoding", "anNvbi9wbGFpbg==")], None);
        assert!(decode_payload(&p).is_raw());
    }

    #[test]
    fn malformed_inputs_fall_back_to_raw() {
        let bad_data = payload(&[("encoding", "anNvbi9wbGFpbg==")], Some("not base64!"));
        assert!(decode_payload(&bad_data).is_raw());

        // "not json" is valid base64 but not JSON
        let not_json = payload(&[("encoding", "anNvbi9wbGFpbg==")], Some("bm90IGpzb24="));
        assert!(decode_payload(&not_json).is_raw());

        let bad_encoding = payload(&[("encoding", "%%%")], Some("InRlc3Qi"));
        assert!(decode_payload(&bad_encoding).is_raw());

        let missing_encoding = payload(&[], Some("InRlc3Qi"));
        assert!(decode_payload(&missing_encoding).is_raw());
    }

    #[test]
    fn unknown_encoding_passes_through() {
        // "binary/plain"
        let p = payload(&[("encoding", "YmluYXJ5L3BsYWlu")], Some("InRlc3Qi"));
        assert_eq!(
            Encoding::of(&p),
            Some(Encoding::Unknown("binary/plain".to_string()))
        );
        assert_eq!(decode_payload(&p), DecodedValue::Raw(p));
    }

    #[test]
    fn encoding_tags_roundtrip() {
        for tag in ["json/plain", "json/protobuf", "binary/encrypted", "binary/null"] {
            assert_eq!(Encoding::from_tag(tag).as_str(), tag);
        }
        assert!(!Encoding::BinaryEncrypted.has_plaintext_decoder());
    }
}
