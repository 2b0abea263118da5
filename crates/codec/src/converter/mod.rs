//! Remote data-converter abstraction.
//!
//! A [`DataConverter`] decodes a batch of payloads server-side (for example
//! ciphertext the browser-side codec must not touch). [`ConverterConfig`]
//! carries the endpoint and credentials; when no endpoint is configured
//! there is no converter and only local decoding applies.

pub mod http;

use crate::decode::decode_payload;
use async_trait::async_trait;
use hindsight_interchange::{DecodedValue, Payload};
use serde::Deserialize;
use std::fmt;

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV: &str = "HINDSIGHT_DATA_CONVERTER_ENDPOINT";
/// Environment variable overriding the configured auth token.
pub const AUTH_TOKEN_ENV: &str = "HINDSIGHT_DATA_CONVERTER_AUTH_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ──────────────────────────────────────────────
// ConverterError
// ──────────────────────────────────────────────

/// Errors that can occur when a remote converter decodes payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterError {
    /// The request could not be completed (network error, non-2xx status).
    RequestFailed { endpoint: String, message: String },
    /// The response did not match the expected schema.
    InvalidResponse { message: String },
    /// The blocking request task could not be joined.
    TaskFailed { message: String },
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterError::RequestFailed { endpoint, message } => {
                write!(f, "request to '{}' failed: {}", endpoint, message)
            }
            ConverterError::InvalidResponse { message } => {
                write!(f, "invalid data converter response: {}", message)
            }
            ConverterError::TaskFailed { message } => {
                write!(f, "data converter task failed: {}", message)
            }
        }
    }
}

impl std::error::Error for ConverterError {}

// ──────────────────────────────────────────────
// ConverterConfig
// ──────────────────────────────────────────────

/// Remote data-converter settings, usually read from the
/// `[data_converter]` table of `hindsight.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            endpoint: None,
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConverterConfig {
    /// Apply `HINDSIGHT_DATA_CONVERTER_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(AUTH_TOKEN_ENV).ok(),
        )
    }

    /// Replace endpoint and token with the given values when present.
    pub fn with_overrides(mut self, endpoint: Option<String>, auth_token: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = auth_token {
            self.auth_token = Some(token);
        }
        self
    }

    /// The configured endpoint, ignoring blank values.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Build the HTTP converter, or `None` when no endpoint is set.
    pub fn build_converter(&self) -> Option<http::HttpConverter> {
        self.endpoint()
            .map(|endpoint| http::HttpConverter::new(endpoint, self))
    }
}

// ──────────────────────────────────────────────
// DataConverter trait
// ──────────────────────────────────────────────

/// Decodes a batch of payloads remotely.
///
/// Implementations must return exactly one value per input payload, in
/// order.
#[async_trait]
pub trait DataConverter: Send + Sync {
    async fn decode(&self, payloads: &[Payload]) -> Result<Vec<DecodedValue>, ConverterError>;

    /// Returns this converter's identifier (e.g. "http").
    fn converter_id(&self) -> &str;
}

/// Interpret a `{"payloads": [...]}` converter response.
///
/// Payload-shaped entries go through the local codec (converters answer
/// with `json/plain` payloads); any other entry is taken as decoded JSON.
pub fn decode_response(
    response: &serde_json::Value,
    expected: usize,
) -> Result<Vec<DecodedValue>, ConverterError> {
    let entries = response
        .get("payloads")
        .and_then(|p| p.as_array())
        .ok_or_else(|| ConverterError::InvalidResponse {
            message: "missing 'payloads' array".to_string(),
        })?;

    if entries.len() != expected {
        return Err(ConverterError::InvalidResponse {
            message: format!(
                "expected {} payloads, received {}",
                expected,
                entries.len()
            ),
        });
    }

    Ok(entries
        .iter()
        .map(|entry| match Payload::from_json(entry) {
            Some(payload) => decode_payload(&payload),
            None => DecodedValue::from_json_value(entry.clone()),
        })
        .collect())
}
