//! HTTP data converter: posts payloads to a remote codec endpoint.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` to avoid
//! blocking the async runtime. Requests go to `{endpoint}/decode` with a
//! `{"payloads": [...]}` body.

use super::{decode_response, ConverterConfig, ConverterError, DataConverter};
use async_trait::async_trait;
use hindsight_interchange::{DecodedValue, Payload};
use std::time::Duration;

/// Converter backed by a remote codec server.
///
/// - `auth_token` from config, sent as `Authorization: Bearer <token>`
/// - every request is bounded by the configured timeout
pub struct HttpConverter {
    endpoint: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpConverter {
    pub fn new(endpoint: &str, config: &ConverterConfig) -> Self {
        HttpConverter {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn decode_url(&self) -> String {
        format!("{}/decode", self.endpoint)
    }
}

#[async_trait]
impl DataConverter for HttpConverter {
    async fn decode(&self, payloads: &[Payload]) -> Result<Vec<DecodedValue>, ConverterError> {
        let url = self.decode_url();
        let body = serde_json::json!({
            "payloads": payloads.iter().map(Payload::to_json).collect::<Vec<_>>(),
        });
        let auth_token = self.auth_token.clone();
        let timeout = self.timeout;

        tracing::debug!(url = %url, count = payloads.len(), "requesting remote payload decode");

        let response = tokio::task::spawn_blocking(move || {
            let config = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build();
            let agent = ureq::Agent::new_with_config(config);
            let mut request = agent.post(&url);

            if let Some(ref token) = auth_token {
                request = request.header("Authorization", &format!("Bearer {}", token));
            }

            let response = request
                .send_json(&body)
                .map_err(|e| ConverterError::RequestFailed {
                    endpoint: url.clone(),
                    message: e.to_string(),
                })?;

            response
                .into_body()
                .read_json::<serde_json::Value>()
                .map_err(|e| ConverterError::InvalidResponse {
                    message: format!("failed to parse response as JSON: {}", e),
                })
        })
        .await
        .map_err(|e| ConverterError::TaskFailed {
            message: format!("task join error: {}", e),
        })??;

        decode_response(&response, payloads.len())
    }

    fn converter_id(&self) -> &str {
        "http"
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
