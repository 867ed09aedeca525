//! Seam between the prediction service and a generative-model provider.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::credentials::ApiKey;

/// Message fragment the provider returns when the credential (or the entity
/// it grants access to) does not exist.
pub const CREDENTIAL_NOT_FOUND_MARKER: &str = "Requested entity was not found.";

/// One structured-output generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// JSON schema the reply must follow.
    pub response_schema: JsonValue,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("model API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed API envelope: {0}")]
    Envelope(String),
}

impl ModelError {
    /// Credential failures are recognised by message content.
    pub fn is_credential_failure(&self) -> bool {
        self.to_string().contains(CREDENTIAL_NOT_FOUND_MARKER)
    }
}

/// A generative-model backend.
///
/// Returns the raw reply text, or `None` when the provider answered without
/// any text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerateRequest,
    ) -> Result<Option<String>, ModelError>;
}
