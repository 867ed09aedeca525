use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ModelError;

/// Restock prediction for one client.
///
/// Every field is mandatory. Serialized names match the response schema sent
/// to the model (see [`crate::prompt::response_schema`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated days until the stock reaches zero.
    #[serde(rename = "diasRestantes")]
    pub days_remaining: u32,

    /// Suggested reorder date. Display text only (e.g. "DD/MM"); not parsed.
    #[serde(rename = "dataPrevisaoRecompra")]
    pub reorder_date: String,

    /// Suggested number of bales for the next batch (always > 0).
    #[serde(rename = "quantidadeSugerida")]
    pub suggested_quantity: u32,

    #[serde(rename = "analiseConsumo")]
    pub analysis: String,

    /// Ready-to-send outreach message for the client.
    #[serde(rename = "mensagemWhatsApp")]
    pub message: String,
}

impl PredictionResult {
    /// Parse and validate a model reply.
    ///
    /// Fails on an empty body, invalid JSON, a missing or mistyped field, a
    /// zero quantity, or a blank text field.
    pub fn parse(text: &str) -> Result<Self, AiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        let result: PredictionResult =
            serde_json::from_str(text).map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    fn validate(&self) -> Result<(), AiError> {
        if self.suggested_quantity == 0 {
            return Err(AiError::InvalidResponse(
                "quantidadeSugerida must be positive".to_string(),
            ));
        }
        for (field, value) in [
            ("dataPrevisaoRecompra", &self.reorder_date),
            ("analiseConsumo", &self.analysis),
            ("mensagemWhatsApp", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(AiError::InvalidResponse(format!("{field} is blank")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    /// The credential was rejected by the model provider. Callers should
    /// prompt for a new credential.
    #[error("credential not found: {0}")]
    CredentialNotFound(String),

    /// The credential picker could not produce a selection.
    #[error("credential selection failed: {0}")]
    CredentialSelection(String),

    #[error("no credential selected")]
    MissingCredential,

    #[error("model call failed: {0}")]
    Model(ModelError),

    #[error("empty response from model")]
    EmptyResponse,

    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    /// Whether this error must be surfaced instead of replaced by a fallback.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, AiError::CredentialNotFound(_))
    }
}

impl From<ModelError> for AiError {
    fn from(err: ModelError) -> Self {
        if err.is_credential_failure() {
            AiError::CredentialNotFound(err.to_string())
        } else {
            AiError::Model(err)
        }
    }
}
