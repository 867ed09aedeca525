use std::sync::Arc;

use tracing::{error, info, warn};

use plastcustom_inventory::{Client, StockRecord};

use crate::config::DEFAULT_MODEL;
use crate::credentials::CredentialPicker;
use crate::fallback::fallback;
use crate::model::{GenerateRequest, ModelClient};
use crate::prompt::{build_prompt, response_schema};
use crate::result::{AiError, PredictionResult};

/// Produces restock predictions through an external model.
///
/// Error policy:
/// - a rejected credential is returned as [`AiError::CredentialNotFound`];
/// - every other failure is logged and replaced by [`fallback`].
///
/// There is no retry for ordinary failures.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn ModelClient>,
    picker: Arc<dyn CredentialPicker>,
    model_name: String,
}

impl PredictionService {
    pub fn new(model: Arc<dyn ModelClient>, picker: Arc<dyn CredentialPicker>) -> Self {
        Self {
            model,
            picker,
            model_name: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Predict when `client` will run out of stock and what to reorder.
    ///
    /// `client` and `stock` are trusted to belong together. Issues exactly one
    /// model call when a credential is selected, none otherwise.
    #[tracing::instrument(skip_all, fields(client_id = %client.id_typed(), model = %self.model_name))]
    pub async fn analyze(
        &self,
        client: &Client,
        stock: &StockRecord,
    ) -> Result<PredictionResult, AiError> {
        match self.attempt(client, stock).await {
            Ok(result) => {
                info!(
                    days_remaining = result.days_remaining,
                    suggested_quantity = result.suggested_quantity,
                    "prediction ready"
                );
                Ok(result)
            }
            Err(err) if err.is_credential_failure() => {
                error!(error = %err, "model rejected the credential");
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, "prediction failed; returning fallback");
                Ok(fallback(client, stock))
            }
        }
    }

    /// [`Self::analyze`] wrapped in the credential-selection flow.
    ///
    /// Opens the picker first when nothing is selected. When the credential
    /// is rejected, reopens the picker and retries exactly once; a second
    /// rejection is returned to the caller.
    pub async fn analyze_with_reselection(
        &self,
        client: &Client,
        stock: &StockRecord,
    ) -> Result<PredictionResult, AiError> {
        if self.picker.selected().await.is_none() {
            if let Err(err) = self.picker.open_picker().await {
                warn!(error = %err, "no credential selected and picker unavailable");
            }
        }

        match self.analyze(client, stock).await {
            Err(err) if err.is_credential_failure() => {
                if let Err(pick_err) = self.picker.open_picker().await {
                    warn!(error = %pick_err, "credential reselection failed");
                    return Err(err);
                }
                info!("credential reselected; retrying prediction once");
                self.analyze(client, stock).await
            }
            other => other,
        }
    }

    async fn attempt(
        &self,
        client: &Client,
        stock: &StockRecord,
    ) -> Result<PredictionResult, AiError> {
        let api_key = self
            .picker
            .selected()
            .await
            .ok_or(AiError::MissingCredential)?;

        let request = GenerateRequest {
            model: self.model_name.clone(),
            prompt: build_prompt(client, stock),
            response_schema: response_schema(),
        };

        let text = self
            .model
            .generate(&api_key, &request)
            .await?
            .ok_or(AiError::EmptyResponse)?;

        PredictionResult::parse(&text)
    }
}
