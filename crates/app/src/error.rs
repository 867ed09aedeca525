use thiserror::Error;

use plastcustom_ai::AiError;
use plastcustom_core::DomainError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Only credential failures reach this point; the UI should ask the user
    /// to pick another credential.
    #[error("prediction unavailable: {0}")]
    Prediction(#[from] AiError),
}

impl DashboardError {
    pub fn needs_credential(&self) -> bool {
        matches!(self, DashboardError::Prediction(e) if e.is_credential_failure())
    }
}
