//! Access credentials and the host-provided picker capability.

use async_trait::async_trait;

use crate::result::AiError;

/// API key for the model provider. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Host capability that owns credential selection.
///
/// The prediction service only asks for the current selection and, when the
/// provider rejects it, asks the host to open its picker again.
#[async_trait]
pub trait CredentialPicker: Send + Sync {
    /// The credential currently selected, if any.
    async fn selected(&self) -> Option<ApiKey>;

    /// Ask the host to let the user (re)select a credential.
    async fn open_picker(&self) -> Result<(), AiError>;
}

/// Fixed credential from configuration. There is no picker to open.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential {
    key: Option<ApiKey>,
}

impl StaticCredential {
    pub fn new(key: Option<ApiKey>) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialPicker for StaticCredential {
    async fn selected(&self) -> Option<ApiKey> {
        self.key.clone()
    }

    async fn open_picker(&self) -> Result<(), AiError> {
        Err(AiError::CredentialSelection(
            "no interactive picker; set API_KEY instead".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let key = ApiKey::new("AIza-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "AIza-secret");
    }

    #[tokio::test]
    async fn static_credential_cannot_reselect() {
        let picker = StaticCredential::new(Some(ApiKey::new("k")));
        assert_eq!(picker.selected().await, Some(ApiKey::new("k")));
        assert!(matches!(
            picker.open_picker().await.unwrap_err(),
            AiError::CredentialSelection(_)
        ));
    }
}
