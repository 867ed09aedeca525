use std::sync::Arc;

use plastcustom_ai::{AiConfig, GeminiClient, PredictionService, StaticCredential};
use plastcustom_app::{Catalog, Dashboard, UserRole};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    plastcustom_observability::init();

    let config = AiConfig::from_env()?;
    let model = GeminiClient::new(&config)?;
    let picker = StaticCredential::new(config.api_key.clone());
    let predictions =
        PredictionService::new(Arc::new(model), Arc::new(picker)).with_model_name(config.model);

    let mut dashboard = Dashboard::new(Catalog::seed()?, predictions);
    dashboard.login(UserRole::Admin)?;

    for card in dashboard.admin_cards() {
        tracing::info!(client = %card.name, current = card.current, low = card.is_low, "analyzing");
        match dashboard.run_prediction(card.client_id).await {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(err) if err.needs_credential() => {
                tracing::error!(error = %err, "set a valid API_KEY and try again");
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        }
        dashboard.dismiss_analysis();
    }

    Ok(())
}
