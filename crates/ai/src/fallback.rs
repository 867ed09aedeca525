//! Deterministic result used when the model cannot produce a valid reply.

use plastcustom_inventory::{Client, StockRecord};

use crate::result::PredictionResult;

pub const FALLBACK_DAYS_REMAINING: u32 = 5;
pub const FALLBACK_REORDER_DATE: &str = "Próximos 7 dias";
pub const FALLBACK_SUGGESTED_QUANTITY: u32 = 25;
pub const FALLBACK_ANALYSIS: &str = "Consumo detectado como acima da média nos últimos registros. \
     Recomenda-se reposição imediata.";

/// Canned prediction for `client`.
///
/// Numeric fields are constants; only the message reuses the client name,
/// packaging type and loyalty tier.
pub fn fallback(client: &Client, stock: &StockRecord) -> PredictionResult {
    PredictionResult {
        days_remaining: FALLBACK_DAYS_REMAINING,
        reorder_date: FALLBACK_REORDER_DATE.to_string(),
        suggested_quantity: FALLBACK_SUGGESTED_QUANTITY,
        analysis: FALLBACK_ANALYSIS.to_string(),
        message: format!(
            "Olá {}, aqui é da Plastcustom! Notamos que seu estoque de sacolas {} está no limite. \
             Gostaria de garantir seu próximo lote com as mesmas condições do plano {}?",
            client.name(),
            stock.packaging_type(),
            client.tier()
        ),
    }
}
