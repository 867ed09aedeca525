//! Prompt and response-schema construction.

use serde_json::{Value as JsonValue, json};

use plastcustom_inventory::{Client, HISTORY_WINDOW, MovementEvent, StockRecord};

/// Production lead time the model must account for when picking a reorder date.
pub const PRODUCTION_LEAD_TIME_DAYS: u32 = 10;

/// One log line per movement: `dd/mm/yyyy: Saída 1 fardo(s)`.
pub fn movement_line(movement: &MovementEvent) -> String {
    format!(
        "{}: {} {} fardo(s)",
        movement.occurred_at.format("%d/%m/%Y"),
        movement.kind.label(),
        movement.magnitude()
    )
}

/// The most recent movements (at most [`HISTORY_WINDOW`]), most-recent-first,
/// one per line.
pub fn history_log(stock: &StockRecord) -> String {
    stock
        .recent_movements(HISTORY_WINDOW)
        .map(movement_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction block sent to the model.
pub fn build_prompt(client: &Client, stock: &StockRecord) -> String {
    let history = history_log(stock);
    let history = if history.is_empty() {
        "(sem movimentações registradas)".to_string()
    } else {
        history
    };
    let tier = client.tier();

    format!(
        "Você é o Analista Logístico Sênior da PLASTCUSTOM.\n\
         Analise o consumo de sacolas personalizadas do cliente: {name}.\n\
         \n\
         ESTOQUE ATUAL: {current} fardos\n\
         NÍVEL DE ALERTA: {alert} fardos\n\
         ESPECIFICAÇÃO: Sacola {packaging} tamanho {size}\n\
         PLANO DE FIDELIDADE: {tier}\n\
         \n\
         HISTÓRICO DE MOVIMENTAÇÃO (mais recente primeiro):\n\
         {history}\n\
         \n\
         TAREFAS:\n\
         1. Calcule em quantos dias o estoque chegará a zero com base na média de saídas.\n\
         2. Indique a data ideal para o próximo pedido, considerando que a produção leva {lead} dias.\n\
         3. Sugira a quantidade de fardos do próximo lote, considerando o plano {tier}.\n\
         4. Escreva uma mensagem de WhatsApp personalizada e profissional para o cliente.\n",
        name = client.name(),
        current = stock.current(),
        alert = stock.alert_threshold(),
        packaging = stock.packaging_type(),
        size = stock.size(),
        tier = tier,
        history = history,
        lead = PRODUCTION_LEAD_TIME_DAYS,
    )
}

/// Response schema: five required fields matching `PredictionResult`.
pub fn response_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "diasRestantes": {
                "type": "INTEGER",
                "description": "Dias estimados até o estoque zerar"
            },
            "dataPrevisaoRecompra": {
                "type": "STRING",
                "description": "Data formatada DD/MM"
            },
            "quantidadeSugerida": {
                "type": "INTEGER",
                "description": "Quantidade de fardos para reposição"
            },
            "analiseConsumo": {
                "type": "STRING",
                "description": "Resumo técnico da análise"
            },
            "mensagemWhatsApp": {
                "type": "STRING",
                "description": "Texto pronto para envio"
            }
        },
        "required": [
            "diasRestantes",
            "dataPrevisaoRecompra",
            "quantidadeSugerida",
            "analiseConsumo",
            "mensagemWhatsApp"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use plastcustom_core::{ClientId, MovementId};
    use plastcustom_inventory::{LoyaltyTier, MovementKind};
    use proptest::prelude::*;

    fn client() -> Client {
        Client::new(
            ClientId::from_u128(2),
            "Boutique Elegance",
            "21888888888",
            LoyaltyTier::Silver,
            "Rio de Janeiro - RJ",
            NaiveDate::from_ymd_opt(2023, 5, 20).unwrap(),
        )
        .unwrap()
    }

    fn removal(day: u32) -> MovementEvent {
        MovementEvent::removal(
            MovementId::from_u128(day as u128),
            Utc.with_ymd_and_hms(2023, 10, day, 9, 15, 0).unwrap(),
        )
    }

    fn stock_with(days: impl IntoIterator<Item = u32>) -> StockRecord {
        StockRecord::new(ClientId::from_u128(2), "Alça Fita Luxo", "30x40", 4, 6)
            .with_history(days.into_iter().map(removal))
    }

    #[test]
    fn movement_line_uses_label_and_magnitude() {
        assert_eq!(movement_line(&removal(24)), "24/10/2023: Saída 1 fardo(s)");

        let restock = MovementEvent {
            id: MovementId::from_u128(7),
            occurred_at: Utc.with_ymd_and_hms(2023, 10, 1, 8, 0, 0).unwrap(),
            quantity: 30,
            kind: MovementKind::Restock,
        };
        assert_eq!(movement_line(&restock), "01/10/2023: Entrada 30 fardo(s)");
    }

    #[test]
    fn history_log_keeps_most_recent_first() {
        let log = history_log(&stock_with([24u32, 22, 20]));
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(
            lines,
            vec![
                "24/10/2023: Saída 1 fardo(s)",
                "22/10/2023: Saída 1 fardo(s)",
                "20/10/2023: Saída 1 fardo(s)",
            ]
        );
    }

    #[test]
    fn prompt_embeds_snapshot() {
        let prompt = build_prompt(&client(), &stock_with([24u32, 22, 20]));
        assert!(prompt.contains("Boutique Elegance"));
        assert!(prompt.contains("ESTOQUE ATUAL: 4 fardos"));
        assert!(prompt.contains("NÍVEL DE ALERTA: 6 fardos"));
        assert!(prompt.contains("Sacola Alça Fita Luxo tamanho 30x40"));
        assert!(prompt.contains("PLANO DE FIDELIDADE: Prata"));
        assert!(prompt.contains("produção leva 10 dias"));
        assert!(prompt.contains("22/10/2023: Saída 1 fardo(s)"));
    }

    #[test]
    fn prompt_marks_empty_history() {
        let prompt = build_prompt(&client(), &stock_with(Vec::<u32>::new()));
        assert!(prompt.contains("(sem movimentações registradas)"));
    }

    #[test]
    fn schema_requires_all_five_fields() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 5);
        for field in required {
            let name = field.as_str().unwrap();
            assert!(schema["properties"][name].is_object(), "{name} missing");
        }
        assert_eq!(schema["properties"]["diasRestantes"]["type"], "INTEGER");
        assert_eq!(schema["properties"]["quantidadeSugerida"]["type"], "INTEGER");
    }

    proptest! {
        /// Property: the serialized history never exceeds the window.
        #[test]
        fn history_log_is_bounded(len in 0u32..28) {
            let stock = stock_with((1..=len).rev());
            let lines = history_log(&stock).lines().count();
            prop_assert_eq!(lines, (len as usize).min(HISTORY_WINDOW));
        }
    }
}
