//! In-memory records the dashboards work on, plus the demo seed.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use plastcustom_core::{ClientId, DomainError, DomainResult, MovementId, OrderId};
use plastcustom_inventory::{Client, LoyaltyTier, MovementEvent, StockRecord};

/// Lifecycle label of an order. Orders are display-only records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pendente,
    #[serde(rename = "Produção")]
    Producao,
    Enviado,
    Entregue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub placed_on: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<String>,
    pub estimated_value: f64,
}

/// Clients, their stock records (one per client) and past orders.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    clients: Vec<Client>,
    stocks: BTreeMap<ClientId, StockRecord>,
    orders: Vec<Order>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client together with its stock record.
    pub fn insert(&mut self, client: Client, stock: StockRecord) -> DomainResult<()> {
        let id = client.id_typed();
        if stock.client_id() != id {
            return Err(DomainError::invariant("stock record belongs to another client"));
        }
        if self.stocks.contains_key(&id) {
            return Err(DomainError::validation(format!("client {id} already registered")));
        }
        self.clients.push(client);
        self.stocks.insert(id, stock);
        Ok(())
    }

    pub fn push_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Clients in registration order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id_typed() == id)
    }

    pub fn stock(&self, id: ClientId) -> Option<&StockRecord> {
        self.stocks.get(&id)
    }

    pub(crate) fn stock_mut(&mut self, id: ClientId) -> Option<&mut StockRecord> {
        self.stocks.get_mut(&id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn orders_for(&self, client_id: ClientId) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.client_id == client_id)
    }

    /// Demo data: three clients with their stock and one delivered order.
    pub fn seed() -> DomainResult<Self> {
        let mut catalog = Self::new();

        let central = ClientId::from_u128(1);
        let elegance = ClientId::from_u128(2);
        let padaria = ClientId::from_u128(3);

        catalog.insert(
            Client::new(
                central,
                "Supermercado Central",
                "11999999999",
                LoyaltyTier::Gold,
                "São Paulo - SP",
                date(2023, 1, 15)?,
            )?,
            StockRecord::new(central, "Alça Camiseta Reforçada", "40x50", 12, 5).with_history(
                removals(&[
                    (4, (2023, 10, 28, 16, 0)),
                    (3, (2023, 10, 27, 9, 15)),
                    (2, (2023, 10, 26, 14, 30)),
                    (1, (2023, 10, 25, 10, 0)),
                ])?,
            ),
        )?;

        catalog.insert(
            Client::new(
                elegance,
                "Boutique Elegance",
                "21888888888",
                LoyaltyTier::Silver,
                "Rio de Janeiro - RJ",
                date(2023, 5, 20)?,
            )?,
            StockRecord::new(elegance, "Alça Fita Luxo", "30x40", 4, 6).with_history(removals(&[
                (13, (2023, 10, 24, 9, 15)),
                (12, (2023, 10, 22, 14, 30)),
                (11, (2023, 10, 20, 10, 0)),
            ])?),
        )?;

        catalog.insert(
            Client::new(
                padaria,
                "Padaria Pão Quente",
                "31777777777",
                LoyaltyTier::Bronze,
                "Belo Horizonte - MG",
                date(2023, 8, 10)?,
            )?,
            StockRecord::new(padaria, "Saco de Papel Kraft", "Padrão", 8, 3)
                .with_history(removals(&[(21, (2023, 10, 25, 10, 0))])?),
        )?;

        catalog.push_order(Order {
            id: OrderId::from_u128(1),
            client_id: central,
            placed_on: date(2023, 9, 10)?,
            status: OrderStatus::Entregue,
            items: vec!["50 fardos Alça Camiseta 40x50".to_string()],
            estimated_value: 2500.0,
        });

        Ok(catalog)
    }
}

fn date(y: i32, m: u32, d: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::validation(format!("invalid date {y}-{m}-{d}")))
}

fn timestamp((y, mo, d, h, mi): (i32, u32, u32, u32, u32)) -> DomainResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .ok_or_else(|| DomainError::validation(format!("invalid timestamp {y}-{mo}-{d} {h}:{mi}")))
}

/// Single-bale removals, given most-recent-first.
fn removals(entries: &[(u128, (i32, u32, u32, u32, u32))]) -> DomainResult<Vec<MovementEvent>> {
    entries
        .iter()
        .map(|&(id, at)| -> DomainResult<MovementEvent> {
            Ok(MovementEvent::removal(MovementId::from_u128(id), timestamp(at)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_one_stock_per_client() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.clients().len(), 3);
        for client in catalog.clients() {
            let stock = catalog.stock(client.id_typed()).unwrap();
            assert_eq!(stock.client_id(), client.id_typed());
        }
    }

    #[test]
    fn seed_histories_are_most_recent_first() {
        let catalog = Catalog::seed().unwrap();
        for client in catalog.clients() {
            let stock = catalog.stock(client.id_typed()).unwrap();
            let times: Vec<_> = stock.history().map(|m| m.occurred_at).collect();
            assert!(times.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn boutique_elegance_starts_low() {
        let catalog = Catalog::seed().unwrap();
        let stock = catalog.stock(ClientId::from_u128(2)).unwrap();
        assert_eq!(stock.current(), 4);
        assert_eq!(stock.alert_threshold(), 6);
        assert!(stock.is_low());
    }

    #[test]
    fn insert_rejects_mismatched_stock() {
        let mut catalog = Catalog::new();
        let client = Client::new(
            ClientId::from_u128(7),
            "Loja",
            "0",
            LoyaltyTier::Bronze,
            "SP",
            date(2024, 1, 1).unwrap(),
        )
        .unwrap();
        let stock = StockRecord::new(ClientId::from_u128(8), "Kraft", "P", 1, 1);
        assert!(matches!(
            catalog.insert(client, stock).unwrap_err(),
            DomainError::InvariantViolation(_)
        ));
    }

    #[test]
    fn orders_filter_by_client() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.orders_for(ClientId::from_u128(1)).count(), 1);
        assert_eq!(catalog.orders_for(ClientId::from_u128(2)).count(), 0);
        assert_eq!(
            serde_json::to_value(OrderStatus::Producao).unwrap(),
            "Produção"
        );
    }
}
