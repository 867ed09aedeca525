use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plastcustom_core::{
    Aggregate, AggregateRoot, ClientId, DomainError, DomainResult, Event, MovementId,
};

/// Number of recent movements used for summaries (prompt and usage chart).
pub const HISTORY_WINDOW: usize = 10;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "saida")]
    Removal,
    #[serde(rename = "entrada")]
    Restock,
}

impl MovementKind {
    /// Label used in human-readable movement logs.
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Removal => "Saída",
            MovementKind::Restock => "Entrada",
        }
    }
}

/// A single recorded stock change.
///
/// `quantity` is signed: negative for removals, positive for restocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvent {
    pub id: MovementId,
    pub occurred_at: DateTime<Utc>,
    pub quantity: i32,
    pub kind: MovementKind,
}

impl MovementEvent {
    pub fn removal(id: MovementId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id,
            occurred_at,
            quantity: -1,
            kind: MovementKind::Removal,
        }
    }

    pub fn restock(id: MovementId, occurred_at: DateTime<Utc>, quantity: u32) -> Self {
        Self {
            id,
            occurred_at,
            quantity: i32::try_from(quantity).unwrap_or(i32::MAX),
            kind: MovementKind::Restock,
        }
    }

    /// Number of bales moved, regardless of direction.
    pub fn magnitude(&self) -> u32 {
        self.quantity.unsigned_abs()
    }
}

impl Event for MovementEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            MovementKind::Removal => "stock.bale.removed",
            MovementKind::Restock => "stock.bales.restocked",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Command: the client took one bale out of their stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveBale {
    pub client_id: ClientId,
    pub movement_id: MovementId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: bales were delivered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockBales {
    pub client_id: ClientId,
    pub movement_id: MovementId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockCommand {
    RemoveBale(RemoveBale),
    RestockBales(RestockBales),
}

/// Aggregate root: the bale stock of one client.
///
/// History is kept most-recent-first and only ever grows at the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    client_id: ClientId,
    packaging_type: String,
    size: String,
    current: u32,
    alert_threshold: u32,
    history: VecDeque<MovementEvent>,
}

impl StockRecord {
    pub fn new(
        client_id: ClientId,
        packaging_type: impl Into<String>,
        size: impl Into<String>,
        current: u32,
        alert_threshold: u32,
    ) -> Self {
        Self {
            client_id,
            packaging_type: packaging_type.into(),
            size: size.into(),
            current,
            alert_threshold,
            history: VecDeque::new(),
        }
    }

    /// Attach an existing history, given most-recent-first.
    pub fn with_history(mut self, history: impl IntoIterator<Item = MovementEvent>) -> Self {
        self.history = history.into_iter().collect();
        self
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn packaging_type(&self) -> &str {
        &self.packaging_type
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn alert_threshold(&self) -> u32 {
        self.alert_threshold
    }

    /// Low stock is derived on every call, never stored.
    pub fn is_low(&self) -> bool {
        self.current <= self.alert_threshold
    }

    /// Full history, most-recent-first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &MovementEvent> {
        self.history.iter()
    }

    /// Up to `n` most recent movements, most-recent-first.
    pub fn recent_movements(&self, n: usize) -> impl Iterator<Item = &MovementEvent> {
        self.history.iter().take(n)
    }

    fn ensure_client(&self, client_id: ClientId) -> DomainResult<()> {
        if self.client_id != client_id {
            return Err(DomainError::invariant("client_id mismatch"));
        }
        Ok(())
    }

    fn handle_remove(&self, cmd: &RemoveBale) -> DomainResult<Vec<MovementEvent>> {
        self.ensure_client(cmd.client_id)?;

        // Removing from an empty stock is a no-op, not an error.
        if self.current == 0 {
            tracing::debug!(client_id = %self.client_id, "bale removal ignored; stock is empty");
            return Ok(Vec::new());
        }

        Ok(vec![MovementEvent::removal(cmd.movement_id, cmd.occurred_at)])
    }

    fn handle_restock(&self, cmd: &RestockBales) -> DomainResult<Vec<MovementEvent>> {
        self.ensure_client(cmd.client_id)?;

        if cmd.quantity == 0 {
            return Err(DomainError::validation("restock quantity must be positive"));
        }
        if i32::try_from(cmd.quantity).is_err() {
            return Err(DomainError::validation("restock quantity too large"));
        }

        Ok(vec![MovementEvent::restock(
            cmd.movement_id,
            cmd.occurred_at,
            cmd.quantity,
        )])
    }
}

impl AggregateRoot for StockRecord {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.client_id
    }
}

impl Aggregate for StockRecord {
    type Command = StockCommand;
    type Event = MovementEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        self.current = self.current.saturating_add_signed(event.quantity);
        self.history.push_front(event.clone());
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StockCommand::RemoveBale(cmd) => self.handle_remove(cmd),
            StockCommand::RestockBales(cmd) => self.handle_restock(cmd),
        }
    }
}
