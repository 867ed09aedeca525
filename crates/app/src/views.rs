//! Read-only view models handed to the UI layer.

use serde::Serialize;

use plastcustom_core::ClientId;
use plastcustom_inventory::{Client, HISTORY_WINDOW, LoyaltyTier, StockRecord};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    Low,
    Normal,
}

impl StockStatus {
    pub fn of(stock: &StockRecord) -> Self {
        if stock.is_low() {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Estoque Baixo",
            StockStatus::Normal => "Normal",
        }
    }
}

/// One point of the usage chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Day of month, two digits.
    pub label: String,
    pub bales: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDashboardView {
    pub client_name: String,
    pub packaging_type: String,
    pub current: u32,
    pub alert_threshold: u32,
    pub status: StockStatus,
    /// Oldest first.
    pub chart: Vec<ChartPoint>,
}

impl ClientDashboardView {
    pub fn build(client: &Client, stock: &StockRecord) -> Self {
        Self {
            client_name: client.name().to_string(),
            packaging_type: stock.packaging_type().to_string(),
            current: stock.current(),
            alert_threshold: stock.alert_threshold(),
            status: StockStatus::of(stock),
            chart: usage_chart(stock),
        }
    }
}

/// The most recent movements in chronological order, for plotting.
pub fn usage_chart(stock: &StockRecord) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = stock
        .recent_movements(HISTORY_WINDOW)
        .map(|m| ChartPoint {
            label: m.occurred_at.format("%d").to_string(),
            bales: m.magnitude(),
        })
        .collect();
    points.reverse();
    points
}

/// Per-client card on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminCard {
    pub client_id: ClientId,
    pub name: String,
    pub tier: LoyaltyTier,
    pub current: u32,
    pub is_low: bool,
}

impl AdminCard {
    pub fn build(client: &Client, stock: &StockRecord) -> Self {
        Self {
            client_id: client.id_typed(),
            name: client.name().to_string(),
            tier: client.tier(),
            current: stock.current(),
            is_low: stock.is_low(),
        }
    }
}
