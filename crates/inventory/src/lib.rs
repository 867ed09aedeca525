//! Inventory domain module.
//!
//! Clients, their bale stock and the movement history, implemented as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod client;
pub mod stock;

pub use client::{Client, LoyaltyTier};
pub use stock::{
    HISTORY_WINDOW, MovementEvent, MovementKind, RemoveBale, RestockBales, StockCommand,
    StockRecord,
};
