//! `plastcustom-core`: shared building blocks for the stock monitor.
//!
//! Pure domain primitives only: identifiers, the error model and the
//! aggregate/event traits. No IO lives here.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{ClientId, MovementId, OrderId};
