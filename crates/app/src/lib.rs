//! `plastcustom-app`
//!
//! **Responsibility:** the application state behind the two dashboards.
//!
//! A single owned [`Dashboard`] holds the role/view, the in-memory catalog and
//! the last prediction. Every change goes through one of its methods; the UI
//! layer only renders the view models it hands out.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod views;

pub use catalog::{Catalog, Order, OrderStatus};
pub use dashboard::{AnalyzingFlag, Dashboard, PredictionModal};
pub use error::DashboardError;
pub use session::{AppView, Session, UserRole};
pub use views::{AdminCard, ChartPoint, ClientDashboardView, StockStatus};
