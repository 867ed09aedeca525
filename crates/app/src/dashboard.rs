use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use plastcustom_ai::{PredictionResult, PredictionService};
use plastcustom_core::{Aggregate, ClientId, DomainError, MovementId};
use plastcustom_inventory::{MovementEvent, RemoveBale, StockCommand};

use crate::catalog::Catalog;
use crate::error::DashboardError;
use crate::session::{AppView, Session, UserRole};
use crate::views::{AdminCard, ClientDashboardView};

/// Last prediction shown in the admin modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionModal {
    pub client_id: ClientId,
    pub result: PredictionResult,
}

/// Read-only view of the "prediction in flight" flag.
///
/// Clones share the flag with the [`Dashboard`] they came from, so a UI task
/// can poll it while `run_prediction` holds the dashboard mutably.
#[derive(Debug, Clone, Default)]
pub struct AnalyzingFlag(Arc<AtomicBool>);

impl AnalyzingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn raise(&self) -> AnalyzingGuard {
        self.0.store(true, Ordering::Release);
        AnalyzingGuard(self.0.clone())
    }
}

/// Clears the flag however the prediction ends, including cancellation.
struct AnalyzingGuard(Arc<AtomicBool>);

impl Drop for AnalyzingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owned application state. All mutation goes through these methods.
pub struct Dashboard {
    catalog: Catalog,
    predictions: PredictionService,
    session: Option<Session>,
    analysis: Option<PredictionModal>,
    analyzing: AnalyzingFlag,
}

impl Dashboard {
    pub fn new(catalog: Catalog, predictions: PredictionService) -> Self {
        Self {
            catalog,
            predictions,
            session: None,
            analysis: None,
            analyzing: AnalyzingFlag::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> AppView {
        self.session.as_ref().map_or(AppView::Login, Session::view)
    }

    pub fn login(&mut self, role: UserRole) -> Result<AppView, DashboardError> {
        let session = Session::start(role, &self.catalog)?;
        info!(role = ?role, user = %session.user.name(), "logged in");
        let view = session.view();
        self.session = Some(session);
        Ok(view)
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.analysis = None;
    }

    /// Record that `client_id` took one bale. Returns the new movement, or
    /// `None` when the stock was already empty.
    pub fn remove_bale(
        &mut self,
        client_id: ClientId,
        occurred_at: DateTime<Utc>,
    ) -> Result<Option<MovementEvent>, DashboardError> {
        let stock = self
            .catalog
            .stock_mut(client_id)
            .ok_or_else(|| DomainError::not_found(format!("stock for client {client_id}")))?;

        let events = stock.execute(&StockCommand::RemoveBale(RemoveBale {
            client_id,
            movement_id: MovementId::new(),
            occurred_at,
        }))?;

        debug!(%client_id, remaining = stock.current(), low = stock.is_low(), "bale removed");
        Ok(events.into_iter().next())
    }

    /// Run a prediction for `client_id` and keep it for the modal.
    ///
    /// Only credential failures come back as errors; the UI should then let
    /// the user pick another credential.
    pub async fn run_prediction(
        &mut self,
        client_id: ClientId,
    ) -> Result<PredictionResult, DashboardError> {
        let client = self
            .catalog
            .client(client_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("client {client_id}")))?;
        let stock = self
            .catalog
            .stock(client_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("stock for client {client_id}")))?;

        let guard = self.analyzing.raise();
        let outcome = self
            .predictions
            .analyze_with_reselection(&client, &stock)
            .await;
        drop(guard);

        match outcome {
            Ok(result) => {
                self.analysis = Some(PredictionModal {
                    client_id,
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(err) => {
                error!(%client_id, error = %err, "prediction needs a new credential");
                Err(err.into())
            }
        }
    }

    pub fn analysis(&self) -> Option<&PredictionModal> {
        self.analysis.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_set()
    }

    /// Shared handle on the analyzing flag, readable during `run_prediction`.
    pub fn analyzing_flag(&self) -> AnalyzingFlag {
        self.analyzing.clone()
    }

    pub fn dismiss_analysis(&mut self) {
        self.analysis = None;
    }

    /// Dashboard of the logged-in client, if the session has a stock record.
    pub fn client_dashboard(&self) -> Option<ClientDashboardView> {
        let session = self.session.as_ref()?;
        let stock = self.catalog.stock(session.user.id_typed())?;
        Some(ClientDashboardView::build(&session.user, stock))
    }

    /// One card per client, in registration order.
    pub fn admin_cards(&self) -> Vec<AdminCard> {
        self.catalog
            .clients()
            .iter()
            .filter_map(|c| {
                self.catalog
                    .stock(c.id_typed())
                    .map(|s| AdminCard::build(c, s))
            })
            .collect()
    }
}
