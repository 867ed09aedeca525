use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use plastcustom_core::{ClientId, DomainError, DomainResult};
use plastcustom_inventory::{Client, LoyaltyTier};

use crate::catalog::Catalog;

/// Reserved id of the synthetic staff user.
pub const ADMIN_USER_ID: ClientId = ClientId::from_u128(0xAD);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Client,
    Admin,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppView {
    #[default]
    Login,
    ClientDashboard,
    AdminDashboard,
}

/// Who is using the dashboard. There is no authentication behind this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: UserRole,
    pub user: Client,
}

impl Session {
    /// Client role acts as the first registered client; admin role gets the
    /// synthetic staff user.
    pub fn start(role: UserRole, catalog: &Catalog) -> DomainResult<Self> {
        let user = match role {
            UserRole::Client => catalog
                .clients()
                .first()
                .cloned()
                .ok_or_else(|| DomainError::not_found("no client registered"))?,
            UserRole::Admin => admin_user()?,
        };
        Ok(Self { role, user })
    }

    pub fn view(&self) -> AppView {
        match self.role {
            UserRole::Client => AppView::ClientDashboard,
            UserRole::Admin => AppView::AdminDashboard,
        }
    }
}

fn admin_user() -> DomainResult<Client> {
    let registered_on = NaiveDate::from_ymd_opt(2023, 1, 1)
        .ok_or_else(|| DomainError::validation("invalid admin registration date"))?;
    Client::new(
        ADMIN_USER_ID,
        "Admin Corporativo",
        "11900000000",
        LoyaltyTier::Gold,
        "Brasil",
        registered_on,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_role_uses_first_client() {
        let catalog = Catalog::seed().unwrap();
        let session = Session::start(UserRole::Client, &catalog).unwrap();
        assert_eq!(session.user.name(), "Supermercado Central");
        assert_eq!(session.view(), AppView::ClientDashboard);
    }

    #[test]
    fn admin_role_uses_staff_user() {
        let catalog = Catalog::seed().unwrap();
        let session = Session::start(UserRole::Admin, &catalog).unwrap();
        assert_eq!(session.user.id_typed(), ADMIN_USER_ID);
        assert_eq!(session.user.tier(), LoyaltyTier::Gold);
        assert_eq!(session.view(), AppView::AdminDashboard);
    }

    #[test]
    fn client_role_needs_a_client() {
        let err = Session::start(UserRole::Client, &Catalog::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
