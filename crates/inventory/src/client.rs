use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use plastcustom_core::{ClientId, DomainError, DomainResult, Entity};

/// Loyalty tier, ordered by benefit level (`Bronze < Silver < Gold`).
///
/// Labels and serialized names are the Portuguese ones the business uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoyaltyTier {
    #[serde(rename = "Bronze")]
    Bronze,
    #[serde(rename = "Prata")]
    Silver,
    #[serde(rename = "Ouro")]
    Gold,
}

impl LoyaltyTier {
    pub fn label(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Prata",
            LoyaltyTier::Gold => "Ouro",
        }
    }
}

impl core::fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A client of the packaging supplier. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    whatsapp: String,
    tier: LoyaltyTier,
    region: String,
    registered_on: NaiveDate,
}

impl Client {
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        whatsapp: impl Into<String>,
        tier: LoyaltyTier,
        region: impl Into<String>,
        registered_on: NaiveDate,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("client name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            whatsapp: whatsapp.into(),
            tier,
            region: region.into(),
            registered_on,
        })
    }

    pub fn id_typed(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact handle (WhatsApp number).
    pub fn whatsapp(&self) -> &str {
        &self.whatsapp
    }

    pub fn tier(&self) -> LoyaltyTier {
        self.tier
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn registered_on(&self) -> NaiveDate {
        self.registered_on
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 20).unwrap()
    }

    #[test]
    fn tiers_are_ordered_by_benefit() {
        assert!(LoyaltyTier::Bronze < LoyaltyTier::Silver);
        assert!(LoyaltyTier::Silver < LoyaltyTier::Gold);
    }

    #[test]
    fn tier_serializes_with_business_label() {
        let json = serde_json::to_string(&LoyaltyTier::Silver).unwrap();
        assert_eq!(json, "\"Prata\"");
        assert_eq!(LoyaltyTier::Gold.to_string(), "Ouro");
    }

    #[test]
    fn new_client_rejects_blank_name() {
        let err = Client::new(
            ClientId::new(),
            "  ",
            "21888888888",
            LoyaltyTier::Silver,
            "Rio de Janeiro - RJ",
            date(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn entity_id_matches_typed_id() {
        let id = ClientId::from_u128(2);
        let client = Client::new(
            id,
            "Boutique Elegance",
            "21888888888",
            LoyaltyTier::Silver,
            "Rio de Janeiro - RJ",
            date(),
        )
        .unwrap();
        assert_eq!(*Entity::id(&client), id);
        assert_eq!(client.id_typed(), id);
        assert_eq!(client.registered_on(), date());
    }
}
