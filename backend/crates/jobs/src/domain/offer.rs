//! Offer Entity

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, OfferId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A published job offer
///
/// `created_at` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub offer_id: OfferId,
    pub owner_id: AccountId,
    pub title: String,
    pub description: String,
    pub salary: Option<Decimal>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl Offer {
    pub fn is_owned_by(&self, account_id: &AccountId) -> bool {
        self.owner_id == *account_id
    }
}

/// Offer contents before the store has assigned `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub offer_id: OfferId,
    pub owner_id: AccountId,
    pub title: String,
    pub description: String,
    pub salary: Option<Decimal>,
    pub skills: Vec<String>,
    pub active: bool,
}

impl NewOffer {
    pub fn into_offer(self, created_at: DateTime<Utc>) -> Offer {
        Offer {
            offer_id: self.offer_id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            salary: self.salary,
            skills: self.skills,
            created_at,
            active: self.active,
        }
    }
}
