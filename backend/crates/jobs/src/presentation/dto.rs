//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::form::OfferForm;
use crate::domain::offer::Offer;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfferRequest {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub skills_input: String,
    /// Checkbox; omitted when unchecked in a browser form
    pub active: Option<String>,
}

impl From<OfferRequest> for OfferForm {
    fn from(req: OfferRequest) -> Self {
        OfferForm {
            title: req.title,
            description: req.description,
            salary: req.salary,
            skills_input: req.skills_input,
            active: req.active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OffersResponse {
    pub offers: Vec<Offer>,
}

/// `GET /admin/offers/?active=&q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminOffersQuery {
    pub active: Option<String>,
    pub q: Option<String>,
}

impl AdminOffersQuery {
    /// Unrecognized values leave the filter off.
    pub fn active_filter(&self) -> Option<bool> {
        match self.active.as_deref()?.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}
