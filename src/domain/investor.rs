//! Investor and commitment records.

use chrono::NaiveDate;
use serde::Serialize;

pub type InvestorId = i64;
pub type CommitmentId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commitment {
    pub id: CommitmentId,
    pub asset_class: String,
    pub amount: f64,
    pub currency: String,
}

/// A fully populated investor, as served by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: NaiveDate,
    #[serde(skip)]
    pub last_updated: NaiveDate,
    pub total_commitment: f64,
    pub commitments: Vec<Commitment>,
}

/// Investor without its itemized commitments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorSummary {
    pub id: InvestorId,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: NaiveDate,
    pub total_commitment: f64,
}

impl Investor {
    pub fn summary(&self) -> InvestorSummary {
        InvestorSummary {
            id: self.id,
            name: self.name.clone(),
            investor_type: self.investor_type.clone(),
            country: self.country.clone(),
            date_added: self.date_added,
            total_commitment: self.total_commitment,
        }
    }
}
