//! In-memory query store.

use std::collections::BTreeMap;

use super::error::InvestorError;
use super::investor::{Investor, InvestorId, InvestorSummary};
use crate::ports::investor_port::InvestorPort;

/// Read-only investor lookup, built once from loader output.
///
/// The `Default` store is the unpopulated state: it lists nothing and finds
/// nothing.
#[derive(Debug, Default)]
pub struct InvestorStore {
    investors: BTreeMap<InvestorId, Investor>,
}

impl InvestorStore {
    pub fn new(investors: Vec<Investor>) -> Self {
        Self {
            investors: investors.into_iter().map(|inv| (inv.id, inv)).collect(),
        }
    }

    /// Summaries in ID order.
    pub fn list_summaries(&self) -> Vec<InvestorSummary> {
        self.investors.values().map(Investor::summary).collect()
    }

    pub fn get_detail(&self, id: InvestorId) -> Result<&Investor, InvestorError> {
        self.investors
            .get(&id)
            .ok_or(InvestorError::NotFound { id })
    }

    pub fn len(&self) -> usize {
        self.investors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.investors.is_empty()
    }
}

impl InvestorPort for InvestorStore {
    fn list_summaries(&self) -> Result<Vec<InvestorSummary>, InvestorError> {
        Ok(InvestorStore::list_summaries(self))
    }

    fn get_detail(&self, id: InvestorId) -> Result<Investor, InvestorError> {
        InvestorStore::get_detail(self, id).cloned()
    }
}
