//! Investor query port trait.

use crate::domain::error::InvestorError;
use crate::domain::investor::{Investor, InvestorId, InvestorSummary};

/// Read-only queries served to the HTTP layer.
pub trait InvestorPort {
    fn list_summaries(&self) -> Result<Vec<InvestorSummary>, InvestorError>;

    /// Fails with `InvestorError::NotFound` for an unknown `id`.
    fn get_detail(&self, id: InvestorId) -> Result<Investor, InvestorError>;
}
