//! Raw row source port trait.

use crate::domain::error::InvestorError;
use crate::domain::record::CommitmentRow;

pub trait SourcePort {
    /// Every row in source order. Fails on the first row that cannot be read.
    fn read_rows(&self) -> Result<Vec<CommitmentRow>, InvestorError>;
}
