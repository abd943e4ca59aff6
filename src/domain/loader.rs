//! Row grouping and ID assignment.
//!
//! Rows are grouped by investor name in the order each name first appears.
//! Investor IDs count up from 1 per group; commitment IDs count up from 1
//! across the whole dataset, group by group, preserving row order inside a
//! group. Identity-bearing fields come from the first row of each group.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::error::InvestorError;
use super::investor::{Commitment, CommitmentId, Investor, InvestorId};
use super::record::CommitmentRow;
use super::store::InvestorStore;
use crate::ports::source_port::SourcePort;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read every row from `source` and build the store. Any failure aborts the
/// whole load.
pub fn load(source: &dyn SourcePort) -> Result<InvestorStore, InvestorError> {
    let rows = source.read_rows()?;
    let row_count = rows.len();
    let investors = build_investors(rows)?;

    tracing::info!(
        investors = investors.len(),
        commitments = row_count,
        "loaded investor data"
    );

    Ok(InvestorStore::new(investors))
}

/// Group rows by investor name and assign IDs. Output is in ID order.
pub fn build_investors(rows: Vec<CommitmentRow>) -> Result<Vec<Investor>, InvestorError> {
    let mut groups: Vec<Vec<CommitmentRow>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match index.get(&row.name) {
            Some(&slot) => groups[slot].push(row),
            None => {
                index.insert(row.name.clone(), groups.len());
                groups.push(vec![row]);
            }
        }
    }

    let mut investors = Vec::with_capacity(groups.len());
    let mut next_commitment_id: CommitmentId = 1;

    for (slot, group) in groups.into_iter().enumerate() {
        let id = slot as InvestorId + 1;
        investors.push(build_investor(id, group, &mut next_commitment_id)?);
    }

    Ok(investors)
}

fn build_investor(
    id: InvestorId,
    group: Vec<CommitmentRow>,
    next_commitment_id: &mut CommitmentId,
) -> Result<Investor, InvestorError> {
    let first = &group[0];
    let date_added = parse_date(&first.date_added, first.line, "date_added")?;
    let last_updated = parse_date(&first.last_updated, first.line, "last_updated")?;
    let name = first.name.clone();
    let investor_type = first.investor_type.clone();
    let country = first.country.clone();

    let total_commitment: f64 = group.iter().map(|r| r.amount).sum();

    let commitments = group
        .into_iter()
        .map(|row| {
            let commitment = Commitment {
                id: *next_commitment_id,
                asset_class: row.asset_class,
                amount: row.amount,
                currency: row.currency,
            };
            *next_commitment_id += 1;
            commitment
        })
        .collect();

    Ok(Investor {
        id,
        name,
        investor_type,
        country,
        date_added,
        last_updated,
        total_commitment,
        commitments,
    })
}

fn parse_date(value: &str, line: u64, field: &str) -> Result<NaiveDate, InvestorError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| InvestorError::Load {
        line,
        reason: format!("invalid {field} '{value}': {e}"),
    })
}
