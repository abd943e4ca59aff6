//! Raw source rows, one per commitment.

use serde::{Deserialize, Deserializer, de};

/// Field names applied to the source columns in place of the file's own header.
pub const CANONICAL_COLUMNS: [&str; 8] = [
    "name",
    "type",
    "country",
    "date_added",
    "last_updated",
    "asset_class",
    "amount",
    "currency",
];

/// One source row. Dates stay textual until the loader parses them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommitmentRow {
    /// 1-based line in the source file, header included.
    #[serde(skip)]
    pub line: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: String,
    pub last_updated: String,
    pub asset_class: String,
    #[serde(deserialize_with = "finite_amount")]
    pub amount: f64,
    pub currency: String,
}

/// Amounts may carry surrounding whitespace; `NaN` and infinities are rejected.
fn finite_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let text = String::deserialize(deserializer)?;
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| de::Error::custom(format!("invalid amount '{text}'")))?;
    if !amount.is_finite() {
        return Err(de::Error::custom(format!("amount '{text}' is not a finite number")));
    }
    Ok(amount)
}
