//! CSV file row source.

use crate::domain::error::InvestorError;
use crate::domain::record::{CANONICAL_COLUMNS, CommitmentRow};
use crate::ports::source_port::SourcePort;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SourcePort for CsvAdapter {
    fn read_rows(&self) -> Result<Vec<CommitmentRow>, InvestorError> {
        if !self.path.is_file() {
            return Err(InvestorError::MissingFile {
                path: self.path.display().to_string(),
            });
        }

        let file = File::open(&self.path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        // The file's own header is read and discarded.
        let headers = StringRecord::from(CANONICAL_COLUMNS.to_vec());
        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| InvestorError::Load {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: format!("CSV parse error: {e}"),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let mut row: CommitmentRow =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| InvestorError::Load {
                        line,
                        reason: e.to_string(),
                    })?;
            row.line = line;
            rows.push(row);
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "read CSV rows");
        Ok(rows)
    }
}
