//! SQLite persistence for loaded investors.

use crate::domain::error::InvestorError;
use crate::domain::investor::{Commitment, Investor, InvestorId, InvestorSummary};
use crate::ports::investor_port::InvestorPort;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteAdapter {
    pub fn open(db_path: &str, pool_size: u32) -> Result<Self, InvestorError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool =
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e: r2d2::Error| InvestorError::Database {
                    reason: e.to_string(),
                })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, InvestorError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| InvestorError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, InvestorError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| InvestorError::Database {
                reason: e.to_string(),
            })
    }

    pub fn initialize_schema(&self) -> Result<(), InvestorError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS investors (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                country TEXT NOT NULL,
                date_added TEXT NOT NULL,
                last_updated TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS commitments (
                id INTEGER PRIMARY KEY,
                investor_id INTEGER NOT NULL REFERENCES investors(id),
                asset_class TEXT NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_commitments_investor ON commitments(investor_id);",
        )
        .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Replace all stored investors in one transaction, keeping loader IDs.
    pub fn replace_investors(&self, investors: &[Investor]) -> Result<(), InvestorError> {
        let mut conn = self.conn()?;

        let tx =
            conn.transaction()
                .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        tx.execute_batch("DELETE FROM commitments; DELETE FROM investors;")
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        for investor in investors {
            tx.execute(
                "INSERT INTO investors (id, name, type, country, date_added, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    investor.id,
                    investor.name,
                    investor.investor_type,
                    investor.country,
                    investor.date_added.format(DATE_FORMAT).to_string(),
                    investor.last_updated.format(DATE_FORMAT).to_string(),
                ],
            )
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

            for commitment in &investor.commitments {
                tx.execute(
                    "INSERT INTO commitments (id, investor_id, asset_class, amount, currency)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        commitment.id,
                        investor.id,
                        commitment.asset_class,
                        commitment.amount,
                        commitment.currency
                    ],
                )
                .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                    reason: e.to_string(),
                })?;
            }
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        tracing::info!(investors = investors.len(), "stored investors in sqlite");
        Ok(())
    }
}

fn parse_date_column(value: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            value.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

impl InvestorPort for SqliteAdapter {
    fn list_summaries(&self) -> Result<Vec<InvestorSummary>, InvestorError> {
        let conn = self.conn()?;

        let query = "SELECT i.id, i.name, i.type, i.country, i.date_added,
                            COALESCE(SUM(c.amount), 0.0)
                     FROM investors i
                     LEFT JOIN commitments c ON c.investor_id = i.id
                     GROUP BY i.id
                     ORDER BY i.id ASC";

        let mut stmt =
            conn.prepare(query)
                .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map([], |row| {
                Ok(InvestorSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    investor_type: row.get(2)?,
                    country: row.get(3)?,
                    date_added: parse_date_column(row.get(4)?)?,
                    total_commitment: row.get(5)?,
                })
            })
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(
                row.map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(summaries)
    }

    fn get_detail(&self, id: InvestorId) -> Result<Investor, InvestorError> {
        let conn = self.conn()?;

        let investor = conn
            .query_row(
                "SELECT id, name, type, country, date_added, last_updated
                 FROM investors WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Investor {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        investor_type: row.get(2)?,
                        country: row.get(3)?,
                        date_added: parse_date_column(row.get(4)?)?,
                        last_updated: parse_date_column(row.get(5)?)?,
                        total_commitment: 0.0,
                        commitments: Vec::new(),
                    })
                },
            )
            .optional()
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let Some(mut investor) = investor else {
            return Err(InvestorError::NotFound { id });
        };

        let mut stmt = conn
            .prepare(
                "SELECT id, asset_class, amount, currency
                 FROM commitments WHERE investor_id = ?1
                 ORDER BY id ASC",
            )
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map(params![id], |row| {
                Ok(Commitment {
                    id: row.get(0)?,
                    asset_class: row.get(1)?,
                    amount: row.get(2)?,
                    currency: row.get(3)?,
                })
            })
            .map_err(|e: rusqlite::Error| InvestorError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        for row in rows {
            investor.commitments.push(row.map_err(|e: rusqlite::Error| {
                InvestorError::DatabaseQuery {
                    reason: e.to_string(),
                }
            })?);
        }

        investor.total_commitment = investor.commitments.iter().map(|c| c.amount).sum();
        Ok(investor)
    }
}
