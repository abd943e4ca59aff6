#![allow(dead_code)]

use investors::domain::record::CommitmentRow;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const HEADER: &str = "Investor Name,Investory Type,Investor Country,Investor Date Added,\
                          Investor Last Updated,Commitment Asset Class,Commitment Amount,\
                          Commitment Currency";

pub const SAMPLE_ROWS: &str = "\
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Infrastructure,15000000,GBP
Ibx Skywalker ltd,asset manager,United States,1997-07-21,2024-02-21,Infrastructure,31000000,GBP
Ioo Gryffindor fund,fund manager,Singapore,2000-07-06,2024-02-21,Hedge Funds,52000000,GBP
Mjd Jedi fund,bank,United Kingdom,1991-06-04,2024-02-21,Private Equity,8000000,GBP
Ibx Skywalker ltd,asset manager,United States,1997-07-21,2024-02-21,Real Estate,5000000,GBP
";

/// Write `rows` under the standard header into `data.csv` in a fresh temp dir.
pub fn write_csv(rows: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, format!("{HEADER}\n{rows}")).unwrap();
    (dir, path)
}

pub fn csv_line(name: &str, asset_class: &str, amount: f64, currency: &str) -> String {
    format!("{name},bank,France,2001-01-01,2024-01-01,{asset_class},{amount},{currency}\n")
}

pub fn make_row(name: &str, asset_class: &str, amount: f64) -> CommitmentRow {
    CommitmentRow {
        line: 0,
        name: name.to_string(),
        investor_type: "fund manager".to_string(),
        country: "Singapore".to_string(),
        date_added: "2000-07-06".to_string(),
        last_updated: "2024-02-21".to_string(),
        asset_class: asset_class.to_string(),
        amount,
        currency: "USD".to_string(),
    }
}
