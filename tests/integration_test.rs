//! Integration tests for the load pipeline.
//!
//! Tests cover:
//! - CSV file → loader → store end to end
//! - Grouping, ID assignment and totals as properties over generated rows
//! - Fail-fast loading (missing file, malformed rows)
//! - SQLite import serving the same answers as the in-memory store

mod common;

use approx::assert_relative_eq;
use common::*;
use investors::adapters::csv_adapter::CsvAdapter;
use investors::domain::error::InvestorError;
use investors::domain::loader::{build_investors, load};
use investors::domain::record::CommitmentRow;
use investors::domain::store::InvestorStore;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

mod csv_to_store {
    use super::*;

    #[test]
    fn sample_file_groups_by_investor() {
        let (_dir, path) = write_csv(SAMPLE_ROWS);
        let store = load(&CsvAdapter::new(path)).unwrap();

        let summaries = store.list_summaries();
        assert_eq!(summaries.len(), 3);

        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Ioo Gryffindor fund", "Ibx Skywalker ltd", "Mjd Jedi fund"]
        );
        assert_relative_eq!(summaries[0].total_commitment, 67_000_000.0);
        assert_relative_eq!(summaries[1].total_commitment, 36_000_000.0);
        assert_relative_eq!(summaries[2].total_commitment, 8_000_000.0);
    }

    #[test]
    fn sample_file_assigns_commitment_ids_per_group() {
        let (_dir, path) = write_csv(SAMPLE_ROWS);
        let store = load(&CsvAdapter::new(path)).unwrap();

        let gryffindor = store.get_detail(1).unwrap();
        let classes: Vec<_> = gryffindor
            .commitments
            .iter()
            .map(|c| (c.id, c.asset_class.as_str()))
            .collect();
        assert_eq!(classes, vec![(1, "Infrastructure"), (2, "Hedge Funds")]);

        let skywalker = store.get_detail(2).unwrap();
        let ids: Vec<_> = skywalker.commitments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let jedi = store.get_detail(3).unwrap();
        assert_eq!(jedi.commitments[0].id, 5);
        assert_eq!(jedi.investor_type, "bank");
        assert_eq!(jedi.country, "United Kingdom");
    }

    #[test]
    fn acme_two_commitments() {
        let rows = csv_line("Acme", "Equity", 100.0, "USD") + &csv_line("Acme", "Debt", 50.0, "USD");
        let (_dir, path) = write_csv(&rows);
        let store = load(&CsvAdapter::new(path)).unwrap();

        assert_eq!(store.len(), 1);
        let acme = store.get_detail(1).unwrap();
        assert_eq!(acme.name, "Acme");
        assert_relative_eq!(acme.total_commitment, 150.0);
        assert_eq!(acme.commitments.len(), 2);
        assert_ne!(acme.commitments[0].id, acme.commitments[1].id);
    }

    #[test]
    fn two_names_get_ids_one_and_two() {
        let rows = csv_line("Second", "Equity", 1.0, "EUR") + &csv_line("First", "Debt", 2.0, "EUR");
        let (_dir, path) = write_csv(&rows);
        let store = load(&CsvAdapter::new(path)).unwrap();

        let summaries = store.list_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!((summaries[0].id, summaries[0].name.as_str()), (1, "Second"));
        assert_eq!((summaries[1].id, summaries[1].name.as_str()), (2, "First"));
    }

    #[test]
    fn names_differing_by_whitespace_stay_separate() {
        let rows = csv_line("Acme", "Equity", 100.0, "USD") + &csv_line(" Acme ", "Debt", 50.0, "USD");
        let (_dir, path) = write_csv(&rows);
        let store = load(&CsvAdapter::new(path)).unwrap();

        let names: Vec<_> = store.list_summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Acme".to_string(), " Acme ".to_string()]);
        assert_relative_eq!(store.get_detail(1).unwrap().total_commitment, 100.0);
        assert_relative_eq!(store.get_detail(2).unwrap().total_commitment, 50.0);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let rows = csv_line("A", "Equity", 1.0, "EUR") + &csv_line("B", "Debt", 2.0, "EUR");
        let (_dir, path) = write_csv(&rows);
        let store = load(&CsvAdapter::new(path)).unwrap();

        assert!(matches!(
            store.get_detail(9999),
            Err(InvestorError::NotFound { id: 9999 })
        ));
        assert!(matches!(
            store.get_detail(0),
            Err(InvestorError::NotFound { id: 0 })
        ));
    }
}

mod fail_fast {
    use super::*;

    #[test]
    fn missing_file_builds_no_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load(&CsvAdapter::new(dir.path().join("data.csv")));
        assert!(matches!(result, Err(InvestorError::MissingFile { .. })));
    }

    #[test]
    fn malformed_amount_aborts_whole_load() {
        let rows = csv_line("Acme", "Equity", 100.0, "USD")
            + "Acme,bank,France,2001-01-01,2024-01-01,Debt,fifty,USD\n";
        let (_dir, path) = write_csv(&rows);
        assert!(matches!(
            load(&CsvAdapter::new(path)),
            Err(InvestorError::Load { line: 3, .. })
        ));
    }

    #[test]
    fn non_finite_amounts_abort_whole_load() {
        for amount in ["NaN", "inf", "infinity"] {
            let rows = csv_line("Acme", "Equity", 100.0, "USD")
                + &format!("Acme,bank,France,2001-01-01,2024-01-01,Debt,{amount},USD\n");
            let (_dir, path) = write_csv(&rows);
            assert!(
                matches!(
                    load(&CsvAdapter::new(path)),
                    Err(InvestorError::Load { line: 3, .. })
                ),
                "{amount} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_date_aborts_whole_load() {
        let rows = csv_line("Acme", "Equity", 100.0, "USD")
            + "Beta,bank,France,01/01/2001,2024-01-01,Debt,50,USD\n";
        let (_dir, path) = write_csv(&rows);
        assert!(matches!(
            load(&CsvAdapter::new(path)),
            Err(InvestorError::Load { line: 3, .. })
        ));
    }
}

mod grouping_properties {
    use super::*;

    fn arb_rows() -> impl Strategy<Value = Vec<CommitmentRow>> {
        prop::collection::vec((0usize..6, 0u32..1_000_000), 0..40).prop_map(|picks| {
            picks
                .into_iter()
                .map(|(name, amount)| make_row(&format!("Investor {name}"), "Equity", amount as f64))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn rows_with_same_name_form_one_investor(rows in arb_rows()) {
            let distinct: HashSet<_> = rows.iter().map(|r| r.name.clone()).collect();
            let investors = build_investors(rows.clone()).unwrap();

            prop_assert_eq!(investors.len(), distinct.len());
            let names: HashSet<_> = investors.iter().map(|i| i.name.clone()).collect();
            prop_assert_eq!(names, distinct);
        }

        #[test]
        fn totals_equal_commitment_sums(rows in arb_rows()) {
            for investor in build_investors(rows).unwrap() {
                let sum: f64 = investor.commitments.iter().map(|c| c.amount).sum();
                prop_assert_eq!(investor.total_commitment, sum);
            }
        }

        #[test]
        fn investor_ids_are_one_to_n(rows in arb_rows()) {
            let investors = build_investors(rows).unwrap();
            let ids: Vec<_> = investors.iter().map(|i| i.id).collect();
            let expected: Vec<i64> = (1..=investors.len() as i64).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn commitment_ids_are_unique_across_dataset(rows in arb_rows()) {
            let row_count = rows.len();
            let investors = build_investors(rows).unwrap();
            let ids: HashSet<_> = investors
                .iter()
                .flat_map(|i| i.commitments.iter().map(|c| c.id))
                .collect();

            prop_assert_eq!(ids.len(), row_count);
            prop_assert!(ids.iter().all(|&id| id >= 1 && id <= row_count as i64));
        }

        #[test]
        fn commitment_count_matches_group_size(rows in arb_rows()) {
            let mut group_sizes: HashMap<String, usize> = HashMap::new();
            for row in &rows {
                *group_sizes.entry(row.name.clone()).or_default() += 1;
            }

            let store = InvestorStore::new(build_investors(rows).unwrap());
            for id in 1..=store.len() as i64 {
                let detail = store.get_detail(id).unwrap();
                prop_assert_eq!(detail.commitments.len(), group_sizes[&detail.name]);
            }
            prop_assert!(store.get_detail(store.len() as i64 + 1).is_err());
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_parity {
    use super::*;
    use investors::adapters::sqlite_adapter::SqliteAdapter;
    use investors::ports::investor_port::InvestorPort;
    use investors::ports::source_port::SourcePort;

    #[test]
    fn sqlite_answers_match_memory_store() {
        let (_dir, path) = write_csv(SAMPLE_ROWS);
        let adapter = CsvAdapter::new(path);
        let store = load(&adapter).unwrap();

        let sqlite = SqliteAdapter::in_memory().unwrap();
        sqlite.initialize_schema().unwrap();
        sqlite
            .replace_investors(&build_investors(adapter.read_rows().unwrap()).unwrap())
            .unwrap();

        assert_eq!(
            InvestorPort::list_summaries(&sqlite).unwrap(),
            InvestorPort::list_summaries(&store).unwrap()
        );
        for id in 1..=3 {
            assert_eq!(
                InvestorPort::get_detail(&sqlite, id).unwrap(),
                InvestorPort::get_detail(&store, id).unwrap()
            );
        }
        assert!(matches!(
            InvestorPort::get_detail(&sqlite, 9999),
            Err(InvestorError::NotFound { id: 9999 })
        ));
    }
}
