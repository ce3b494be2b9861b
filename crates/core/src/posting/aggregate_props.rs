//! Property tests for ledger aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::aggregate::{account_ledger, summarize};
use super::types::{AccountMeta, PostingRow};
use crate::coa::AccountType;

const ACCOUNT_TYPES: [AccountType; 5] = [
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
    AccountType::Revenue,
    AccountType::Expense,
];

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u32..365).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(u64::from(offset)))
            .unwrap()
    })
}

fn chart_strategy() -> impl Strategy<Value = Vec<AccountMeta>> {
    prop::collection::vec((0usize..5, "[1-9][0-9]{3}"), 2..6).prop_map(|defs| {
        defs
            .into_iter()
            .enumerate()
            .map(|(i, (type_idx, code))| AccountMeta {
                id: Uuid::new_v4(),
                code: format!("{code}{i}"),
                name: format!("Cuenta {i}"),
                account_type: ACCOUNT_TYPES[type_idx],
            })
            .collect()
    })
}

/// Strategy for a set of balanced entries over a chart: each entry debits
/// one account and credits another for the same amount.
fn balanced_rows_strategy() -> impl Strategy<Value = Vec<PostingRow>> {
    (chart_strategy(), prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), amount_strategy(), date_strategy()), 1..20))
        .prop_map(|(chart, entries)| {
            let mut rows = Vec::with_capacity(entries.len() * 2);
            for (debit_idx, credit_idx, amount, entry_date) in entries {
                let entry_id = Uuid::now_v7();
                let debited = debit_idx.get(&chart);
                let credited = credit_idx.get(&chart);
                for (account, debit, credit) in [
                    (debited, amount, Decimal::ZERO),
                    (credited, Decimal::ZERO, amount),
                ] {
                    rows.push(PostingRow {
                        entry_id,
                        entry_date,
                        description: "mov".to_string(),
                        entry_type: "DIARIO".to_string(),
                        account_id: account.id,
                        account_code: account.code.clone(),
                        account_name: account.name.clone(),
                        account_type: account.account_type,
                        debit,
                        credit,
                    });
                }
            }
            rows
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Control totals: over any set of individually balanced entries, total
    /// debit equals total credit.
    #[test]
    fn prop_control_totals_balance(rows in balanced_rows_strategy()) {
        let summary = summarize(&rows);
        prop_assert_eq!(summary.total_debit, summary.total_credit);
        prop_assert!(summary.is_balanced);
    }

    /// Per-account totals partition the row set: summing each column over
    /// the summary equals summing it over the raw rows.
    #[test]
    fn prop_summary_partitions_rows(rows in balanced_rows_strategy()) {
        let summary = summarize(&rows);

        let raw_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let raw_credit: Decimal = rows.iter().map(|r| r.credit).sum();
        let grouped_debit: Decimal = summary.accounts.iter().map(|a| a.total_debit).sum();
        let grouped_credit: Decimal = summary.accounts.iter().map(|a| a.total_credit).sum();

        prop_assert_eq!(grouped_debit, raw_debit);
        prop_assert_eq!(grouped_credit, raw_credit);
    }

    /// The summary is ordered by account code.
    #[test]
    fn prop_summary_ordered_by_code(rows in balanced_rows_strategy()) {
        let summary = summarize(&rows);
        let codes: Vec<&String> = summary.accounts.iter().map(|a| &a.code).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        prop_assert_eq!(codes, sorted);
    }

    /// Aggregation is idempotent: identical inputs yield identical reports.
    #[test]
    fn prop_aggregation_idempotent(rows in balanced_rows_strategy()) {
        prop_assert_eq!(summarize(&rows), summarize(&rows));
    }

    /// Running balance chain: each row's balance is the previous balance
    /// plus that row's nature-signed movement, and the last row equals the
    /// closing balance, which in turn equals the account's summary balance.
    #[test]
    fn prop_running_balance_chain(rows in balanced_rows_strategy()) {
        let summary = summarize(&rows);

        for account_summary in &summary.accounts {
            let meta = AccountMeta {
                id: account_summary.account_id,
                code: account_summary.code.clone(),
                name: account_summary.name.clone(),
                account_type: account_summary.account_type,
            };
            let ledger = account_ledger(&meta, &rows);
            let nature = meta.account_type.nature();

            let mut previous = Decimal::ZERO;
            for detail in &ledger.rows {
                let movement = nature.movement(detail.debit, detail.credit);
                prop_assert_eq!(detail.running_balance, previous + movement);
                previous = detail.running_balance;
            }

            prop_assert_eq!(ledger.closing_balance, previous);
            prop_assert_eq!(ledger.closing_balance, account_summary.balance);
        }
    }

    /// Detail ordering is (date, entry id) ascending.
    #[test]
    fn prop_detail_sorted(rows in balanced_rows_strategy()) {
        let summary = summarize(&rows);

        for account_summary in &summary.accounts {
            let meta = AccountMeta {
                id: account_summary.account_id,
                code: account_summary.code.clone(),
                name: account_summary.name.clone(),
                account_type: account_summary.account_type,
            };
            let ledger = account_ledger(&meta, &rows);
            let keys: Vec<(NaiveDate, Uuid)> = ledger
                .rows
                .iter()
                .map(|r| (r.entry_date, r.entry_id))
                .collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }
    }
}
