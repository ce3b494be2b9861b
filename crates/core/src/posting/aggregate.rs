//! Summary and running-balance computation over flattened posting rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{
    AccountLedger, AccountMeta, AccountSummary, LedgerDetailRow, LedgerSummary, PostingRow,
};

/// Groups posting rows by account and computes the summary table.
///
/// Accounts are ordered by code; the balance of each group is signed by the
/// account's nature. An empty input yields an empty, balanced summary.
#[must_use]
pub fn summarize(rows: &[PostingRow]) -> LedgerSummary {
    // Keyed by (code, id) so output order is the chart order even if two
    // rows disagree on a code rename mid-period.
    let mut groups: BTreeMap<(String, Uuid), AccountSummary> = BTreeMap::new();

    for row in rows {
        let entry = groups
            .entry((row.account_code.clone(), row.account_id))
            .or_insert_with(|| AccountSummary {
                account_id: row.account_id,
                code: row.account_code.clone(),
                name: row.account_name.clone(),
                account_type: row.account_type,
                total_debit: Decimal::ZERO,
                total_credit: Decimal::ZERO,
                balance: Decimal::ZERO,
            });
        entry.total_debit += row.debit;
        entry.total_credit += row.credit;
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let accounts: Vec<AccountSummary> = groups
        .into_values()
        .map(|mut summary| {
            summary.balance = summary
                .account_type
                .nature()
                .movement(summary.total_debit, summary.total_credit);
            total_debit += summary.total_debit;
            total_credit += summary.total_credit;
            summary
        })
        .collect();

    LedgerSummary {
        accounts,
        total_debit,
        total_credit,
        is_balanced: total_debit == total_credit,
    }
}

/// Computes the running-balance detail for one account.
///
/// Rows belonging to other accounts are ignored. The account's rows are
/// sorted by `(entry_date, entry_id)` ascending - entry ids are the
/// tie-break for same-date entries - and the nature-signed movements are
/// cumulatively summed. The last cumulative value is the closing balance;
/// an account with no rows in the period closes at zero.
#[must_use]
pub fn account_ledger(account: &AccountMeta, rows: &[PostingRow]) -> AccountLedger {
    let nature = account.account_type.nature();

    let mut own: Vec<&PostingRow> = rows.iter().filter(|r| r.account_id == account.id).collect();
    own.sort_by(|a, b| {
        (a.entry_date, a.entry_id).cmp(&(b.entry_date, b.entry_id))
    });

    let mut running = Decimal::ZERO;
    let detail: Vec<LedgerDetailRow> = own
        .into_iter()
        .map(|row| {
            running += nature.movement(row.debit, row.credit);
            LedgerDetailRow {
                entry_id: row.entry_id,
                entry_date: row.entry_date,
                entry_type: row.entry_type.clone(),
                description: row.description.clone(),
                debit: row.debit,
                credit: row.credit,
                running_balance: running,
            }
        })
        .collect();

    AccountLedger {
        account_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        account_type: account.account_type,
        nature,
        closing_balance: running,
        rows: detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coa::{AccountType, Nature};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn row(
        entry_id: Uuid,
        day: &str,
        account: &AccountMeta,
        debit: Decimal,
        credit: Decimal,
    ) -> PostingRow {
        PostingRow {
            entry_id,
            entry_date: date(day),
            description: "Apertura".to_string(),
            entry_type: "DIARIO".to_string(),
            account_id: account.id,
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            account_type: account.account_type,
            debit,
            credit,
        }
    }

    fn asset(code: &str, name: &str) -> AccountMeta {
        AccountMeta {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            account_type: AccountType::Asset,
        }
    }

    #[test]
    fn test_opening_entry_scenario() {
        // Accounts 1000 "Caja" and 1100 "Bancos"; one balanced opening
        // entry moving 500 from 1100 to 1000.
        let caja = asset("1000", "Caja");
        let bancos = asset("1100", "Bancos");
        let entry = Uuid::now_v7();
        let rows = vec![
            row(entry, "2024-01-01", &caja, dec!(500), dec!(0)),
            row(entry, "2024-01-01", &bancos, dec!(0), dec!(500)),
        ];

        let summary = summarize(&rows);
        assert_eq!(summary.accounts.len(), 2);
        assert!(summary.is_balanced);
        assert_eq!(summary.total_debit, dec!(500));
        assert_eq!(summary.total_credit, dec!(500));

        let caja_summary = &summary.accounts[0];
        assert_eq!(caja_summary.code, "1000");
        assert_eq!(caja_summary.total_debit, dec!(500));
        assert_eq!(caja_summary.balance, dec!(500));

        // A credited asset account nets negative: unusual but valid.
        let bancos_summary = &summary.accounts[1];
        assert_eq!(bancos_summary.code, "1100");
        assert_eq!(bancos_summary.total_credit, dec!(500));
        assert_eq!(bancos_summary.balance, dec!(-500));
    }

    #[test]
    fn test_summary_ordered_by_code() {
        let a = asset("2200", "Proveedores");
        let b = asset("1000", "Caja");
        let rows = vec![
            row(Uuid::now_v7(), "2024-03-01", &a, dec!(10), dec!(0)),
            row(Uuid::now_v7(), "2024-03-01", &b, dec!(0), dec!(10)),
        ];

        let summary = summarize(&rows);
        let codes: Vec<&str> = summary.accounts.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "2200"]);
    }

    #[test]
    fn test_credit_normal_balance_sign() {
        let capital = AccountMeta {
            id: Uuid::new_v4(),
            code: "3000".to_string(),
            name: "Capital".to_string(),
            account_type: AccountType::Equity,
        };
        let rows = vec![row(Uuid::now_v7(), "2024-01-01", &capital, dec!(0), dec!(800))];

        let summary = summarize(&rows);
        assert_eq!(summary.accounts[0].balance, dec!(800));
    }

    #[test]
    fn test_empty_rows_valid_empty_report() {
        let summary = summarize(&[]);
        assert!(summary.accounts.is_empty());
        assert!(summary.is_balanced);

        let ledger = account_ledger(&asset("1000", "Caja"), &[]);
        assert!(ledger.rows.is_empty());
        assert_eq!(ledger.closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_running_balance_sorted_by_date_then_id() {
        let caja = asset("1000", "Caja");
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        let third = Uuid::now_v7();

        // Deliberately out of order: later date first, same-date pair
        // reversed.
        let rows = vec![
            row(third, "2024-02-01", &caja, dec!(0), dec!(100)),
            row(second, "2024-01-15", &caja, dec!(50), dec!(0)),
            row(first, "2024-01-15", &caja, dec!(200), dec!(0)),
        ];

        let ledger = account_ledger(&caja, &rows);
        assert_eq!(ledger.nature, Nature::DebitNormal);

        let ids: Vec<Uuid> = ledger.rows.iter().map(|r| r.entry_id).collect();
        assert_eq!(ids, vec![first, second, third]);

        let balances: Vec<Decimal> = ledger.rows.iter().map(|r| r.running_balance).collect();
        assert_eq!(balances, vec![dec!(200), dec!(250), dec!(150)]);
        assert_eq!(ledger.closing_balance, dec!(150));
    }

    #[test]
    fn test_detail_ignores_other_accounts() {
        let caja = asset("1000", "Caja");
        let bancos = asset("1100", "Bancos");
        let entry = Uuid::now_v7();
        let rows = vec![
            row(entry, "2024-01-01", &caja, dec!(500), dec!(0)),
            row(entry, "2024-01-01", &bancos, dec!(0), dec!(500)),
        ];

        let ledger = account_ledger(&caja, &rows);
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.closing_balance, dec!(500));
    }
}
