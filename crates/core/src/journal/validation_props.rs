//! Property tests for journal entry validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::JournalError;
use super::types::EntryLineInput;
use super::validation::validate_lines;

/// Strategy for non-negative cent amounts up to 1,000,000.00.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn line(debit: Decimal, credit: Decimal) -> EntryLineInput {
    EntryLineInput {
        account_id: Uuid::new_v4(),
        debit,
        credit,
        description: None,
    }
}

/// Strategy for a balanced entry: every amount appears once as a debit line
/// and once as a credit line.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<EntryLineInput>> {
    prop::collection::vec(amount_strategy(), 1..8).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in amounts {
            lines.push(line(amount, Decimal::ZERO));
            lines.push(line(Decimal::ZERO, amount));
        }
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every accepted entry has equal debit and credit totals.
    #[test]
    fn prop_accepted_entries_balance(lines in balanced_lines_strategy()) {
        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.total_debit, totals.total_credit);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// Skewing one side of a balanced entry by at least the tolerance is
    /// always rejected, and the reported difference matches the skew.
    #[test]
    fn prop_skewed_entries_rejected(
        lines in balanced_lines_strategy(),
        skew_cents in 1i64..1_000_000,
    ) {
        let skew = Decimal::new(skew_cents, 2);
        let mut skewed = lines;
        skewed.push(line(skew, Decimal::ZERO));

        match validate_lines(&skewed) {
            Err(JournalError::Unbalanced { difference, .. }) => {
                prop_assert_eq!(difference, skew);
            }
            other => prop_assert!(false, "expected Unbalanced, got {other:?}"),
        }
    }

    /// Validation never mutates its input and is deterministic.
    #[test]
    fn prop_validation_deterministic(lines in balanced_lines_strategy()) {
        let first = validate_lines(&lines);
        let second = validate_lines(&lines);
        prop_assert_eq!(first, second);
    }

    /// A negative amount on any line is rejected before the balance check,
    /// naming that line.
    #[test]
    fn prop_negative_amount_rejected(
        lines in balanced_lines_strategy(),
        cents in 1i64..100_000,
    ) {
        let mut with_negative = lines;
        let index = with_negative.len();
        with_negative.push(line(Decimal::new(-cents, 2), Decimal::ZERO));

        prop_assert_eq!(
            validate_lines(&with_negative),
            Err(JournalError::NegativeAmount { line: index })
        );
    }
}
