//! Account type classification and balance nature.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (activo).
    Asset,
    /// Liability account (pasivo).
    Liability,
    /// Equity account (capital).
    Equity,
    /// Revenue account (ingresos).
    Revenue,
    /// Expense account (gastos).
    Expense,
}

impl AccountType {
    /// Parses an account type from its lowercase string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the lowercase string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Returns the balance nature for this account type.
    ///
    /// Asset/Expense accounts are debit-normal; Liability/Equity/Revenue
    /// accounts are credit-normal. This single function is the sign
    /// convention for both the summary and the detail views.
    #[must_use]
    pub const fn nature(self) -> Nature {
        match self {
            Self::Asset | Self::Expense => Nature::DebitNormal,
            Self::Liability | Self::Equity | Self::Revenue => Nature::CreditNormal,
        }
    }
}

/// Balance nature: which side of the ledger increases the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    /// Debit-normal accounts (Asset, Expense): balance = debit - credit.
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue): balance = credit - debit.
    CreditNormal,
}

impl Nature {
    /// Calculates the net movement of a (debit, credit) pair under this nature.
    #[must_use]
    pub fn movement(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}
