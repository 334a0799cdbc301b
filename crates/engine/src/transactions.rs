//! Transaction primitives.
//!
//! An [`Expense`] is what the user spent. Deriving it rounds the amount up to
//! the next multiple of 100 (`ceiling`); the difference (`remanent`) is what
//! gets saved. A [`Transaction`] is never edited in place: every pipeline
//! stage builds a new value, so a rejected snapshot always shows the record as
//! it was when it was rejected.

use std::fmt;

use crate::MoneyCents;

/// Rounding step for ceilings, in cents (100 major units).
const ROUNDING_STEP: i64 = 100 * MoneyCents::CENTS_PER_UNIT;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    /// Timestamp string in [`crate::DATE_FORMAT`]. Parsed lazily.
    pub date: String,
    pub amount: MoneyCents,
}

impl Expense {
    pub fn new(date: impl Into<String>, amount: MoneyCents) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub date: String,
    pub amount: MoneyCents,
    pub ceiling: MoneyCents,
    pub remanent: MoneyCents,
}

impl Transaction {
    /// Derive a transaction from an expense. Never fails.
    ///
    /// A zero amount saves nothing. Any other amount is rounded up to the
    /// smallest multiple of 100 strictly greater than it, so an amount already
    /// on a multiple (e.g. 300) still saves a full 100.
    pub fn derive(expense: &Expense) -> Self {
        let amount = expense.amount;
        let (ceiling, remanent) = if amount.is_zero() {
            (MoneyCents::ZERO, MoneyCents::ZERO)
        } else {
            // Euclidean division floors negative amounts toward -inf. Saturates
            // at the i64 bounds for amounts built outside `from_major`.
            let base = amount
                .cents()
                .div_euclid(ROUNDING_STEP)
                .saturating_mul(ROUNDING_STEP);
            let ceiling = MoneyCents::new(base.saturating_add(ROUNDING_STEP));
            (ceiling, ceiling - amount)
        };

        Self {
            date: expense.date.clone(),
            amount,
            ceiling,
            remanent,
        }
    }

    /// Copy of this transaction with a different remanent.
    #[must_use]
    pub fn with_remanent(&self, remanent: MoneyCents) -> Self {
        Self {
            remanent,
            ..self.clone()
        }
    }
}

/// Derive every expense, preserving order.
pub fn derive_transactions(expenses: &[Expense]) -> Vec<Transaction> {
    expenses.iter().map(Transaction::derive).collect()
}

/// Why a transaction left the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NegativeAmount,
    ExceedsMaxLimit,
    DuplicateDate,
    InvalidDate,
}

impl RejectReason {
    /// User-facing message attached to the rejected record.
    pub fn message(self) -> &'static str {
        match self {
            Self::NegativeAmount => "Negative amount",
            Self::ExceedsMaxLimit => "Exceeds max limit",
            Self::DuplicateDate => "Duplicate date",
            Self::InvalidDate => "Invalid date format",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A transaction that was excluded, with the reason. Terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidTransaction {
    pub transaction: Transaction,
    pub reason: RejectReason,
}

/// Outcome of a filtering stage: accepted records in input order, and the
/// rejected ones in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<Transaction>,
    pub rejected: Vec<InvalidTransaction>,
}

impl Validation {
    pub(crate) fn accept(&mut self, transaction: Transaction) {
        self.valid.push(transaction);
    }

    pub(crate) fn reject(&mut self, transaction: Transaction, reason: RejectReason) {
        self.rejected.push(InvalidTransaction {
            transaction,
            reason,
        });
    }
}
