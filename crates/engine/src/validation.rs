//! Per-record validation of derived transactions.

use std::collections::HashSet;

use crate::{MoneyCents, RejectReason, Transaction, Validation};

/// Amounts at or above this cap are rejected (500000 major units).
pub const DEFAULT_MAX_AMOUNT: MoneyCents = MoneyCents::from_units(500_000);

/// Split `transactions` into accepted and rejected records.
///
/// Checks run in priority order and the first failing one is reported:
/// negative amount, amount `>= max_amount`, then a date already accepted
/// earlier in the batch. Only accepted records mark their date as seen.
pub fn validate(transactions: Vec<Transaction>, max_amount: MoneyCents) -> Validation {
    let mut seen_dates: HashSet<String> = HashSet::new();
    let mut outcome = Validation::default();

    for tx in transactions {
        let reason = if tx.amount.is_negative() {
            Some(RejectReason::NegativeAmount)
        } else if tx.amount >= max_amount {
            Some(RejectReason::ExceedsMaxLimit)
        } else if seen_dates.contains(&tx.date) {
            Some(RejectReason::DuplicateDate)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                tracing::trace!(
                    date = %tx.date,
                    amount = %tx.amount,
                    %reason,
                    "transaction rejected"
                );
                outcome.reject(tx, reason);
            }
            None => {
                seen_dates.insert(tx.date.clone());
                outcome.accept(tx);
            }
        }
    }

    outcome
}
