//! Grouping of remanents into K-period buckets.

use crate::{KPeriod, MoneyCents, Period, Transaction, dates::parse_timestamp};

/// Savings collected during one K period, plus its projected returns.
#[derive(Clone, Debug, PartialEq)]
pub struct SavingsByDate {
    pub start: String,
    pub end: String,
    /// Sum of the remanents dated inside the period.
    pub amount: MoneyCents,
    /// Inflation-adjusted gain, rounded to 2 decimals. Zero until projected.
    pub profits: f64,
    /// Tax saved by the deduction, rounded to 2 decimals. Zero until projected.
    pub tax_benefit: f64,
}

/// One bucket per K period, in K-list order.
///
/// A transaction counts toward every period containing its date (bounds
/// inclusive). Transactions with unparsable dates count toward none, and so
/// does everything for a period with unparsable bounds.
pub fn group_savings_by_k(
    transactions: &[Transaction],
    k_periods: &[KPeriod],
) -> Vec<SavingsByDate> {
    let dated: Vec<_> = transactions
        .iter()
        .filter_map(|tx| parse_timestamp(&tx.date).ok().map(|at| (at, tx.remanent)))
        .collect();

    k_periods
        .iter()
        .map(|k| {
            let amount: MoneyCents = match k.range() {
                Some(range) => dated
                    .iter()
                    .filter(|(at, _)| range.contains(*at))
                    .map(|(_, remanent)| *remanent)
                    .sum(),
                None => MoneyCents::ZERO,
            };

            SavingsByDate {
                start: k.start.clone(),
                end: k.end.clone(),
                amount,
                profits: 0.0,
                tax_benefit: 0.0,
            }
        })
        .collect()
}
