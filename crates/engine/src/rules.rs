//! Temporal rule resolution.
//!
//! For a transaction date `t`:
//!
//! 1. Every Q period containing `t` is a candidate. The candidate with the
//!    latest `start` wins; equal starts are broken by the lowest position in
//!    the input list. The winner's `fixed` *replaces* the remanent.
//! 2. The `extra` of every P period containing `t` is summed and *added* to
//!    the remanent, after step 1.
//!
//! K periods do not change a transaction; they only group it later (see
//! [`crate::savings`]).

use std::cmp::Reverse;

use crate::{
    DateRange, MoneyCents, PPeriod, Period, QPeriod, RejectReason, Transaction, Validation,
    dates::parse_timestamp,
};

/// Resolve Q and P rules for a single transaction.
///
/// Fails only when the transaction date cannot be parsed; no rule is applied
/// in that case.
pub fn apply_temporal_rules(
    transaction: &Transaction,
    q_periods: &[QPeriod],
    p_periods: &[PPeriod],
) -> Result<Transaction, RejectReason> {
    let at = parse_timestamp(&transaction.date).map_err(|_| RejectReason::InvalidDate)?;

    let mut matching_q: Vec<(usize, DateRange, &QPeriod)> = q_periods
        .iter()
        .enumerate()
        .filter_map(|(index, q)| q.range().map(|range| (index, range, q)))
        .filter(|(_, range, _)| range.contains(at))
        .collect();
    matching_q.sort_by_key(|(index, range, _)| (Reverse(range.start), *index));

    let mut remanent = transaction.remanent;
    if let Some((index, _, winner)) = matching_q.first() {
        tracing::trace!(
            date = %transaction.date,
            q_index = index,
            fixed = %winner.fixed,
            "q override"
        );
        remanent = winner.fixed;
    }

    let extra: MoneyCents = p_periods
        .iter()
        .filter(|p| p.range().is_some_and(|range| range.contains(at)))
        .map(|p| p.extra)
        .sum();
    remanent += extra;

    Ok(transaction.with_remanent(remanent))
}

/// Apply [`apply_temporal_rules`] to a batch.
///
/// Rejected entries keep the transaction exactly as it was received.
pub fn apply_rules(
    transactions: Vec<Transaction>,
    q_periods: &[QPeriod],
    p_periods: &[PPeriod],
) -> Validation {
    let mut outcome = Validation::default();
    for tx in transactions {
        match apply_temporal_rules(&tx, q_periods, p_periods) {
            Ok(updated) => outcome.accept(updated),
            Err(reason) => outcome.reject(tx, reason),
        }
    }
    outcome
}
