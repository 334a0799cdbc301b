//! Mapping between wire types and engine types.
//!
//! Incoming amounts are rounded to cents; a non-finite amount rejects the
//! whole request with `422`.

use api_types::{
    period as api_period,
    returns::{CalculateResponse, PipelineStepSummary, ReturnsResponse, SavingsByDate},
    transaction as api_tx,
};
use engine::{
    EngineError, Expense, InvalidTransaction, InvestorProfile, KPeriod, MoneyCents, PPeriod,
    PipelineReport, QPeriod, ReturnsReport, Rules, Transaction,
};

type Result<T> = std::result::Result<T, EngineError>;

pub(crate) fn expenses(items: &[api_tx::Expense]) -> Result<Vec<Expense>> {
    items
        .iter()
        .map(|e| -> Result<Expense> {
            Ok(Expense::new(e.date.clone(), MoneyCents::from_major(e.amount)?))
        })
        .collect()
}

pub(crate) fn transactions(items: &[api_tx::Transaction]) -> Result<Vec<Transaction>> {
    items
        .iter()
        .map(|t| -> Result<Transaction> {
            Ok(Transaction {
                date: t.date.clone(),
                amount: MoneyCents::from_major(t.amount)?,
                ceiling: MoneyCents::from_major(t.ceiling)?,
                remanent: MoneyCents::from_major(t.remanent)?,
            })
        })
        .collect()
}

pub(crate) fn rules(
    q: &[api_period::QPeriod],
    p: &[api_period::PPeriod],
    k: &[api_period::KPeriod],
) -> Result<Rules> {
    let q = q
        .iter()
        .map(|q| -> Result<QPeriod> {
            Ok(QPeriod {
                start: q.start.clone(),
                end: q.end.clone(),
                fixed: MoneyCents::from_major(q.fixed)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let p = p
        .iter()
        .map(|p| -> Result<PPeriod> {
            Ok(PPeriod {
                start: p.start.clone(),
                end: p.end.clone(),
                extra: MoneyCents::from_major(p.extra)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let k = k
        .iter()
        .map(|k| KPeriod {
            start: k.start.clone(),
            end: k.end.clone(),
        })
        .collect();

    Ok(Rules { q, p, k })
}

pub(crate) fn profile(age: u32, wage: f64, inflation: f64) -> InvestorProfile {
    InvestorProfile {
        age,
        wage,
        inflation,
    }
}

pub(crate) fn transaction_view(tx: &Transaction) -> api_tx::Transaction {
    api_tx::Transaction {
        date: tx.date.clone(),
        amount: tx.amount.to_major(),
        ceiling: tx.ceiling.to_major(),
        remanent: tx.remanent.to_major(),
    }
}

pub(crate) fn invalid_view(invalid: &InvalidTransaction) -> api_tx::InvalidTransaction {
    let tx = &invalid.transaction;
    api_tx::InvalidTransaction {
        date: tx.date.clone(),
        amount: tx.amount.to_major(),
        ceiling: tx.ceiling.to_major(),
        remanent: tx.remanent.to_major(),
        message: invalid.reason.to_string(),
    }
}

pub(crate) fn validation_response(outcome: &engine::Validation) -> api_tx::ValidationResponse {
    api_tx::ValidationResponse {
        valid: outcome.valid.iter().map(transaction_view).collect(),
        invalid: outcome.rejected.iter().map(invalid_view).collect(),
    }
}

pub(crate) fn returns_response(report: &ReturnsReport) -> ReturnsResponse {
    ReturnsResponse {
        transactions_total_amount: report.transactions_total_amount.to_major(),
        transactions_total_ceiling: report.transactions_total_ceiling.to_major(),
        savings_by_dates: report
            .savings_by_dates
            .iter()
            .map(|s| SavingsByDate {
                start: s.start.clone(),
                end: s.end.clone(),
                amount: s.amount.to_major(),
                profits: s.profits,
                tax_benefit: s.tax_benefit,
            })
            .collect(),
    }
}

pub(crate) fn calculate_response(report: &PipelineReport) -> CalculateResponse {
    CalculateResponse {
        summary: PipelineStepSummary {
            parsed: report.summary.parsed,
            valid: report.summary.valid,
            filtered: report.summary.filtered,
            rejected: report.summary.rejected,
        },
        rejected_transactions: report.rejected_transactions.iter().map(invalid_view).collect(),
        nps: returns_response(&report.nps),
        index_fund: returns_response(&report.index_fund),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_amount_is_rejected() {
        let items = [api_tx::Expense {
            date: "2023-01-05 10:00:00".to_string(),
            amount: f64::NAN,
        }];
        assert!(matches!(expenses(&items), Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn rules_round_to_cents() {
        let q = [api_period::QPeriod {
            fixed: 40.004,
            start: "a".to_string(),
            end: "b".to_string(),
        }];
        let rules = rules(&q, &[], &[]).unwrap();
        assert_eq!(rules.q[0].fixed, MoneyCents::from_units(40));
    }

    #[test]
    fn invalid_view_carries_message() {
        let invalid = InvalidTransaction {
            transaction: Transaction::derive(&Expense::new("d", MoneyCents::from_units(-50))),
            reason: engine::RejectReason::NegativeAmount,
        };
        let view = invalid_view(&invalid);
        assert_eq!(view.message, "Negative amount");
        assert_eq!(view.amount, -50.0);
        assert_eq!(view.remanent, 50.0);
    }
}
