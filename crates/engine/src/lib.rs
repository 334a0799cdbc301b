//! Micro-savings engine.
//!
//! Expenses are rounded up to the next multiple of 100 and the difference
//! (the *remanent*) is saved. The engine turns expenses into transactions,
//! validates them, applies date-scoped rules, groups the remanents into
//! savings buckets and projects those buckets to retirement.
//!
//! Everything here is synchronous and free of shared mutable state: an
//! [`Engine`] only carries configuration and can be shared freely between
//! threads.
//!
//! ```rust
//! use engine::{Engine, Expense, InvestorProfile, KPeriod, MoneyCents, Rules};
//!
//! let engine = Engine::builder().build();
//! let expenses = [Expense::new("2023-01-05 10:00:00", MoneyCents::from_units(250))];
//! let rules = Rules {
//!     k: vec![KPeriod {
//!         start: "2023-01-01 00:00:00".to_string(),
//!         end: "2023-12-31 23:59:59".to_string(),
//!     }],
//!     ..Rules::default()
//! };
//! let profile = InvestorProfile { age: 30, wage: 50_000.0, inflation: 0.05 };
//!
//! let report = engine.calculate(&expenses, &rules, &profile);
//! assert_eq!(report.nps.savings_by_dates[0].amount, MoneyCents::from_units(50));
//! ```

pub use dates::{DATE_FORMAT, DateRange, parse_timestamp};
pub use error::EngineError;
pub use money::MoneyCents;
pub use periods::{KPeriod, PPeriod, Period, QPeriod, Rules};
pub use returns::{
    INDEX_RATE, InvestorProfile, NPS_RATE, Rates, ReturnsReport, Vehicle,
    calculate_compound_interest, calculate_inflation_adjustment, calculate_time, round2,
};
pub use rules::apply_temporal_rules;
pub use savings::{SavingsByDate, group_savings_by_k};
pub use tax::{TAX_BRACKETS, TaxBracket, calculate_tax, calculate_tax_benefit};
pub use transactions::{
    Expense, InvalidTransaction, RejectReason, Transaction, Validation, derive_transactions,
};
pub use validation::DEFAULT_MAX_AMOUNT;

mod dates;
mod error;
mod money;
mod periods;
mod returns;
mod rules;
mod savings;
mod tax;
mod transactions;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// Counts of records through the one-shot pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Expenses derived into transactions.
    pub parsed: usize,
    /// Transactions that passed validation.
    pub valid: usize,
    /// Transactions that survived the temporal rules.
    pub filtered: usize,
    /// Transactions dropped at any stage.
    pub rejected: usize,
}

/// Result of [`Engine::calculate`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub summary: PipelineSummary,
    /// Validation rejections first, then temporal rejections.
    pub rejected_transactions: Vec<InvalidTransaction>,
    pub nps: ReturnsReport,
    pub index_fund: ReturnsReport,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Engine {
    rates: Rates,
    max_amount: MoneyCents,
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn rates(&self) -> Rates {
        self.rates
    }

    pub fn max_amount(&self) -> MoneyCents {
        self.max_amount
    }

    /// Derive ceiling and remanent for every expense. Never fails.
    pub fn derive_transactions(&self, expenses: &[Expense]) -> Vec<Transaction> {
        derive_transactions(expenses)
    }

    /// Reject negative, over-limit and duplicate-date transactions.
    pub fn validate(&self, transactions: Vec<Transaction>) -> Validation {
        validation::validate(transactions, self.max_amount)
    }

    /// Apply Q overrides and P extras; reject transactions with bad dates.
    pub fn apply_temporal_rules(
        &self,
        transactions: Vec<Transaction>,
        q_periods: &[QPeriod],
        p_periods: &[PPeriod],
    ) -> Validation {
        rules::apply_rules(transactions, q_periods, p_periods)
    }

    /// Group already filtered transactions by K period and project them.
    pub fn aggregate_and_project(
        &self,
        transactions: &[Transaction],
        k_periods: &[KPeriod],
        profile: &InvestorProfile,
        vehicle: Vehicle,
    ) -> ReturnsReport {
        let buckets = group_savings_by_k(transactions, k_periods);
        let buckets = returns::project(buckets, profile, vehicle, self.rates.for_vehicle(vehicle));
        returns::report(transactions, buckets)
    }

    /// Temporal rules, then projection.
    ///
    /// Transactions rejected by the rules are silently left out of the
    /// totals and buckets.
    pub fn returns(
        &self,
        transactions: Vec<Transaction>,
        rules: &Rules,
        profile: &InvestorProfile,
        vehicle: Vehicle,
    ) -> ReturnsReport {
        let filtered = self.apply_temporal_rules(transactions, &rules.q, &rules.p);
        if !filtered.rejected.is_empty() {
            tracing::debug!(
                dropped = filtered.rejected.len(),
                "transactions dropped by temporal rules"
            );
        }
        self.aggregate_and_project(&filtered.valid, &rules.k, profile, vehicle)
    }

    /// The whole pipeline for both vehicles.
    pub fn calculate(
        &self,
        expenses: &[Expense],
        rules: &Rules,
        profile: &InvestorProfile,
    ) -> PipelineReport {
        let parsed = self.derive_transactions(expenses);
        let parsed_count = parsed.len();

        let validated = self.validate(parsed);
        let valid_count = validated.valid.len();

        let filtered = self.apply_temporal_rules(validated.valid, &rules.q, &rules.p);

        let mut rejected_transactions = validated.rejected;
        rejected_transactions.extend(filtered.rejected);

        let summary = PipelineSummary {
            parsed: parsed_count,
            valid: valid_count,
            filtered: filtered.valid.len(),
            rejected: rejected_transactions.len(),
        };
        tracing::debug!(?summary, "pipeline finished");

        PipelineReport {
            summary,
            rejected_transactions,
            nps: self.aggregate_and_project(&filtered.valid, &rules.k, profile, Vehicle::Nps),
            index_fund: self.aggregate_and_project(
                &filtered.valid,
                &rules.k,
                profile,
                Vehicle::IndexFund,
            ),
        }
    }
}

/// The builder for `Engine`
#[derive(Debug)]
pub struct EngineBuilder {
    rates: Rates,
    max_amount: MoneyCents,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            rates: Rates::default(),
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl EngineBuilder {
    /// Override the NPS annual rate.
    pub fn nps_rate(mut self, rate: f64) -> EngineBuilder {
        self.rates.nps = rate;
        self
    }

    /// Override the index fund annual rate.
    pub fn index_rate(mut self, rate: f64) -> EngineBuilder {
        self.rates.index_fund = rate;
        self
    }

    /// Override the exclusive amount cap of the validator.
    pub fn max_amount(mut self, max_amount: MoneyCents) -> EngineBuilder {
        self.max_amount = max_amount;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            rates: self.rates,
            max_amount: self.max_amount,
        }
    }
}
