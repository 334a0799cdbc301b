//! Projection of bucketed savings to retirement.
//!
//! Each bucket is compounded annually at the vehicle's nominal rate until
//! retirement, discounted by inflation over the same horizon, and reported as
//! the real gain over the saved amount. The NPS vehicle also reports the tax
//! saved by deducting the bucket from the investor's annual wage.

use crate::{MoneyCents, SavingsByDate, Transaction, tax::calculate_tax_benefit};

/// Age at which the projection horizon ends.
pub const RETIREMENT_AGE: u32 = 60;

/// Horizon used for investors already at or past [`RETIREMENT_AGE`].
pub const MIN_HORIZON_YEARS: i32 = 5;

/// Default annual nominal rate of the NPS vehicle.
pub const NPS_RATE: f64 = 0.0711;

/// Default annual nominal rate of the index fund vehicle.
pub const INDEX_RATE: f64 = 0.1449;

/// Investment vehicle a projection is computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vehicle {
    /// National Pension Scheme: lower rate, tax deductible.
    Nps,
    IndexFund,
}

impl Vehicle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nps => "nps",
            Self::IndexFund => "index_fund",
        }
    }

    /// Whether contributions earn a tax benefit.
    pub fn is_tax_advantaged(self) -> bool {
        matches!(self, Self::Nps)
    }
}

/// Annual nominal rates per vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rates {
    pub nps: f64,
    pub index_fund: f64,
}

impl Rates {
    pub fn for_vehicle(&self, vehicle: Vehicle) -> f64 {
        match vehicle {
            Vehicle::Nps => self.nps,
            Vehicle::IndexFund => self.index_fund,
        }
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            nps: NPS_RATE,
            index_fund: INDEX_RATE,
        }
    }
}

/// Who is investing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvestorProfile {
    pub age: u32,
    /// Monthly wage.
    pub wage: f64,
    /// Annual inflation as a fraction (`0.05` is 5%).
    pub inflation: f64,
}

impl InvestorProfile {
    pub fn annual_wage(&self) -> f64 {
        self.wage * 12.0
    }
}

/// Projected returns for one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnsReport {
    pub transactions_total_amount: MoneyCents,
    pub transactions_total_ceiling: MoneyCents,
    pub savings_by_dates: Vec<SavingsByDate>,
}

/// Years until retirement, never less than [`MIN_HORIZON_YEARS`] once retired.
pub fn calculate_time(age: u32) -> i32 {
    if age < RETIREMENT_AGE {
        (RETIREMENT_AGE - age) as i32
    } else {
        MIN_HORIZON_YEARS
    }
}

/// `principal * (1 + rate)^years`
pub fn calculate_compound_interest(principal: f64, rate: f64, years: i32) -> f64 {
    principal * (1.0 + rate).powi(years)
}

/// `amount / (1 + inflation)^years`
pub fn calculate_inflation_adjustment(amount: f64, inflation: f64, years: i32) -> f64 {
    amount / (1.0 + inflation).powi(years)
}

/// Round to 2 decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fill `profits` (and `tax_benefit` for NPS) on every bucket with a positive
/// amount. Other buckets keep zeroes.
pub fn project(
    mut buckets: Vec<SavingsByDate>,
    profile: &InvestorProfile,
    vehicle: Vehicle,
    rate: f64,
) -> Vec<SavingsByDate> {
    let years = calculate_time(profile.age);
    let annual_wage = profile.annual_wage();

    for bucket in buckets.iter_mut().filter(|b| b.amount.is_positive()) {
        let amount = bucket.amount.to_major();
        let future_value = calculate_compound_interest(amount, rate, years);
        let real_value = calculate_inflation_adjustment(future_value, profile.inflation, years);
        bucket.profits = round2(real_value - amount);

        if vehicle.is_tax_advantaged() {
            bucket.tax_benefit = calculate_tax_benefit(amount, annual_wage);
        }
    }

    buckets
}

/// Assemble the report: totals over the filtered transactions, projected
/// buckets.
pub fn report(transactions: &[Transaction], savings_by_dates: Vec<SavingsByDate>) -> ReturnsReport {
    ReturnsReport {
        transactions_total_amount: transactions.iter().map(|t| t.amount).sum(),
        transactions_total_ceiling: transactions.iter().map(|t| t.ceiling).sum(),
        savings_by_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(units: i64) -> SavingsByDate {
        SavingsByDate {
            start: "2023-01-01 00:00:00".to_string(),
            end: "2023-12-31 23:59:59".to_string(),
            amount: MoneyCents::from_units(units),
            profits: 0.0,
            tax_benefit: 0.0,
        }
    }

    #[test]
    fn horizon_until_sixty_with_floor() {
        assert_eq!(calculate_time(30), 30);
        assert_eq!(calculate_time(59), 1);
        assert_eq!(calculate_time(60), 5);
        assert_eq!(calculate_time(75), 5);
    }

    #[test]
    fn compound_interest() {
        assert_eq!(round2(calculate_compound_interest(1000.0, 0.10, 2)), 1210.0);
    }

    #[test]
    fn inflation_adjustment() {
        assert_eq!(round2(calculate_inflation_adjustment(1210.0, 0.05, 2)), 1097.51);
    }

    #[test]
    fn projects_positive_buckets_only() {
        let profile = InvestorProfile {
            age: 58,
            wage: 100_000.0,
            inflation: 0.0,
        };
        let projected = project(
            vec![bucket(1000), bucket(0), bucket(-10)],
            &profile,
            Vehicle::IndexFund,
            0.10,
        );

        // 1000 * 1.1^2 - 1000
        assert_eq!(projected[0].profits, 210.0);
        assert_eq!(projected[0].tax_benefit, 0.0);
        assert_eq!(projected[1].profits, 0.0);
        assert_eq!(projected[2].profits, 0.0);
    }

    #[test]
    fn nps_adds_tax_benefit() {
        // annual wage 1.5M, deduction min(100k, 150k, 200k)
        let profile = InvestorProfile {
            age: 40,
            wage: 125_000.0,
            inflation: 0.05,
        };
        let projected = project(vec![bucket(100_000)], &profile, Vehicle::Nps, NPS_RATE);
        assert_eq!(projected[0].tax_benefit, 20_000.0);
        assert!(projected[0].profits > 0.0);
    }

    #[test]
    fn high_inflation_can_produce_a_real_loss() {
        let profile = InvestorProfile {
            age: 50,
            wage: 0.0,
            inflation: 0.20,
        };
        let projected = project(vec![bucket(100)], &profile, Vehicle::Nps, NPS_RATE);
        assert!(projected[0].profits < 0.0);
        assert_eq!(projected[0].tax_benefit, 0.0);
    }

    #[test]
    fn report_sums_transactions_not_buckets() {
        let txs = [
            Transaction::derive(&crate::Expense::new("a", MoneyCents::new(250_50))),
            Transaction::derive(&crate::Expense::new("b", MoneyCents::from_units(1_000))),
        ];
        let report = report(&txs, vec![bucket(5), bucket(5)]);
        assert_eq!(report.transactions_total_amount, MoneyCents::new(1_250_50));
        assert_eq!(report.transactions_total_ceiling, MoneyCents::from_units(1_400));
        assert_eq!(report.savings_by_dates.len(), 2);
    }
}
