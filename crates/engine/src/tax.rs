//! Income tax schedule and the NPS deduction benefit.

use crate::returns::round2;

/// A marginal bracket: `rate` applies to the income above `threshold`, up to
/// the next bracket's threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

/// Annual schedule. Income up to 700,000 is untaxed.
pub const TAX_BRACKETS: [TaxBracket; 4] = [
    TaxBracket {
        threshold: 700_000.0,
        rate: 0.10,
    },
    TaxBracket {
        threshold: 1_000_000.0,
        rate: 0.15,
    },
    TaxBracket {
        threshold: 1_200_000.0,
        rate: 0.20,
    },
    TaxBracket {
        threshold: 1_500_000.0,
        rate: 0.30,
    },
];

/// Share of the annual wage that can be deducted.
pub const DEDUCTION_WAGE_SHARE: f64 = 0.10;

/// Absolute deduction ceiling.
pub const DEDUCTION_CAP: f64 = 200_000.0;

/// Tax owed on an annual income. Not rounded.
pub fn calculate_tax(income: f64) -> f64 {
    progressive_tax(income, &TAX_BRACKETS)
}

fn progressive_tax(income: f64, brackets: &[TaxBracket]) -> f64 {
    brackets
        .iter()
        .enumerate()
        .take_while(|(_, bracket)| income > bracket.threshold)
        .map(|(i, bracket)| {
            let upper = brackets
                .get(i + 1)
                .map_or(f64::INFINITY, |next| next.threshold);
            (income.min(upper) - bracket.threshold) * bracket.rate
        })
        .sum()
}

/// Tax saved by investing `amount_invested` into the tax-advantaged vehicle.
///
/// The deduction is `min(amount_invested, 10% of annual_wage, 200000)`. Only
/// the difference in tax is rounded, to 2 decimals.
pub fn calculate_tax_benefit(amount_invested: f64, annual_wage: f64) -> f64 {
    let deduction = amount_invested
        .min(annual_wage * DEDUCTION_WAGE_SHARE)
        .min(DEDUCTION_CAP);
    let without = calculate_tax(annual_wage);
    let with = calculate_tax((annual_wage - deduction).max(0.0));
    round2(without - with)
}
