use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// ceilings, remanents, rule values and bucket totals) so that
/// `ceiling - remanent == amount` holds exactly.
///
/// Wire values arrive as `f64` major units and are rounded to the nearest
/// cent by [`MoneyCents::from_major`], which only accepts magnitudes up to
/// [`MoneyCents::MAX_UNITS`]. Operators saturate at the `i64` bounds instead
/// of overflowing; use [`MoneyCents::checked_add`] where overflow must be
/// detected.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::from_major(250.5).unwrap().cents(), 25050);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Cents in one major unit.
    pub const CENTS_PER_UNIT: i64 = 100;

    /// Largest magnitude, in major units, accepted by [`MoneyCents::from_major`].
    ///
    /// Leaves room for ceilings and for summing thousands of amounts inside
    /// `i64` cents.
    pub const MAX_UNITS: f64 = 1e15;

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new amount from whole major units.
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * Self::CENTS_PER_UNIT)
    }

    /// Converts a major-unit float into cents, rounding to the nearest cent.
    ///
    /// Rejects `NaN`, infinities and magnitudes above [`MoneyCents::MAX_UNITS`].
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be finite, got {value}"
            )));
        }
        if value.abs() > Self::MAX_UNITS {
            return Err(EngineError::InvalidAmount(format!(
                "amount {value} exceeds {}",
                Self::MAX_UNITS
            )));
        }
        Ok(Self((value * Self::CENTS_PER_UNIT as f64).round() as i64))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the value in major units.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / Self::CENTS_PER_UNIT as f64
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Subtracts two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        *self = *self + rhs;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
