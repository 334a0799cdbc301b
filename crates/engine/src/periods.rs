//! Date-scoped rules.
//!
//! - [`QPeriod`]: overrides the remanent with a fixed value.
//! - [`PPeriod`]: adds an extra amount to the remanent.
//! - [`KPeriod`]: groups remanents into a savings bucket.
//!
//! Bounds are kept as the caller's strings; a period whose bounds do not
//! parse never matches.

use crate::{DateRange, MoneyCents};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QPeriod {
    pub start: String,
    pub end: String,
    pub fixed: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PPeriod {
    pub start: String,
    pub end: String,
    pub extra: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KPeriod {
    pub start: String,
    pub end: String,
}

/// Common access to the bounds of a period.
pub trait Period {
    fn start(&self) -> &str;
    fn end(&self) -> &str;

    fn range(&self) -> Option<DateRange> {
        DateRange::parse(self.start(), self.end())
    }
}

macro_rules! impl_period {
    ($($ty:ty),+) => {
        $(
            impl Period for $ty {
                fn start(&self) -> &str {
                    &self.start
                }

                fn end(&self) -> &str {
                    &self.end
                }
            }
        )+
    };
}

impl_period!(QPeriod, PPeriod, KPeriod);

/// The full rule set of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    pub q: Vec<QPeriod>,
    pub p: Vec<PPeriod>,
    pub k: Vec<KPeriod>,
}
