//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when a monetary value cannot be represented as
//!   [`MoneyCents`].
//! - [`InvalidDate`] thrown when a timestamp does not follow
//!   [`DATE_FORMAT`].
//!
//! Per-transaction rejections are not errors: they are reported through
//! [`RejectReason`] and never abort a batch.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`MoneyCents`]: super::money::MoneyCents
//!  [`DATE_FORMAT`]: super::dates::DATE_FORMAT
//!  [`RejectReason`]: super::transactions::RejectReason
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
