//! Supporting utilities used by the models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod hx;
pub mod ideal_gas;
pub mod least_squares;
pub mod root_finding;
pub mod units;
