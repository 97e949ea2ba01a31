//! The ordinance aggregate: identity, economics, rule lists and flags.
//!
//! An ordinance is available when it is enabled and all of its conditions
//! hold. Once a month the host recomputes availability and, for ordinances
//! that are on, stores the monthly income produced by folding the income
//! factors over the constant income.

mod persist;
mod record;

mod tests_persist;

pub use record::{HostResources, Ordinance};
