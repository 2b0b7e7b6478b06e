//! Payroll services over the attendance store.
//!
//! These functions read employees and records from a [`StoreState`] and
//! hand them to the pure calculator in [`crate::calculation`].
//!
//! [`StoreState`]: crate::store::StoreState

mod adjustment;
mod salary;

pub use adjustment::{AdjustmentRequest, upsert_salary_adjustment};
pub use salary::{compute_payroll, get_monthly_salary, salary_overview};
