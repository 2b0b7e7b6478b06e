//! Manager salary adjustments.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::compute_payroll;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryAdjustment, round_2dp};
use crate::store::StoreState;

/// A manager's request to override one month's salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// The salary to pay instead of the computed one.
    pub adjusted_salary: Decimal,
    /// Why the salary was changed.
    pub reason: String,
}

/// Creates or replaces the adjustment for an employee's payroll month.
///
/// The computed salary is captured at this moment and stored as
/// `calculated_salary`; later attendance changes do not alter it.
///
/// # Errors
///
/// - `PermissionDenied` if `actor` is not a manager.
/// - `EmployeeNotFound` if the employee does not exist.
/// - `InvalidPeriod` for a month outside 1..=12.
/// - `InvalidAdjustment` for a negative amount or an empty reason.
#[allow(clippy::too_many_arguments)]
pub fn upsert_salary_adjustment(
    state: &mut StoreState,
    config: &PayrollConfig,
    employee_id: &str,
    month: u32,
    year: i32,
    request: AdjustmentRequest,
    actor: &str,
    now: NaiveDateTime,
) -> EngineResult<SalaryAdjustment> {
    state.require_manager(actor, "salary adjustment")?;

    if request.adjusted_salary < Decimal::ZERO {
        return Err(EngineError::InvalidAdjustment {
            message: format!(
                "adjusted salary cannot be negative, got {}",
                request.adjusted_salary
            ),
        });
    }
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(EngineError::InvalidAdjustment {
            message: "a reason is required".to_string(),
        });
    }

    let calculated = compute_payroll(state, config, employee_id, month, year)?
        .totals
        .total_salary;

    let adjustment = SalaryAdjustment {
        employee_id: employee_id.to_string(),
        month,
        year,
        calculated_salary: calculated,
        adjusted_salary: round_2dp(request.adjusted_salary),
        reason: reason.to_string(),
        adjusted_by: actor.to_string(),
        adjusted_at: now,
    };

    let replaced = state.upsert_adjustment(adjustment.clone()).is_some();

    info!(
        actor = %actor,
        employee_id = %employee_id,
        month = month,
        year = year,
        calculated_salary = %adjustment.calculated_salary,
        adjusted_salary = %adjustment.adjusted_salary,
        replaced = replaced,
        "Salary adjustment saved"
    );

    Ok(adjustment)
}
