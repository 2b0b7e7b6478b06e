//! Store-backed salary queries.

use tracing::info;

use crate::calculation::{calculate_monthly_salary, period_bounds};
use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{PayrollResult, SalarySummary};
use crate::store::StoreState;

/// Computes an employee's payroll for one month from the stored records.
pub fn compute_payroll(
    state: &StoreState,
    config: &PayrollConfig,
    employee_id: &str,
    month: u32,
    year: i32,
) -> EngineResult<PayrollResult> {
    let employee = state.employee(employee_id)?;
    let records = state.records_in_period(employee_id, month, year);
    calculate_monthly_salary(employee, &records, month, year, config)
}

/// Returns the salary for one month, preferring a manager adjustment over
/// the computed total.
///
/// # Errors
///
/// - `InvalidPeriod` if `month` is not 1..=12.
/// - `EmployeeNotFound` if the employee does not exist.
pub fn get_monthly_salary(
    state: &StoreState,
    config: &PayrollConfig,
    employee_id: &str,
    month: u32,
    year: i32,
) -> EngineResult<SalarySummary> {
    let payroll = compute_payroll(state, config, employee_id, month, year)?;
    let adjustment = state.adjustment(employee_id, month, year).cloned();
    let summary = SalarySummary::new(payroll, adjustment);

    info!(
        employee_id = %employee_id,
        month = month,
        year = year,
        total_salary = %summary.payroll.totals.total_salary,
        final_salary = %summary.final_salary,
        adjusted = summary.is_adjusted(),
        "Monthly salary computed"
    );

    Ok(summary)
}

/// Salary summaries of every employee for one month, ordered by code.
pub fn salary_overview(
    state: &StoreState,
    config: &PayrollConfig,
    month: u32,
    year: i32,
) -> EngineResult<Vec<SalarySummary>> {
    period_bounds(month, year)?;
    state
        .employees()
        .map(|e| get_monthly_salary(state, config, &e.id, month, year))
        .collect()
}
