//! Salary adjustment ledger entry.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A manager's override of the computed salary for one employee and month.
///
/// At most one adjustment exists per (employee, month, year). The
/// `calculated_salary` is a snapshot taken when the adjustment was written
/// and is never recomputed, so later attendance changes do not alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAdjustment {
    /// Code of the adjusted employee.
    pub employee_id: String,
    /// Month of the payroll period (1-12).
    pub month: u32,
    /// Year of the payroll period.
    pub year: i32,
    /// The system-calculated salary at adjustment time.
    pub calculated_salary: Decimal,
    /// The authoritative final salary.
    pub adjusted_salary: Decimal,
    /// Why the salary was adjusted.
    pub reason: String,
    /// Code of the manager who made the adjustment.
    pub adjusted_by: String,
    /// When the adjustment was written.
    pub adjusted_at: NaiveDateTime,
}

impl SalaryAdjustment {
    /// The ledger key of this adjustment.
    pub fn key(&self) -> (String, i32, u32) {
        (self.employee_id.clone(), self.year, self.month)
    }

    /// Difference between the adjusted and the calculated salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::SalaryAdjustment;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let adjustment = SalaryAdjustment {
    ///     employee_id: "EMP001".to_string(),
    ///     month: 1,
    ///     year: 2026,
    ///     calculated_salary: Decimal::from(17600),
    ///     adjusted_salary: Decimal::from(18000),
    ///     reason: "Festival bonus".to_string(),
    ///     adjusted_by: "MGR001".to_string(),
    ///     adjusted_at: NaiveDateTime::parse_from_str("2026-02-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// };
    /// assert_eq!(adjustment.difference(), Decimal::from(400));
    /// ```
    pub fn difference(&self) -> Decimal {
        self.adjusted_salary - self.calculated_salary
    }
}
