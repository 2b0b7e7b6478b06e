//! Payroll result models for the Attendance Engine.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture all outputs from a monthly salary calculation,
//! including per-record lines, totals, and audit traces.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayModelKind, RecordId, SalaryAdjustment};

/// The hours one attendance record contributes to a payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The record these hours come from.
    pub record_id: RecordId,
    /// The date of the record.
    pub date: NaiveDate,
    /// Hours worked on the record.
    pub hours_worked: Decimal,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Fraction of a standard day credited.
    pub full_days_equivalent: Decimal,
    /// Whether the record fell on a Sunday.
    pub is_sunday: bool,
    /// Whether the record fell on a holiday.
    pub is_holiday: bool,
    /// Whether the hours came from an HR override.
    pub manual_override: bool,
    /// Whether the record was still open when the payroll was computed.
    pub open: bool,
}

/// Aggregated totals for a payroll period.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PayrollTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PayrollTotals {
///     total_hours: Decimal::from(176),
///     regular_hours: Decimal::from(176),
///     overtime_hours: Decimal::ZERO,
///     days_present: 22,
///     full_days_equivalent: Decimal::from(22),
///     base_salary: Decimal::from(17600),
///     overtime_pay: Decimal::ZERO,
///     total_salary: Decimal::from(17600),
/// };
/// assert_eq!(totals.total_salary, totals.base_salary + totals.overtime_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of hours worked.
    pub total_hours: Decimal,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Number of distinct dates with at least one `Present` record.
    pub days_present: u32,
    /// Sum of the per-record full-day equivalents.
    pub full_days_equivalent: Decimal,
    /// Pay for regular work under the employee's pay model.
    pub base_salary: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// `base_salary + overtime_pay`.
    pub total_salary: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a monthly salary calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Code of the employee.
    pub employee_id: String,
    /// Month of the payroll period (1-12).
    pub month: u32,
    /// Year of the payroll period.
    pub year: i32,
    /// The pay model the salary was computed under.
    pub pay_model: PayModelKind,
    /// The effective hourly rate used for hourly pay and overtime.
    pub hourly_rate: Decimal,
    /// Monthly amount divided by the monthly working days; monthly model only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<Decimal>,
    /// One line per `Present` record in the period, in record order.
    pub lines: Vec<PayrollLine>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
    /// The audit trace.
    pub audit_trace: AuditTrace,
}

/// A payroll result paired with any manager adjustment for the same period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// The computed payroll.
    pub payroll: PayrollResult,
    /// The manager adjustment for the period, if one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<SalaryAdjustment>,
    /// The salary to display: the adjusted figure when an adjustment exists,
    /// otherwise the computed total.
    pub final_salary: Decimal,
}

impl SalarySummary {
    /// Pairs a payroll result with an optional adjustment.
    pub fn new(payroll: PayrollResult, adjustment: Option<SalaryAdjustment>) -> Self {
        let final_salary = adjustment
            .as_ref()
            .map(|a| a.adjusted_salary)
            .unwrap_or(payroll.totals.total_salary);
        Self {
            payroll,
            adjustment,
            final_salary,
        }
    }

    /// Returns true if a manager adjustment overrides the computed salary.
    pub fn is_adjusted(&self) -> bool {
        self.adjustment.is_some()
    }
}
