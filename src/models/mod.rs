//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod geo;
mod payroll_result;
mod salary_adjustment;

use rust_decimal::{Decimal, RoundingStrategy};

pub use attendance::{AttendanceRecord, AttendanceStatus, RecordState};
pub use employee::{Employee, LiveLocation, PayModel, PayModelKind};
pub use geo::GeoPoint;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, PayrollLine, PayrollResult, PayrollTotals, SalarySummary,
};
pub use salary_adjustment::SalaryAdjustment;

/// Identifier of an attendance record.
pub type RecordId = u64;

/// Rounds to two decimal places, halves away from zero.
pub(crate) fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
