//! Employee model and related types.
//!
//! This module defines the Employee struct and the PayModel enum for
//! representing workers and how they are paid.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{GeoPoint, RecordId};

/// How an employee is paid. Exactly one model is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PayModel {
    /// A fixed monthly amount, prorated by attendance.
    Monthly {
        /// The full monthly amount.
        amount: Decimal,
        /// Optional explicit hourly rate used for overtime.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hourly_rate: Option<Decimal>,
    },
    /// Paid per hour worked.
    Hourly {
        /// The hourly rate.
        rate: Decimal,
    },
}

/// The discriminant of a [`PayModel`], used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayModelKind {
    /// See [`PayModel::Monthly`].
    Monthly,
    /// See [`PayModel::Hourly`].
    Hourly,
}

impl PayModel {
    /// Returns the kind of this pay model.
    pub fn kind(&self) -> PayModelKind {
        match self {
            PayModel::Monthly { .. } => PayModelKind::Monthly,
            PayModel::Hourly { .. } => PayModelKind::Hourly,
        }
    }

    /// Returns the explicitly configured hourly rate, if the model carries one.
    pub fn explicit_hourly_rate(&self) -> Option<Decimal> {
        match self {
            PayModel::Monthly { hourly_rate, .. } => *hourly_rate,
            PayModel::Hourly { rate } => Some(*rate),
        }
    }
}

/// The last location reported by an employee's device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveLocation {
    /// Where the employee was.
    pub point: GeoPoint,
    /// When the ping arrived.
    pub updated_at: NaiveDateTime,
}

/// Represents an employee whose attendance is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee code (e.g., "EMP001").
    pub id: String,
    /// Display name.
    pub name: String,
    /// The authoritative pay model.
    pub pay_model: PayModel,
    /// Legacy flat salary, kept for records created before pay models existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_salary: Option<Decimal>,
    /// Standard working hours per day.
    pub standard_hours_per_day: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Whether the employee may perform manager actions.
    #[serde(default)]
    pub is_manager: bool,
    /// Last reported location.
    #[serde(default)]
    pub last_location: Option<LiveLocation>,
    /// The currently open attendance record. Set only by check-in and
    /// cleared only by check-out or auto-checkout.
    #[serde(default)]
    pub open_record: Option<RecordId>,
}

impl Employee {
    /// Creates an employee with no location and no open record.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, PayModel};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "EMP001",
    ///     "Asha Rao",
    ///     PayModel::Hourly { rate: Decimal::from(100) },
    ///     Decimal::from(8),
    ///     Decimal::new(15, 1),
    /// );
    /// assert!(!employee.is_checked_in());
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pay_model: PayModel,
        standard_hours_per_day: Decimal,
        overtime_multiplier: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pay_model,
            legacy_salary: None,
            standard_hours_per_day,
            overtime_multiplier,
            is_manager: false,
            last_location: None,
            open_record: None,
        }
    }

    /// Returns true if the employee has an open attendance record.
    pub fn is_checked_in(&self) -> bool {
        self.open_record.is_some()
    }

    /// Checks the invariants the payroll calculator relies on.
    ///
    /// Standard hours must be positive (they divide several formulas) and
    /// no monetary amount may be negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if self.standard_hours_per_day <= Decimal::ZERO {
            return Err(invalid("standard_hours_per_day", "must be positive"));
        }
        if self.standard_hours_per_day > Decimal::from(24) {
            return Err(invalid("standard_hours_per_day", "cannot exceed 24"));
        }
        if self.overtime_multiplier < Decimal::ZERO {
            return Err(invalid("overtime_multiplier", "must not be negative"));
        }
        match self.pay_model {
            PayModel::Monthly {
                amount,
                hourly_rate,
            } => {
                if amount < Decimal::ZERO {
                    return Err(invalid("pay_model.amount", "must not be negative"));
                }
                if hourly_rate.is_some_and(|r| r < Decimal::ZERO) {
                    return Err(invalid("pay_model.hourly_rate", "must not be negative"));
                }
            }
            PayModel::Hourly { rate } => {
                if rate < Decimal::ZERO {
                    return Err(invalid("pay_model.rate", "must not be negative"));
                }
            }
        }
        if self.legacy_salary.is_some_and(|s| s < Decimal::ZERO) {
            return Err(invalid("legacy_salary", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}
