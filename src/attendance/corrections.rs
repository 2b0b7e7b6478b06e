//! Manager overrides of attendance data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, RecordId};
use crate::store::StoreState;

const MAX_HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// An HR override of a record's worked hours.
///
/// `manual_hours: None` clears a previous override, after which the record
/// is measured from its timestamps again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursCorrection {
    /// Hours to credit, between 0 and 24.
    pub manual_hours: Option<Decimal>,
    /// Why the hours were changed. Required when setting hours.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Sets or clears the manual hours of an existing record.
///
/// # Errors
///
/// - `PermissionDenied` if `actor` is not a manager.
/// - `RecordNotFound` if the record does not exist.
/// - `InvalidRecord` if the hours are out of range or the reason is missing.
pub fn correct_record_hours(
    state: &mut StoreState,
    actor: &str,
    record_id: RecordId,
    correction: HoursCorrection,
) -> EngineResult<AttendanceRecord> {
    state.require_manager(actor, "hours correction")?;
    state.record(record_id)?;

    let (manual_hours, reason) = match correction.manual_hours {
        Some(hours) => {
            if hours < Decimal::ZERO || hours > MAX_HOURS_PER_DAY {
                return Err(EngineError::InvalidRecord {
                    record_id,
                    message: format!("manual hours must be between 0 and 24, got {hours}"),
                });
            }
            let reason = correction
                .reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .ok_or_else(|| EngineError::InvalidRecord {
                    record_id,
                    message: "a reason is required when overriding hours".to_string(),
                })?;
            (Some(hours), Some(reason))
        }
        None => (None, None),
    };

    let record = state.record_mut(record_id)?;
    record.manual_hours = manual_hours;
    record.adjustment_reason = reason;

    info!(
        actor = %actor,
        record_id = record_id,
        employee_id = %record.employee_id,
        manual_hours = ?record.manual_hours,
        "Record hours corrected"
    );

    Ok(record.clone())
}

/// Records an employee as absent on `date`.
///
/// The new record has the highest id, so it becomes the day's status in the
/// attendance calendar. Absent records never contribute to payroll.
pub fn mark_absent(
    state: &mut StoreState,
    config: &EngineConfig,
    actor: &str,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<AttendanceRecord> {
    state.require_manager(actor, "marking absence")?;
    state.employee(employee_id)?;

    let record_id = state.next_record_id();
    let record = AttendanceRecord::absent(
        record_id,
        employee_id,
        date,
        config.holidays().is_holiday(date),
    );
    state.insert_record(record.clone());

    info!(
        actor = %actor,
        employee_id = %employee_id,
        record_id = record_id,
        date = %date,
        "Marked absent"
    );

    Ok(record)
}
