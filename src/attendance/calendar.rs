//! Month view of day-level attendance.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::period_bounds;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{AttendanceStatus, RecordId};
use crate::store::StoreState;

/// Attendance status of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    /// The day.
    pub date: NaiveDate,
    /// Status of the most recent record that day, if any.
    pub status: Option<AttendanceStatus>,
    /// The record the status was taken from.
    pub record_id: Option<RecordId>,
    /// Hours credited by that record.
    pub hours_worked: Option<Decimal>,
    /// Whether the day is a Sunday.
    pub is_sunday: bool,
    /// Whether the day is a company holiday.
    pub is_holiday: bool,
}

/// Lists every day of the month with the employee's status on it.
///
/// When a day has several records the one with the highest id wins.
pub fn day_statuses(
    state: &StoreState,
    config: &EngineConfig,
    employee_id: &str,
    month: u32,
    year: i32,
) -> EngineResult<Vec<DayStatus>> {
    let (first, last) = period_bounds(month, year)?;
    let employee = state.employee(employee_id)?;
    let records = state.records_in_period(employee_id, month, year);

    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            let latest = records
                .iter()
                .filter(|r| r.date == date)
                .max_by_key(|r| r.id);

            DayStatus {
                date,
                status: latest.map(|r| r.status),
                record_id: latest.map(|r| r.id),
                hours_worked: latest
                    .filter(|r| r.status == AttendanceStatus::Present)
                    .map(|r| r.hours_worked(employee.standard_hours_per_day)),
                is_sunday: date.weekday() == Weekday::Sun,
                is_holiday: config.holidays().is_holiday(date),
            }
        })
        .collect();

    Ok(days)
}
