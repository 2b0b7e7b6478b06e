//! Attendance state machine.
//!
//! Every transition here takes a `&mut StoreState`, which callers obtain
//! from [`crate::store::AttendanceStore::transaction`]. Looking up the open
//! record and mutating it therefore happen under one write guard.
//!
//! An employee is checked in while `Employee::open_record` points at a
//! record. Transitions only act on an open record dated today; a pointer
//! left over from an earlier day is released without touching its record.
//! At most one record per employee and day is open. Records from earlier
//! days that were never checked out stay open, and payroll counts each as
//! a standard day with a warning.

mod calendar;
mod checkin;
mod checkout;
mod corrections;
mod tracking;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::EngineResult;
use crate::models::RecordId;
use crate::store::StoreState;

pub use calendar::{DayStatus, day_statuses};
pub use checkin::{CheckInOutcome, CheckInRejection, check_in};
pub use checkout::{CheckOutOutcome, MANUAL_CHECKOUT_REASON, check_out};
pub use corrections::{HoursCorrection, correct_record_hours, mark_absent};
pub use tracking::{LocationPingOutcome, auto_checkout, location_ping};

/// Where an employee's open-record pointer leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenRecord {
    /// Not checked in.
    None,
    /// An open record dated today.
    Today(RecordId),
    /// A pointer to a record from another day, or to a record that is no
    /// longer open.
    Stale(RecordId),
}

/// Resolves the employee's open-record pointer against `today`.
///
/// Only the pointer is consulted. An employee may still own open records
/// from earlier days; this guards against a second open record today, not
/// against open records in general.
pub(crate) fn find_open_record(
    state: &StoreState,
    employee_id: &str,
    today: NaiveDate,
) -> EngineResult<OpenRecord> {
    let employee = state.employee(employee_id)?;
    let Some(record_id) = employee.open_record else {
        return Ok(OpenRecord::None);
    };

    match state.record(record_id) {
        Ok(record) if record.is_open() && record.date == today => Ok(OpenRecord::Today(record_id)),
        _ => Ok(OpenRecord::Stale(record_id)),
    }
}

/// Clears a stale open-record pointer. The record itself is left open.
pub(crate) fn release_stale_pointer(
    state: &mut StoreState,
    employee_id: &str,
    record_id: RecordId,
) -> EngineResult<()> {
    warn!(
        employee_id = %employee_id,
        record_id = record_id,
        "Releasing stale open record from an earlier day"
    );
    state.employee_mut(employee_id)?.open_record = None;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    use crate::config::{EngineConfig, Holiday, HolidayCalendar, OfficeConfig, PayrollConfig};
    use crate::models::{Employee, GeoPoint, PayModel};
    use crate::store::StoreState;

    pub const OFFICE_LAT: f64 = 12.971599;
    pub const OFFICE_LON: f64 = 77.594566;

    pub fn office() -> GeoPoint {
        GeoPoint::new(OFFICE_LAT, OFFICE_LON)
    }

    /// Roughly 150 m north of the office.
    pub fn far_point() -> GeoPoint {
        GeoPoint::new(OFFICE_LAT + 0.00135, OFFICE_LON)
    }

    /// Roughly 50 m north of the office.
    pub fn near_point() -> GeoPoint {
        GeoPoint::new(OFFICE_LAT + 0.00045, OFFICE_LON)
    }

    pub fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    pub fn config() -> EngineConfig {
        EngineConfig::new(
            OfficeConfig {
                name: "Head Office".to_string(),
                latitude: OFFICE_LAT,
                longitude: OFFICE_LON,
                proximity_threshold_meters: 100.0,
            },
            PayrollConfig::default(),
            HolidayCalendar {
                holidays: vec![Holiday {
                    date: chrono::NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
                    name: "Republic Day".to_string(),
                }],
            },
        )
    }

    pub fn state_with(employees: &[(&str, bool)]) -> StoreState {
        let mut state = StoreState::default();
        for (id, is_manager) in employees {
            let mut employee = Employee::new(
                *id,
                "Test Employee",
                PayModel::Hourly {
                    rate: Decimal::from(100),
                },
                Decimal::from(8),
                Decimal::new(15, 1),
            );
            employee.is_manager = *is_manager;
            state.insert_employee(employee).unwrap();
        }
        state
    }
}
