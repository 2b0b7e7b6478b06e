//! Geofenced check-in.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{OpenRecord, find_open_record, release_stale_pointer};
use crate::calculation::distance_between;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, GeoPoint, LiveLocation, RecordId};
use crate::store::StoreState;

/// Why a check-in was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInRejection {
    /// The employee is outside the office proximity threshold.
    TooFarFromOffice,
    /// The employee already has an open record today.
    AlreadyCheckedIn,
}

/// Result of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    /// Whether a record was created.
    pub accepted: bool,
    /// Distance from the office in meters.
    pub distance_meters: f64,
    /// Set when the check-in was refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<CheckInRejection>,
    /// Human readable message.
    pub message: String,
    /// The new record, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

/// Checks an employee in at `location`.
///
/// Refusals are reported in the outcome and leave the store untouched,
/// including the employee's last known location. On success a `Present`
/// record is opened with the Sunday and holiday flags derived from `now`.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if the employee does not exist.
pub fn check_in(
    state: &mut StoreState,
    config: &EngineConfig,
    employee_id: &str,
    location: GeoPoint,
    now: NaiveDateTime,
) -> EngineResult<CheckInOutcome> {
    let office = config.office();
    let distance = distance_between(location, office.location());
    let today = now.date();

    let open = find_open_record(state, employee_id, today)?;

    if !office.is_within_range(distance) {
        warn!(
            employee_id = %employee_id,
            distance_meters = distance,
            threshold_meters = office.proximity_threshold_meters,
            "Check-in rejected: too far from office"
        );
        return Ok(CheckInOutcome {
            accepted: false,
            distance_meters: distance,
            rejection: Some(CheckInRejection::TooFarFromOffice),
            message: format!(
                "You are {}m from {}. Check-in requires being within {}m.",
                distance.round(),
                office.name,
                office.proximity_threshold_meters
            ),
            record_id: None,
        });
    }

    match open {
        OpenRecord::Today(record_id) => {
            warn!(
                employee_id = %employee_id,
                record_id = record_id,
                "Check-in rejected: already checked in today"
            );
            return Ok(CheckInOutcome {
                accepted: false,
                distance_meters: distance,
                rejection: Some(CheckInRejection::AlreadyCheckedIn),
                message: "Already checked in today".to_string(),
                record_id: Some(record_id),
            });
        }
        OpenRecord::Stale(record_id) => release_stale_pointer(state, employee_id, record_id)?,
        OpenRecord::None => {}
    }

    let record_id = state.next_record_id();
    let is_holiday = config.holidays().is_holiday(today);
    state.insert_record(AttendanceRecord::checked_in(
        record_id,
        employee_id,
        location,
        now,
        is_holiday,
    ));

    let employee = state.employee_mut(employee_id)?;
    employee.open_record = Some(record_id);
    employee.last_location = Some(LiveLocation {
        point: location,
        updated_at: now,
    });

    info!(
        employee_id = %employee_id,
        record_id = record_id,
        distance_meters = distance,
        is_holiday = is_holiday,
        "Check-in accepted"
    );

    Ok(CheckInOutcome {
        accepted: true,
        distance_meters: distance,
        rejection: None,
        message: format!("Checked in at {}", office.name),
        record_id: Some(record_id),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::AttendanceStatus;

    #[test]
    fn test_check_in_at_office_succeeds() {
        let mut state = state_with(&[("EMP001", false)]);
        let now = make_datetime("2026-01-14 09:00:00");

        let outcome = check_in(&mut state, &config(), "EMP001", office(), now).unwrap();

        assert!(outcome.accepted);
        assert!(outcome.distance_meters < 1.0);
        let record_id = outcome.record_id.unwrap();
        let record = state.record(record_id).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in, Some(now));
        assert!(record.is_open());
        assert!(!record.is_sunday);
        assert!(!record.is_holiday);

        let employee = state.employee("EMP001").unwrap();
        assert_eq!(employee.open_record, Some(record_id));
        assert_eq!(employee.last_location.unwrap().point, office());
    }

    #[test]
    fn test_check_in_within_threshold_succeeds() {
        let mut state = state_with(&[("EMP001", false)]);
        let outcome = check_in(
            &mut state,
            &config(),
            "EMP001",
            near_point(),
            make_datetime("2026-01-14 09:00:00"),
        )
        .unwrap();

        assert!(outcome.accepted);
        assert!(outcome.distance_meters > 45.0 && outcome.distance_meters < 55.0);
    }

    #[test]
    fn test_check_in_too_far_creates_nothing() {
        let mut state = state_with(&[("EMP001", false)]);

        let outcome = check_in(
            &mut state,
            &config(),
            "EMP001",
            far_point(),
            make_datetime("2026-01-14 09:00:00"),
        )
        .unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.rejection, Some(CheckInRejection::TooFarFromOffice));
        assert!(outcome.distance_meters > 140.0 && outcome.distance_meters < 160.0);
        assert!(outcome.record_id.is_none());
        assert_eq!(state.records_for("EMP001").count(), 0);

        let employee = state.employee("EMP001").unwrap();
        assert!(!employee.is_checked_in());
        assert!(employee.last_location.is_none());
    }

    #[test]
    fn test_second_check_in_same_day_rejected() {
        let mut state = state_with(&[("EMP001", false)]);
        let config = config();
        let first = check_in(
            &mut state,
            &config,
            "EMP001",
            office(),
            make_datetime("2026-01-14 09:00:00"),
        )
        .unwrap();

        let second = check_in(
            &mut state,
            &config,
            "EMP001",
            office(),
            make_datetime("2026-01-14 11:00:00"),
        )
        .unwrap();

        assert!(!second.accepted);
        assert_eq!(second.rejection, Some(CheckInRejection::AlreadyCheckedIn));
        assert_eq!(second.record_id, first.record_id);
        assert_eq!(state.records_for("EMP001").count(), 1);
    }

    #[test]
    fn test_check_in_releases_stale_record_from_earlier_day() {
        let mut state = state_with(&[("EMP001", false)]);
        let config = config();
        let yesterday = check_in(
            &mut state,
            &config,
            "EMP001",
            office(),
            make_datetime("2026-01-13 09:00:00"),
        )
        .unwrap()
        .record_id
        .unwrap();

        let today = check_in(
            &mut state,
            &config,
            "EMP001",
            office(),
            make_datetime("2026-01-14 09:00:00"),
        )
        .unwrap();

        assert!(today.accepted);
        let today_id = today.record_id.unwrap();
        assert!(today_id > yesterday);
        assert_eq!(state.employee("EMP001").unwrap().open_record, Some(today_id));
        assert!(state.record(yesterday).unwrap().check_out.is_none());
    }

    #[test]
    fn test_check_in_flags_sunday_and_holiday() {
        let mut state = state_with(&[("EMP001", false), ("EMP002", false)]);
        let config = config();

        let sunday = check_in(
            &mut state,
            &config,
            "EMP001",
            office(),
            make_datetime("2026-01-18 09:00:00"),
        )
        .unwrap();
        let holiday = check_in(
            &mut state,
            &config,
            "EMP002",
            office(),
            make_datetime("2026-01-26 09:00:00"),
        )
        .unwrap();

        let sunday = state.record(sunday.record_id.unwrap()).unwrap();
        assert!(sunday.is_sunday);
        assert!(!sunday.is_holiday);

        let holiday = state.record(holiday.record_id.unwrap()).unwrap();
        assert!(!holiday.is_sunday);
        assert!(holiday.is_holiday);
    }

    #[test]
    fn test_check_in_unknown_employee_errors() {
        let mut state = state_with(&[]);
        let result = check_in(
            &mut state,
            &config(),
            "GHOST",
            office(),
            make_datetime("2026-01-14 09:00:00"),
        );
        assert!(result.is_err());
    }
}
