//! Attendance record model.
//!
//! One [`AttendanceRecord`] is written per check-in event, so a calendar day
//! may hold several records for the same employee.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{GeoPoint, RecordId, round_2dp};

/// Attendance status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// The employee attended.
    Present,
    /// The employee was marked absent.
    Absent,
}

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Checked in and not yet checked out.
    Open,
    /// Checked out, or never checked in.
    Closed,
}

/// A single attendance event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Monotonically assigned identifier. Higher means more recent.
    pub id: RecordId,
    /// Code of the owning employee.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Latitude at check-in.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude at check-in.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// When the employee checked in.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// When the employee checked out, if they have.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// Whether the check-out was triggered by location drift.
    #[serde(default)]
    pub auto_checkout: bool,
    /// Why the record was closed.
    #[serde(default)]
    pub checkout_reason: Option<String>,
    /// Whether the record falls on a Sunday.
    #[serde(default)]
    pub is_sunday: bool,
    /// Whether the record falls on a company holiday.
    #[serde(default)]
    pub is_holiday: bool,
    /// HR override of worked hours. Takes precedence over timestamps.
    #[serde(default)]
    pub manual_hours: Option<Decimal>,
    /// Why `manual_hours` was set.
    #[serde(default)]
    pub adjustment_reason: Option<String>,
}

impl AttendanceRecord {
    /// Creates an open `Present` record for a check-in at `now`.
    pub fn checked_in(
        id: RecordId,
        employee_id: impl Into<String>,
        location: GeoPoint,
        now: NaiveDateTime,
        is_holiday: bool,
    ) -> Self {
        let date = now.date();
        Self {
            id,
            employee_id: employee_id.into(),
            date,
            status: AttendanceStatus::Present,
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            check_in: Some(now),
            check_out: None,
            auto_checkout: false,
            checkout_reason: None,
            is_sunday: date.weekday() == Weekday::Sun,
            is_holiday,
            manual_hours: None,
            adjustment_reason: None,
        }
    }

    /// Creates an `Absent` record for `date` with no timestamps.
    pub fn absent(
        id: RecordId,
        employee_id: impl Into<String>,
        date: NaiveDate,
        is_holiday: bool,
    ) -> Self {
        Self {
            id,
            employee_id: employee_id.into(),
            date,
            status: AttendanceStatus::Absent,
            latitude: None,
            longitude: None,
            check_in: None,
            check_out: None,
            auto_checkout: false,
            checkout_reason: None,
            is_sunday: date.weekday() == Weekday::Sun,
            is_holiday,
            manual_hours: None,
            adjustment_reason: None,
        }
    }

    /// Returns the lifecycle state of the record.
    pub fn state(&self) -> RecordState {
        match (self.check_in, self.check_out) {
            (Some(_), None) => RecordState::Open,
            _ => RecordState::Closed,
        }
    }

    /// Returns true if the record is checked in but not checked out.
    pub fn is_open(&self) -> bool {
        self.state() == RecordState::Open
    }

    /// Closes the record at `now`.
    pub fn close(&mut self, now: NaiveDateTime, auto: bool, reason: impl Into<String>) {
        self.check_out = Some(now);
        self.auto_checkout = auto;
        self.checkout_reason = Some(reason.into());
    }

    /// Returns true if every hour of this record counts as overtime.
    pub fn is_premium_day(&self) -> bool {
        self.is_sunday || self.is_holiday
    }

    /// Calculates the hours worked on this record.
    ///
    /// In order of precedence:
    /// 1. A manual override is returned verbatim.
    /// 2. A closed record yields `check_out - check_in` in hours, rounded to 2 dp.
    /// 3. An open record is credited a full standard day.
    /// 4. A record without a check-in yields zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRecord, GeoPoint};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let check_in = NaiveDateTime::parse_from_str("2026-01-14 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let check_out = NaiveDateTime::parse_from_str("2026-01-14 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let mut record = AttendanceRecord::checked_in(1, "EMP001", GeoPoint::new(12.97, 77.59), check_in, false);
    /// assert_eq!(record.hours_worked(Decimal::from(8)), Decimal::from(8)); // open: standard day
    ///
    /// record.close(check_out, false, "Manual checkout");
    /// assert_eq!(record.hours_worked(Decimal::from(8)), Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn hours_worked(&self, standard_hours: Decimal) -> Decimal {
        if let Some(manual) = self.manual_hours {
            return manual;
        }

        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let seconds = (check_out - check_in).num_seconds().max(0);
                round_2dp(Decimal::from(seconds) / Decimal::from(3600))
            }
            (Some(_), None) => standard_hours,
            (None, _) => Decimal::ZERO,
        }
    }

    /// Hours paid at the regular rate: worked hours capped at the standard day.
    pub fn regular_hours(&self, standard_hours: Decimal) -> Decimal {
        self.hours_worked(standard_hours).min(standard_hours)
    }

    /// Hours paid at the overtime rate.
    ///
    /// On Sundays and holidays every worked hour is overtime; otherwise only
    /// the hours beyond the standard day are.
    pub fn overtime_hours(&self, standard_hours: Decimal) -> Decimal {
        let worked = self.hours_worked(standard_hours);
        if self.is_premium_day() {
            worked
        } else {
            (worked - standard_hours).max(Decimal::ZERO)
        }
    }

    /// Fraction of a standard day credited by this record, rounded to 2 dp.
    pub fn full_days_equivalent(&self, standard_hours: Decimal) -> Decimal {
        if standard_hours.is_zero() {
            return Decimal::ZERO;
        }
        round_2dp(self.regular_hours(standard_hours) / standard_hours)
    }
}
