//! Configuration types for attendance tracking and payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::GeoPoint;

/// The office geofence.
///
/// Employees may only check in within `proximity_threshold_meters` of the
/// office, and are checked out automatically when a location ping places
/// them further away.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficeConfig {
    /// Human-readable office name.
    pub name: String,
    /// Office latitude in degrees.
    pub latitude: f64,
    /// Office longitude in degrees.
    pub longitude: f64,
    /// Radius around the office, in meters, inside which an employee counts as present.
    pub proximity_threshold_meters: f64,
}

impl OfficeConfig {
    /// Returns the office coordinates as a [`GeoPoint`].
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Returns true if `distance_meters` lies inside the geofence.
    ///
    /// The boundary itself is inside: a distance equal to the threshold is accepted.
    pub fn is_within_range(&self, distance_meters: f64) -> bool {
        distance_meters <= self.proximity_threshold_meters
    }
}

/// Payroll constants from payroll.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Assumed working days per month for the monthly pay model (26).
    pub monthly_working_days: Decimal,
    /// Assumed working days per month when deriving an hourly rate from a legacy flat salary (22).
    pub legacy_working_days: Decimal,
    /// Standard hours per day for employees created without an explicit value.
    pub default_standard_hours: Decimal,
    /// Overtime multiplier for employees created without an explicit value.
    pub default_overtime_multiplier: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            monthly_working_days: Decimal::from(26),
            legacy_working_days: Decimal::from(22),
            default_standard_hours: Decimal::from(8),
            default_overtime_multiplier: Decimal::new(15, 1),
        }
    }
}

/// A company holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Holidays configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayCalendar {
    /// All configured holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Returns the holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }

    /// Returns true if `date` is a configured holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_on(date).is_some()
    }
}

/// The complete deployment configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    office: OfficeConfig,
    payroll: PayrollConfig,
    holidays: HolidayCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(office: OfficeConfig, payroll: PayrollConfig, holidays: HolidayCalendar) -> Self {
        Self {
            office,
            payroll,
            holidays,
        }
    }

    /// Returns the office geofence.
    pub fn office(&self) -> &OfficeConfig {
        &self.office
    }

    /// Returns the payroll constants.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}
