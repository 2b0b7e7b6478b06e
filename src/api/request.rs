//! Request types for the Attendance Engine API.
//!
//! Timestamps are optional local date-times; when omitted the server's
//! current local time is used.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::models::{Employee, GeoPoint, PayModel};

use super::response::ApiError;

fn now_or(timestamp: Option<NaiveDateTime>) -> NaiveDateTime {
    timestamp.unwrap_or_else(|| Local::now().naive_local())
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Unique employee code.
    pub id: String,
    /// Display name.
    pub name: String,
    /// How the employee is paid.
    pub pay_model: PayModel,
    /// Legacy flat salary used as a rate fallback.
    #[serde(default)]
    pub legacy_salary: Option<Decimal>,
    /// Standard hours per day. Defaults to the payroll configuration.
    #[serde(default)]
    pub standard_hours_per_day: Option<Decimal>,
    /// Overtime multiplier. Defaults to the payroll configuration.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Whether the employee may perform manager actions.
    #[serde(default)]
    pub is_manager: bool,
}

impl CreateEmployeeRequest {
    /// Builds the employee, filling unset fields from `defaults`.
    pub fn into_employee(self, defaults: &PayrollConfig) -> Employee {
        let mut employee = Employee::new(
            self.id,
            self.name,
            self.pay_model,
            self.standard_hours_per_day
                .unwrap_or(defaults.default_standard_hours),
            self.overtime_multiplier
                .unwrap_or(defaults.default_overtime_multiplier),
        );
        employee.legacy_salary = self.legacy_salary;
        employee.is_manager = self.is_manager;
        employee
    }
}

/// Request body for `PUT /employees/:employee_id/pay`.
///
/// The pay model is replaced wholesale; optional fields left out keep their
/// current values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePayRequest {
    /// The new pay model.
    pub pay_model: PayModel,
    /// New legacy salary.
    #[serde(default)]
    pub legacy_salary: Option<Decimal>,
    /// New standard hours per day.
    #[serde(default)]
    pub standard_hours_per_day: Option<Decimal>,
    /// New overtime multiplier.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
}

impl UpdatePayRequest {
    /// Applies the change to `employee`.
    pub fn apply(self, employee: &mut Employee) {
        employee.pay_model = self.pay_model;
        if let Some(salary) = self.legacy_salary {
            employee.legacy_salary = Some(salary);
        }
        if let Some(hours) = self.standard_hours_per_day {
            employee.standard_hours_per_day = hours;
        }
        if let Some(multiplier) = self.overtime_multiplier {
            employee.overtime_multiplier = multiplier;
        }
    }
}

/// Request body for `POST /attendance/check-in` and
/// `POST /attendance/location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    /// The employee reporting their position.
    pub employee_id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// When the position was taken.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl LocationRequest {
    /// Returns the reported point if its coordinates are usable.
    pub fn point(&self) -> Result<GeoPoint, ApiError> {
        let point = GeoPoint::new(self.latitude, self.longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(ApiError::with_details(
                "VALIDATION_ERROR",
                "Invalid coordinates",
                format!(
                    "latitude must be within [-90, 90] and longitude within [-180, 180], got ({}, {})",
                    self.latitude, self.longitude
                ),
            ))
        }
    }

    /// The event time.
    pub fn at(&self) -> NaiveDateTime {
        now_or(self.timestamp)
    }
}

/// Request body for `POST /attendance/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// The employee checking out.
    pub employee_id: String,
    /// When the employee checked out.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl CheckOutRequest {
    /// The event time.
    pub fn at(&self) -> NaiveDateTime {
        now_or(self.timestamp)
    }
}

/// Request body for `POST /attendance/absence`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// The manager recording the absence.
    pub actor: String,
    /// The absent employee.
    pub employee_id: String,
    /// The day of the absence.
    pub date: NaiveDate,
}

/// Request body for `PATCH /attendance/records/:record_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectHoursRequest {
    /// The manager making the correction.
    pub actor: String,
    /// Hours to credit, or null to clear an override.
    pub manual_hours: Option<Decimal>,
    /// Why the hours were changed.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query string of the calendar and payroll endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

/// Request body for `PUT /payroll/:employee_id/adjustment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentBody {
    /// The manager making the adjustment.
    pub actor: String,
    /// Calendar year of the payroll month.
    pub year: i32,
    /// The payroll month.
    pub month: u32,
    /// The salary to pay.
    pub adjusted_salary: Decimal,
    /// Why the salary was changed.
    pub reason: String,
    /// When the adjustment was made.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl AdjustmentBody {
    /// The event time.
    pub fn at(&self) -> NaiveDateTime {
        now_or(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayModelKind;

    #[test]
    fn test_create_employee_defaults_from_config() {
        let json = r#"{
            "id": "EMP001",
            "name": "Asha Rao",
            "pay_model": { "model": "monthly", "amount": "26000" }
        }"#;

        let request: CreateEmployeeRequest = serde_json::from_str(json).unwrap();
        let employee = request.into_employee(&PayrollConfig::default());

        assert_eq!(employee.pay_model.kind(), PayModelKind::Monthly);
        assert_eq!(employee.standard_hours_per_day, Decimal::from(8));
        assert_eq!(employee.overtime_multiplier, Decimal::new(15, 1));
        assert!(!employee.is_manager);
    }

    #[test]
    fn test_location_request_validates_coordinates() {
        let mut request = LocationRequest {
            employee_id: "EMP001".to_string(),
            latitude: 12.97,
            longitude: 77.59,
            timestamp: None,
        };
        assert!(request.point().is_ok());

        request.latitude = 95.0;
        let error = request.point().unwrap_err();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_explicit_timestamp_is_used() {
        let json = r#"{ "employee_id": "EMP001", "timestamp": "2026-01-14T17:30:00" }"#;
        let request: CheckOutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.at().to_string(), "2026-01-14 17:30:00");
    }

    #[test]
    fn test_update_pay_keeps_unset_fields() {
        let mut employee = Employee::new(
            "EMP001",
            "Asha Rao",
            PayModel::Hourly {
                rate: Decimal::from(100),
            },
            Decimal::from(9),
            Decimal::from(2),
        );
        UpdatePayRequest {
            pay_model: PayModel::Hourly {
                rate: Decimal::from(120),
            },
            legacy_salary: None,
            standard_hours_per_day: None,
            overtime_multiplier: None,
        }
        .apply(&mut employee);

        assert_eq!(employee.pay_model.explicit_hourly_rate(), Some(Decimal::from(120)));
        assert_eq!(employee.standard_hours_per_day, Decimal::from(9));
        assert_eq!(employee.overtime_multiplier, Decimal::from(2));
    }
}
