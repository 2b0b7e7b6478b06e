//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure calculation functions: great-circle
//! distance for the office geofence, per-record hours and overtime,
//! effective hourly rate resolution, and monthly salary aggregation.

mod geo_distance;
mod hourly_rate;
mod monthly_salary;
mod record_hours;

pub use geo_distance::{EARTH_RADIUS_METERS, distance_between, distance_meters};
pub use hourly_rate::{HourlyRateResult, RateSource, resolve_hourly_rate};
pub use monthly_salary::{calculate_monthly_salary, in_period, period_bounds};
pub use record_hours::{RecordHoursResult, resolve_record_hours};
