//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the deployment configuration from YAML files: the
//! office geofence, payroll constants, and the company holiday calendar.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Office: {}", config.config().office().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, Holiday, HolidayCalendar, OfficeConfig, PayrollConfig};
