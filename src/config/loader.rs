//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the deployment
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, HolidayCalendar, OfficeConfig, PayrollConfig};

/// Loads and provides access to the deployment configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── office.yaml    # Office coordinates and proximity threshold
/// ├── payroll.yaml   # Working-day and overtime constants
/// └── holidays.yaml  # Company holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Office: {}", loader.config().office().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML, or
    /// holds values the engine cannot work with (a non-positive proximity
    /// threshold or working-day count).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let office_path = path.join("office.yaml");
        let office = Self::load_yaml::<OfficeConfig>(&office_path)?;
        Self::validate_office(&office, &office_path)?;

        let payroll_path = path.join("payroll.yaml");
        let payroll = Self::load_yaml::<PayrollConfig>(&payroll_path)?;
        Self::validate_payroll(&payroll, &payroll_path)?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidayCalendar>(&holidays_path)?;

        Ok(Self {
            config: EngineConfig::new(office, payroll, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_office(office: &OfficeConfig, path: &Path) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if !(-90.0..=90.0).contains(&office.latitude) {
            return Err(invalid("latitude must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&office.longitude) {
            return Err(invalid("longitude must be between -180 and 180"));
        }
        if !(office.proximity_threshold_meters > 0.0) {
            return Err(invalid("proximity_threshold_meters must be positive"));
        }
        Ok(())
    }

    fn validate_payroll(payroll: &PayrollConfig, path: &Path) -> EngineResult<()> {
        let positive = [
            ("monthly_working_days", payroll.monthly_working_days),
            ("legacy_working_days", payroll.legacy_working_days),
            ("default_standard_hours", payroll.default_standard_hours),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("{} must be positive", field),
                });
            }
        }
        if payroll.default_overtime_multiplier < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "default_overtime_multiplier must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying deployment configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the deployment configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
