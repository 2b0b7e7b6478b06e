//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while tracking attendance and
//! computing payroll. Business outcomes such as a rejected check-in are not
//! errors; they are reported through the outcome types in
//! [`crate::attendance`].

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "EMP042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given code.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee code that was not found.
        employee_id: String,
    },

    /// An employee with the given code already exists.
    #[error("Employee already exists: {employee_id}")]
    EmployeeAlreadyExists {
        /// The duplicated employee code.
        employee_id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No attendance record exists with the given identifier.
    #[error("Attendance record not found: {record_id}")]
    RecordNotFound {
        /// The record identifier that was not found.
        record_id: u64,
    },

    /// A correction to an attendance record was rejected.
    #[error("Invalid correction for record {record_id}: {message}")]
    InvalidRecord {
        /// The record being corrected.
        record_id: u64,
        /// A description of what made the correction invalid.
        message: String,
    },

    /// A salary adjustment was rejected.
    #[error("Invalid salary adjustment: {message}")]
    InvalidAdjustment {
        /// A description of what made the adjustment invalid.
        message: String,
    },

    /// A payroll period was out of range.
    #[error("Invalid payroll period {month}/{year}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// The acting user is not allowed to perform a manager action.
    #[error("Permission denied for '{actor}': {action} requires a manager")]
    PermissionDenied {
        /// The acting user's employee code.
        actor: String,
        /// The attempted action.
        action: String,
    },

    /// The attendance store could not be accessed.
    #[error("Attendance store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/office.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/office.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_employee_already_exists_displays_code() {
        let error = EngineError::EmployeeAlreadyExists {
            employee_id: "EMP001".to_string(),
        };
        assert_eq!(error.to_string(), "Employee already exists: EMP001");
    }

    #[test]
    fn test_invalid_period_displays_month_and_year() {
        let error = EngineError::InvalidPeriod {
            month: 13,
            year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll period 13/2026: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_permission_denied_displays_actor_and_action() {
        let error = EngineError::PermissionDenied {
            actor: "EMP007".to_string(),
            action: "salary adjustment".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Permission denied for 'EMP007': salary adjustment requires a manager"
        );
    }

    #[test]
    fn test_invalid_record_displays_id_and_message() {
        let error = EngineError::InvalidRecord {
            record_id: 4,
            message: "manual hours cannot exceed 24".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid correction for record 4: manual hours cannot exceed 24"
        );
    }

    #[test]
    fn test_record_not_found_displays_id() {
        let error = EngineError::RecordNotFound { record_id: 17 };
        assert_eq!(error.to_string(), "Attendance record not found: 17");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
