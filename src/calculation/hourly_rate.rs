//! Effective hourly rate resolution.
//!
//! Every employee has exactly one effective hourly rate, used for hourly
//! base pay and for overtime under both pay models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, PayModel};

/// Where an effective hourly rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// The rate configured on the pay model.
    PayModel,
    /// Derived from the legacy flat salary.
    LegacySalary,
    /// Derived from the monthly amount when no legacy salary exists.
    MonthlyAmount,
}

/// The result of a rate resolution, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The effective hourly rate.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Determines an employee's effective hourly rate.
///
/// Priority:
/// 1. The explicit rate on the pay model (`Hourly.rate` or `Monthly.hourly_rate`).
/// 2. Otherwise the legacy flat salary, or failing that the monthly amount,
///    divided by `standard_hours_per_day × legacy_working_days`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::{resolve_hourly_rate, RateSource};
/// use attendance_engine::config::PayrollConfig;
/// use attendance_engine::models::{Employee, PayModel};
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new(
///     "EMP002",
///     "Ravi Kumar",
///     PayModel::Monthly { amount: Decimal::from(26000), hourly_rate: None },
///     Decimal::from(8),
///     Decimal::new(15, 1),
/// );
/// employee.legacy_salary = Some(Decimal::from(22000));
///
/// let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 1).unwrap();
/// // 22000 / (8 × 22) = 125
/// assert_eq!(result.rate, Decimal::from(125));
/// assert_eq!(result.source, RateSource::LegacySalary);
/// ```
pub fn resolve_hourly_rate(
    employee: &Employee,
    config: &PayrollConfig,
    step_number: u32,
) -> EngineResult<HourlyRateResult> {
    if let Some(rate) = employee.pay_model.explicit_hourly_rate() {
        let audit_step = AuditStep {
            step_number,
            rule_id: "hourly_rate_resolution".to_string(),
            rule_name: "Hourly Rate Resolution".to_string(),
            input: serde_json::json!({
                "pay_model": employee.pay_model.kind(),
                "explicit_rate": rate.to_string()
            }),
            output: serde_json::json!({
                "rate": rate.normalize().to_string(),
                "source": RateSource::PayModel
            }),
            reasoning: format!("Using configured hourly rate {}", rate.normalize()),
        };
        return Ok(HourlyRateResult {
            rate,
            source: RateSource::PayModel,
            audit_step,
        });
    }

    let (salary, source) = match (employee.legacy_salary, employee.pay_model) {
        (Some(legacy), _) => (legacy, RateSource::LegacySalary),
        (None, PayModel::Monthly { amount, .. }) => (amount, RateSource::MonthlyAmount),
        // Hourly models always carry an explicit rate.
        (None, PayModel::Hourly { rate }) => (rate, RateSource::PayModel),
    };

    let monthly_hours = employee
        .standard_hours_per_day
        .checked_mul(config.legacy_working_days)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("monthly hours for '{}' are out of range", employee.id),
        })?;
    if monthly_hours.is_zero() {
        return Err(EngineError::CalculationError {
            message: format!(
                "cannot derive an hourly rate for '{}': zero standard hours per month",
                employee.id
            ),
        });
    }

    let rate = salary
        .checked_div(monthly_hours)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("hourly rate for '{}' is out of range", employee.id),
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate_resolution".to_string(),
        rule_name: "Hourly Rate Resolution".to_string(),
        input: serde_json::json!({
            "pay_model": employee.pay_model.kind(),
            "salary": salary.normalize().to_string(),
            "standard_hours_per_day": employee.standard_hours_per_day.normalize().to_string(),
            "working_days": config.legacy_working_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "source": source
        }),
        reasoning: format!(
            "No explicit hourly rate: {} / ({} h × {} days) = {}",
            salary.normalize(),
            employee.standard_hours_per_day.normalize(),
            config.legacy_working_days.normalize(),
            rate.normalize()
        ),
    };

    Ok(HourlyRateResult {
        rate,
        source,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(pay_model: PayModel) -> Employee {
        Employee::new("EMP001", "Asha Rao", pay_model, dec("8"), dec("1.5"))
    }

    #[test]
    fn test_hourly_model_uses_its_rate() {
        let employee = create_test_employee(PayModel::Hourly { rate: dec("100") });
        let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 1).unwrap();

        assert_eq!(result.rate, dec("100"));
        assert_eq!(result.source, RateSource::PayModel);
        assert_eq!(result.audit_step.rule_id, "hourly_rate_resolution");
        assert_eq!(result.audit_step.output["source"], "pay_model");
    }

    #[test]
    fn test_monthly_model_with_explicit_rate() {
        let employee = create_test_employee(PayModel::Monthly {
            amount: dec("26000"),
            hourly_rate: Some(dec("150")),
        });
        let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 1).unwrap();

        assert_eq!(result.rate, dec("150"));
        assert_eq!(result.source, RateSource::PayModel);
    }

    #[test]
    fn test_legacy_salary_fallback() {
        let mut employee = create_test_employee(PayModel::Monthly {
            amount: dec("26000"),
            hourly_rate: None,
        });
        employee.legacy_salary = Some(dec("17600"));
        let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 3).unwrap();

        // 17600 / 176 = 100
        assert_eq!(result.rate, dec("100"));
        assert_eq!(result.source, RateSource::LegacySalary);
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_monthly_amount_fallback_without_legacy_salary() {
        let employee = create_test_employee(PayModel::Monthly {
            amount: dec("35200"),
            hourly_rate: None,
        });
        let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 1).unwrap();

        // 35200 / 176 = 200
        assert_eq!(result.rate, dec("200"));
        assert_eq!(result.source, RateSource::MonthlyAmount);
    }

    #[test]
    fn test_zero_standard_hours_is_an_error() {
        let mut employee = create_test_employee(PayModel::Monthly {
            amount: dec("26000"),
            hourly_rate: None,
        });
        employee.standard_hours_per_day = Decimal::ZERO;

        let result = resolve_hourly_rate(&employee, &PayrollConfig::default(), 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
