//! Monthly salary calculation.
//!
//! Aggregates a month of attendance into a salary under the employee's pay
//! model. The calculation only reads the records it is given.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, AuditStep, AuditTrace, AuditWarning, Employee, PayModel,
    PayrollLine, PayrollResult, PayrollTotals, round_2dp,
};

use super::{resolve_hourly_rate, resolve_record_hours};

/// Returns the first and last day of a payroll month.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::period_bounds;
/// use chrono::NaiveDate;
///
/// let (first, last) = period_bounds(2, 2028).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
/// assert!(period_bounds(13, 2028).is_err());
/// ```
pub fn period_bounds(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidPeriod { month, year };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_month.pred_opt().ok_or_else(invalid)?;

    Ok((first, last))
}

fn overflowed(employee: &Employee, what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} for '{}' is out of range", what, employee.id),
    }
}

/// Calculates an employee's salary for one month.
///
/// Only `Present` records belonging to the employee and dated within the
/// month contribute; all other records are ignored.
///
/// - Hourly model: `total_hours × hourly_rate`.
/// - Monthly model: `Σ regular_hours / (standard_hours × monthly_working_days) × amount`,
///   so pay is prorated by attendance and a day never earns more than a
///   standard day of base pay.
/// - Overtime, for both models: `overtime_hours × hourly_rate × overtime_multiplier`.
///
/// Monetary totals are rounded to two decimal places. Amounts too large to
/// represent fail with `CalculationError` rather than panicking.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_monthly_salary;
/// use attendance_engine::config::PayrollConfig;
/// use attendance_engine::models::{AttendanceRecord, Employee, GeoPoint, PayModel};
/// use chrono::{Duration, NaiveDate};
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "EMP001",
///     "Asha Rao",
///     PayModel::Hourly { rate: Decimal::from(100) },
///     Decimal::from(8),
///     Decimal::new(15, 1),
/// );
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let mut record = AttendanceRecord::checked_in(1, "EMP001", GeoPoint::new(12.97, 77.59), start, false);
/// record.close(start + Duration::hours(10), false, "Manual checkout");
///
/// let result = calculate_monthly_salary(&employee, &[record], 1, 2026, &PayrollConfig::default()).unwrap();
/// assert_eq!(result.totals.base_salary, Decimal::from(1000));
/// // 2 overtime hours × 100 × 1.5
/// assert_eq!(result.totals.overtime_pay, Decimal::from(300));
/// assert_eq!(result.totals.total_salary, Decimal::from(1300));
/// ```
pub fn calculate_monthly_salary(
    employee: &Employee,
    records: &[AttendanceRecord],
    month: u32,
    year: i32,
    config: &PayrollConfig,
) -> EngineResult<PayrollResult> {
    let started = Instant::now();
    let (first_day, last_day) = period_bounds(month, year)?;
    let standard_hours = employee.standard_hours_per_day;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let mut selected: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .filter(|r| r.status == AttendanceStatus::Present)
        .filter(|r| r.date >= first_day && r.date <= last_day)
        .collect();
    selected.sort_by_key(|r| r.id);

    let mut lines: Vec<PayrollLine> = Vec::with_capacity(selected.len());
    for record in &selected {
        let resolved = resolve_record_hours(record, standard_hours, step_number);
        if resolved.line.open {
            warnings.push(AuditWarning {
                code: "OPEN_RECORD_ASSUMED_FULL_DAY".to_string(),
                message: format!(
                    "Record {} on {} has no check-out; counted as {} standard hours",
                    record.id,
                    record.date,
                    standard_hours.normalize()
                ),
                severity: "low".to_string(),
            });
        }
        steps.push(resolved.audit_step);
        lines.push(resolved.line);
        step_number += 1;
    }

    let total_hours: Decimal = lines.iter().map(|l| l.hours_worked).sum();
    let regular_hours: Decimal = lines.iter().map(|l| l.regular_hours).sum();
    let overtime_hours: Decimal = lines.iter().map(|l| l.overtime_hours).sum();
    let full_days_equivalent: Decimal = lines.iter().map(|l| l.full_days_equivalent).sum();
    let days_present = lines.iter().map(|l| l.date).collect::<BTreeSet<_>>().len() as u32;

    let rate_result = resolve_hourly_rate(employee, config, step_number)?;
    let hourly_rate = rate_result.rate;
    steps.push(rate_result.audit_step);
    step_number += 1;

    let (base_salary, daily_rate, base_step) = match employee.pay_model {
        PayModel::Hourly { .. } => {
            let base = total_hours
                .checked_mul(hourly_rate)
                .map(round_2dp)
                .ok_or_else(|| overflowed(employee, "hourly base pay"))?;
            let step = AuditStep {
                step_number,
                rule_id: "hourly_base_pay".to_string(),
                rule_name: "Hourly Base Pay".to_string(),
                input: serde_json::json!({
                    "total_hours": total_hours.normalize().to_string(),
                    "hourly_rate": hourly_rate.normalize().to_string()
                }),
                output: serde_json::json!({
                    "base_salary": base.to_string()
                }),
                reasoning: format!(
                    "Hourly pay: {} hours × {} = {}",
                    total_hours.normalize(),
                    hourly_rate.normalize(),
                    base
                ),
            };
            (base, None, step)
        }
        PayModel::Monthly { amount, .. } => {
            let working_hours = standard_hours * config.monthly_working_days;
            if working_hours.is_zero() {
                return Err(EngineError::CalculationError {
                    message: format!(
                        "cannot prorate monthly salary for '{}': zero working hours per month",
                        employee.id
                    ),
                });
            }
            let base = regular_hours
                .checked_mul(amount)
                .and_then(|v| v.checked_div(working_hours))
                .map(round_2dp)
                .ok_or_else(|| overflowed(employee, "monthly base pay"))?;
            let daily_rate = amount
                .checked_div(config.monthly_working_days)
                .map(round_2dp)
                .ok_or_else(|| overflowed(employee, "daily rate"))?;
            let step = AuditStep {
                step_number,
                rule_id: "monthly_prorated_pay".to_string(),
                rule_name: "Monthly Prorated Pay".to_string(),
                input: serde_json::json!({
                    "monthly_amount": amount.normalize().to_string(),
                    "capped_hours": regular_hours.normalize().to_string(),
                    "standard_hours": standard_hours.normalize().to_string(),
                    "working_days": config.monthly_working_days.normalize().to_string()
                }),
                output: serde_json::json!({
                    "base_salary": base.to_string(),
                    "daily_rate": daily_rate.to_string()
                }),
                reasoning: format!(
                    "Monthly pay prorated: {} / ({} h × {} days) × {} = {}",
                    regular_hours.normalize(),
                    standard_hours.normalize(),
                    config.monthly_working_days.normalize(),
                    amount.normalize(),
                    base
                ),
            };
            (base, Some(daily_rate), step)
        }
    };
    steps.push(base_step);
    step_number += 1;

    let overtime_pay = overtime_hours
        .checked_mul(hourly_rate)
        .and_then(|v| v.checked_mul(employee.overtime_multiplier))
        .map(round_2dp)
        .ok_or_else(|| overflowed(employee, "overtime pay"))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "multiplier": employee.overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_pay": overtime_pay.to_string()
        }),
        reasoning: format!(
            "Overtime: {} hours × {} × {} = {}",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            employee.overtime_multiplier.normalize(),
            overtime_pay
        ),
    });

    let total_salary = base_salary
        .checked_add(overtime_pay)
        .ok_or_else(|| overflowed(employee, "total salary"))?;

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        month,
        year,
        pay_model: employee.pay_model.kind(),
        hourly_rate,
        daily_rate,
        lines,
        totals: PayrollTotals {
            total_hours,
            regular_hours,
            overtime_hours,
            days_present,
            full_days_equivalent,
            base_salary,
            overtime_pay,
            total_salary,
        },
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: started.elapsed().as_micros() as u64,
        },
    })
}

/// Returns true if `date` falls in the given payroll month.
pub fn in_period(date: NaiveDate, month: u32, year: i32) -> bool {
    date.year() == year && date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, PayModelKind};
    use chrono::{Duration, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn hourly_employee(rate: &str) -> Employee {
        Employee::new(
            "EMP001",
            "Asha Rao",
            PayModel::Hourly { rate: dec(rate) },
            dec("8"),
            dec("1.5"),
        )
    }

    fn monthly_employee(amount: &str) -> Employee {
        Employee::new(
            "EMP002",
            "Ravi Kumar",
            PayModel::Monthly {
                amount: dec(amount),
                hourly_rate: None,
            },
            dec("8"),
            dec("1.5"),
        )
    }

    fn closed(id: u64, employee_id: &str, start: NaiveDateTime, hours: i64) -> AttendanceRecord {
        let mut record = AttendanceRecord::checked_in(
            id,
            employee_id,
            GeoPoint::new(12.971599, 77.594566),
            start,
            false,
        );
        record.close(start + Duration::hours(hours), false, "Manual checkout");
        record
    }

    /// Weekday 09:00 starts in January 2026, skipping Saturdays and Sundays.
    fn january_weekdays(count: usize) -> Vec<NaiveDateTime> {
        let mut day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut out = Vec::new();
        while out.len() < count {
            if day.weekday().num_days_from_monday() < 5 {
                out.push(day.and_hms_opt(9, 0, 0).unwrap());
            }
            day = day.succ_opt().unwrap();
        }
        out
    }

    #[test]
    fn test_hourly_22_days_of_8_hours() {
        let employee = hourly_employee("100");
        let records: Vec<AttendanceRecord> = january_weekdays(22)
            .into_iter()
            .enumerate()
            .map(|(i, start)| closed(i as u64 + 1, "EMP001", start, 8))
            .collect();

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.pay_model, PayModelKind::Hourly);
        assert_eq!(result.totals.total_hours, dec("176"));
        assert_eq!(result.totals.base_salary, dec("17600"));
        assert_eq!(result.totals.overtime_hours, Decimal::ZERO);
        assert_eq!(result.totals.overtime_pay, Decimal::ZERO);
        assert_eq!(result.totals.total_salary, dec("17600"));
        assert_eq!(result.totals.days_present, 22);
        assert_eq!(result.totals.full_days_equivalent, dec("22"));
        assert!(result.daily_rate.is_none());
    }

    #[test]
    fn test_monthly_full_attendance_earns_full_amount() {
        let employee = monthly_employee("26000");
        let records: Vec<AttendanceRecord> = january_weekdays(22)
            .into_iter()
            .chain(
                // Four Saturdays bring the month to 26 working days.
                [3, 10, 17, 24].into_iter().map(|d| {
                    NaiveDate::from_ymd_opt(2026, 1, d)
                        .unwrap()
                        .and_hms_opt(9, 0, 0)
                        .unwrap()
                }),
            )
            .enumerate()
            .map(|(i, start)| closed(i as u64 + 1, "EMP002", start, 8))
            .collect();

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.totals.days_present, 26);
        assert_eq!(result.totals.base_salary, dec("26000"));
        assert_eq!(result.daily_rate, Some(dec("1000")));
        assert_eq!(result.totals.total_salary, dec("26000"));
    }

    #[test]
    fn test_monthly_prorates_partial_attendance() {
        let employee = monthly_employee("26000");
        let records: Vec<AttendanceRecord> = january_weekdays(13)
            .into_iter()
            .enumerate()
            .map(|(i, start)| closed(i as u64 + 1, "EMP002", start, 8))
            .collect();

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        // 104 / 208 × 26000 = 13000
        assert_eq!(result.totals.base_salary, dec("13000"));
    }

    #[test]
    fn test_monthly_long_day_is_capped_and_paid_as_overtime() {
        let mut employee = monthly_employee("26000");
        employee.legacy_salary = Some(dec("17600"));
        let start = make_datetime("2026-01-14", "08:00:00");
        let records = vec![closed(1, "EMP002", start, 10)];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        // Base: 8 / 208 × 26000 = 1000
        assert_eq!(result.totals.base_salary, dec("1000"));
        // Overtime: 2 × (17600 / 176 = 100) × 1.5 = 300
        assert_eq!(result.hourly_rate, dec("100"));
        assert_eq!(result.totals.overtime_pay, dec("300"));
        assert_eq!(result.totals.total_salary, dec("1300"));
    }

    #[test]
    fn test_sunday_hours_are_paid_as_overtime_on_top_of_base() {
        let employee = hourly_employee("100");
        // 2026-01-18 is a Sunday
        let records = vec![closed(1, "EMP001", make_datetime("2026-01-18", "09:00:00"), 5)];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.totals.total_hours, dec("5"));
        assert_eq!(result.totals.overtime_hours, dec("5"));
        assert_eq!(result.totals.base_salary, dec("500"));
        assert_eq!(result.totals.overtime_pay, dec("750"));
        assert_eq!(result.totals.total_salary, dec("1250"));
    }

    #[test]
    fn test_filters_other_months_employees_and_absences() {
        let employee = hourly_employee("100");
        let mut absent = AttendanceRecord::absent(
            4,
            "EMP001",
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            false,
        );
        absent.manual_hours = Some(dec("8"));
        let records = vec![
            closed(1, "EMP001", make_datetime("2026-01-14", "09:00:00"), 8),
            closed(2, "EMP001", make_datetime("2026-02-02", "09:00:00"), 8),
            closed(3, "EMP999", make_datetime("2026-01-14", "09:00:00"), 8),
            absent,
        ];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].record_id, 1);
        assert_eq!(result.totals.total_hours, dec("8"));
    }

    #[test]
    fn test_two_records_same_day_count_one_day_present() {
        let employee = hourly_employee("100");
        let records = vec![
            closed(1, "EMP001", make_datetime("2026-01-14", "08:00:00"), 4),
            closed(2, "EMP001", make_datetime("2026-01-14", "13:00:00"), 4),
        ];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.totals.days_present, 1);
        assert_eq!(result.totals.total_hours, dec("8"));
        assert_eq!(result.lines.len(), 2);
    }

    #[test]
    fn test_open_record_produces_warning() {
        let employee = hourly_employee("100");
        let records = vec![AttendanceRecord::checked_in(
            1,
            "EMP001",
            GeoPoint::new(12.971599, 77.594566),
            make_datetime("2026-01-14", "09:00:00"),
            false,
        )];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        assert_eq!(result.totals.total_hours, dec("8"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(
            result.audit_trace.warnings[0].code,
            "OPEN_RECORD_ASSUMED_FULL_DAY"
        );
    }

    #[test]
    fn test_monetary_outputs_rounded_to_two_places() {
        let employee = hourly_employee("33.333");
        let records = vec![closed(1, "EMP001", make_datetime("2026-01-14", "09:00:00"), 3)];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        // 3 × 33.333 = 99.999
        assert_eq!(result.totals.base_salary, dec("100.00"));
        assert_eq!(result.totals.base_salary.scale(), 2);
    }

    #[test]
    fn test_audit_trace_step_order() {
        let employee = hourly_employee("100");
        let records = vec![
            closed(1, "EMP001", make_datetime("2026-01-14", "09:00:00"), 8),
            closed(2, "EMP001", make_datetime("2026-01-15", "09:00:00"), 9),
        ];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default())
                .unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "record_hours",
                "record_hours",
                "hourly_rate_resolution",
                "hourly_base_pay",
                "overtime_pay"
            ]
        );
        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_month_is_zero() {
        let employee = monthly_employee("26000");
        let result =
            calculate_monthly_salary(&employee, &[], 3, 2026, &PayrollConfig::default()).unwrap();

        assert_eq!(result.totals.total_salary, Decimal::ZERO);
        assert_eq!(result.totals.days_present, 0);
    }

    #[test]
    fn test_invalid_month_rejected() {
        let employee = hourly_employee("100");
        let result = calculate_monthly_salary(&employee, &[], 0, 2026, &PayrollConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::InvalidPeriod { month: 0, .. })
        ));
    }

    #[test]
    fn test_unrepresentable_pay_is_a_calculation_error() {
        let employee = Employee::new(
            "EMP001",
            "Asha Rao",
            PayModel::Hourly { rate: Decimal::MAX },
            dec("8"),
            dec("1.5"),
        );
        let records = vec![closed(1, "EMP001", make_datetime("2026-01-14", "09:00:00"), 8)];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default());
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_overtime_overflow_is_a_calculation_error() {
        let mut employee = monthly_employee("1");
        employee.pay_model = PayModel::Monthly {
            amount: dec("1"),
            hourly_rate: Some(Decimal::MAX),
        };
        // Ten hours leaves two hours of overtime at the maximum rate.
        let records = vec![closed(1, "EMP002", make_datetime("2026-01-14", "09:00:00"), 10)];

        let result =
            calculate_monthly_salary(&employee, &records, 1, 2026, &PayrollConfig::default());
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_in_period() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert!(in_period(date, 12, 2026));
        assert!(!in_period(date, 1, 2027));
    }
}
