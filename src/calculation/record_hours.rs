//! Worked, regular, and overtime hours for a single attendance record.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AuditStep, PayrollLine};

/// The hours a record contributes to payroll, with the audit step.
#[derive(Debug, Clone)]
pub struct RecordHoursResult {
    /// The payroll line for the record.
    pub line: PayrollLine,
    /// The audit step recording how the hours were derived.
    pub audit_step: AuditStep,
}

/// Resolves the payroll hours for one attendance record.
///
/// Hours worked follow [`AttendanceRecord::hours_worked`]; regular hours are
/// capped at the standard day; on Sundays and holidays every hour is
/// overtime.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::resolve_record_hours;
/// use attendance_engine::models::{AttendanceRecord, GeoPoint};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let mut record = AttendanceRecord::checked_in(1, "EMP001", GeoPoint::new(12.97, 77.59), at("2026-01-14 08:00:00"), false);
/// record.close(at("2026-01-14 18:00:00"), false, "Manual checkout");
///
/// let result = resolve_record_hours(&record, Decimal::from(8), 1);
/// assert_eq!(result.line.hours_worked, Decimal::from(10));
/// assert_eq!(result.line.regular_hours, Decimal::from(8));
/// assert_eq!(result.line.overtime_hours, Decimal::from(2));
/// ```
pub fn resolve_record_hours(
    record: &AttendanceRecord,
    standard_hours: Decimal,
    step_number: u32,
) -> RecordHoursResult {
    let hours_worked = record.hours_worked(standard_hours);
    let regular_hours = record.regular_hours(standard_hours);
    let overtime_hours = record.overtime_hours(standard_hours);
    let full_days_equivalent = record.full_days_equivalent(standard_hours);
    let open = record.is_open();
    let manual_override = record.manual_hours.is_some();

    let source = if manual_override {
        "manual_override"
    } else if open {
        "open_record_standard_day"
    } else if record.check_in.is_some() {
        "timestamps"
    } else {
        "no_check_in"
    };

    let day_kind = match (record.is_sunday, record.is_holiday) {
        (_, true) => "holiday",
        (true, false) => "sunday",
        (false, false) => "weekday",
    };

    let reasoning = if record.is_premium_day() {
        format!(
            "{} hours on a {}: all hours count as overtime",
            hours_worked.normalize(),
            day_kind
        )
    } else if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours exceeds {} hour standard day by {} hours",
            hours_worked.normalize(),
            standard_hours.normalize(),
            overtime_hours.normalize()
        )
    } else {
        format!(
            "{} hours within {} hour standard day, no overtime",
            hours_worked.normalize(),
            standard_hours.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "record_hours".to_string(),
        rule_name: "Record Hours Resolution".to_string(),
        input: serde_json::json!({
            "record_id": record.id,
            "date": record.date.to_string(),
            "check_in": record.check_in.map(|t| t.to_string()),
            "check_out": record.check_out.map(|t| t.to_string()),
            "manual_hours": record.manual_hours.map(|h| h.normalize().to_string()),
            "standard_hours": standard_hours.normalize().to_string(),
            "day_kind": day_kind
        }),
        output: serde_json::json!({
            "hours_worked": hours_worked.normalize().to_string(),
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "full_days_equivalent": full_days_equivalent.normalize().to_string(),
            "source": source
        }),
        reasoning,
    };

    RecordHoursResult {
        line: PayrollLine {
            record_id: record.id,
            date: record.date,
            hours_worked,
            regular_hours,
            overtime_hours,
            full_days_equivalent,
            is_sunday: record.is_sunday,
            is_holiday: record.is_holiday,
            manual_override,
            open,
        },
        audit_step,
    }
}
