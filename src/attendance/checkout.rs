//! Employee-initiated check-out.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{OpenRecord, find_open_record, release_stale_pointer};
use crate::error::EngineResult;
use crate::models::RecordId;
use crate::store::StoreState;

/// Checkout reason stored on manually closed records.
pub const MANUAL_CHECKOUT_REASON: &str = "Manual checkout";

/// Result of a manual check-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutOutcome {
    /// False when there was no open record for today.
    pub success: bool,
    /// The closed record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    /// Hours credited by the closed record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<Decimal>,
}

/// Closes the employee's open record for today.
///
/// Without an open record this is a no-op reported as `success: false`.
pub fn check_out(
    state: &mut StoreState,
    employee_id: &str,
    now: NaiveDateTime,
) -> EngineResult<CheckOutOutcome> {
    let not_checked_in = CheckOutOutcome {
        success: false,
        record_id: None,
        hours_worked: None,
    };

    let record_id = match find_open_record(state, employee_id, now.date())? {
        OpenRecord::Today(record_id) => record_id,
        OpenRecord::Stale(record_id) => {
            release_stale_pointer(state, employee_id, record_id)?;
            return Ok(not_checked_in);
        }
        OpenRecord::None => {
            debug!(employee_id = %employee_id, "Check-out skipped: no open record");
            return Ok(not_checked_in);
        }
    };

    let standard_hours = state.employee(employee_id)?.standard_hours_per_day;
    let record = state.record_mut(record_id)?;
    record.close(now, false, MANUAL_CHECKOUT_REASON);
    let hours_worked = record.hours_worked(standard_hours);
    state.employee_mut(employee_id)?.open_record = None;

    info!(
        employee_id = %employee_id,
        record_id = record_id,
        hours_worked = %hours_worked,
        "Manual checkout"
    );

    Ok(CheckOutOutcome {
        success: true,
        record_id: Some(record_id),
        hours_worked: Some(hours_worked),
    })
}
