//! Live location updates and drift-triggered auto-checkout.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{OpenRecord, find_open_record, release_stale_pointer};
use crate::calculation::distance_between;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{GeoPoint, LiveLocation, RecordId};
use crate::store::StoreState;

/// Result of a location ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPingOutcome {
    /// Whether this ping closed the employee's open record.
    pub auto_checked_out: bool,
    /// Distance from the office in meters.
    pub distance_meters: f64,
    /// The record that was closed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_record: Option<RecordId>,
}

/// Records the employee's current location, checking them out if they have
/// drifted beyond the office proximity threshold.
///
/// The location is always stored, whether or not the employee is checked in.
pub fn location_ping(
    state: &mut StoreState,
    config: &EngineConfig,
    employee_id: &str,
    location: GeoPoint,
    now: NaiveDateTime,
) -> EngineResult<LocationPingOutcome> {
    let office = config.office();
    let distance = distance_between(location, office.location());

    let employee = state.employee_mut(employee_id)?;
    employee.last_location = Some(LiveLocation {
        point: location,
        updated_at: now,
    });
    let checked_in = employee.is_checked_in();

    let closed_record = if checked_in && !office.is_within_range(distance) {
        auto_checkout(state, employee_id, distance, now)?
    } else {
        None
    };

    debug!(
        employee_id = %employee_id,
        distance_meters = distance,
        checked_in = checked_in,
        "Location updated"
    );

    Ok(LocationPingOutcome {
        auto_checked_out: closed_record.is_some(),
        distance_meters: distance,
        closed_record,
    })
}

/// Closes the employee's open record for today because they left the office.
///
/// Returns the closed record, or `None` when there was nothing to close. A
/// second call for the same drift is therefore a no-op.
pub fn auto_checkout(
    state: &mut StoreState,
    employee_id: &str,
    distance_meters: f64,
    now: NaiveDateTime,
) -> EngineResult<Option<RecordId>> {
    let record_id = match find_open_record(state, employee_id, now.date())? {
        OpenRecord::Today(record_id) => record_id,
        OpenRecord::Stale(record_id) => {
            release_stale_pointer(state, employee_id, record_id)?;
            return Ok(None);
        }
        OpenRecord::None => {
            debug!(employee_id = %employee_id, "Auto-checkout skipped: no open record");
            return Ok(None);
        }
    };

    let reason = format!("Auto checkout: {}m from office", distance_meters.round());
    state.record_mut(record_id)?.close(now, true, reason);
    state.employee_mut(employee_id)?.open_record = None;

    info!(
        employee_id = %employee_id,
        record_id = record_id,
        distance_meters = distance_meters,
        "Auto checkout"
    );

    Ok(Some(record_id))
}
