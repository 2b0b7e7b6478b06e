//! HTTP request handlers for the Attendance Engine API.
//!
//! Each handler tags its work with a correlation id, runs one store
//! transaction or read, and maps engine errors through [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::{
    self, CheckInOutcome, CheckOutOutcome, DayStatus, HoursCorrection, LocationPingOutcome,
};
use crate::error::EngineError;
use crate::models::{AttendanceRecord, Employee, RecordId, SalaryAdjustment, SalarySummary};
use crate::payroll::{self, AdjustmentRequest};

use super::request::{
    AbsenceRequest, AdjustmentBody, CheckOutRequest, CorrectHoursRequest, CreateEmployeeRequest,
    LocationRequest, PeriodQuery, UpdatePayRequest,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(create_employee_handler))
        .route(
            "/employees/:employee_id",
            get(get_employee_handler).delete(delete_employee_handler),
        )
        .route("/employees/:employee_id/pay", put(update_pay_handler))
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/location", post(location_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/absence", post(absence_handler))
        .route("/attendance/records/:record_id", patch(correct_hours_handler))
        .route("/attendance/:employee_id/calendar", get(calendar_handler))
        .route("/payroll", get(salary_overview_handler))
        .route("/payroll/:employee_id", get(monthly_salary_handler))
        .route("/payroll/:employee_id/adjustment", put(adjustment_handler))
        .with_state(state)
}

fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Request body rejected"
        );
        rejection.into()
    })
}

fn parse_query(
    query: Result<Query<PeriodQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<PeriodQuery, ApiErrorResponse> {
    query.map(|Query(period)| period).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Query string rejected"
        );
        rejection.into()
    })
}

fn failed(correlation_id: Uuid) -> impl FnOnce(EngineError) -> ApiErrorResponse {
    move |err| {
        warn!(correlation_id = %correlation_id, error = %err, "Request failed");
        err.into()
    }
}

fn respond<T: Serialize>(value: T) -> ApiResult<T> {
    Ok(Json(value))
}

/// Handler for `POST /employees`.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    let employee = request.into_employee(state.config().payroll());

    let created = state
        .store()
        .transaction(|s| s.insert_employee(employee).cloned())
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %created.id,
        pay_model = ?created.pay_model.kind(),
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for `GET /employees/:employee_id`.
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let employee = state
        .store()
        .read()
        .and_then(|s| s.employee(&employee_id).cloned())
        .map_err(failed(correlation_id))?;
    respond(employee)
}

/// Handler for `PUT /employees/:employee_id/pay`.
async fn update_pay_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<UpdatePayRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let updated = state
        .store()
        .transaction(|s| {
            s.update_employee(&employee_id, |e| request.apply(e))
                .cloned()
        })
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        pay_model = ?updated.pay_model.kind(),
        "Pay configuration updated"
    );
    respond(updated)
}

/// Handler for `DELETE /employees/:employee_id`.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .store()
        .transaction(|s| s.remove_employee(&employee_id))
        .map_err(failed(correlation_id))?;

    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /attendance/check-in`.
async fn check_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<LocationRequest>, JsonRejection>,
) -> ApiResult<CheckInOutcome> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    let point = request.point().map_err(ApiErrorResponse::bad_request)?;
    let now = request.at();

    let outcome = state
        .store()
        .transaction(|s| attendance::check_in(s, state.config(), &request.employee_id, point, now))
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        accepted = outcome.accepted,
        distance_meters = outcome.distance_meters,
        "Check-in processed"
    );
    respond(outcome)
}

/// Handler for `POST /attendance/location`.
async fn location_handler(
    State(state): State<AppState>,
    payload: Result<Json<LocationRequest>, JsonRejection>,
) -> ApiResult<LocationPingOutcome> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    let point = request.point().map_err(ApiErrorResponse::bad_request)?;
    let now = request.at();

    let outcome = state
        .store()
        .transaction(|s| {
            attendance::location_ping(s, state.config(), &request.employee_id, point, now)
        })
        .map_err(failed(correlation_id))?;

    if outcome.auto_checked_out {
        info!(
            correlation_id = %correlation_id,
            employee_id = %request.employee_id,
            distance_meters = outcome.distance_meters,
            "Location ping triggered auto checkout"
        );
    }
    respond(outcome)
}

/// Handler for `POST /attendance/check-out`.
async fn check_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckOutRequest>, JsonRejection>,
) -> ApiResult<CheckOutOutcome> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    let now = request.at();

    let outcome = state
        .store()
        .transaction(|s| attendance::check_out(s, &request.employee_id, now))
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        success = outcome.success,
        "Check-out processed"
    );
    respond(outcome)
}

/// Handler for `POST /attendance/absence`.
async fn absence_handler(
    State(state): State<AppState>,
    payload: Result<Json<AbsenceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AttendanceRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;

    let record = state
        .store()
        .transaction(|s| {
            attendance::mark_absent(
                s,
                state.config(),
                &request.actor,
                &request.employee_id,
                request.date,
            )
        })
        .map_err(failed(correlation_id))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for `PATCH /attendance/records/:record_id`.
async fn correct_hours_handler(
    State(state): State<AppState>,
    Path(record_id): Path<RecordId>,
    payload: Result<Json<CorrectHoursRequest>, JsonRejection>,
) -> ApiResult<AttendanceRecord> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(payload, correlation_id)?;
    let correction = HoursCorrection {
        manual_hours: request.manual_hours,
        reason: request.reason,
    };

    let record = state
        .store()
        .transaction(|s| attendance::correct_record_hours(s, &request.actor, record_id, correction))
        .map_err(failed(correlation_id))?;

    respond(record)
}

/// Handler for `GET /attendance/:employee_id/calendar`.
async fn calendar_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Vec<DayStatus>> {
    let correlation_id = Uuid::new_v4();
    let period = parse_query(query, correlation_id)?;

    let days = state
        .store()
        .read()
        .and_then(|s| {
            attendance::day_statuses(&s, state.config(), &employee_id, period.month, period.year)
        })
        .map_err(failed(correlation_id))?;

    respond(days)
}

/// Handler for `GET /payroll`.
async fn salary_overview_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Vec<SalarySummary>> {
    let correlation_id = Uuid::new_v4();
    let period = parse_query(query, correlation_id)?;

    let summaries = state
        .store()
        .read()
        .and_then(|s| {
            payroll::salary_overview(&s, state.config().payroll(), period.month, period.year)
        })
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        month = period.month,
        year = period.year,
        employees = summaries.len(),
        "Salary overview computed"
    );
    respond(summaries)
}

/// Handler for `GET /payroll/:employee_id`.
async fn monthly_salary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<SalarySummary> {
    let correlation_id = Uuid::new_v4();
    let period = parse_query(query, correlation_id)?;

    let summary = state
        .store()
        .read()
        .and_then(|s| {
            payroll::get_monthly_salary(
                &s,
                state.config().payroll(),
                &employee_id,
                period.month,
                period.year,
            )
        })
        .map_err(failed(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        calculation_id = %summary.payroll.calculation_id,
        duration_us = summary.payroll.audit_trace.duration_us,
        "Payroll computed"
    );
    respond(summary)
}

/// Handler for `PUT /payroll/:employee_id/adjustment`.
async fn adjustment_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<AdjustmentBody>, JsonRejection>,
) -> ApiResult<SalaryAdjustment> {
    let correlation_id = Uuid::new_v4();
    let body = parse_body(payload, correlation_id)?;
    let now = body.at();

    let adjustment = state
        .store()
        .transaction(|s| {
            payroll::upsert_salary_adjustment(
                s,
                state.config().payroll(),
                &employee_id,
                body.month,
                body.year,
                AdjustmentRequest {
                    adjusted_salary: body.adjusted_salary,
                    reason: body.reason,
                },
                &body.actor,
                now,
            )
        })
        .map_err(failed(correlation_id))?;

    respond(adjustment)
}
