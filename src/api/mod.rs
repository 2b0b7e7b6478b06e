//! HTTP API module for the Attendance Engine.
//!
//! This module exposes employee management, attendance transitions, and
//! payroll queries as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AbsenceRequest, AdjustmentBody, CheckOutRequest, CorrectHoursRequest, CreateEmployeeRequest,
    LocationRequest, PeriodQuery, UpdatePayRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
