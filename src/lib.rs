//! Attendance and payroll engine.
//!
//! This crate tracks geofenced employee attendance (check-in, live location
//! pings with auto-checkout, manual check-out) and computes monthly payroll
//! under monthly or hourly pay models, with manager salary adjustments.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod store;
