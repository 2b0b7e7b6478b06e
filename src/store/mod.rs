//! In-process storage for employees, attendance, and salary adjustments.
//!
//! The whole store sits behind one [`RwLock`]. A write guard is the
//! transaction boundary: every attendance transition (find the open record,
//! then mutate it) runs under a single guard, so two concurrent location
//! pings cannot both auto-checkout the same record and a check-in cannot
//! race a check-out. Payroll queries take a read guard.

mod state;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};

pub use state::StoreState;

/// Thread-safe attendance store.
#[derive(Debug, Default)]
pub struct AttendanceStore {
    state: RwLock<StoreState>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a shared read guard.
    pub fn read(&self) -> EngineResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| EngineError::StoreUnavailable {
            message: "store lock poisoned".to_string(),
        })
    }

    /// Acquires the exclusive write guard.
    pub fn write(&self) -> EngineResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| EngineError::StoreUnavailable {
            message: "store lock poisoned".to_string(),
        })
    }

    /// Runs `f` under the write guard.
    ///
    /// Operations passed here validate before they mutate, so an error
    /// leaves the state untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{Employee, PayModel};
    /// use attendance_engine::store::AttendanceStore;
    /// use rust_decimal::Decimal;
    ///
    /// let store = AttendanceStore::new();
    /// store
    ///     .transaction(|state| {
    ///         state.insert_employee(Employee::new(
    ///             "EMP001",
    ///             "Asha Rao",
    ///             PayModel::Hourly { rate: Decimal::from(100) },
    ///             Decimal::from(8),
    ///             Decimal::new(15, 1),
    ///         ))?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert!(store.read().unwrap().employee("EMP001").is_ok());
    /// ```
    pub fn transaction<T, F>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut StoreState) -> EngineResult<T>,
    {
        let mut guard = self.write()?;
        f(&mut guard)
    }
}
