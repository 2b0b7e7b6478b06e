//! The data held by the attendance store.

use std::collections::BTreeMap;

use crate::calculation::in_period;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, RecordId, SalaryAdjustment};

type AdjustmentKey = (String, i32, u32);

/// Employees, attendance records, and salary adjustments.
///
/// Every method runs against a single snapshot; callers obtain a
/// `&mut StoreState` only through [`super::AttendanceStore::write`] or
/// [`super::AttendanceStore::transaction`], which serializes all mutations.
#[derive(Debug, Default)]
pub struct StoreState {
    employees: BTreeMap<String, Employee>,
    records: BTreeMap<RecordId, AttendanceRecord>,
    adjustments: BTreeMap<AdjustmentKey, SalaryAdjustment>,
    last_record_id: RecordId,
}

impl StoreState {
    /// Adds a new employee after validating it.
    pub fn insert_employee(&mut self, employee: Employee) -> EngineResult<&Employee> {
        employee.validate()?;
        if self.employees.contains_key(&employee.id) {
            return Err(EngineError::EmployeeAlreadyExists {
                employee_id: employee.id,
            });
        }
        let id = employee.id.clone();
        Ok(self.employees.entry(id).or_insert(employee))
    }

    /// Looks up an employee by code.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Looks up an employee by code for mutation.
    pub fn employee_mut(&mut self, employee_id: &str) -> EngineResult<&mut Employee> {
        self.employees
            .get_mut(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Applies `change` to a copy of the employee and commits it only if the
    /// result still validates.
    pub fn update_employee<F>(&mut self, employee_id: &str, change: F) -> EngineResult<&Employee>
    where
        F: FnOnce(&mut Employee),
    {
        let mut updated = self.employee(employee_id)?.clone();
        change(&mut updated);
        updated.id = employee_id.to_string();
        updated.validate()?;

        let slot = self.employee_mut(employee_id)?;
        *slot = updated;
        Ok(slot)
    }

    /// All employees ordered by code.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Removes an employee together with its records and adjustments.
    pub fn remove_employee(&mut self, employee_id: &str) -> EngineResult<Employee> {
        let employee =
            self.employees
                .remove(employee_id)
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;
        self.records.retain(|_, r| r.employee_id != employee_id);
        self.adjustments
            .retain(|(id, _, _), _| id.as_str() != employee_id);
        Ok(employee)
    }

    /// Reserves the next record identifier. Identifiers are never reused.
    pub fn next_record_id(&mut self) -> RecordId {
        self.last_record_id += 1;
        self.last_record_id
    }

    /// Stores a record, replacing any record with the same identifier.
    pub fn insert_record(&mut self, record: AttendanceRecord) -> RecordId {
        let id = record.id;
        self.last_record_id = self.last_record_id.max(id);
        self.records.insert(id, record);
        id
    }

    /// Looks up a record by identifier.
    pub fn record(&self, record_id: RecordId) -> EngineResult<&AttendanceRecord> {
        self.records
            .get(&record_id)
            .ok_or(EngineError::RecordNotFound { record_id })
    }

    /// Looks up a record by identifier for mutation.
    pub fn record_mut(&mut self, record_id: RecordId) -> EngineResult<&mut AttendanceRecord> {
        self.records
            .get_mut(&record_id)
            .ok_or(EngineError::RecordNotFound { record_id })
    }

    /// All records of an employee, oldest first.
    pub fn records_for<'a>(
        &'a self,
        employee_id: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.records
            .values()
            .filter(move |r| r.employee_id == employee_id)
    }

    /// Copies of an employee's records dated in the given month, oldest first.
    pub fn records_in_period(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Vec<AttendanceRecord> {
        self.records_for(employee_id)
            .filter(|r| in_period(r.date, month, year))
            .cloned()
            .collect()
    }

    /// Inserts or replaces the adjustment for its (employee, month, year).
    ///
    /// Returns the previous adjustment if one was replaced.
    pub fn upsert_adjustment(&mut self, adjustment: SalaryAdjustment) -> Option<SalaryAdjustment> {
        self.adjustments.insert(adjustment.key(), adjustment)
    }

    /// The adjustment for an employee's payroll month, if any.
    pub fn adjustment(&self, employee_id: &str, month: u32, year: i32) -> Option<&SalaryAdjustment> {
        self.adjustments
            .get(&(employee_id.to_string(), year, month))
    }

    /// Number of adjustments in the ledger.
    pub fn adjustment_count(&self) -> usize {
        self.adjustments.len()
    }

    /// Ensures `actor` is a known manager.
    pub fn require_manager(&self, actor: &str, action: &str) -> EngineResult<&Employee> {
        let employee = self.employee(actor).map_err(|_| EngineError::PermissionDenied {
            actor: actor.to_string(),
            action: action.to_string(),
        })?;
        if !employee.is_manager {
            return Err(EngineError::PermissionDenied {
                actor: actor.to_string(),
                action: action.to_string(),
            });
        }
        Ok(employee)
    }
}
