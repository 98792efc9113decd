//! # Employee Model
//!
//! Flat employee records with JSON-encoded metadata.
//!
//! ## Database Schema
//!
//! Maps to the `employees` table:
//! ```sql
//! CREATE TABLE employees (
//!   employee_id BIGSERIAL PRIMARY KEY,
//!   employee_name VARCHAR(100) NOT NULL,
//!   employee_department VARCHAR(100) NOT NULL,
//!   employee_meta TEXT NOT NULL
//! );
//! ```

use crate::error::{EmployeeBatchError, Result};
use crate::models::metadata::{decode_metadata, encode_metadata, Metadata};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use std::fmt;

/// A stored employee. `employee_id` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub name: String,
    pub department: String,
    pub meta: Metadata,
}

/// New employee for creation (without generated fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub meta: Metadata,
}

/// Raw row as scanned from `employees`, metadata still encoded.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_department: String,
    pub employee_meta: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = EmployeeBatchError;

    fn try_from(row: EmployeeRow) -> Result<Self> {
        Ok(Self {
            employee_id: row.employee_id,
            name: row.employee_name,
            department: row.employee_department,
            meta: decode_metadata(&row.employee_meta)?,
        })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Department: {}, Meta: {}",
            self.employee_id, self.name, self.department, self.meta
        )
    }
}

impl Employee {
    /// Insert a new employee and return it with its assigned id
    pub async fn create<'e, E: PgExecutor<'e>>(executor: E, new: &NewEmployee) -> Result<Self> {
        let meta_text = encode_metadata(&new.meta)?;

        let employee_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO employees (employee_name, employee_department, employee_meta)
            VALUES ($1, $2, $3)
            RETURNING employee_id
            "#,
        )
        .bind(&new.name)
        .bind(&new.department)
        .bind(&meta_text)
        .fetch_one(executor)
        .await
        .map_err(|e| EmployeeBatchError::write("insert employee", e))?;

        Ok(Self {
            employee_id,
            name: new.name.clone(),
            department: new.department.clone(),
            meta: new.meta.clone(),
        })
    }

    /// All employees in insertion order (ascending id)
    pub async fn list_all<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_id, employee_name, employee_department, employee_meta
            FROM employees
            ORDER BY employee_id ASC
            "#,
        )
        .fetch_all(executor)
        .await
        .map_err(|e| EmployeeBatchError::read("list employees", e))?;

        rows.into_iter().map(Employee::try_from).collect()
    }
}
