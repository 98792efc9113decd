//! # Employee Batch Model
//!
//! One aggregate row per fixed-size group of employees. The payload is the
//! JSON array of the members' metadata, in member order.
//!
//! ## Database Schema
//!
//! Maps to the `employee_batches` table:
//! ```sql
//! CREATE TABLE employee_batches (
//!   batch_name VARCHAR(100) PRIMARY KEY,
//!   batch_position INTEGER NOT NULL,
//!   employee_department VARCHAR(100) NOT NULL,
//!   batch_meta TEXT NOT NULL
//! );
//! ```
//!
//! `batch_position` is the 1-indexed position of the group, so read-back can
//! order `alice_batch_10` after `alice_batch_2`.

use crate::error::{EmployeeBatchError, Result};
use crate::models::metadata::{decode_metadata_list, encode_metadata_list, Metadata};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeBatch {
    pub batch_name: String,
    pub position: i32,
    pub department: String,
    pub members: Vec<Metadata>,
}

/// New batch for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployeeBatch {
    pub batch_name: String,
    pub position: i32,
    pub department: String,
    pub members: Vec<Metadata>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeBatchRow {
    pub batch_name: String,
    pub batch_position: i32,
    pub employee_department: String,
    pub batch_meta: String,
}

impl TryFrom<EmployeeBatchRow> for EmployeeBatch {
    type Error = EmployeeBatchError;

    fn try_from(row: EmployeeBatchRow) -> Result<Self> {
        Ok(Self {
            batch_name: row.batch_name,
            position: row.batch_position,
            department: row.employee_department,
            members: decode_metadata_list(&row.batch_meta)?,
        })
    }
}

impl From<NewEmployeeBatch> for EmployeeBatch {
    fn from(new: NewEmployeeBatch) -> Self {
        Self {
            batch_name: new.batch_name,
            position: new.position,
            department: new.department,
            members: new.members,
        }
    }
}

impl EmployeeBatch {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Insert a batch row. Callers wrap this in a transaction.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        new: NewEmployeeBatch,
    ) -> Result<Self> {
        let payload = encode_metadata_list(&new.members)?;

        sqlx::query(
            r#"
            INSERT INTO employee_batches
            (batch_name, batch_position, employee_department, batch_meta)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&new.batch_name)
        .bind(new.position)
        .bind(&new.department)
        .bind(&payload)
        .execute(executor)
        .await
        .map_err(|e| EmployeeBatchError::write("insert batch", e))?;

        Ok(new.into())
    }

    /// All batches ordered by position
    pub async fn list_all<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, EmployeeBatchRow>(
            r#"
            SELECT batch_name, batch_position, employee_department, batch_meta
            FROM employee_batches
            ORDER BY batch_position ASC, batch_name ASC
            "#,
        )
        .fetch_all(executor)
        .await
        .map_err(|e| EmployeeBatchError::read("list batches", e))?;

        rows.into_iter().map(EmployeeBatch::try_from).collect()
    }
}
