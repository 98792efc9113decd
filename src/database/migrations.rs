//! # Schema Setup
//!
//! Idempotent DDL for the two tables a run touches. Tables are created with
//! `IF NOT EXISTS`; nothing is dropped unless a reset is requested.

use crate::error::{EmployeeBatchError, Result};
use sqlx::PgPool;
use tracing::debug;

pub const EMPLOYEES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    employee_id BIGSERIAL PRIMARY KEY,
    employee_name VARCHAR(100) NOT NULL,
    employee_department VARCHAR(100) NOT NULL,
    employee_meta TEXT NOT NULL
)
"#;

pub const EMPLOYEE_BATCHES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS employee_batches (
    batch_name VARCHAR(100) PRIMARY KEY,
    batch_position INTEGER NOT NULL,
    employee_department VARCHAR(100) NOT NULL,
    batch_meta TEXT NOT NULL
)
"#;

/// Creates and resets the run's tables.
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    pub async fn ensure_employees_table(pool: &PgPool) -> Result<()> {
        Self::execute_ddl(pool, "employees", EMPLOYEES_TABLE_SQL).await
    }

    pub async fn ensure_employee_batches_table(pool: &PgPool) -> Result<()> {
        Self::execute_ddl(pool, "employee_batches", EMPLOYEE_BATCHES_TABLE_SQL).await
    }

    /// Empty both tables and restart the employee id sequence.
    ///
    /// Both tables must already exist.
    pub async fn reset_tables(pool: &PgPool) -> Result<()> {
        sqlx::query("TRUNCATE TABLE employees, employee_batches RESTART IDENTITY")
            .execute(pool)
            .await
            .map_err(|e| EmployeeBatchError::write("reset tables", e))?;
        debug!("Truncated employees and employee_batches");
        Ok(())
    }

    async fn execute_ddl(pool: &PgPool, table: &str, sql: &str) -> Result<()> {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| EmployeeBatchError::Schema(format!("failed to create {table}: {e}")))?;
        debug!(table = table, "Ensured table exists");
        Ok(())
    }
}
