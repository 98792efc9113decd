//! # Employee Store
//!
//! Storage seam for a run. [`PgEmployeeStore`] is the PostgreSQL
//! implementation; tests substitute an in-memory store.

use crate::database::migrations::DatabaseMigrations;
use crate::error::{EmployeeBatchError, Result};
use crate::models::{Employee, EmployeeBatch, NewEmployee, NewEmployeeBatch};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Instant;
use tracing::{debug, instrument};

/// Everything a run needs from storage.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn ensure_employees_table(&self) -> Result<()>;

    async fn ensure_employee_batches_table(&self) -> Result<()>;

    /// Remove all employees and batches. Both tables must exist.
    async fn reset(&self) -> Result<()>;

    async fn insert_employee(&self, new: &NewEmployee) -> Result<Employee>;

    /// All employees ordered by ascending id
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Persist one batch atomically: either the whole row is visible or none of it.
    async fn insert_batch(&self, new: NewEmployeeBatch) -> Result<EmployeeBatch>;

    /// All batches ordered by position
    async fn list_batches(&self) -> Result<Vec<EmployeeBatch>>;
}

#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn ensure_employees_table(&self) -> Result<()> {
        DatabaseMigrations::ensure_employees_table(&self.pool).await
    }

    async fn ensure_employee_batches_table(&self) -> Result<()> {
        DatabaseMigrations::ensure_employee_batches_table(&self.pool).await
    }

    async fn reset(&self) -> Result<()> {
        DatabaseMigrations::reset_tables(&self.pool).await
    }

    async fn insert_employee(&self, new: &NewEmployee) -> Result<Employee> {
        Employee::create(&self.pool, new).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Employee::list_all(&self.pool).await
    }

    #[instrument(skip(self, new), fields(batch_name = %new.batch_name))]
    async fn insert_batch(&self, new: NewEmployeeBatch) -> Result<EmployeeBatch> {
        let started = Instant::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| EmployeeBatchError::write("begin batch transaction", e))?;

        // Dropping `tx` on error rolls the insert back
        let batch = EmployeeBatch::create(&mut *tx, new).await?;

        tx.commit()
            .await
            .map_err(|e| EmployeeBatchError::write("commit batch transaction", e))?;

        debug!(
            members = batch.member_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Committed batch"
        );
        Ok(batch)
    }

    async fn list_batches(&self) -> Result<Vec<EmployeeBatch>> {
        EmployeeBatch::list_all(&self.pool).await
    }
}
