//! In-memory `EmployeeStore` with fault injection, for driving a run without PostgreSQL.

use async_trait::async_trait;
use employee_batches::database::EmployeeStore;
use employee_batches::error::{EmployeeBatchError, Result};
use employee_batches::models::{
    decode_metadata_list, encode_metadata_list, Employee, EmployeeBatch, NewEmployee,
    NewEmployeeBatch,
};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    employees_created: bool,
    batches_created: bool,
    next_id: i64,
    employees: Vec<Employee>,
    /// (batch_name, position, department, encoded payload)
    batches: Vec<(String, i32, String, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// 1-indexed employee insert that fails
    fail_employee_insert_at: Option<usize>,
    /// 1-indexed batch insert that fails
    fail_batch_insert_at: Option<usize>,
    batch_attempts: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_employee_insert(at: usize) -> Self {
        Self {
            fail_employee_insert_at: Some(at),
            ..Self::default()
        }
    }

    pub fn failing_batch_insert(at: usize) -> Self {
        Self {
            fail_batch_insert_at: Some(at),
            ..Self::default()
        }
    }

    pub async fn employee_count(&self) -> usize {
        self.tables.lock().await.employees.len()
    }

    pub async fn batch_names(&self) -> Vec<String> {
        self.tables
            .lock()
            .await
            .batches
            .iter()
            .map(|(name, ..)| name.clone())
            .collect()
    }

    /// Overwrite the stored payload of a batch, bypassing encoding.
    pub async fn corrupt_batch(&self, batch_name: &str, payload: &str) {
        let mut tables = self.tables.lock().await;
        if let Some(row) = tables.batches.iter_mut().find(|(name, ..)| name == batch_name) {
            row.3 = payload.to_string();
        }
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn ensure_employees_table(&self) -> Result<()> {
        self.tables.lock().await.employees_created = true;
        Ok(())
    }

    async fn ensure_employee_batches_table(&self) -> Result<()> {
        self.tables.lock().await.batches_created = true;
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.employees.clear();
        tables.batches.clear();
        tables.next_id = 0;
        Ok(())
    }

    async fn insert_employee(&self, new: &NewEmployee) -> Result<Employee> {
        let mut tables = self.tables.lock().await;
        if !tables.employees_created {
            return Err(EmployeeBatchError::write(
                "insert employee",
                "relation \"employees\" does not exist",
            ));
        }
        if self.fail_employee_insert_at == Some(tables.employees.len() + 1) {
            return Err(EmployeeBatchError::write(
                "insert employee",
                "injected failure",
            ));
        }

        tables.next_id += 1;
        let employee = Employee {
            employee_id: tables.next_id,
            name: new.name.clone(),
            department: new.department.clone(),
            meta: new.meta.clone(),
        };
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let mut employees = self.tables.lock().await.employees.clone();
        employees.sort_by_key(|e| e.employee_id);
        Ok(employees)
    }

    async fn insert_batch(&self, new: NewEmployeeBatch) -> Result<EmployeeBatch> {
        let attempt = {
            let mut attempts = self.batch_attempts.lock().await;
            *attempts += 1;
            *attempts
        };

        let mut tables = self.tables.lock().await;
        if !tables.batches_created {
            return Err(EmployeeBatchError::write(
                "insert batch",
                "relation \"employee_batches\" does not exist",
            ));
        }
        if self.fail_batch_insert_at == Some(attempt) {
            return Err(EmployeeBatchError::write("insert batch", "injected failure"));
        }
        if tables.batches.iter().any(|(name, ..)| *name == new.batch_name) {
            return Err(EmployeeBatchError::write(
                "insert batch",
                format!(
                    "duplicate key value violates unique constraint on \"{}\"",
                    new.batch_name
                ),
            ));
        }

        let payload = encode_metadata_list(&new.members)?;
        tables.batches.push((
            new.batch_name.clone(),
            new.position,
            new.department.clone(),
            payload,
        ));
        Ok(EmployeeBatch {
            batch_name: new.batch_name,
            position: new.position,
            department: new.department,
            members: new.members,
        })
    }

    async fn list_batches(&self) -> Result<Vec<EmployeeBatch>> {
        let tables = self.tables.lock().await;
        let mut rows = tables.batches.clone();
        rows.sort_by_key(|(_, position, ..)| *position);

        rows.into_iter()
            .map(|(batch_name, position, department, payload)| {
                Ok(EmployeeBatch {
                    batch_name,
                    position,
                    department,
                    members: decode_metadata_list(&payload)?,
                })
            })
            .collect()
    }
}
