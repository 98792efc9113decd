//! # Run Orchestration
//!
//! Drives one run end to end: ensure schema, seed employees, read them back,
//! store them as batches and optionally print the stored batches.
//!
//! Steps run strictly in sequence and the first error ends the run. Results
//! are printed to the supplied writer; logs go through `tracing`.

use crate::batching::BatchWriter;
use crate::config::AppConfig;
use crate::database::EmployeeStore;
use crate::error::{EmployeeBatchError, Result};
use crate::logging::log_database_operation;
use crate::models::{Employee, EmployeeBatch};
use crate::seed::synthetic_employees;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub inserted: usize,
    pub employees: Vec<Employee>,
    pub batches: Vec<EmployeeBatch>,
}

impl RunReport {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(EmployeeBatch::member_count).collect()
    }
}

fn print_error(error: std::io::Error) -> EmployeeBatchError {
    EmployeeBatchError::write("print output", error)
}

#[instrument(skip_all, fields(seed_count = config.seed.count, batch_size = config.batching.batch_size))]
pub async fn run<W>(config: &AppConfig, store: &dyn EmployeeStore, out: &mut W) -> Result<RunReport>
where
    W: Write + Send,
{
    config.validate()?;
    let started = Instant::now();

    store.ensure_employees_table().await?;
    if config.reset_tables {
        store.ensure_employee_batches_table().await?;
        store.reset().await?;
        info!("Reset employees and employee_batches");
    }

    let inserted = seed_employees(config, store).await?;
    writeln!(
        out,
        "Inserted {inserted} employee records for {}.",
        config.seed.name
    )
    .map_err(print_error)?;

    let employees = store.list_employees().await?;
    writeln!(out, "\nEmployee Records:").map_err(print_error)?;
    for employee in &employees {
        writeln!(out, "{employee}").map_err(print_error)?;
    }

    store.ensure_employee_batches_table().await?;
    let writer = BatchWriter::new(
        config.batch_prefix(),
        config.seed.department.clone(),
        config.batching.batch_size,
    );
    writeln!(out).map_err(print_error)?;
    let batches = writer
        .write_all_with(store, &employees, |batch| {
            writeln!(
                out,
                "Stored batch {} with {} records.",
                batch.batch_name,
                batch.member_count()
            )
            .map_err(print_error)
        })
        .await?;

    if config.batching.print_batches {
        print_batches(store, out).await?;
    }

    log_database_operation(
        "run",
        None,
        None,
        "completed",
        Some(started.elapsed().as_millis() as u64),
        Some(format!("{inserted} employees, {} batches", batches.len()).as_str()),
    );

    Ok(RunReport {
        inserted,
        employees,
        batches,
    })
}

async fn seed_employees(config: &AppConfig, store: &dyn EmployeeStore) -> Result<usize> {
    let new_employees = synthetic_employees(&config.seed)?;
    for new_employee in &new_employees {
        let employee = store.insert_employee(new_employee).await?;
        debug!(employee_id = employee.employee_id, "Inserted employee");
    }
    info!(count = new_employees.len(), "Seeded employees");
    Ok(new_employees.len())
}

/// Read back every stored batch and print it with its members.
pub async fn print_batches<W>(store: &dyn EmployeeStore, out: &mut W) -> Result<Vec<EmployeeBatch>>
where
    W: Write + Send,
{
    let batches = store.list_batches().await?;
    writeln!(out, "\nEmployee Batches:").map_err(print_error)?;
    for batch in &batches {
        writeln!(
            out,
            "Batch: {}, Department: {}, Members: {}",
            batch.batch_name,
            batch.department,
            batch.member_count()
        )
        .map_err(print_error)?;
        for member in &batch.members {
            writeln!(out, "  {member}").map_err(print_error)?;
        }
    }
    Ok(batches)
}
