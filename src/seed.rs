//! Synthetic employee generation.

use crate::config::SeedConfig;
use crate::error::{EmployeeBatchError, Result};
use crate::models::{Metadata, NewEmployee};

/// Metadata for the `index`-th (1-indexed) synthetic employee.
///
/// Fails when `index` does not fit the signed integer metadata value.
pub fn employee_metadata(index: usize, level: &str) -> Result<Metadata> {
    let batch = i64::try_from(index).map_err(|_| {
        EmployeeBatchError::Configuration(format!(
            "seed index {index} exceeds the metadata integer range"
        ))
    })?;
    Ok(Metadata::new()
        .with("project", format!("Project-{index}"))
        .with("level", level)
        .with("batch", batch))
}

/// `config.count` employees sharing name and department, each with its own project.
pub fn synthetic_employees(config: &SeedConfig) -> Result<Vec<NewEmployee>> {
    (1..=config.count)
        .map(|index| {
            Ok(NewEmployee {
                name: config.name.clone(),
                department: config.department.clone(),
                meta: employee_metadata(index, &config.level)?,
            })
        })
        .collect()
}
