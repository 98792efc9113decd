//! # Batch Partitioning
//!
//! Splits an ordered list of employees into consecutive fixed-size groups and
//! persists each group as one aggregate row.
//!
//! For `L` records and batch size `K` there are `ceil(L / K)` groups. Group
//! `i` (0-indexed) covers `[i * K, min((i + 1) * K, L))`, so every group holds
//! `K` members except possibly the last, which holds the remainder.

use crate::database::EmployeeStore;
use crate::error::{EmployeeBatchError, Result};
use crate::models::{Employee, EmployeeBatch, NewEmployeeBatch};
use tracing::{debug, info};

/// A contiguous slice of the input, tagged with its 1-indexed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<'a, T> {
    pub position: usize,
    pub members: &'a [T],
}

impl<T> Batch<'_, T> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition `records` into groups of `batch_size`, preserving order.
pub fn partition<T>(records: &[T], batch_size: usize) -> Result<Vec<Batch<'_, T>>> {
    if batch_size == 0 {
        return Err(EmployeeBatchError::InvalidBatchSize(batch_size));
    }

    Ok(records
        .chunks(batch_size)
        .enumerate()
        .map(|(index, members)| Batch {
            position: index + 1,
            members,
        })
        .collect())
}

/// Number of groups `partition` produces for `len` records.
///
/// Rejects a zero batch size the same way `partition` does.
pub fn batch_count(len: usize, batch_size: usize) -> Result<usize> {
    if batch_size == 0 {
        return Err(EmployeeBatchError::InvalidBatchSize(batch_size));
    }
    Ok(len.div_ceil(batch_size))
}

/// `"<prefix>_batch_<position>"`
pub fn batch_name(prefix: &str, position: usize) -> String {
    format!("{prefix}_batch_{position}")
}

/// Writes one aggregate row per batch.
#[derive(Debug, Clone)]
pub struct BatchWriter {
    prefix: String,
    department: String,
    batch_size: usize,
}

impl BatchWriter {
    pub fn new(prefix: impl Into<String>, department: impl Into<String>, batch_size: usize) -> Self {
        Self {
            prefix: prefix.into(),
            department: department.into(),
            batch_size,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Build the row for one batch without touching storage.
    pub fn prepare(&self, batch: &Batch<'_, Employee>) -> Result<NewEmployeeBatch> {
        let position = i32::try_from(batch.position).map_err(|_| {
            EmployeeBatchError::write(
                "insert batch",
                format!("batch position {} exceeds column range", batch.position),
            )
        })?;

        Ok(NewEmployeeBatch {
            batch_name: batch_name(&self.prefix, batch.position),
            position,
            department: self.department.clone(),
            members: batch.members.iter().map(|e| e.meta.clone()).collect(),
        })
    }

    /// Persist every batch in order, stopping at the first failure.
    ///
    /// Batches after a failing one are never written.
    pub async fn write_all(
        &self,
        store: &dyn EmployeeStore,
        employees: &[Employee],
    ) -> Result<Vec<EmployeeBatch>> {
        self.write_all_with(store, employees, |_| Ok(())).await
    }

    /// Like [`write_all`](Self::write_all), calling `on_written` after each commit.
    pub async fn write_all_with<F>(
        &self,
        store: &dyn EmployeeStore,
        employees: &[Employee],
        mut on_written: F,
    ) -> Result<Vec<EmployeeBatch>>
    where
        F: FnMut(&EmployeeBatch) -> Result<()>,
    {
        let batches = partition(employees, self.batch_size)?;
        info!(
            employees = employees.len(),
            batch_size = self.batch_size,
            batches = batches.len(),
            "Partitioned employees into batches"
        );

        let mut written = Vec::with_capacity(batches.len());
        for batch in &batches {
            let new_batch = self.prepare(batch)?;
            debug!(
                batch_name = %new_batch.batch_name,
                members = batch.len(),
                "Writing batch"
            );
            let stored = store.insert_batch(new_batch).await?;
            on_written(&stored)?;
            written.push(stored);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes<T>(batches: &[Batch<'_, T>]) -> Vec<usize> {
        batches.iter().map(Batch::len).collect()
    }

    #[test]
    fn test_ten_by_three_leaves_remainder() {
        let records: Vec<u32> = (1..=10).collect();
        let batches = partition(&records, 3).unwrap();

        assert_eq!(sizes(&batches), vec![3, 3, 3, 1]);
        assert_eq!(batches[3].members, &[10]);
        assert_eq!(batches[3].position, 4);
    }

    #[test]
    fn test_nine_by_three_is_even() {
        let records: Vec<u32> = (1..=9).collect();
        let batches = partition(&records, 3).unwrap();

        assert_eq!(sizes(&batches), vec![3, 3, 3]);
        assert_eq!(batches[2].members, &[7, 8, 9]);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let records = [1, 2, 3];
        assert!(matches!(
            partition(&records, 0),
            Err(EmployeeBatchError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        let records: [u32; 0] = [];
        assert!(partition(&records, 3).unwrap().is_empty());
        assert_eq!(batch_count(0, 3).unwrap(), 0);
    }

    #[test]
    fn test_batch_size_larger_than_input() {
        let records = [1, 2];
        let batches = partition(&records, 5).unwrap();
        assert_eq!(sizes(&batches), vec![2]);
    }

    #[test]
    fn test_batch_count_matches_partition() {
        assert_eq!(batch_count(10, 3).unwrap(), 4);
        assert_eq!(batch_count(9, 3).unwrap(), 3);
        assert_eq!(batch_count(1, 1).unwrap(), 1);
    }

    #[test]
    fn test_batch_count_rejects_zero_batch_size() {
        assert!(matches!(
            batch_count(10, 0),
            Err(EmployeeBatchError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_batch_name_is_one_indexed() {
        assert_eq!(batch_name("alice", 1), "alice_batch_1");
        assert_eq!(batch_name("alice", 12), "alice_batch_12");
    }

    #[test]
    fn test_prepare_collects_member_metadata_in_order() {
        use crate::models::Metadata;

        let employees: Vec<Employee> = (1..=4_i64)
            .map(|i| Employee {
                employee_id: i,
                name: "Alice".to_string(),
                department: "Engineering".to_string(),
                meta: Metadata::new().with("batch", i),
            })
            .collect();

        let writer = BatchWriter::new("alice", "Engineering", 3);
        let batches = partition(&employees, writer.batch_size()).unwrap();
        let last = writer.prepare(&batches[1]).unwrap();

        assert_eq!(last.batch_name, "alice_batch_2");
        assert_eq!(last.position, 2);
        assert_eq!(last.members, vec![Metadata::new().with("batch", 4_i64)]);
    }
}
