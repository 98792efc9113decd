pub mod employee;
pub mod employee_batch;
pub mod metadata;

// Re-export models for easy access
pub use employee::{Employee, EmployeeRow, NewEmployee};
pub use employee_batch::{EmployeeBatch, EmployeeBatchRow, NewEmployeeBatch};
pub use metadata::{
    decode_metadata, decode_metadata_list, encode_metadata, encode_metadata_list, MetaValue,
    Metadata,
};
