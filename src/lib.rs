#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Employee Batches
//!
//! Seeds synthetic employee records into PostgreSQL and stores them again as
//! fixed-size batches, one aggregate row per batch.
//!
//! ## Overview
//!
//! A run:
//!
//! 1. Ensures the `employees` table exists
//! 2. Inserts N employees, each with its own JSON metadata
//! 3. Reads them back in insertion order
//! 4. Partitions them into groups of K and stores each group as one
//!    `employee_batches` row holding the JSON array of member metadata
//! 5. Optionally reads the batch rows back and prints them
//!
//! For 10 employees and a batch size of 3 that is four rows holding
//! 3, 3, 3 and 1 members.
//!
//! ## Module Organization
//!
//! - [`batching`] - Order-preserving partitioning and batch persistence
//! - [`models`] - Employee, batch and metadata types
//! - [`database`] - Connection, schema setup and the [`EmployeeStore`] seam
//! - [`runner`] - The end-to-end run
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use employee_batches::config::AppConfig;
//! use employee_batches::database::{DatabaseConnection, PgEmployeeStore};
//! use employee_batches::runner::run;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let db = DatabaseConnection::connect(&config.database).await?;
//! let store = PgEmployeeStore::new(db.pool().clone());
//!
//! let report = run(&config, &store, &mut std::io::stdout()).await?;
//! println!("batch sizes: {:?}", report.batch_sizes());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                                      # Unit, property and in-memory run tests
//! DATABASE_URL=postgres://... cargo test -- --ignored   # PostgreSQL integration tests
//! ```

pub mod batching;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod runner;
pub mod seed;

pub use batching::{batch_count, batch_name, partition, Batch, BatchWriter};
pub use crate::config::{AppConfig, BatchingConfig, DatabaseConfig, SeedConfig};
pub use database::{DatabaseConnection, EmployeeStore, PgEmployeeStore};
pub use error::{EmployeeBatchError, Result};
pub use models::{Employee, EmployeeBatch, MetaValue, Metadata, NewEmployee, NewEmployeeBatch};
pub use runner::{run, RunReport};
