//! # Database Operations
//!
//! PostgreSQL access through SQLx.
//!
//! ## Key Components
//!
//! - [`connection`] - Pool creation from [`DatabaseConfig`](crate::config::DatabaseConfig)
//! - [`migrations`] - Idempotent table creation and reset
//! - [`store`] - The [`EmployeeStore`] seam used by a run
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use employee_batches::config::AppConfig;
//! use employee_batches::database::{DatabaseConnection, EmployeeStore, PgEmployeeStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let db = DatabaseConnection::connect(&config.database).await?;
//! let store = PgEmployeeStore::new(db.pool().clone());
//!
//! store.ensure_employees_table().await?;
//! let employees = store.list_employees().await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::DatabaseConnection;
pub use migrations::DatabaseMigrations;
pub use store::{EmployeeStore, PgEmployeeStore};
