//! # Employee Batches
//!
//! Runs the seed-and-batch flow once against the configured database.
//! Takes no arguments; see `employee_batches::config` for configuration.
//! Exits non-zero with a diagnostic naming the failed step on the first error.

use anyhow::Context;
use employee_batches::config::AppConfig;
use employee_batches::database::{DatabaseConnection, PgEmployeeStore};
use employee_batches::error::EmployeeBatchError;
use employee_batches::logging::{init_structured_logging, log_error};
use employee_batches::runner::run;
use std::process;
use tracing::info;

fn with_step(error: EmployeeBatchError) -> anyhow::Error {
    let step = error.step();
    anyhow::Error::new(error).context(format!("failed to {step}"))
}

async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let db = DatabaseConnection::connect(&config.database)
        .await
        .map_err(with_step)?;
    let store = PgEmployeeStore::new(db.pool().clone());

    let mut stdout = std::io::stdout();
    let result = run(config, &store, &mut stdout).await;
    db.close().await;

    let report = result.map_err(with_step)?;
    info!(
        inserted = report.inserted,
        batches = report.batches.len(),
        "Run completed"
    );
    Ok(())
}

fn fail(error: &anyhow::Error) -> ! {
    log_error("employee-batches", "run", &format!("{error:#}"), None);
    eprintln!("Error: {error:#}");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load().context("failed to load configuration") {
        Ok(config) => config,
        Err(error) => {
            init_structured_logging("compact");
            fail(&error);
        }
    };

    init_structured_logging(&config.log_format);

    if let Err(error) = execute(&config).await {
        fail(&error);
    }
}
