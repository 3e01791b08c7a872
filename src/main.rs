//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `subdomain_scan` library: parses arguments, sets
//! up logging, runs the scan, prints the summary, and writes any requested
//! exports. All core functionality lives in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use subdomain_scan::export::{export_csv, ExportSelection};
use subdomain_scan::initialization::init_logger_with;
use subdomain_scan::{init_db_pool, print_summary, run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let exports = requested_exports(&config);
    let db_path = config.db_path.clone();

    match run_scan(config).await {
        Ok(report) => {
            print_summary(&report);
            if let Err(e) = write_exports(&db_path, &exports).await {
                eprintln!("subdomain_scan export error: {e:#}");
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("subdomain_scan error: {e:#}");
            process::exit(1);
        }
    }
}

fn requested_exports(config: &Config) -> Vec<ExportSelection> {
    let mut exports = Vec::new();
    if config.export_200 {
        exports.push(ExportSelection::Successful);
    }
    if config.export_3xx {
        exports.push(ExportSelection::Redirecting);
    }
    if config.export_all {
        exports.push(ExportSelection::All);
    }
    exports
}

async fn write_exports(db_path: &Path, exports: &[ExportSelection]) -> Result<()> {
    if exports.is_empty() {
        return Ok(());
    }

    let pool = init_db_pool(db_path)
        .await
        .context("Failed to open database for export")?;

    for &selection in exports {
        let filename = selection.default_filename();
        let count = export_csv(&pool, selection, Some(Path::new(filename))).await?;
        info!("Exported {count} records to {filename}");
    }
    Ok(())
}
