//! End-of-run summary output.

use colored::*;
use strum::IntoEnumIterator;

use crate::error_handling::ScanCategory;
use crate::run::ScanReport;

/// Prints the run summary to stdout.
///
/// Goes straight to stdout rather than the logger so the numbers are visible
/// even at `--log-level error`, and are not wrapped by the JSON log format.
pub fn print_summary(report: &ScanReport) {
    println!();
    println!("{}", "Scan complete".bold());
    println!("  {:<22} {}", "Domains in input:", report.total_candidates);
    println!("  {:<22} {}", "Probed:", report.scanned);
    println!(
        "  {:<22} {}",
        "New successes:",
        report.new_success.to_string().green()
    );
    println!(
        "  {:<22} {}",
        "New redirects:",
        report.new_redirect.to_string().cyan()
    );
    println!("  {:<22} {}", "Failed:", report.failed.to_string().red());
    println!(
        "  {:<22} {}",
        "Skipped (cached):",
        report.skipped.to_string().yellow()
    );
    println!("  {:<22} {:.1}s", "Duration:", report.elapsed_seconds);
    println!("  {:<22} {}", "Results stored in:", report.db_path.display());

    // Every category the failed counter covers, HTTP errors included.
    if report.failed > 0 {
        println!();
        println!("{}", "Failure breakdown".bold());
        for category in ScanCategory::iter()
            .filter(|category| !matches!(category, ScanCategory::Success | ScanCategory::Redirect))
        {
            let count = report.stats.count(category);
            if count > 0 {
                println!("  {:<22} {}", format!("{}:", category.as_str()), count);
            }
        }
    }
}
