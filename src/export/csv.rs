//! CSV export.
//!
//! Flattened one-row-per-domain view meant for spreadsheets: the redirect
//! chain is rendered human-readable and the snippet is cut to a short
//! preview. The full values stay in the database and in the JSONL export.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use sqlx::{Pool, Sqlite};

use crate::config::EXPORT_SNIPPET_PREVIEW_CHARS;
use crate::export::queries::{fetch_selection, ExportSelection};
use crate::models::RedirectHop;

/// Exports a selection of results as CSV, to a file or stdout.
///
/// Read-only: never writes to the database. Returns the number of records
/// exported.
pub async fn export_csv(
    pool: &Pool<Sqlite>,
    selection: ExportSelection,
    output: Option<&Path>,
) -> Result<usize> {
    let records = fetch_selection(pool, selection)
        .await
        .context("Failed to query results for export")?;

    let mut writer: Writer<Box<dyn Write>> = match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Writer::from_writer(Box::new(file) as Box<dyn Write>)
        }
        None => Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>),
    };

    writer.write_record([
        "domain",
        "status_code",
        "redirect_chain",
        "snippet",
        "error_message",
        "last_checked",
        "scan_duration_ms",
    ])?;

    let count = records.len();
    for record in records {
        let snippet_preview: String = record
            .snippet
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(EXPORT_SNIPPET_PREVIEW_CHARS)
            .collect();

        writer.write_record(&[
            record.domain,
            record
                .status_code
                .map(|s| s.to_string())
                .unwrap_or_default(),
            format_chain(&record.redirect_chain),
            snippet_preview,
            record.error_message.unwrap_or_default(),
            record.last_checked.to_rfc3339(),
            record.scan_duration_ms.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(count)
}

/// Renders a redirect chain as `url (status) -> url (status)`, flagging a
/// chain cut off at the hop bound.
pub fn format_chain(chain: &[RedirectHop]) -> String {
    let mut rendered = chain
        .iter()
        .map(|hop| format!("{} ({})", hop.url, hop.status_code))
        .collect::<Vec<_>>()
        .join(" -> ");
    if chain.last().is_some_and(|hop| hop.truncated) {
        rendered.push_str(" [truncated]");
    }
    rendered
}
