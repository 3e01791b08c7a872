//! JSONL export: one JSON object per line, full record values.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sqlx::{Pool, Sqlite};

use crate::export::queries::{fetch_selection, ExportSelection};

/// Exports a selection of results as JSON Lines, to a file or stdout.
///
/// Unlike the CSV view, nothing is flattened or cut: the redirect chain is
/// the stored JSON array and the snippet is complete. Returns the number of
/// records exported.
pub async fn export_jsonl(
    pool: &Pool<Sqlite>,
    selection: ExportSelection,
    output: Option<&Path>,
) -> Result<usize> {
    let records = fetch_selection(pool, selection)
        .await
        .context("Failed to query results for export")?;

    let mut writer: BufWriter<Box<dyn Write>> = match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            BufWriter::new(Box::new(file) as Box<dyn Write>)
        }
        None => BufWriter::new(Box::new(io::stdout()) as Box<dyn Write>),
    };

    let count = records.len();
    for record in &records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(count)
}
