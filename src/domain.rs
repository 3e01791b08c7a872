//! Candidate list loading.
//!
//! Reads a UTF-8 text file of host names, one per line. Lines beginning with
//! `#` and blank lines are ignored; names are lowercased and deduplicated
//! while preserving first-seen order.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Normalizes a raw input line into a candidate host name.
///
/// Returns `None` for comments, blanks, and names that cannot be part of a
/// URL host (embedded whitespace or path separators).
pub fn normalize_candidate(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed.contains(char::is_whitespace) || trimmed.contains('/') {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Loads candidate domains from a file, deduplicated in first-seen order.
pub async fn load_domains(path: &Path) -> Result<Vec<String>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open domains file: {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut domains = Vec::new();
    let mut skipped = 0usize;

    let mut lines = BufReader::new(file).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read line")? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match normalize_candidate(&line) {
            Some(domain) => {
                if seen.insert(domain.clone()) {
                    domains.push(domain);
                }
            }
            None => {
                warn!("Skipping invalid candidate line: {trimmed}");
                skipped += 1;
            }
        }
    }

    info!(
        "Loaded {} domains from {} ({} invalid lines skipped)",
        domains.len(),
        path.display(),
        skipped
    );
    Ok(domains)
}
