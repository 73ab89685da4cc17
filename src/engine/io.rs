//! Record Reading and Output Writing
//!
//! The engine owns all file I/O. Records are lines of unstructured text; an
//! input location may be a single file or a directory whose regular files
//! are read in sorted name order. Output goes to a fresh directory holding
//! one part file plus a success marker, written only after every record has
//! been aggregated.

use super::types::KeyValue;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the single output part file.
pub const PART_FILE: &str = "part-00000";

/// Empty marker file written once the part file is complete.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Reads every record from the input location.
///
/// Record boundaries are line boundaries. Empty lines are still records;
/// they simply tokenize to nothing downstream.
pub async fn read_records(input: &Path) -> Result<Vec<String>> {
    let metadata = tokio::fs::metadata(input).await?;

    let mut files: Vec<PathBuf> = Vec::new();
    if metadata.is_dir() {
        let mut dir = tokio::fs::read_dir(input).await?;
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            }
        }
        // Deterministic record order regardless of directory enumeration
        files.sort();
    } else {
        files.push(input.to_path_buf());
    }

    let mut records = Vec::new();
    for file in files {
        let text = tokio::fs::read_to_string(&file).await?;
        let before = records.len();
        records.extend(text.lines().map(|line| line.to_string()));

        tracing::debug!(
            "Read {} records from {}",
            records.len() - before,
            file.display()
        );
    }

    Ok(records)
}

/// Writes the aggregated pairs to the output directory.
///
/// One line per pair: the key, a tab, and the decimal count. The
/// `_SUCCESS` marker is written last, so its presence implies a complete
/// part file.
pub async fn write_output(output: &Path, pairs: &[KeyValue]) -> Result<()> {
    tokio::fs::create_dir_all(output).await?;

    let mut buf = String::new();
    for (key, count) in pairs {
        buf.push_str(&format!("{}\t{}\n", key, count));
    }

    let part_path = output.join(PART_FILE);
    tokio::fs::write(&part_path, buf).await?;
    tokio::fs::write(output.join(SUCCESS_MARKER), "").await?;

    tracing::info!(
        "Wrote {} output records to {}",
        pairs.len(),
        part_path.display()
    );

    Ok(())
}
