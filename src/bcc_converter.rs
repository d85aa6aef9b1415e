use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use serde::Deserialize;

use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};

// @module: Bilibili BCC to SRT conversion

/// Top-level BCC document. Only the body is relevant; the rest of the
/// JSON (font size, colors, stroke) has no SRT counterpart.
#[derive(Debug, Deserialize)]
struct BccDocument {
    #[serde(default)]
    body: Vec<BccLine>,
}

/// One timed line in a BCC file. Times are seconds as floats.
#[derive(Debug, Deserialize)]
struct BccLine {
    #[serde(default, rename = "from")]
    start: f64,

    #[serde(default)]
    to: f64,

    #[serde(default)]
    content: String,
}

/// Convert BCC JSON content into subtitle entries.
///
/// Empty-content lines are dropped and the survivors renumbered
/// 1-based, so the SRT output is contiguous even when the BCC body
/// carries blank spacer lines.
pub fn parse_bcc_string(content: &str) -> Result<Vec<SubtitleEntry>, ConvertError> {
    let document: BccDocument = serde_json::from_str(content)
        .map_err(|e| ConvertError::ParseError(format!("invalid BCC JSON: {}", e)))?;

    if document.body.is_empty() {
        return Err(ConvertError::NoEntries("BCC body".to_string()));
    }

    let mut entries = Vec::new();
    for line in &document.body {
        let text = line.content.trim();
        if text.is_empty() {
            continue;
        }

        entries.push(SubtitleEntry::new(
            entries.len() + 1,
            seconds_to_ms(line.start),
            seconds_to_ms(line.to),
            text.to_string(),
        ));
    }

    if entries.is_empty() {
        return Err(ConvertError::NoEntries("BCC body".to_string()));
    }

    Ok(entries)
}

/// Convert a single .bcc file, writing the .srt sibling (or the given
/// output path).
pub fn convert_bcc_file<P: AsRef<Path>>(input: P, output: Option<PathBuf>) -> Result<PathBuf> {
    let input = input.as_ref();

    if !FileManager::file_exists(input) {
        return Err(anyhow!("Input file not found: {}", input.display()));
    }

    let content = FileManager::read_to_string(input)?;
    let entries = parse_bcc_string(&content)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    let output = output.unwrap_or_else(|| input.with_extension("srt"));

    let collection = SubtitleCollection {
        source_file: input.to_path_buf(),
        entries,
    };
    collection.write_to_srt(&output)?;

    info!("Converted {} to {}", input.display(), output.display());
    Ok(output)
}

/// Convert every .bcc file in a directory. Failures on individual
/// files are reported and skipped; the batch continues.
pub fn convert_bcc_folder<P: AsRef<Path>>(dir: P) -> Result<usize> {
    let dir = dir.as_ref();
    let files = FileManager::find_files(dir, "bcc")?;

    if files.is_empty() {
        warn!("No BCC files found in {}", dir.display());
        return Ok(0);
    }

    info!("Found {} BCC file(s) to convert", files.len());

    let mut converted = 0;
    for file in &files {
        match convert_bcc_file(file, None) {
            Ok(_) => converted += 1,
            Err(e) => warn!("Skipping {}: {}", file.display(), e),
        }
    }

    info!("Converted {}/{} files", converted, files.len());
    Ok(converted)
}

/// Seconds (float) to whole milliseconds, truncating the sub-ms part.
fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0) as u64
}
