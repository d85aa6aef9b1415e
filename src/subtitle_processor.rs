use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Subtitle parsing and SRT re-emission

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number from the source, preserved as-is
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, embedded newlines preserved
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Start time in seconds, for the builder's real-number math.
    pub fn start_seconds(&self) -> f64 {
        self.start_time_ms as f64 / 1000.0
    }

    /// End time in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.end_time_ms as f64 / 1000.0
    }

    /// Display duration in seconds. Negative when the source entry is
    /// degenerate (end before start); the builder passes that through.
    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds() - self.start_seconds()
    }

    /// Text with newlines flattened to spaces, for flat display labels.
    pub fn flattened_text(&self) -> String {
        self.text.replace('\n', " ")
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds.
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].trim().parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries with their source file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Parse an SRT file into a collection.
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let entries = Self::parse_srt_string(&content);
        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse SRT content into subtitle entries.
    ///
    /// Blocks are separated by blank lines. A block needs at least an
    /// index line, a time-range line, and one text line; anything
    /// shorter, or with an unparseable index or time line, is dropped
    /// without aborting the rest of the parse. Indices are preserved
    /// as found in the source: no renumbering, no uniqueness checks,
    /// no ordering validation.
    pub fn parse_srt_string(content: &str) -> Vec<SubtitleEntry> {
        let mut entries = Vec::new();
        let normalized = content.replace("\r\n", "\n");

        for block in normalized.trim().split("\n\n") {
            let lines: Vec<&str> = block.trim().lines().collect();
            if lines.len() < 3 {
                continue;
            }

            let seq_num: usize = match lines[0].trim().parse() {
                Ok(num) => num,
                Err(_) => {
                    debug!("Skipping block with unparseable index: {}", lines[0]);
                    continue;
                }
            };

            let Some(caps) = TIMESTAMP_REGEX.captures(lines[1]) else {
                debug!("Skipping block {} with malformed time line: {}", seq_num, lines[1]);
                continue;
            };

            let start_time_ms = Self::capture_to_ms(&caps, 1);
            let end_time_ms = Self::capture_to_ms(&caps, 5);
            let text = lines[2..].join("\n");

            entries.push(SubtitleEntry {
                seq_num,
                start_time_ms,
                end_time_ms,
                text,
            });
        }

        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
        }

        entries
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    fn capture_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let field = |idx: usize| -> u64 {
            caps.get(idx)
                .map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        let hours = field(start_idx);
        let minutes = field(start_idx + 1);
        let seconds = field(start_idx + 2);
        let millis = field(start_idx + 3);

        (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
