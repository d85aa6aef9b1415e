use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};

// @module: LRC/LRCX lyric file to SRT conversion

// @const: [mm:ss.xx] / [mm:ss.xxx] line timestamp
static LINE_TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2,3})\]").unwrap());

// @const: word-timing lines carried by LRCX files
static TT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]\[tt\].*").unwrap());

// @const: Hangul syllables and Jamo
static KOREAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{1100}-\u{11FF}\u{AC00}-\u{D7AF}]").unwrap());

// @const: Hiragana and Katakana (kana-exclusive, CJK ideographs pass)
static KANA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}]").unwrap());

// @const: Simplified-Chinese translation tag
static TR_ZH_HANS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[tr:zh-Hans\]").unwrap());

/// Tail given to the final lyric line, which has no successor to take
/// its end time from.
const LAST_LINE_TAIL_MS: u64 = 5_000;

/// Drop foreign-language and word-timing lines, deduplicate translated
/// lines, and strip the translation tag from survivors.
///
/// A `[tr:zh-Hans]` line is dropped when a non-translated line with
/// the same timestamp was already kept, so bilingual LRCX files come
/// out with one line per timestamp.
pub fn cleanup_lrc(content: &str) -> String {
    let mut kept = Vec::new();
    let mut timestamps_seen: HashSet<String> = HashSet::new();

    for line in content.lines() {
        if TT_LINE_REGEX.is_match(line)
            || KOREAN_REGEX.is_match(line)
            || KANA_REGEX.is_match(line)
        {
            continue;
        }

        if let Some(caps) = LINE_TIMESTAMP_REGEX.captures(line) {
            let timestamp = format!("{}:{}.{}", &caps[1], &caps[2], &caps[3]);
            let is_translation = TR_ZH_HANS_REGEX.is_match(line);

            if is_translation && timestamps_seen.contains(&timestamp) {
                continue;
            }
            if !is_translation {
                timestamps_seen.insert(timestamp);
            }
        }

        kept.push(TR_ZH_HANS_REGEX.replace_all(line, "").into_owned());
    }

    kept.join("\n")
}

/// Parse cleaned LRC content into subtitle entries.
///
/// Each line's end time is the next line's start; the final line gets
/// a fixed five-second tail. Lines without a timestamp (ID tags like
/// `[ar:]`, `[ti:]`) and lines with empty text are skipped.
pub fn parse_lrc_string(content: &str) -> Result<Vec<SubtitleEntry>, ConvertError> {
    let mut timed_lines: Vec<(u64, String)> = Vec::new();

    for line in content.lines() {
        let Some(caps) = LINE_TIMESTAMP_REGEX.captures(line) else {
            continue;
        };

        let minutes: u64 = caps[1].parse().unwrap_or(0);
        let seconds: u64 = caps[2].parse().unwrap_or(0);
        let frac = &caps[3];
        let millis: u64 = match frac.len() {
            2 => frac.parse::<u64>().unwrap_or(0) * 10,
            _ => frac.parse().unwrap_or(0),
        };

        let start_ms = minutes * 60_000 + seconds * 1_000 + millis;
        let text = line[caps.get(0).map_or(0, |m| m.end())..].trim().to_string();
        if text.is_empty() {
            continue;
        }

        timed_lines.push((start_ms, text));
    }

    if timed_lines.is_empty() {
        return Err(ConvertError::NoEntries("LRC content".to_string()));
    }

    timed_lines.sort_by_key(|(start_ms, _)| *start_ms);

    let mut entries = Vec::with_capacity(timed_lines.len());
    for (i, (start_ms, text)) in timed_lines.iter().enumerate() {
        let end_ms = timed_lines
            .get(i + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(start_ms + LAST_LINE_TAIL_MS);

        entries.push(SubtitleEntry::new(i + 1, *start_ms, end_ms, text.clone()));
    }

    Ok(entries)
}

/// Clean up and convert a single .lrc/.lrcx file, writing the .srt
/// sibling (or the given output path).
pub fn convert_lrc_file<P: AsRef<Path>>(input: P, output: Option<PathBuf>) -> Result<PathBuf> {
    let input = input.as_ref();

    if !FileManager::file_exists(input) {
        return Err(anyhow!("Input file not found: {}", input.display()));
    }

    let content = FileManager::read_to_string(input)?;
    let cleaned = cleanup_lrc(&content);
    let entries = parse_lrc_string(&cleaned)
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
