/*!
 * Tests for the FCPXML document builder
 */

use srt2fcpxml::app_config::{Alignment, RenderConfig};
use srt2fcpxml::errors::BuildError;
use srt2fcpxml::fcpxml::{Element, FcpXmlBuilder};
use srt2fcpxml::subtitle_processor::SubtitleEntry;
use srt2fcpxml::timecode::FrameRate;

fn config_with_rate(rate: FrameRate) -> RenderConfig {
    let mut config = RenderConfig::new("TestProject");
    config.frame_rate = rate;
    config
}

fn one_second_entry() -> Vec<SubtitleEntry> {
    vec![SubtitleEntry::new(1, 1000, 2000, "Hello".to_string())]
}

fn title_of<'a>(document: &'a Element) -> &'a Element {
    document
        .find("library")
        .and_then(|l| l.find("event"))
        .and_then(|e| e.find("project"))
        .and_then(|p| p.find("sequence"))
        .and_then(|s| s.find("spine"))
        .and_then(|s| s.find("gap"))
        .and_then(|g| g.find("title"))
        .expect("document should contain a title node")
}

/// An empty record list is a build error, not an empty document
#[test]
fn test_build_withEmptyEntryList_shouldFail() {
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let result = builder.build(&[]);
    assert!(matches!(result, Err(BuildError::EmptySubtitles)));
}

/// Timing strings for a 1s-2s entry at 30fps are bit-for-bit fixed
#[test]
fn test_build_withIntegerRate_shouldComputeExactTimingStrings() {
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&one_second_entry()).unwrap();

    let title = title_of(&document);
    // offset = round(1 * 30) * 100 + 3.6 * 3000 * 100
    assert_eq!(title.attr_value("offset"), Some("1083000/3000s"));
    // duration = round(1 * 30) * 100 * 120000 / 3000
    assert_eq!(title.attr_value("duration"), Some("120000/120000s"));
    // clip-internal start is pinned to the project start epoch
    assert_eq!(title.attr_value("start"), Some("1080000/3000s"));
    assert_eq!(title.attr_value("lane"), Some("1"));
    assert_eq!(title.attr_value("ref"), Some("r2"));
}

/// NTSC rates shift everything onto the 1001 rational grid
#[test]
fn test_build_withNtscRate_shouldComputeExactTimingStrings() {
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Ntsc(29.97)));
    let document = builder.build(&one_second_entry()).unwrap();

    let title = title_of(&document);
    // offset = round(1 * 29.97) * 1001 + 3.6 * 30000 * 1001
    assert_eq!(title.attr_value("offset"), Some("108138030/30000s"));
    // duration is normalized to 1/120000s units regardless of rate
    assert_eq!(title.attr_value("duration"), Some("120120/120000s"));
    assert_eq!(title.attr_value("start"), Some("108108000/30000s"));
}

/// Format resource name and frame duration for the configured rate
#[test]
fn test_build_withNtscRate_shouldDeclareFormatResource() {
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Ntsc(29.97)));
    let document = builder.build(&one_second_entry()).unwrap();

    let resources = document.find("resources").unwrap();
    let format = resources.find("format").unwrap();
    assert_eq!(format.attr_value("id"), Some("r1"));
    assert_eq!(format.attr_value("name"), Some("FFVideoFormat1920x1080p30"));
    assert_eq!(format.attr_value("frameDuration"), Some("1001/30000s"));
    assert_eq!(format.attr_value("colorSpace"), Some("1-1-1 (Rec. 709)"));

    let effect = resources.find("effect").unwrap();
    assert_eq!(effect.attr_value("id"), Some("r2"));
    assert_eq!(effect.attr_value("name"), Some("Basic Title"));
}

/// The text body must precede the style definition inside each title
#[test]
fn test_build_withAnyEntry_shouldOrderTextBeforeStyleDef() {
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&one_second_entry()).unwrap();

    let title = title_of(&document);
    let names: Vec<&str> = title.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["param", "param", "param", "text", "text-style-def"]
    );
}

/// Per-entry style ids follow the source index
#[test]
fn test_build_withGappedIndices_shouldKeyStylesBySourceIndex() {
    let entries = vec![
        SubtitleEntry::new(7, 0, 1000, "Seven".to_string()),
        SubtitleEntry::new(9, 2000, 3000, "Nine".to_string()),
    ];
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&entries).unwrap();

    let gap = document
        .find("library")
        .and_then(|l| l.find("event"))
        .and_then(|e| e.find("project"))
        .and_then(|p| p.find("sequence"))
        .and_then(|s| s.find("spine"))
        .and_then(|s| s.find("gap"))
        .unwrap();
    let titles = gap.find_all("title");
    assert_eq!(titles.len(), 2);

    let style_ref = titles[0]
        .find("text")
        .and_then(|t| t.find("text-style"))
        .and_then(|s| s.attr_value("ref"));
    assert_eq!(style_ref, Some("ts7"));
    let def_id = titles[0]
        .find("text-style-def")
        .and_then(|d| d.attr_value("id"));
    assert_eq!(def_id, Some("ts7"));

    let def_id = titles[1]
        .find("text-style-def")
        .and_then(|d| d.attr_value("id"));
    assert_eq!(def_id, Some("ts9"));
}

/// Display name is flattened and truncated; the text body is not
#[test]
fn test_build_withMultiLineText_shouldFlattenDisplayNameOnly() {
    let long_text = "line one\n".to_string() + &"x".repeat(80);
    let entries = vec![SubtitleEntry::new(1, 0, 1000, long_text.clone())];
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&entries).unwrap();

    let title = title_of(&document);
    let name = title.attr_value("name").unwrap();
    assert_eq!(name.chars().count(), 50);
    assert!(!name.contains('\n'));

    let body_text = title
        .find("text")
        .and_then(|t| t.find("text-style"))
        .and_then(|s| s.text.as_deref());
    assert_eq!(body_text, Some(long_text.as_str()));
}

/// Alignment drives the x position and the symbolic label
#[test]
fn test_build_withLeftAlignment_shouldSetPositionAndLabel() {
    let mut config = config_with_rate(FrameRate::Integer(30));
    config.alignment = Alignment::Left;
    let builder = FcpXmlBuilder::new(config);
    let document = builder.build(&one_second_entry()).unwrap();

    let title = title_of(&document);
    let params = title.find_all("param");
    assert_eq!(params[0].attr_value("name"), Some("Position"));
    assert_eq!(params[0].attr_value("value"), Some("-840 -420"));
    assert_eq!(params[1].attr_value("name"), Some("Alignment"));
    assert_eq!(params[1].attr_value("value"), Some("0 (Left)"));
    assert_eq!(params[2].attr_value("name"), Some("Flatten"));
    assert_eq!(params[2].attr_value("value"), Some("1"));
}

/// Gap and sequence span the end of the last entry
#[test]
fn test_build_withMultipleEntries_shouldSpanLastEntryEnd() {
    let entries = vec![
        SubtitleEntry::new(1, 0, 1000, "One".to_string()),
        SubtitleEntry::new(2, 1000, 2000, "Two".to_string()),
    ];
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&entries).unwrap();

    let sequence = document
        .find("library")
        .and_then(|l| l.find("event"))
        .and_then(|e| e.find("project"))
        .and_then(|p| p.find("sequence"))
        .unwrap();
    // round(2 * 30) * 100 over the rate denominator
    assert_eq!(sequence.attr_value("duration"), Some("6000/3000s"));

    let gap = sequence.find("spine").and_then(|s| s.find("gap")).unwrap();
    assert_eq!(gap.attr_value("duration"), Some("6000/3000s"));
    assert_eq!(gap.attr_value("offset"), Some("0s"));
    assert_eq!(gap.attr_value("start"), Some("1080000/3000s"));
}

/// End before start propagates as a non-positive duration string
#[test]
fn test_build_withDegenerateEntry_shouldEmitNonPositiveDuration() {
    let entries = vec![SubtitleEntry::new(1, 5000, 2000, "Backwards".to_string())];
    let builder = FcpXmlBuilder::new(config_with_rate(FrameRate::Integer(30)));
    let document = builder.build(&entries).unwrap();

    let title = title_of(&document);
    let duration = title.attr_value("duration").unwrap();
    assert!(duration.starts_with('-') || duration.starts_with('0'));
}
