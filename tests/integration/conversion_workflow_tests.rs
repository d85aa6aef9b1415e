/*!
 * End-to-end conversion tests
 */

use srt2fcpxml::app_config::{Alignment, RenderConfig};
use srt2fcpxml::app_controller::{Controller, SANDBOX_OUTPUT_PATH};
use srt2fcpxml::fcpxml::serializer::XML_DECLARATION;
use srt2fcpxml::timecode::FrameRate;

use crate::common;

fn left_720p24_config(project: &str) -> RenderConfig {
    let mut config = RenderConfig::new(project);
    config.frame_rate = FrameRate::Integer(24);
    config.width = 1280;
    config.height = 720;
    config.alignment = Alignment::Left;
    config
}

/// Three-entry SRT at 24fps 1280x720 left: one format, one effect,
/// one gap, three titles keyed by their source indices
#[test]
fn test_run_withThreeEntrySrt_shouldProduceExpectedDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::SAMPLE_SRT).unwrap();

    let controller = Controller::with_config(left_720p24_config("movie")).unwrap();
    let output = controller.run(&input, None, false).unwrap();

    assert_eq!(output, temp_dir.path().join("movie.fcpxml"));
    let content = std::fs::read_to_string(&output).unwrap();

    // Fixed declaration appears verbatim, exactly once
    assert!(content.starts_with(XML_DECLARATION));
    assert_eq!(content.matches("<?xml").count(), 1);
    assert_eq!(content.matches("<!DOCTYPE fcpxml>").count(), 1);

    // One format and one effect resource, one gap, three titles
    assert_eq!(content.matches("<format ").count(), 1);
    assert_eq!(content.matches("<effect ").count(), 1);
    assert_eq!(content.matches("<gap ").count(), 1);
    assert_eq!(content.matches("<title ").count(), 3);
    assert!(content.contains("FFVideoFormat1280x720p24"));
    assert!(content.contains("frameDuration=\"100/2400s\""));

    // Style definitions keyed by source index
    for id in ["ts1", "ts2", "ts3"] {
        assert!(content.contains(&format!("<text-style-def id=\"{}\">", id)));
    }

    // Left alignment placement
    assert!(content.contains("value=\"-840 -420\""));
    assert!(content.contains("value=\"0 (Left)\""));

    // Multi-line text survives in the body, flattened in the name
    assert!(content.contains("Second subtitle\nwith a second line"));
    assert!(content.contains("name=\"Second subtitle with a second line\""));
}

/// Missing input file aborts before anything is written
#[test]
fn test_run_withMissingInput_shouldFailWithoutOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = temp_dir.path().join("absent.srt");

    let controller = Controller::with_config(left_720p24_config("absent")).unwrap();
    let result = controller.run(&input, None, false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("absent.fcpxml").exists());
}

/// Zero parseable records aborts before anything is written
#[test]
fn test_run_withNoParseableRecords_shouldFailWithoutOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input =
        common::create_test_file(temp_dir.path(), "junk.srt", "not a subtitle file\n").unwrap();

    let controller = Controller::with_config(left_720p24_config("junk")).unwrap();
    let result = controller.run(&input, None, false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("junk.fcpxml").exists());
}

/// An explicit output path wins over the sibling default
#[test]
fn test_run_withOutputOverride_shouldWriteThere() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "movie.srt", common::SAMPLE_SRT).unwrap();
    let override_path = temp_dir.path().join("elsewhere/output.fcpxml");

    let controller = Controller::with_config(left_720p24_config("movie")).unwrap();
    let output = controller
        .run(&input, Some(override_path.clone()), false)
        .unwrap();

    assert_eq!(output, override_path);
    assert!(override_path.exists());
    assert!(!temp_dir.path().join("movie.fcpxml").exists());
}

/// The sandbox path is the documented well-known location
#[test]
fn test_sandbox_output_path_constant_shouldBeWellKnown() {
    assert_eq!(SANDBOX_OUTPUT_PATH, "/input.fcpxml");
}

/// Timing strings are reproducible across runs
#[test]
fn test_run_withSameInputTwice_shouldBeDeterministic() {
    let temp_dir = common::create_temp_dir().unwrap();
    let srt = "1\n00:00:01,000 --> 00:00:02,000\nHello\n";
    let input = common::create_test_file(temp_dir.path(), "one.srt", srt).unwrap();

    let mut config = RenderConfig::new("one");
    config.frame_rate = FrameRate::Integer(30);
    let controller = Controller::with_config(config).unwrap();

    let output = controller.run(&input, None, false).unwrap();
    let first = std::fs::read_to_string(&output).unwrap();
    controller.run(&input, None, false).unwrap();
    let second = std::fs::read_to_string(&output).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("offset=\"1083000/3000s\""));
    assert!(first.contains("duration=\"120000/120000s\""));
    assert!(first.contains("start=\"1080000/3000s\""));
}
