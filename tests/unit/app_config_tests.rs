/*!
 * Tests for render configuration and alignment handling
 */

use std::str::FromStr;

use srt2fcpxml::app_config::{Alignment, RenderConfig};
use srt2fcpxml::timecode::FrameRate;

/// Exactly three alignment values parse; anything else fails
#[test]
fn test_alignment_from_str_withValidValues_shouldParse() {
    assert_eq!(Alignment::from_str("left").unwrap(), Alignment::Left);
    assert_eq!(Alignment::from_str("Center").unwrap(), Alignment::Center);
    assert_eq!(Alignment::from_str("RIGHT").unwrap(), Alignment::Right);
}

/// Typos fail instead of silently falling back to center
#[test]
fn test_alignment_from_str_withInvalidValue_shouldFail() {
    assert!(Alignment::from_str("centre").is_err());
    assert!(Alignment::from_str("middle").is_err());
    assert!(Alignment::from_str("").is_err());
}

/// X positions and symbolic labels per alignment
#[test]
fn test_alignment_tables_withEachVariant_shouldMatch() {
    assert_eq!(Alignment::Left.x_position(), -840.0);
    assert_eq!(Alignment::Center.x_position(), 0.0);
    assert_eq!(Alignment::Right.x_position(), 840.0);

    assert_eq!(Alignment::Left.param_label(), "0 (Left)");
    assert_eq!(Alignment::Center.param_label(), "1 (Center)");
    assert_eq!(Alignment::Right.param_label(), "2 (Right)");
}

/// Defaults match the CLI contract
#[test]
fn test_render_config_new_withProjectName_shouldUseDefaults() {
    let config = RenderConfig::new("Movie");

    assert_eq!(config.project_name, "Movie");
    assert_eq!(config.event_name, "_FCPXMLs");
    assert_eq!(config.frame_rate, FrameRate::Integer(60));
    assert_eq!(config.width, 1920);
    assert_eq!(config.height, 1080);
    assert_eq!(config.alignment, Alignment::Center);
    assert_eq!(config.y_position, -420);
}

/// Validation rejects empty names and zero resolutions
#[test]
fn test_render_config_validate_withBadValues_shouldFail() {
    let mut config = RenderConfig::new("");
    assert!(config.validate().is_err());

    config.project_name = "Movie".to_string();
    assert!(config.validate().is_ok());

    config.width = 0;
    assert!(config.validate().is_err());
}
