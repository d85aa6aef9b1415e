use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::timecode::FrameRate;

/// Rendering configuration module
/// This module holds the settings the document builder needs to place
/// and style subtitle titles: project/event naming, frame rate,
/// resolution, alignment and vertical offset.

/// Horizontal text alignment of the rendered titles
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    // @alignment: Left
    Left,
    // @alignment: Center
    #[default]
    Center,
    // @alignment: Right
    Right,
}

impl Alignment {
    // @returns: X position on the canvas for this alignment
    pub fn x_position(&self) -> f64 {
        match self {
            Self::Left => -840.0,
            Self::Center => 0.0,
            Self::Right => 840.0,
        }
    }

    // @returns: Symbolic label embedded in the title's Alignment param
    pub fn param_label(&self) -> &'static str {
        match self {
            Self::Left => "0 (Left)",
            Self::Center => "1 (Center)",
            Self::Right => "2 (Right)",
        }
    }

    // @returns: Lowercase alignment identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Left => "left".to_string(),
            Self::Center => "center".to_string(),
            Self::Right => "right".to_string(),
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for Alignment {
    type Err = anyhow::Error;

    /// Exactly three values are valid. Anything else is an error, not
    /// a fallback to center, so typos surface instead of being masked.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(anyhow!("Invalid alignment: {}", s)),
        }
    }
}

/// Settings for one SRT to FCPXML build
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Project name inside the generated library
    pub project_name: String,

    /// Event (container) name, default "_FCPXMLs"
    pub event_name: String,

    /// Nominal frame rate of the target sequence
    pub frame_rate: FrameRate,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Horizontal alignment of rendered titles
    pub alignment: Alignment,

    /// Vertical offset of rendered titles, in canvas units
    pub y_position: i32,
}

impl RenderConfig {
    pub fn new(project_name: impl Into<String>) -> Self {
        RenderConfig {
            project_name: project_name.into(),
            event_name: default_event_name(),
            frame_rate: default_frame_rate(),
            width: default_width(),
            height: default_height(),
            alignment: Alignment::default(),
            y_position: default_y_position(),
        }
    }

    /// Validate the configuration before building
    pub fn validate(&self) -> Result<()> {
        if self.project_name.is_empty() {
            return Err(anyhow!("Project name must not be empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "Invalid resolution: {}x{}",
                self.width,
                self.height
            ));
        }
        Ok(())
    }
}

fn default_event_name() -> String {
    "_FCPXMLs".to_string()
}

fn default_frame_rate() -> FrameRate {
    FrameRate::Integer(60)
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_y_position() -> i32 {
    -420
}
