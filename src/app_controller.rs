use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, info};

use crate::app_config::RenderConfig;
use crate::fcpxml::{FcpXmlBuilder, serialize};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle conversion

/// Well-known output path used when running inside a sandboxed host
/// (a browser or embedding runtime with a virtual filesystem). The
/// host reads the result from here regardless of the project name.
pub const SANDBOX_OUTPUT_PATH: &str = "/input.fcpxml";

/// Main application controller for the SRT to FCPXML pipeline
pub struct Controller {
    // @field: Render configuration
    config: RenderConfig,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the conversion: parse the SRT input, build the document
    /// tree, serialize, write. The output file is written only after
    /// the whole document has been assembled, so a failure at any
    /// stage leaves no half-written file behind.
    pub fn run(
        &self,
        input_file: &Path,
        output_override: Option<PathBuf>,
        sandboxed: bool,
    ) -> Result<PathBuf> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("SRT file not found: {}", input_file.display()));
        }

        let collection = SubtitleCollection::parse_srt_file(input_file)?;
        if collection.entries.is_empty() {
            return Err(anyhow!(
                "No valid subtitles found in SRT file: {}",
                input_file.display()
            ));
        }
        info!("Parsed {} subtitles", collection.entries.len());

        let builder = FcpXmlBuilder::new(self.config.clone());
        let document = builder
            .build(&collection.entries)
            .context("Failed to build fcpxml document")?;

        let content = serialize(&document);

        let output_path = self.resolve_output_path(input_file, output_override, sandboxed);
        debug!("Writing fcpxml to {}", output_path.display());
        FileManager::write_to_file(&output_path, &content)?;

        Ok(output_path)
    }

    /// Resolution order: explicit override, then the pinned sandbox
    /// path, then a sibling of the input named after the project.
    fn resolve_output_path(
        &self,
        input_file: &Path,
        output_override: Option<PathBuf>,
        sandboxed: bool,
    ) -> PathBuf {
        if let Some(output) = output_override {
            return output;
        }
        if sandboxed {
            return PathBuf::from(SANDBOX_OUTPUT_PATH);
        }
        FileManager::sibling_fcpxml_path(input_file, &self.config.project_name)
    }
}
