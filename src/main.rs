// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};

use crate::app_config::{Alignment, RenderConfig};
use crate::app_controller::Controller;
use crate::timecode::{FrameRate, KNOWN_FRAME_RATES};

mod app_config;
mod app_controller;
mod bcc_converter;
mod errors;
mod fcpxml;
mod file_utils;
mod lrc_converter;
mod subtitle_processor;
mod timecode;

/// CLI Wrapper for Alignment to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAlignment {
    Left,
    Center,
    Right,
}

impl From<CliAlignment> for Alignment {
    fn from(cli_alignment: CliAlignment) -> Self {
        match cli_alignment {
            CliAlignment::Left => Alignment::Left,
            CliAlignment::Center => Alignment::Center,
            CliAlignment::Right => Alignment::Right,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an SRT subtitle file to a Final Cut Pro XML project (default command)
    #[command(alias = "convert")]
    Convert(ConvertArgs),

    /// Convert a Bilibili BCC subtitle file (or a directory of them) to SRT
    Bcc {
        /// BCC file or directory containing .bcc files
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output SRT path (single-file mode only; default: input with .srt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clean up an LRC/LRCX lyric file and convert it to SRT
    Lrc {
        /// LRC or LRCX file
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output SRT path (default: input with .srt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for srt2fcpxml
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// SRT subtitle file to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Frame rate: 23.98, 24, 25, 29.97, 30, 50, 59.94, 60
    #[arg(long = "fd", default_value = "60")]
    frame_rate: String,

    /// Width resolution
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Height resolution
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Text alignment of the rendered titles
    #[arg(short, long, value_enum, default_value = "center")]
    align: CliAlignment,

    /// Vertical position offset
    #[arg(short, long, default_value_t = -420, allow_hyphen_values = true)]
    y_position: i32,

    /// Project name (default: SRT filename without extension)
    #[arg(short, long)]
    project: Option<String>,

    /// Event name
    #[arg(short, long, default_value = "_FCPXMLs")]
    event: String,

    /// Explicit output path (used by embedding runtimes)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pin the output to the well-known sandbox path /input.fcpxml
    #[arg(long)]
    sandbox: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srt2fcpxml - subtitle format conversion toolkit
///
/// Converts SRT subtitle files to Final Cut Pro XML projects, and
/// Bilibili BCC / LRC lyric files to SRT.
#[derive(Parser, Debug)]
#[command(name = "srt2fcpxml")]
#[command(version = "1.0.0")]
#[command(about = "Convert SRT subtitles to Final Cut Pro XML projects")]
#[command(long_about = "srt2fcpxml builds a Final Cut Pro XML project from an SRT subtitle file,
with one styled title node per subtitle placed on a lane above the
primary storyline. It also converts Bilibili BCC and LRC/LRCX lyric
files to SRT.

EXAMPLES:
    srt2fcpxml movie.srt                        # 60fps 1920x1080 project next to the input
    srt2fcpxml --fd 29.97 movie.srt             # NTSC frame rate
    srt2fcpxml --width 1280 --height 720 --align left movie.srt
    srt2fcpxml -p \"My Cut\" -e Subs movie.srt    # Project and event names
    srt2fcpxml bcc danmaku.bcc                  # BCC to SRT
    srt2fcpxml bcc ./subtitle_folder/           # Convert every .bcc in a folder
    srt2fcpxml lrc song.lrcx                    # Clean up and convert lyrics
    srt2fcpxml completions bash > srt2fcpxml.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SRT subtitle file to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Frame rate: 23.98, 24, 25, 29.97, 30, 50, 59.94, 60
    #[arg(long = "fd", default_value = "60")]
    frame_rate: String,

    /// Width resolution
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Height resolution
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Text alignment of the rendered titles
    #[arg(short, long, value_enum, default_value = "center")]
    align: CliAlignment,

    /// Vertical position offset
    #[arg(short, long, default_value_t = -420, allow_hyphen_values = true)]
    y_position: i32,

    /// Project name (default: SRT filename without extension)
    #[arg(short, long)]
    project: Option<String>,

    /// Event name
    #[arg(short, long, default_value = "_FCPXMLs")]
    event: String,

    /// Explicit output path (used by embedding runtimes)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pin the output to the well-known sandbox path /input.fcpxml
    #[arg(long)]
    sandbox: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the
    // level is raised or lowered after argument parsing.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srt2fcpxml", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Bcc { input_path, output }) => {
            if input_path.is_dir() {
                bcc_converter::convert_bcc_folder(&input_path)?;
            } else {
                let output_path = bcc_converter::convert_bcc_file(&input_path, output)?;
                println!("Successfully created: {}", output_path.display());
            }
            Ok(())
        }
        Some(Commands::Lrc { input_path, output }) => {
            let output_path = lrc_converter::convert_lrc_file(&input_path, output)?;
            println!("Successfully created: {}", output_path.display());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                frame_rate: cli.frame_rate,
                width: cli.width,
                height: cli.height,
                align: cli.align,
                y_position: cli.y_position,
                project: cli.project,
                event: cli.event,
                output: cli.output,
                sandbox: cli.sandbox,
                log_level: cli.log_level,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let frame_rate = FrameRate::from_str(&options.frame_rate)?;
    if frame_rate.is_unusual() {
        warn!(
            "Frame rate {} may not be supported. Supported rates: {}",
            frame_rate,
            KNOWN_FRAME_RATES.join(", ")
        );
    }

    let project_name = options
        .project
        .clone()
        .unwrap_or_else(|| file_utils::FileManager::file_stem(&options.input_path));

    let config = RenderConfig {
        project_name,
        event_name: options.event.clone(),
        frame_rate,
        width: options.width,
        height: options.height,
        alignment: options.align.clone().into(),
        y_position: options.y_position,
    };

    let controller = Controller::with_config(config)?;
    let output_path = controller.run(&options.input_path, options.output.clone(), options.sandbox)?;

    info!("Successfully created: {}", output_path.display());
    println!("Successfully created: {}", output_path.display());

    Ok(())
}
