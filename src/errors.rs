/*!
 * Error types for the srt2fcpxml application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error
 * definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while building the FCPXML document
#[derive(Error, Debug)]
pub enum BuildError {
    /// The subtitle list handed to the builder was empty
    #[error("No subtitle entries to build a document from")]
    EmptySubtitles,
}

/// Errors that can occur while converting between subtitle formats
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input content could not be parsed at all
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    /// Input parsed but yielded zero usable entries
    #[error("No subtitle entries found in {0}")]
    NoEntries(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the document builder
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Error from a format conversion
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
