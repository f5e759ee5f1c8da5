//! Error types for protowrap
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to list directory contents
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Errors raised while running the build pipeline
///
/// Every stage returns one of these unchanged; the orchestrator never
/// retries or recovers.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Required external tool is not on the search path
    #[error("Required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// Schema source directory is missing or not a directory
    #[error("Schema directory not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Runtime classpath entry does not exist
    #[error("Runtime dependency not found: {path}")]
    DependencyNotFound { path: PathBuf },

    /// Filesystem failure while preparing the output tree
    #[error("Staging failed: {0}")]
    StagingIo(FilesystemError),

    /// Filesystem failure outside of staging
    #[error(transparent)]
    Io(#[from] FilesystemError),

    /// A stage ran before an earlier stage recorded its output
    #[error("Pipeline stage ran before the {output} was produced")]
    StageOutputMissing { output: &'static str },

    /// External tool failed to launch or exited nonzero
    #[error("{tool} failed: {error}\n{output}")]
    ToolExecution {
        tool: String,
        error: String,
        output: String,
    },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },
}

/// Command-line usage errors detected before the pipeline starts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// Generator arguments given to a variant that does not take them
    #[error("-arg is only supported by the micro and nano variants (got '{variant}')")]
    GeneratorArgsNotSupported { variant: String },
}
