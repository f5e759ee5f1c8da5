//! Build state
//!
//! One [`BuildState`] exists per run. The pipeline borrows it mutably for
//! the whole run and each stage fills in the fields it is responsible for,
//! so after a failure the unset fields show how far the run got.

use std::path::{Path, PathBuf};

use crate::core::config::ProjectConfig;
use crate::core::variant::Variant;

/// Tool names and Java settings resolved from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Schema compiler name or path
    pub protoc: String,
    /// Language compiler name or path
    pub javac: String,
    /// Archiver name or path
    pub jar: String,
    /// Package injected into staged schemas
    pub java_package: String,
    /// `-encoding` value
    pub source_encoding: String,
    /// `-source` / `-target` value
    pub java_target: String,
}

impl BuildSettings {
    /// Effective settings from a project config
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            protoc: config.protoc().to_string(),
            javac: config.javac().to_string(),
            jar: config.jar().to_string(),
            java_package: config.java_package().to_string(),
            source_encoding: config.source_encoding().to_string(),
            java_target: config.java_target().to_string(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self::from_config(&ProjectConfig::default())
    }
}

/// Mutable record threaded through every pipeline stage
#[derive(Debug, Clone)]
pub struct BuildState {
    /// Build flavor
    pub variant: Variant,
    /// Directory holding the `.proto.1` sources
    source_schema_dir: PathBuf,
    /// Generator plugin names for the schema compiler
    pub generation_args: Vec<String>,
    /// Libraries put on the compile classpath
    pub runtime_classpath_entries: Vec<PathBuf>,
    /// Per-variant root for every artifact of the run
    pub output_base_dir: PathBuf,
    /// Schema compiler output flag, without leading dashes
    pub generation_flag_name: &'static str,
    /// Tool names and Java settings
    pub settings: BuildSettings,

    /// Schema compiler, set by the precondition stage
    pub resolved_tool_path: Option<PathBuf>,
    /// Language compiler, set by the precondition stage
    pub language_compiler_path: Option<PathBuf>,
    /// Archiver, set by the precondition stage
    pub archiver_path: Option<PathBuf>,
    /// Set by the staging stage
    pub staged_schema_dir: Option<PathBuf>,
    /// Set by the code generation stage
    pub generated_source_dir: Option<PathBuf>,
    /// Set by the compilation stage
    pub compiled_output_dir: Option<PathBuf>,
    /// Set by the packaging stage
    pub archive_path: Option<PathBuf>,
}

impl BuildState {
    /// Create the state for one run
    ///
    /// Relative paths are resolved against `work_dir`, so every path in the
    /// state is absolute from the start.
    pub fn new(
        variant: Variant,
        source_schema_dir: &Path,
        work_dir: &Path,
        config: &ProjectConfig,
    ) -> Self {
        let variant_config = variant.config();
        let output_base_dir = absolutize(
            work_dir,
            &config.output_root().join(variant_config.base_dir_name),
        );

        Self {
            variant,
            source_schema_dir: absolutize(work_dir, source_schema_dir),
            generation_args: Vec::new(),
            runtime_classpath_entries: Vec::new(),
            output_base_dir,
            generation_flag_name: variant_config.output_flag_name,
            settings: BuildSettings::from_config(config),
            resolved_tool_path: None,
            language_compiler_path: None,
            archiver_path: None,
            staged_schema_dir: None,
            generated_source_dir: None,
            compiled_output_dir: None,
            archive_path: None,
        }
    }

    /// Set generator plugin names, passed to protoc as given
    #[must_use]
    pub fn with_generation_args(mut self, args: Vec<String>) -> Self {
        self.generation_args = args;
        self
    }

    /// Set runtime classpath entries, resolved against `work_dir`
    #[must_use]
    pub fn with_runtime_classpath(mut self, entries: &[PathBuf], work_dir: &Path) -> Self {
        self.runtime_classpath_entries = entries
            .iter()
            .filter(|e| !e.as_os_str().is_empty())
            .map(|e| absolutize(work_dir, e))
            .collect();
        self
    }

    /// Directory holding the `.proto.1` sources
    pub fn source_schema_dir(&self) -> &Path {
        &self.source_schema_dir
    }
}

/// Resolve `path` against `base` into an absolute path
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    std::path::absolute(&joined).unwrap_or(joined)
}
