//! Tool lookup
//!
//! Resolves external executables on the search path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::infra::process::ToolInvoker;

/// Marker printed by the patched protoc build in its `--version` output
const PATCHED_PROTOC_MARKER: &str = "(clark modify version)";

/// Resolves tool names to executable paths
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    /// Overrides `PATH` when set
    search_path: Option<OsString>,
}

impl ToolLocator {
    /// Locator using the process `PATH`
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Locator using an explicit search path
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Resolve `tool` to an absolute executable path
    ///
    /// `tool` may be a bare name or a path. On Windows the usual executable
    /// extensions are tried.
    pub fn locate(&self, tool: &str) -> Result<PathBuf, PipelineError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        let found = match &self.search_path {
            Some(paths) => which::which_in(tool, Some(paths), &cwd),
            None => which::which(tool),
        }
        .map_err(|e| {
            tracing::debug!("Lookup of {tool} failed: {e}");
            PipelineError::ToolNotFound {
                tool: tool.to_string(),
            }
        })?;

        Ok(std::path::absolute(&found).unwrap_or(found))
    }
}

/// Version reported by a schema compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerVersion {
    /// Dotted version number
    pub version: String,
    /// Whether this is the patched protoc build
    pub patched: bool,
}

/// Ask a schema compiler for its version
///
/// Returns `None` if the tool fails or prints no recognizable version.
pub fn probe_version(invoker: &dyn ToolInvoker, compiler: &Path) -> Option<CompilerVersion> {
    let output = invoker
        .invoke(compiler, &[OsString::from("--version")])
        .ok()?;
    parse_version(&output)
}

/// Extract a version from `--version` output
pub fn parse_version(output: &str) -> Option<CompilerVersion> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    let version = version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())?;

    Some(CompilerVersion {
        version,
        patched: output.contains(PATCHED_PROTOC_MARKER),
    })
}
