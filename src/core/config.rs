//! Project configuration
//!
//! Reads optional settings from `protowrap.toml`. Every field is optional;
//! missing values fall back to [`crate::config::defaults`].

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::ConfigError;

/// Settings loaded from `protowrap.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// External tool names or paths
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Java generation settings
    #[serde(default)]
    pub java: JavaConfig,

    /// Output layout settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// External tool overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Schema compiler
    pub protoc: Option<String>,

    /// Language compiler
    pub javac: Option<String>,

    /// Archiver
    pub jar: Option<String>,
}

/// Java generation settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaConfig {
    /// Package injected as `option java_package`
    pub package: Option<String>,

    /// Source encoding passed to javac
    pub encoding: Option<String>,

    /// Language level passed as `-source` and `-target`
    pub target: Option<String>,
}

/// Output layout settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output root relative to the working directory
    pub root: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load the config for a run
    ///
    /// With `explicit` set, that file must exist. Otherwise
    /// `protowrap.toml` in `work_dir` is used if present.
    pub fn load(work_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => {
                let path = work_dir.join(path);
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Self::load_from_path(&path)
            }
            None => Self::load_from_path(&work_dir.join(defaults::CONFIG_FILE_NAME)),
        }
    }

    /// Load configuration from a specific path
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        tracing::debug!("Loading config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Effective schema compiler
    #[must_use]
    pub fn protoc(&self) -> &str {
        self.tools.protoc.as_deref().unwrap_or(defaults::DEFAULT_PROTOC)
    }

    /// Effective language compiler
    #[must_use]
    pub fn javac(&self) -> &str {
        self.tools.javac.as_deref().unwrap_or(defaults::DEFAULT_JAVAC)
    }

    /// Effective archiver
    #[must_use]
    pub fn jar(&self) -> &str {
        self.tools.jar.as_deref().unwrap_or(defaults::DEFAULT_JAR)
    }

    /// Effective Java package for the schema header
    #[must_use]
    pub fn java_package(&self) -> &str {
        self.java
            .package
            .as_deref()
            .unwrap_or(defaults::DEFAULT_JAVA_PACKAGE)
    }

    /// Effective source encoding
    #[must_use]
    pub fn source_encoding(&self) -> &str {
        self.java
            .encoding
            .as_deref()
            .unwrap_or(defaults::DEFAULT_SOURCE_ENCODING)
    }

    /// Effective language level
    #[must_use]
    pub fn java_target(&self) -> &str {
        self.java
            .target
            .as_deref()
            .unwrap_or(defaults::DEFAULT_JAVA_TARGET)
    }

    /// Effective output root, relative to the working directory
    #[must_use]
    pub fn output_root(&self) -> &Path {
        self.output
            .root
            .as_deref()
            .unwrap_or(Path::new(defaults::DEFAULT_OUTPUT_ROOT))
    }
}
