//! Output layout
//!
//! Every artifact of a run lives under one per-variant base directory:
//!
//! ```text
//! <base>/proto/*.proto      staged schemas
//! <base>/src/**/*.java      generated sources
//! <base>/classes/**         compiled classes
//! <base>/classes.jar        final archive
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::defaults::{
    ARCHIVE_FILE_NAME, COMPILED_OUTPUT_DIR_NAME, GENERATED_SOURCE_DIR_NAME,
    SCHEMA_SOURCE_SUFFIX, SCHEMA_STAGED_SUFFIX, STAGED_SCHEMA_DIR_NAME,
};
use crate::core::preprocess::SchemaPreprocessor;
use crate::core::variant::Variant;
use crate::error::PipelineError;
use crate::infra::filesystem;

/// Paths of one run's output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base_dir: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Root of the tree
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Staged schema directory
    pub fn staged_schema_dir(&self) -> PathBuf {
        self.base_dir.join(STAGED_SCHEMA_DIR_NAME)
    }

    /// Generated source directory
    pub fn generated_source_dir(&self) -> PathBuf {
        self.base_dir.join(GENERATED_SOURCE_DIR_NAME)
    }

    /// Compiled class directory
    pub fn compiled_output_dir(&self) -> PathBuf {
        self.base_dir.join(COMPILED_OUTPUT_DIR_NAME)
    }

    /// Final archive path
    pub fn archive_path(&self) -> PathBuf {
        self.base_dir.join(ARCHIVE_FILE_NAME)
    }

    /// Wipe the base directory and recreate the staged schema directory
    pub fn reset(&self) -> Result<PathBuf, PipelineError> {
        tracing::debug!("Removing {}", self.base_dir.display());
        filesystem::remove_dir_all(&self.base_dir).map_err(PipelineError::StagingIo)?;

        let staged = self.staged_schema_dir();
        tracing::debug!("Creating {}", staged.display());
        filesystem::create_dir_all(&staged).map_err(PipelineError::StagingIo)?;

        Ok(staged)
    }

    /// Preprocess every `.proto.1` file in `source_dir` into the staged directory
    ///
    /// Only regular files directly inside `source_dir` are considered; other
    /// entries are skipped. Returns the staged files in the order written.
    pub fn stage_schemas(
        &self,
        source_dir: &Path,
        preprocessor: &SchemaPreprocessor,
        variant: Variant,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let staged_dir = self.staged_schema_dir();
        let sources = filesystem::list_top_level_files_with_suffix(source_dir, SCHEMA_SOURCE_SUFFIX)
            .map_err(PipelineError::StagingIo)?;

        let mut staged = Vec::with_capacity(sources.len());
        for source in sources {
            let Some(name) = source.file_name().and_then(staged_file_name) else {
                continue;
            };

            let target = staged_dir.join(name);
            tracing::debug!("Staging {} -> {}", source.display(), target.display());
            preprocessor.transform(&source, &target, variant)?;
            staged.push(target);
        }

        Ok(staged)
    }
}

/// Staged name for a schema source, or `None` if it is not one
///
/// `foo.proto.1` becomes `foo.proto`. The stem is kept byte for byte, so
/// names that are not valid UTF-8 survive staging unchanged.
#[cfg(unix)]
pub fn staged_file_name(source_name: &OsStr) -> Option<OsString> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let stem = source_name
        .as_bytes()
        .strip_suffix(SCHEMA_SOURCE_SUFFIX.as_bytes())?;
    let mut name = stem.to_vec();
    name.extend_from_slice(SCHEMA_STAGED_SUFFIX.as_bytes());
    Some(OsString::from_vec(name))
}

/// Staged name for a schema source, or `None` if it is not one
///
/// `foo.proto.1` becomes `foo.proto`.
#[cfg(not(unix))]
pub fn staged_file_name(source_name: &OsStr) -> Option<OsString> {
    source_name
        .to_str()?
        .strip_suffix(SCHEMA_SOURCE_SUFFIX)
        .map(|stem| OsString::from(format!("{stem}{SCHEMA_STAGED_SUFFIX}")))
}
