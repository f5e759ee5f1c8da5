//! Build pipeline
//!
//! Runs the five stages over one [`BuildState`], in order:
//!
//! 1. precondition check: tools, schema directory, runtime libraries
//! 2. schema staging: wipe the output tree, preprocess `.proto.1` files
//! 3. code generation: protoc
//! 4. compilation: javac
//! 5. packaging: jar
//!
//! The first failing stage ends the run and its error is returned as is.
//! Output already written by earlier stages is left in place.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use crate::config::defaults::GENERATED_SOURCE_SUFFIX;
use crate::core::layout::OutputLayout;
use crate::core::preprocess::SchemaPreprocessor;
use crate::core::state::{BuildSettings, BuildState};
use crate::error::PipelineError;
use crate::infra::filesystem;
use crate::infra::locator::{self, ToolLocator};
use crate::infra::process::{display_args, ToolInvoker};

/// Separator used to join classpath entries
#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";

/// Drives one build from schema sources to archive
pub struct Pipeline<'a> {
    invoker: &'a dyn ToolInvoker,
    locator: ToolLocator,
    debug: bool,
}

impl<'a> Pipeline<'a> {
    /// Pipeline running tools through `invoker`, looked up on `PATH`
    pub fn new(invoker: &'a dyn ToolInvoker) -> Self {
        Self {
            invoker,
            locator: ToolLocator::from_env(),
            debug: false,
        }
    }

    /// Use a specific tool locator
    #[must_use]
    pub fn with_locator(mut self, locator: ToolLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Print stage progress lines on stdout
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run every stage and return the archive path
    pub fn run(&self, state: &mut BuildState) -> Result<PathBuf, PipelineError> {
        tracing::info!(
            "Building {} variant from {}",
            state.variant,
            state.source_schema_dir().display()
        );

        self.check_preconditions(state)?;
        self.stage_schemas(state)?;
        self.generate_sources(state)?;
        self.compile_sources(state)?;
        self.package(state)
    }

    /// Stage 1: resolve tools and check inputs exist
    fn check_preconditions(&self, state: &mut BuildState) -> Result<(), PipelineError> {
        self.progress(format_args!("check tools ..."));

        let protoc = self.locator.locate(&state.settings.protoc)?;
        let javac = self.locator.locate(&state.settings.javac)?;
        let jar = self.locator.locate(&state.settings.jar)?;

        if !state.source_schema_dir().is_dir() {
            return Err(PipelineError::InputNotFound {
                path: state.source_schema_dir().to_path_buf(),
            });
        }

        for entry in &state.runtime_classpath_entries {
            if !filesystem::is_file_or_dir(entry) {
                return Err(PipelineError::DependencyNotFound {
                    path: entry.clone(),
                });
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            match locator::probe_version(self.invoker, &protoc) {
                Some(v) if v.patched => tracing::debug!("protoc {} (patched build)", v.version),
                Some(v) => tracing::debug!("protoc {}", v.version),
                None => tracing::debug!("Could not determine protoc version"),
            }
        }

        state.resolved_tool_path = Some(protoc);
        state.language_compiler_path = Some(javac);
        state.archiver_path = Some(jar);
        Ok(())
    }

    /// Stage 2: recreate the output tree and preprocess schema sources
    fn stage_schemas(&self, state: &mut BuildState) -> Result<(), PipelineError> {
        let layout = OutputLayout::new(&state.output_base_dir);

        self.progress(format_args!("remove {} ...", layout.base_dir().display()));
        let staged_dir = layout.reset()?;
        state.staged_schema_dir = Some(staged_dir.clone());

        self.progress(format_args!(
            "copy from {} to {} ...",
            state.source_schema_dir().display(),
            staged_dir.display()
        ));
        let preprocessor = SchemaPreprocessor::new(state.settings.java_package.as_str());
        let staged = layout.stage_schemas(state.source_schema_dir(), &preprocessor, state.variant)?;

        tracing::info!("Staged {} schema files", staged.len());
        Ok(())
    }

    /// Stage 3: run the schema compiler over the staged files
    fn generate_sources(&self, state: &mut BuildState) -> Result<(), PipelineError> {
        let protoc = required(state.resolved_tool_path.as_deref(), "schema compiler path")?;
        let staged_dir = required(state.staged_schema_dir.as_deref(), "staged schema directory")?;
        let source_dir = OutputLayout::new(&state.output_base_dir).generated_source_dir();

        self.progress(format_args!("mkdir {} ...", source_dir.display()));
        filesystem::create_dir_all(&source_dir)?;
        state.generated_source_dir = Some(source_dir.clone());

        self.progress(format_args!("prepare protoc args ..."));
        let schemas = filesystem::list_files_with_suffix(staged_dir, "")?;
        let args = schema_compiler_args(
            staged_dir,
            state.generation_flag_name,
            &state.generation_args,
            &source_dir,
            &schemas,
        );

        self.invoke(protoc, &args)
    }

    /// Stage 4: compile the generated sources
    fn compile_sources(&self, state: &mut BuildState) -> Result<(), PipelineError> {
        let javac = required(state.language_compiler_path.as_deref(), "language compiler path")?;
        let source_dir = required(state.generated_source_dir.as_deref(), "generated source directory")?;
        let classes_dir = OutputLayout::new(&state.output_base_dir).compiled_output_dir();

        self.progress(format_args!("mkdir {} ...", classes_dir.display()));
        filesystem::create_dir_all(&classes_dir)?;
        state.compiled_output_dir = Some(classes_dir.clone());

        let sources = filesystem::list_files_with_suffix(source_dir, GENERATED_SOURCE_SUFFIX)?;
        tracing::info!("Compiling {} generated sources", sources.len());

        let args = language_compiler_args(
            &state.settings,
            &classes_dir,
            &state.runtime_classpath_entries,
            &sources,
        );

        self.invoke(javac, &args)
    }

    /// Stage 5: archive the compiled classes
    fn package(&self, state: &mut BuildState) -> Result<PathBuf, PipelineError> {
        let jar = required(state.archiver_path.as_deref(), "archiver path")?;
        let classes_dir = required(state.compiled_output_dir.as_deref(), "compiled output directory")?;
        let archive = OutputLayout::new(&state.output_base_dir).archive_path();

        self.progress(format_args!("gen jar file ..."));
        self.invoke(jar, &archiver_args(&archive, classes_dir))?;

        state.archive_path = Some(archive.clone());
        Ok(archive)
    }

    fn invoke(&self, tool: &Path, args: &[OsString]) -> Result<(), PipelineError> {
        self.progress(format_args!("{} {}", tool.display(), display_args(args)));
        let output = self.invoker.invoke(tool, args)?;
        if !output.is_empty() {
            tracing::debug!("{}", output.trim_end());
        }
        Ok(())
    }

    fn progress(&self, message: fmt::Arguments<'_>) {
        tracing::debug!("{message}");
        if self.debug {
            println!("{message}");
        }
    }
}

/// Output an earlier stage must have recorded in the state
fn required<'s>(path: Option<&'s Path>, output: &'static str) -> Result<&'s Path, PipelineError> {
    path.ok_or(PipelineError::StageOutputMissing { output })
}

fn concat(prefix: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::from(prefix);
    arg.push(value);
    arg
}

/// Arguments for the schema compiler
///
/// `--<flag>=[<args>:]<out_dir>`: the plugin list prefix is only present
/// when `generation_args` is non-empty.
pub fn schema_compiler_args(
    staged_dir: &Path,
    flag_name: &str,
    generation_args: &[String],
    out_dir: &Path,
    schemas: &[PathBuf],
) -> Vec<OsString> {
    let mut output_value = OsString::new();
    if !generation_args.is_empty() {
        output_value.push(generation_args.join(","));
        output_value.push(":");
    }
    output_value.push(out_dir);

    let mut args = Vec::with_capacity(schemas.len() + 2);
    args.push(concat("--proto_path=", staged_dir.as_os_str()));
    args.push(concat(&format!("--{flag_name}="), &output_value));
    args.extend(schemas.iter().map(|s| s.as_os_str().to_owned()));
    args
}

/// Arguments for the language compiler
///
/// `-cp` is only passed when there are runtime entries.
pub fn language_compiler_args(
    settings: &BuildSettings,
    classes_dir: &Path,
    classpath: &[PathBuf],
    sources: &[PathBuf],
) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-g:none",
        "-encoding",
        settings.source_encoding.as_str(),
        "-target",
        settings.java_target.as_str(),
        "-source",
        settings.java_target.as_str(),
        "-d",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(classes_dir.as_os_str().to_owned());

    if !classpath.is_empty() {
        let mut joined = OsString::new();
        for (i, entry) in classpath.iter().enumerate() {
            if i > 0 {
                joined.push(PATH_LIST_SEPARATOR);
            }
            joined.push(entry);
        }
        args.push(OsString::from("-cp"));
        args.push(joined);
    }

    args.extend(sources.iter().map(|s| s.as_os_str().to_owned()));
    args
}

/// Arguments for the archiver
///
/// `-C <classes>/ .` makes archive entries relative to the classes directory.
pub fn archiver_args(archive: &Path, classes_dir: &Path) -> Vec<OsString> {
    let mut root = classes_dir.as_os_str().to_owned();
    root.push(MAIN_SEPARATOR_STR);

    vec![
        OsString::from("cvf"),
        archive.as_os_str().to_owned(),
        OsString::from("-C"),
        root,
        OsString::from("."),
    ]
}
