//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod args;
pub mod output;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::defaults::ENV_CONFIG_FILE;
use crate::core::config::ProjectConfig;
use crate::core::pipeline::Pipeline;
use crate::core::state::BuildState;
use crate::core::variant::Variant;
use crate::error::UsageError;
use crate::infra::process::ProcessInvoker;

/// Protowrap - package protobuf schemas into a Java archive
///
/// Preprocesses `*.proto.1` schemas, generates Java sources with protoc,
/// compiles them with javac and packs the classes with jar.
#[derive(Parser, Debug)]
#[command(name = "protowrap")]
#[command(author, version, about, long_about = None)]
#[command(long_version = long_version())]
pub struct Cli {
    /// Build variant: lite, micro or nano (anything else builds the full runtime)
    #[arg(value_name = "VARIANT")]
    pub variant: Option<String>,

    /// Directory containing the *.proto.1 schemas
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub proto: PathBuf,

    /// Comma-separated generator arguments (micro and nano only)
    #[arg(long = "arg", value_name = "ARGS", value_delimiter = ',')]
    pub generator_args: Vec<String>,

    /// Runtime libraries for compilation, separated like PATH
    #[arg(long, value_name = "PATHS")]
    pub runtime: Option<OsString>,

    /// Config file (defaults to protowrap.toml in the working directory)
    #[arg(long, value_name = "FILE", env = ENV_CONFIG_FILE)]
    pub config: Option<PathBuf>,

    /// Print stage progress
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Execute the build from the current directory
    pub fn run(self) -> Result<()> {
        let work_dir = std::env::current_dir().context("Failed to determine working directory")?;
        let archive = self.run_in(&work_dir)?;
        output::display_success(&archive, &work_dir);
        Ok(())
    }

    /// Execute the build with relative paths resolved against `work_dir`
    pub fn run_in(self, work_dir: &Path) -> Result<PathBuf> {
        let variant = self.selected_variant();

        if !self.generation_args().is_empty() && !variant.config().accepts_generator_args {
            return Err(UsageError::GeneratorArgsNotSupported {
                variant: variant.name().to_string(),
            }
            .into());
        }

        let config = ProjectConfig::load(work_dir, self.config.as_deref())?;
        let runtime = self.runtime_entries();
        let generation_args = self.generation_args();
        let debug = self.debug || self.verbose >= 2;

        let mut state = BuildState::new(variant, &self.proto, work_dir, &config)
            .with_generation_args(generation_args)
            .with_runtime_classpath(&runtime, work_dir);

        let invoker = ProcessInvoker;
        let archive = Pipeline::new(&invoker).with_debug(debug).run(&mut state)?;
        Ok(archive)
    }

    /// Variant named on the command line
    ///
    /// Unknown words select the full variant.
    pub fn selected_variant(&self) -> Variant {
        match self.variant.as_deref() {
            None => Variant::Full,
            Some(word) => Variant::from_arg(word).unwrap_or_else(|| {
                tracing::warn!("Unknown variant '{word}', building the full variant");
                Variant::Full
            }),
        }
    }

    /// Generator arguments exactly as given
    ///
    /// An empty `--arg ""` means no arguments; otherwise empty entries
    /// between commas are kept.
    pub fn generation_args(&self) -> Vec<String> {
        match self.generator_args.as_slice() {
            [only] if only.is_empty() => Vec::new(),
            args => args.to_vec(),
        }
    }

    /// Runtime classpath entries split on the platform separator
    pub fn runtime_entries(&self) -> Vec<PathBuf> {
        self.runtime
            .as_deref()
            .map(|list| {
                std::env::split_paths(list)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{} (git {}, built {})",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args::normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["protowrap"]);
        assert_eq!(cli.selected_variant(), Variant::Full);
        assert_eq!(cli.proto, PathBuf::from("."));
        assert!(cli.generator_args.is_empty());
        assert!(cli.runtime_entries().is_empty());
        assert!(!cli.debug);
    }

    #[test]
    fn test_variant_words() {
        assert_eq!(parse(&["protowrap", "lite"]).selected_variant(), Variant::Lite);
        assert_eq!(parse(&["protowrap", "micro"]).selected_variant(), Variant::Micro);
        assert_eq!(parse(&["protowrap", "nano"]).selected_variant(), Variant::Nano);
        assert_eq!(parse(&["protowrap", "bogus"]).selected_variant(), Variant::Full);
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = parse(&[
            "protowrap", "nano", "-proto", "schemas", "-arg", "a,b", "-debug",
        ]);
        assert_eq!(cli.proto, PathBuf::from("schemas"));
        assert_eq!(cli.generator_args, vec!["a", "b"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_generation_args_keep_empty_entries() {
        assert_eq!(
            parse(&["protowrap", "micro", "-arg", "a,,b"]).generation_args(),
            vec!["a", "", "b"]
        );
        assert!(parse(&["protowrap", "micro", "-arg="])
            .generation_args()
            .is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_runtime_split_on_separator() {
        let cli = parse(&["protowrap", "-runtime=lib/a.jar::lib/b.jar"]);
        assert_eq!(
            cli.runtime_entries(),
            vec![PathBuf::from("lib/a.jar"), PathBuf::from("lib/b.jar")]
        );
    }

    #[test]
    fn test_generator_args_rejected_for_full() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = parse(&["protowrap", "-arg", "x"])
            .run_in(temp.path())
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::GeneratorArgsNotSupported {
                variant: "full".to_string()
            })
        );
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_long_version_mentions_package_version() {
        assert!(long_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
