//! Common test utilities and helpers
//!
//! Integration tests run the real binary against stand-in `protoc`, `javac`
//! and `jar` shell scripts placed first on `PATH`. Each script appends its
//! arguments to `<name>.log` next to itself.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use protowrap::config::defaults::ENV_CONFIG_FILE;
use tempfile::TempDir;

/// Stand-in schema compiler
///
/// Writes one `.java` file per `.proto` argument into the directory named
/// by the `--*_out=` flag, after any `args:` prefix.
pub const FAKE_PROTOC: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "libprotoc 2.5.0"
    exit 0
fi
echo "$@" >> "${0%/*}/protoc.log"
out=""
for a in "$@"; do
    case "$a" in
        --*_out=*) out="${a#*=}"; out="${out##*:}" ;;
    esac
done
mkdir -p "$out/com/example" || exit 1
for a in "$@"; do
    case "$a" in
        *.proto)
            name="${a##*/}"
            name="${name%.proto}"
            echo "public class $name {}" > "$out/com/example/$name.java"
            ;;
    esac
done
"#;

/// Stand-in schema compiler that rejects its input
pub const FAILING_PROTOC: &str = r#"#!/bin/sh
echo "$@" >> "${0%/*}/protoc.log"
echo "a.proto:3:1: Expected top-level statement (e.g. \"message\")." >&2
exit 1
"#;

/// Stand-in language compiler
///
/// Creates one `.class` file per `.java` argument in the `-d` directory.
pub const FAKE_JAVAC: &str = r#"#!/bin/sh
echo "$@" >> "${0%/*}/javac.log"
out=""
prev=""
for a in "$@"; do
    if [ "$prev" = "-d" ]; then
        out="$a"
    fi
    prev="$a"
done
for a in "$@"; do
    case "$a" in
        *.java)
            name="${a##*/}"
            name="${name%.java}"
            : > "$out/$name.class"
            ;;
    esac
done
"#;

/// Stand-in archiver; writes the archive named by its second argument
pub const FAKE_JAR: &str = r#"#!/bin/sh
echo "$@" >> "${0%/*}/jar.log"
echo "added manifest"
printf 'PK' > "$2"
"#;

/// Sample schema with a preamble that must be dropped
pub const SAMPLE_SCHEMA: &str = "// generated by idl tool\n\
package legacy;\n\
import \"common.proto\";\n\
\n\
message Person {\n\
  required string name = 1;\n\
}\n";

/// Test project context
///
/// Holds the working directory of a run and a separate directory of fake
/// tools.
pub struct TestProject {
    /// Working directory of the run
    pub dir: TempDir,
    /// Directory put first on `PATH`
    pub bin: TempDir,
}

impl TestProject {
    /// Create a project with no tools installed
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            bin: TempDir::new().expect("Failed to create bin directory"),
        }
    }

    /// Create a project with working fake tools installed
    pub fn with_tools() -> Self {
        let project = Self::new();
        project.install_tool("protoc", FAKE_PROTOC);
        project.install_tool("javac", FAKE_JAVAC);
        project.install_tool("jar", FAKE_JAR);
        project
    }

    /// Get the path to the project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write an executable script named `name` into the bin directory
    pub fn install_tool(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        std::fs::write(&path, script).expect("Failed to write tool script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark tool executable");
    }

    /// Remove a previously installed tool
    pub fn remove_tool(&self, name: &str) {
        std::fs::remove_file(self.bin.path().join(name)).expect("Failed to remove tool");
    }

    /// Arguments a fake tool was invoked with, one line per invocation
    pub fn tool_log(&self, name: &str) -> String {
        std::fs::read_to_string(self.bin.path().join(format!("{name}.log"))).unwrap_or_default()
    }

    /// Create a file in the project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run protowrap in the project with the fake tools first on `PATH`
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args, true)
            .output()
            .expect("Failed to execute protowrap")
    }

    /// Run protowrap with only the fake tools on `PATH`
    pub fn run_isolated(&self, args: &[&str]) -> Output {
        self.command(args, false)
            .output()
            .expect("Failed to execute protowrap")
    }

    /// Run protowrap with the config file named through the environment
    pub fn run_with_config_env(&self, config: &Path, args: &[&str]) -> Output {
        self.command(args, true)
            .env(ENV_CONFIG_FILE, config)
            .output()
            .expect("Failed to execute protowrap")
    }

    fn command(&self, args: &[&str], inherit_path: bool) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_protowrap"));
        cmd.current_dir(self.dir.path())
            .args(args)
            .env("PATH", search_path(self.bin.path(), inherit_path))
            .env_remove(ENV_CONFIG_FILE)
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

fn search_path(bin: &Path, inherit: bool) -> std::ffi::OsString {
    let mut entries = vec![bin.to_path_buf()];
    if inherit {
        if let Some(existing) = std::env::var_os("PATH") {
            entries.extend(std::env::split_paths(&existing));
        }
    }
    std::env::join_paths(entries).expect("Failed to build PATH")
}

/// Captured stdout as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
