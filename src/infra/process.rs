//! External tool invocation
//!
//! Runs one tool to completion and captures its stdout and stderr as a
//! single interleaved stream. Output is never parsed here.

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::PipelineError;

/// Runs external tools on behalf of the pipeline
pub trait ToolInvoker {
    /// Run `executable` with `args` and return its combined output
    ///
    /// A launch failure or a nonzero exit status becomes
    /// [`PipelineError::ToolExecution`] carrying whatever output was captured.
    fn invoke(&self, executable: &Path, args: &[OsString]) -> Result<String, PipelineError>;
}

/// [`ToolInvoker`] backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessInvoker;

impl ToolInvoker for ProcessInvoker {
    fn invoke(&self, executable: &Path, args: &[OsString]) -> Result<String, PipelineError> {
        let tool = tool_name(executable);

        tracing::debug!(
            "Running {} {}",
            executable.display(),
            display_args(args)
        );

        let (status, output) =
            run_combined(executable, args).map_err(|e| PipelineError::ToolExecution {
                tool: tool.clone(),
                error: e.to_string(),
                output: String::new(),
            })?;

        let output = String::from_utf8_lossy(&output).into_owned();

        if !status.success() {
            tracing::debug!("{tool} exited with {status}");
            return Err(PipelineError::ToolExecution {
                tool,
                error: status.to_string(),
                output,
            });
        }

        Ok(output)
    }
}

/// Spawn the child with stdout and stderr sharing one pipe
fn run_combined(executable: &Path, args: &[OsString]) -> std::io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = std::io::pipe()?;

    // The command owns both write ends; it must be dropped before reading
    // or the read never sees end-of-file.
    let mut child = {
        let mut command = Command::new(executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        command.spawn()?
    };

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    let status = child.wait()?;
    read?;

    Ok((status, output))
}

/// Short tool name used in error messages
pub fn tool_name(executable: &Path) -> String {
    executable
        .file_stem()
        .map_or_else(|| executable.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Render an argument list for logs
pub fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_strips_directory() {
        assert_eq!(tool_name(Path::new("/usr/bin/protoc")), "protoc");
        assert_eq!(tool_name(Path::new("javac")), "javac");
    }

    #[test]
    fn test_display_args_joins_with_spaces() {
        let args = vec![OsString::from("-d"), OsString::from("out/classes")];
        assert_eq!(display_args(&args), "-d out/classes");
    }

    #[test]
    fn test_launch_failure_is_tool_execution_error() {
        let result = ProcessInvoker.invoke(Path::new("/nonexistent/protowrap-tool"), &[]);

        match result {
            Err(PipelineError::ToolExecution { tool, output, .. }) => {
                assert_eq!(tool, "protowrap-tool");
                assert!(output.is_empty());
            }
            other => panic!("expected ToolExecution, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_stderr_in_order() {
        let args: Vec<OsString> = ["-c", "echo out1; echo err1 >&2; echo out2"]
            .iter()
            .map(OsString::from)
            .collect();

        let output = ProcessInvoker.invoke(Path::new("/bin/sh"), &args).unwrap();

        assert_eq!(output, "out1\nerr1\nout2\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_output() {
        let args: Vec<OsString> = ["-c", "echo 'a.proto:1:1: syntax error' >&2; exit 3"]
            .iter()
            .map(OsString::from)
            .collect();

        let err = ProcessInvoker.invoke(Path::new("/bin/sh"), &args).unwrap_err();

        match err {
            PipelineError::ToolExecution { tool, error, output } => {
                assert_eq!(tool, "sh");
                assert!(error.contains('3'));
                assert_eq!(output, "a.proto:1:1: syntax error\n");
            }
            other => panic!("expected ToolExecution, got {other:?}"),
        }
    }
}
