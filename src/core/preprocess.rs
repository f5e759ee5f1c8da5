//! Schema preprocessor
//!
//! Rewrites a `.proto.1` source into the `.proto` form handed to protoc:
//!
//! - lines before the first `message` line are dropped, except `import` lines
//! - the Java option header is injected right before the first `message` line
//! - everything from that line on is copied verbatim
//!
//! The rewrite is a single forward pass; lines are never reordered.

use std::fs;
use std::path::Path;

use crate::core::variant::Variant;
use crate::error::FilesystemError;

/// Prefix of the line that starts the schema body
const MESSAGE_KEYWORD: &[u8] = b"message";

/// Prefix of lines kept from the preamble
const IMPORT_KEYWORD: &[u8] = b"import";

/// Option selecting the reduced runtime, injected for the lite variant only
pub const LITE_RUNTIME_OPTION: &str = "option optimize_for=LITE_RUNTIME;";

/// Option header injected before the first message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHeader {
    /// Value of `option java_package`
    pub java_package: String,
    /// Also inject [`LITE_RUNTIME_OPTION`]
    pub lite_runtime: bool,
}

impl SchemaHeader {
    /// Build the header for a variant
    pub fn for_variant(java_package: &str, variant: Variant) -> Self {
        Self {
            java_package: java_package.to_string(),
            lite_runtime: variant.config().injects_lite_option,
        }
    }

    /// Header lines in injection order, without line terminators
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("option java_package=\"{}\";", self.java_package),
            "option java_multiple_files=true;".to_string(),
        ];
        if self.lite_runtime {
            lines.push(LITE_RUNTIME_OPTION.to_string());
        }
        lines
    }
}

/// What to do with one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAction {
    Drop,
    Emit,
    EmitAfterHeader,
}

/// One-pass line state machine
#[derive(Debug, Default)]
struct Rewriter {
    in_body: bool,
}

impl Rewriter {
    fn classify(&mut self, line: &[u8]) -> LineAction {
        if self.in_body {
            LineAction::Emit
        } else if line.starts_with(MESSAGE_KEYWORD) {
            self.in_body = true;
            LineAction::EmitAfterHeader
        } else if line.starts_with(IMPORT_KEYWORD) {
            LineAction::Emit
        } else {
            LineAction::Drop
        }
    }
}

/// Rewrite schema bytes
///
/// Input lines are split on `\n` with a trailing `\r` removed; every emitted
/// line is terminated by `\n`. All other bytes are copied unchanged.
pub fn rewrite(input: &[u8], header: &SchemaHeader) -> Vec<u8> {
    let mut rewriter = Rewriter::default();
    let mut output = Vec::with_capacity(input.len());
    if input.is_empty() {
        return output;
    }

    let text = input.strip_suffix(b"\n").unwrap_or(input);
    for line in text.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        match rewriter.classify(line) {
            LineAction::Drop => continue,
            LineAction::Emit => {}
            LineAction::EmitAfterHeader => {
                for header_line in header.lines() {
                    output.extend_from_slice(header_line.as_bytes());
                    output.push(b'\n');
                }
            }
        }
        output.extend_from_slice(line);
        output.push(b'\n');
    }

    output
}

/// Rewrites schema files on disk
#[derive(Debug, Clone)]
pub struct SchemaPreprocessor {
    java_package: String,
}

impl SchemaPreprocessor {
    /// Create a preprocessor injecting the given Java package
    pub fn new(java_package: impl Into<String>) -> Self {
        Self {
            java_package: java_package.into(),
        }
    }

    /// Rewrite `input` into `output` for `variant`
    ///
    /// `output` is created or truncated. See [`rewrite`] for the line rules.
    pub fn transform(
        &self,
        input: &Path,
        output: &Path,
        variant: Variant,
    ) -> Result<(), FilesystemError> {
        let read_err = |e: std::io::Error| FilesystemError::ReadFile {
            path: input.to_path_buf(),
            error: e.to_string(),
        };
        let write_err = |e: std::io::Error| FilesystemError::WriteFile {
            path: output.to_path_buf(),
            error: e.to_string(),
        };

        let content = fs::read(input).map_err(read_err)?;
        let header = SchemaHeader::for_variant(&self.java_package, variant);
        fs::write(output, rewrite(&content, &header)).map_err(write_err)
    }
}
