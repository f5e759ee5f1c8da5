//! Output formatting
//!
//! User-facing messages go to stdout (success) or stderr (errors).
//! Diagnostics go through `tracing`.

use std::path::Path;

/// Status message prefixes
pub mod status {
    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

/// Print the success line naming the produced archive
///
/// The archive is shown relative to `work_dir` when it lives below it.
pub fn display_success(archive: &Path, work_dir: &Path) {
    println!("{}", success_line(archive, work_dir));
}

/// `Success! -> <archive>`, the last line of a successful run
pub fn success_line(archive: &Path, work_dir: &Path) -> String {
    format!("Success! -> {}", display_path(archive, work_dir))
}

/// Path shown to the user for `path`
pub fn display_path(path: &Path, work_dir: &Path) -> String {
    path.strip_prefix(work_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
