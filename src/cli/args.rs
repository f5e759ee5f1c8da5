//! Argument normalization
//!
//! Flags are documented in the single-dash long form (`-proto dir`), which
//! clap does not parse. They are rewritten to `--proto dir` before parsing.

use std::ffi::OsString;

/// Long flags accepted with a single leading dash
const SINGLE_DASH_FLAGS: &[&str] = &["proto", "arg", "runtime", "config", "debug"];

/// Rewrite `-flag` / `-flag=value` into their double-dash form
///
/// Arguments after a bare `--` are left alone, as are short flags such as
/// `-v` and anything that is not valid UTF-8.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_separator = false;

    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_separator = true;
                return arg;
            }

            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_single_dash_flag(rest) => {
                    OsString::from(format!("--{rest}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_FLAGS.contains(&name)
}
