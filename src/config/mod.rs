//! Configuration constants
//!
//! Built-in defaults used when neither the command line nor
//! `protowrap.toml` provides a value.

pub mod defaults;
