//! protowrap - protobuf to Java jar build wrapper
//!
//! Turns a directory of `.proto.1` schema sources into a `classes.jar` by
//! driving `protoc`, `javac` and `jar` through a fixed sequence of stages.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line parsing and output formatting
//! - [`core`] - Variants, build state, schema preprocessing and the pipeline
//! - [`infra`] - Filesystem walks, tool lookup and process execution
//! - [`config`] - Built-in defaults
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
