//! Core build logic
//!
//! # Submodules
//!
//! - [`variant`] - Build flavors and their per-variant settings
//! - [`config`] - `protowrap.toml` parsing
//! - [`state`] - The per-run build state record
//! - [`preprocess`] - `.proto.1` to `.proto` rewrite
//! - [`layout`] - Output tree paths and staging
//! - [`pipeline`] - Stage sequencing

pub mod config;
pub mod layout;
pub mod pipeline;
pub mod preprocess;
pub mod state;
pub mod variant;
