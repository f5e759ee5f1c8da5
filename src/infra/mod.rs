//! Infrastructure layer
//!
//! Handles all I/O with side effects outside the build state: filesystem
//! walks, tool lookup and external processes.

pub mod filesystem;
pub mod locator;
pub mod process;
