//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built scenarios for exercising the
//! procfs stats source without a real Linux `/proc` filesystem.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
