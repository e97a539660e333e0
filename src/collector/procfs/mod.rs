//! Stats source for the Linux `/proc` filesystem.
//!
//! This module provides parsers for `/proc` files and the [`ProcfsSource`]
//! that turns them into family snapshots.

pub mod parser;
pub mod system;

pub use parser::ParseError;
pub use system::{CPU_TOTAL, NET_ALL, ProcfsSource};
