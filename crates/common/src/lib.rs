//! Shared helpers for the inventory binaries and crates.

pub mod types;
pub mod utils;
