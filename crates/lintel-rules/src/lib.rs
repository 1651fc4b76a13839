//! Lintel Rules
//!
//! Built-in rules for the lintel linter, and the catalogue the autoconfig
//! registry probes.

pub mod builtin;

pub use builtin::{builtin_rules, recommended_rules};
