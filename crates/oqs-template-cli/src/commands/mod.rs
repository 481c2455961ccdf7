//! CLI command implementations for oqs-template.

pub mod generate;
