//! Core library for the oqs-template generator.
//!
//! Populates an OpenSSL fork with algorithm-specific code from the OQS algorithm
//! registry. Two pieces do the real work:
//! - [`security`] resolves each algorithm's claimed NIST level from the liboqs
//!   datasheets, using the name matching in [`names`].
//! - [`merge`] renders `.fragment` templates and splices them into host files at
//!   `OQS_TEMPLATE_FRAGMENT_<ID>_START` / `_END` marker lines.
//!
//! [`generate::Generator`] runs them in order over the fixed host manifest in [`host`].

pub mod config;
pub mod datasheet;
pub mod error;
pub mod generate;
pub mod host;
pub mod kat;
pub mod layout;
pub mod merge;
pub mod names;
pub mod security;
pub mod templates;
