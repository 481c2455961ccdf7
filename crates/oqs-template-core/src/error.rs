//! Unified error types for the oqs-template generator.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during a generation run.
#[derive(Error, Debug)]
pub enum OqsTemplateError {
    // --- Registry ---

    /// The algorithm registry (`oqs-template/generate.yml`) was not found.
    #[error("registry not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry exists but is not valid YAML, or does not match the record schema.
    #[error("failed to parse registry at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // --- Datasheets ---

    /// A required environment variable (the datasheet root) is not set.
    #[error("must include {0} in environment")]
    MissingEnvironment(String),

    /// The datasheet for an algorithm family could not be read.
    #[error("datasheet not found at {path}")]
    DatasheetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The datasheet exists but has no usable `parameter-sets` list.
    #[error("failed to parse datasheet at {path}")]
    DatasheetParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No parameter set in the family's datasheet matched, or its claimed level is not 1-5.
    #[error("cannot find security level for {family} {variant}")]
    UnresolvedSecurityLevel { family: String, variant: String },

    // --- Host files ---

    /// A host file listed in the manifest does not exist in the checkout.
    #[error("host file not found at {path}")]
    HostNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Templates ---

    /// Handlebars rendering of a fragment failed (syntax error or missing variable).
    #[error("template rendering failed for {fragment}: {message}")]
    TemplateRender { fragment: PathBuf, message: String },

    /// The overwrite base template for a host file does not exist.
    #[error("base template not found: {0}")]
    TemplateNotFound(PathBuf),

    // --- KAT diagnostic ---

    /// A known-answer-test registry could not be read or is not a JSON object.
    #[error("invalid KAT registry at {path}: {message}")]
    KatRegistry { path: PathBuf, message: String },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, OqsTemplateError>`.
pub type Result<T> = std::result::Result<T, OqsTemplateError>;
