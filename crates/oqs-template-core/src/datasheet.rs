//! Access to liboqs algorithm datasheets.
//!
//! liboqs documents every family in `docs/algorithms/{kem,sig}/<key>.yml`. Only the
//! ordered `parameter-sets` list is read here; everything else in a datasheet is
//! ignored. The datasheet root comes from the `LIBOQS_SRC_DIR` environment variable.
//!
//! Family names from the registry are mapped to datasheet keys by
//! [`datasheet_key`]: irregular families are listed in [`KEM_DATASHEET_KEYS`] and
//! [`SIG_DATASHEET_KEYS`], all others are lower-cased verbatim.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{OqsTemplateError, Result};

/// Environment variable naming the liboqs source checkout.
pub const DATASHEET_ROOT_ENV: &str = "LIBOQS_SRC_DIR";

/// Irregular KEM family → datasheet key mappings.
pub const KEM_DATASHEET_KEYS: &[(&str, &str)] = &[
    ("CRYSTALS-Kyber", "kyber"),
    ("SIDH", "sike"),
    ("NTRU-Prime", "ntruprime"),
];

/// Irregular signature family → datasheet key mappings.
pub const SIG_DATASHEET_KEYS: &[(&str, &str)] = &[
    ("CRYSTALS-Dilithium", "dilithium"),
    ("SPHINCS-Haraka", "sphincs"),
    ("SPHINCS-SHA256", "sphincs"),
    ("SPHINCS-SHAKE256", "sphincs"),
];

/// Kind of algorithm a datasheet describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Kem,
    Sig,
}

impl AlgorithmKind {
    /// Subdirectory of `docs/algorithms` holding this kind's datasheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kem => "kem",
            Self::Sig => "sig",
        }
    }

    fn key_table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Kem => KEM_DATASHEET_KEYS,
            Self::Sig => SIG_DATASHEET_KEYS,
        }
    }
}

/// Translate a registry family name into its datasheet key.
pub fn datasheet_key(kind: AlgorithmKind, family: &str) -> String {
    kind.key_table()
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, key)| key.to_string())
        .unwrap_or_else(|| family.to_lowercase())
}

/// One entry of a datasheet's `parameter-sets` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSet {
    pub name: String,
    /// NIST security category (1-5) claimed by the submitters.
    #[serde(rename = "claimed-nist-level", default)]
    pub claimed_nist_level: Option<i64>,
}

/// The part of a liboqs datasheet the resolver needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Datasheet {
    #[serde(rename = "parameter-sets")]
    pub parameter_sets: Vec<ParameterSet>,
}

impl Datasheet {
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| OqsTemplateError::DatasheetParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Source of datasheets, keyed by algorithm kind and registry family name.
pub trait DatasheetProvider {
    fn datasheet(&self, kind: AlgorithmKind, family: &str) -> Result<Datasheet>;
}

/// Reads datasheets from a liboqs source tree, caching each file after first use.
pub struct FsDatasheetProvider {
    root: PathBuf,
    cache: RefCell<HashMap<PathBuf, Datasheet>>,
}

impl FsDatasheetProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Create a provider from the value of `$LIBOQS_SRC_DIR`.
    ///
    /// Fails with [`OqsTemplateError::MissingEnvironment`] if the variable is unset.
    pub fn from_var(root: Option<OsString>) -> Result<Self> {
        let root =
            root.ok_or_else(|| OqsTemplateError::MissingEnvironment(DATASHEET_ROOT_ENV.into()))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the datasheet for `family`.
    pub fn datasheet_path(&self, kind: AlgorithmKind, family: &str) -> PathBuf {
        self.root
            .join("docs")
            .join("algorithms")
            .join(kind.as_str())
            .join(format!("{}.yml", datasheet_key(kind, family)))
    }
}

impl DatasheetProvider for FsDatasheetProvider {
    fn datasheet(&self, kind: AlgorithmKind, family: &str) -> Result<Datasheet> {
        let path = self.datasheet_path(kind, family);
        if let Some(sheet) = self.cache.borrow().get(&path) {
            return Ok(sheet.clone());
        }

        let text =
            std::fs::read_to_string(&path).map_err(|e| OqsTemplateError::DatasheetNotFound {
                path: path.clone(),
                source: e,
            })?;
        let sheet = Datasheet::from_yaml(&text, &path)?;
        tracing::debug!(
            "read {} parameter sets from {}",
            sheet.parameter_sets.len(),
            path.display()
        );
        self.cache.borrow_mut().insert(path, sheet.clone());
        Ok(sheet)
    }
}
