//! Paths inside an OpenSSL fork checkout.
//!
//! ```text
//! <checkout>/
//! ├── oqs-template/
//! │   ├── generate.yml                 # algorithm registry
//! │   └── <host path>/                 # one directory per host file
//! │       ├── <identifier>.fragment
//! │       └── <host basename>.base     # overwrite-mode hosts only
//! ├── oqs/include/oqs/kem.h            # liboqs KEM names (KAT diagnostic)
//! └── <host path>                      # files rewritten in place
//! ```

use std::path::{Path, PathBuf};

use crate::host::HostFile;

pub const TEMPLATE_DIR: &str = "oqs-template";
pub const REGISTRY_FILE: &str = "generate.yml";
pub const KEM_HEADER: &str = "oqs/include/oqs/kem.h";

#[derive(Debug, Clone)]
pub struct CheckoutLayout {
    root: PathBuf,
}

impl CheckoutLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root.join(TEMPLATE_DIR)
    }

    pub fn registry(&self) -> PathBuf {
        self.template_dir().join(REGISTRY_FILE)
    }

    pub fn kem_header(&self) -> PathBuf {
        self.root.join(KEM_HEADER)
    }

    /// The file rewritten for `host`.
    pub fn host_path(&self, host: &HostFile) -> PathBuf {
        self.root.join(host.path())
    }

    /// Directory holding the fragments of `host`.
    pub fn fragment_dir(&self, host: &HostFile) -> PathBuf {
        self.template_dir().join(host.path())
    }

    /// `<fragment dir>/<host basename>.base`
    pub fn base_template(&self, host: &HostFile) -> PathBuf {
        let mut name = host
            .path()
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".base");
        self.fragment_dir(host).join(name)
    }
}
