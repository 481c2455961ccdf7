//! Host files and the fixed generation manifest.
//!
//! A host file is an existing source file of the OpenSSL fork containing marker
//! comments. Its comment syntax decides the [`Delimiter`] and its format decides the
//! [`SpliceMode`].

use std::path::{Path, PathBuf};

/// Comment token that opens a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// C sources and headers.
    Slashes,
    /// Object tables and Python.
    Hashes,
    /// Markdown (HTML comment).
    Html,
}

impl Delimiter {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Slashes => "/////",
            Self::Hashes => "#####",
            Self::Html => "<!---",
        }
    }

    /// Text closing the marker comment, if the syntax needs one.
    pub fn trailer(&self) -> &'static str {
        match self {
            Self::Html => " -->",
            _ => "",
        }
    }

    /// `<delimiter> OQS_TEMPLATE_FRAGMENT_<ID>_START[trailer]`
    pub fn start_marker(&self, identifier: &str) -> String {
        format!(
            "{} OQS_TEMPLATE_FRAGMENT_{}_START{}",
            self.token(),
            identifier.to_uppercase(),
            self.trailer()
        )
    }

    /// `<delimiter> OQS_TEMPLATE_FRAGMENT_<ID>_END`
    ///
    /// Never carries the trailer, so a markdown end line matches with or without it.
    pub fn end_marker(&self, identifier: &str) -> String {
        format!(
            "{} OQS_TEMPLATE_FRAGMENT_{}_END",
            self.token(),
            identifier.to_uppercase()
        )
    }
}

/// How rendered fragments are combined with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceMode {
    /// Insert after each start marker of the current host content.
    Insert,
    /// Rebuild the host from its `.base` template; marker lines are removed.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFile {
    /// Path relative to the checkout root; also names the fragment directory.
    pub path: PathBuf,
    pub delimiter: Delimiter,
    pub mode: SpliceMode,
}

impl HostFile {
    pub fn insert(path: impl Into<PathBuf>, delimiter: Delimiter) -> Self {
        Self {
            path: path.into(),
            delimiter,
            mode: SpliceMode::Insert,
        }
    }

    pub fn overwrite(path: impl Into<PathBuf>, delimiter: Delimiter) -> Self {
        Self {
            path: path.into(),
            delimiter,
            mode: SpliceMode::Overwrite,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Hosts populated from the enabled-only registry, in generation order.
pub fn manifest() -> Vec<HostFile> {
    use Delimiter::{Hashes, Slashes};

    vec![
        // signatures
        HostFile::insert("crypto/asn1/standard_methods.h", Slashes),
        HostFile::insert("crypto/ec/oqs_meth.c", Slashes),
        HostFile::insert("crypto/evp/pmeth_lib.c", Slashes),
        HostFile::insert("include/crypto/asn1.h", Slashes),
        HostFile::insert("include/crypto/evp.h", Slashes),
        // marker comments are not allowed in obj_mac.num
        HostFile::overwrite("crypto/objects/obj_mac.num", Hashes),
        HostFile::insert("crypto/objects/obj_xref.txt", Hashes),
        HostFile::insert("crypto/objects/objects.txt", Hashes),
        HostFile::insert("crypto/x509/x509type.c", Slashes),
        HostFile::insert("include/openssl/evp.h", Slashes),
        HostFile::insert("ssl/ssl_cert_table.h", Slashes),
        // KEMs and signatures
        HostFile::insert("apps/s_cb.c", Slashes),
        HostFile::insert("ssl/ssl_local.h", Slashes),
        HostFile::insert("ssl/t1_lib.c", Slashes),
        HostFile::insert("ssl/t1_trce.c", Slashes),
        HostFile::insert("oqs-test/common.py", Hashes),
        HostFile::insert("oqs-interop-test/common.py", Hashes),
    ]
}

/// The README, populated from the registry including disabled signature variants.
pub fn documentation_host() -> HostFile {
    HostFile::insert("README.md", Delimiter::Html)
}
