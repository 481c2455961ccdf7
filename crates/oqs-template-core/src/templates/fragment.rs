//! Discovery of `.fragment` files for a host.

use std::path::{Path, PathBuf};

use crate::error::Result;

pub const FRAGMENT_EXTENSION: &str = "fragment";

/// A fragment template and the marker identifier it fills.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// File stem, e.g. `kem_nids` for `kem_nids.fragment`.
    pub identifier: String,
    pub path: PathBuf,
    pub source: String,
}

/// Load every `*.fragment` file in `dir`, ordered by file name.
///
/// A missing directory yields no fragments.
pub fn discover(dir: &Path) -> Result<Vec<Fragment>> {
    if !dir.is_dir() {
        tracing::debug!("no fragment directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FRAGMENT_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> Result<Fragment> {
            let identifier = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = std::fs::read_to_string(&path)?;
            Ok(Fragment {
                identifier,
                path,
                source,
            })
        })
        .collect()
}
