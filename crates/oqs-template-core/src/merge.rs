//! Splicing rendered fragments into host files.
//!
//! Host content is scanned line by line; a marker is found on the first line that
//! contains the marker text. Two modes exist, see [`SpliceMode`]:
//!
//! - **Insert**: the rendered text goes right after the start marker text. Markers
//!   and everything around them are kept, so running twice against the same file
//!   duplicates the insertions. The host must start out with bare marker pairs.
//! - **Overwrite**: the host is rebuilt from its `.base` template. The rendered text
//!   replaces the end marker text through the end of its line; when the marker is
//!   absent it is appended at the end.
//!
//! Fragments are applied in discovery order, each to the output of the previous one.
//! If a marker occurs more than once, the first line wins.

use std::path::PathBuf;

use serde_json::Value;

use crate::config::Config;
use crate::error::{OqsTemplateError, Result};
use crate::host::{Delimiter, HostFile, SpliceMode};
use crate::layout::CheckoutLayout;
use crate::templates::fragment::{self, Fragment};
use crate::templates::renderer::TemplateRenderer;

/// Byte offsets of a marker within host content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerLine {
    marker_start: usize,
    marker_end: usize,
    /// Offset just past the terminator of the line holding the marker.
    line_end: usize,
}

/// Find `marker` on the first line that contains it.
fn find_marker(content: &str, marker: &str) -> Option<MarkerLine> {
    let mut offset = 0;
    let mut found = None;
    let mut occurrences = 0;

    for line in content.split_inclusive('\n') {
        if let Some(pos) = line.find(marker) {
            occurrences += 1;
            if found.is_none() {
                found = Some(MarkerLine {
                    marker_start: offset + pos,
                    marker_end: offset + pos + marker.len(),
                    line_end: offset + line.len(),
                });
            }
        }
        offset += line.len();
    }

    if occurrences > 1 {
        tracing::debug!("marker '{marker}' appears on {occurrences} lines, using the first");
    }
    found
}

/// Insert `rendered` right after the start marker of `identifier`.
///
/// Returns `None` if either marker is missing or the end marker precedes the start.
pub fn insert_fragment(
    content: &str,
    delimiter: Delimiter,
    identifier: &str,
    rendered: &str,
) -> Option<String> {
    let start = find_marker(content, &delimiter.start_marker(identifier))?;
    let end = find_marker(content, &delimiter.end_marker(identifier))?;
    if end.marker_start < start.marker_end {
        return None;
    }

    let mut out = String::with_capacity(content.len() + rendered.len());
    out.push_str(&content[..start.marker_end]);
    out.push_str(rendered);
    out.push_str(&content[start.marker_end..]);
    Some(out)
}

/// Put `rendered` where the end marker of `identifier` was, dropping the marker
/// through its line terminator.
///
/// Without an end marker, `rendered` is appended.
pub fn overwrite_fragment(
    content: &str,
    delimiter: Delimiter,
    identifier: &str,
    rendered: &str,
) -> String {
    let (before, after) = match find_marker(content, &delimiter.end_marker(identifier)) {
        Some(end) => (&content[..end.marker_start], &content[end.line_end..]),
        None => (content, ""),
    };

    let mut out = String::with_capacity(before.len() + rendered.len() + after.len());
    out.push_str(before);
    out.push_str(rendered);
    out.push_str(after);
    out
}

/// What happened to one host file.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub host: PathBuf,
    /// Identifiers spliced into the host.
    pub applied: Vec<String>,
    /// Identifiers whose markers were not found (insert mode only).
    pub missed: Vec<String>,
}

/// Renders fragments and writes merged host files.
pub struct FragmentMerger<'a> {
    layout: &'a CheckoutLayout,
    renderer: &'a TemplateRenderer,
}

impl<'a> FragmentMerger<'a> {
    pub fn new(layout: &'a CheckoutLayout, renderer: &'a TemplateRenderer) -> Self {
        Self { layout, renderer }
    }

    /// Merge every fragment of `host` and overwrite the host file with the result.
    ///
    /// Nothing is written if a fragment fails to render.
    pub fn merge(&self, host: &HostFile, config: &Config) -> Result<MergeOutcome> {
        let fragments = fragment::discover(&self.layout.fragment_dir(host))?;
        let host_path = self.layout.host_path(host);
        let config = serde_json::to_value(config).map_err(anyhow::Error::from)?;
        let data = serde_json::json!({ "config": config });

        let initial = match host.mode {
            SpliceMode::Insert => std::fs::read_to_string(&host_path).map_err(|e| {
                OqsTemplateError::HostNotFound {
                    path: host_path.clone(),
                    source: e,
                }
            })?,
            SpliceMode::Overwrite => {
                let base = self.layout.base_template(host);
                std::fs::read_to_string(&base)
                    .map_err(|_| OqsTemplateError::TemplateNotFound(base))?
            }
        };

        let (content, outcome) = self.splice_all(host, &fragments, initial, &data)?;
        std::fs::write(&host_path, content)?;

        tracing::info!(
            "populated {} ({} fragments)",
            host.path().display(),
            outcome.applied.len()
        );
        Ok(MergeOutcome {
            host: host.path().to_path_buf(),
            ..outcome
        })
    }

    fn splice_all(
        &self,
        host: &HostFile,
        fragments: &[Fragment],
        mut content: String,
        data: &Value,
    ) -> Result<(String, MergeOutcome)> {
        let mut outcome = MergeOutcome::default();

        for frag in fragments {
            let rendered = self.renderer.render(&frag.path, &frag.source, data)?;
            tracing::debug!("rendered {} ({} bytes)", frag.path.display(), rendered.len());

            match host.mode {
                SpliceMode::Insert => {
                    match insert_fragment(&content, host.delimiter, &frag.identifier, &rendered) {
                        Some(merged) => {
                            content = merged;
                            outcome.applied.push(frag.identifier.clone());
                        }
                        None => {
                            tracing::warn!(
                                "no marker pair for {} in {}, skipping",
                                frag.identifier,
                                host.path().display()
                            );
                            outcome.missed.push(frag.identifier.clone());
                        }
                    }
                }
                SpliceMode::Overwrite => {
                    content =
                        overwrite_fragment(&content, host.delimiter, &frag.identifier, &rendered);
                    outcome.applied.push(frag.identifier.clone());
                }
            }
        }

        Ok((content, outcome))
    }
}
