//! The generation sequence over the fixed host manifest.
//!
//! Stages, in order:
//! 1. load the registry (enabled variants only) and resolve security levels
//! 2. optionally compare KAT registries (report only)
//! 3. merge every host in [`host::manifest`]
//! 4. reload the registry with disabled variants and merge the README
//!
//! Any error aborts the sequence. Host files written by earlier stages stay written;
//! rerun against a clean checkout.

use std::ffi::OsString;
use std::path::Path;

use crate::config::{self, Config};
use crate::datasheet::{DatasheetProvider, FsDatasheetProvider};
use crate::error::Result;
use crate::host::{self, HostFile};
use crate::kat::{self, KatDiscrepancy};
use crate::layout::CheckoutLayout;
use crate::merge::{FragmentMerger, MergeOutcome};
use crate::security;
use crate::templates::renderer::TemplateRenderer;

/// A stage of [`Generator::run`], reported before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingLevels,
    ComparingKats,
    /// Merging the manifest; carries the number of hosts.
    PopulatingHosts(usize),
    PopulatingDocs,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Enabled KEMs and signature variants the hosts were generated for.
    pub kems: usize,
    pub sig_variants: usize,
    pub kat: Vec<KatDiscrepancy>,
    pub hosts: Vec<MergeOutcome>,
}

impl GenerationReport {
    pub fn fragments_applied(&self) -> usize {
        self.hosts.iter().map(|h| h.applied.len()).sum()
    }

    /// `(host, identifier)` for every fragment whose markers were not found.
    pub fn missed_markers(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.hosts.iter().flat_map(|h| {
            h.missed
                .iter()
                .map(move |id| (h.host.as_path(), id.as_str()))
        })
    }
}

/// Run the whole sequence in `layout` with datasheets from `datasheet_root`, the
/// value of `$LIBOQS_SRC_DIR`.
///
/// Nothing is written when the root is missing.
pub fn run_in_checkout(
    layout: CheckoutLayout,
    datasheet_root: Option<OsString>,
    kat_files: Option<(&Path, &Path)>,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<GenerationReport> {
    let provider = FsDatasheetProvider::from_var(datasheet_root)?;
    tracing::info!("reading datasheets from {}", provider.root().display());
    Generator::new(layout, &provider).run(kat_files, on_stage)
}

pub struct Generator<'a> {
    layout: CheckoutLayout,
    provider: &'a dyn DatasheetProvider,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(layout: CheckoutLayout, provider: &'a dyn DatasheetProvider) -> Self {
        Self {
            layout,
            provider,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn layout(&self) -> &CheckoutLayout {
        &self.layout
    }

    /// Load the enabled-only registry and annotate bit security.
    pub fn load_config(&self) -> Result<Config> {
        let config = config::load(&self.layout.registry(), false)?;
        security::complete_config(self.provider, &config)
    }

    /// Registry for the README: disabled variants included, levels not resolved.
    pub fn load_documentation_config(&self) -> Result<Config> {
        config::load(&self.layout.registry(), true)
    }

    /// Compare two KAT registries for the KEMs of `config`.
    pub fn diagnose_kats(
        &self,
        config: &Config,
        current: &Path,
        reference: &Path,
    ) -> Result<Vec<KatDiscrepancy>> {
        kat::diagnose(config, &self.layout.kem_header(), current, reference)
    }

    /// Merge `hosts` in order.
    pub fn populate(&self, hosts: &[HostFile], config: &Config) -> Result<Vec<MergeOutcome>> {
        let merger = FragmentMerger::new(&self.layout, &self.renderer);
        hosts.iter().map(|h| merger.merge(h, config)).collect()
    }

    /// Run every stage, calling `on_stage` as each one starts. `kat_files` is
    /// `(current, reference)`.
    pub fn run(
        &self,
        kat_files: Option<(&Path, &Path)>,
        on_stage: &mut dyn FnMut(Stage),
    ) -> Result<GenerationReport> {
        on_stage(Stage::ResolvingLevels);
        let config = self.load_config()?;

        let kat = match kat_files {
            Some((current, reference)) => {
                on_stage(Stage::ComparingKats);
                self.diagnose_kats(&config, current, reference)?
            }
            None => Vec::new(),
        };

        let manifest = host::manifest();
        on_stage(Stage::PopulatingHosts(manifest.len()));
        let mut hosts = self.populate(&manifest, &config)?;

        on_stage(Stage::PopulatingDocs);
        let docs = self.load_documentation_config()?;
        hosts.extend(self.populate(&[host::documentation_host()], &docs)?);

        Ok(GenerationReport {
            kems: config.kems.len(),
            sig_variants: config.sig_variants().count(),
            kat,
            hosts,
        })
    }
}
