use std::path::Path;

use anyhow::Result;

use oqs_template_core::datasheet::DATASHEET_ROOT_ENV;
use oqs_template_core::generate::{self, Stage};
use oqs_template_core::layout::CheckoutLayout;

use crate::output::{self, Progress};

/// Populate every host file of the checkout in the current directory.
///
/// Fails before touching any host file if `LIBOQS_SRC_DIR` is unset, the registry is
/// invalid, or a security level cannot be resolved. `kat_files` is
/// `(current, reference)`.
pub fn run(kat_files: Option<(&Path, &Path)>) -> Result<()> {
    let layout = CheckoutLayout::new(".");
    let datasheet_root = std::env::var_os(DATASHEET_ROOT_ENV);

    let total = if kat_files.is_some() { 4 } else { 3 };
    let mut progress = Progress::start("oqs-template generate", total);
    output::print_detail("Checkout", layout.root().display());
    output::print_detail("Registry", layout.registry().display());
    if let Some(root) = &datasheet_root {
        output::print_detail("Datasheets", Path::new(root).display());
    }

    let report = generate::run_in_checkout(layout, datasheet_root, kat_files, &mut |stage| {
        match stage {
            Stage::ResolvingLevels => progress.step("Resolving security levels"),
            Stage::ComparingKats => progress.step("Comparing KEM known-answer tests"),
            Stage::PopulatingHosts(n) => progress.step(&format!("Populating {n} host files")),
            Stage::PopulatingDocs => progress.step("Populating README.md"),
        }
    })?;

    output::print_detail("KEMs", report.kems);
    output::print_detail("Signature variants", report.sig_variants);
    for discrepancy in &report.kat {
        output::print_warning(&discrepancy.to_string());
    }
    for (host, identifier) in report.missed_markers() {
        output::print_warning(&format!(
            "no markers for fragment '{identifier}' in {}",
            host.display()
        ));
    }

    output::print_success(&format!(
        "Applied {} fragments to {} files",
        report.fragments_applied(),
        report.hosts.len()
    ));
    Ok(())
}
