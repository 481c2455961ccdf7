//! oqs-template CLI: populates an OpenSSL fork from the OQS algorithm registry.
//!
//! Run from the root of the fork checkout with `LIBOQS_SRC_DIR` pointing at a liboqs
//! source tree. Every host file in the manifest is rewritten in place, so run it
//! against a clean checkout.
//!
//! Passing two KAT registries (`kats.json`, `kats_v040.json`) additionally reports
//! KEMs whose known-answer tests changed between the two liboqs releases.

mod commands;
mod output;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oqs-template",
    about = "Generate OQS algorithm code into an OpenSSL fork checkout",
    version
)]
struct Cli {
    /// Current liboqs KAT registry (JSON); requires REFERENCE_KATS
    #[arg(requires = "reference_kats")]
    current_kats: Option<PathBuf>,

    /// Reference liboqs KAT registry to compare against (JSON)
    #[arg(requires = "current_kats")]
    reference_kats: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let kat_files = cli.current_kats.as_deref().zip(cli.reference_kats.as_deref());

    if let Err(e) = commands::generate::run(kat_files) {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
