//! Claimed security levels for registry entries.
//!
//! Each KEM and signature variant is looked up in its family's datasheet. The first
//! parameter set whose name [matches](crate::names::matches) wins, and its claimed
//! NIST level is converted to a bit-security value with [`nist_to_bits`].
//!
//! [`complete_config`] annotates a whole [`Config`]. It is all-or-nothing: the
//! first entry without a resolvable level fails the run and the input config is
//! left untouched.

use crate::config::{Config, KemEntry, SigFamily, SigVariant};
use crate::datasheet::{AlgorithmKind, DatasheetProvider};
use crate::error::{OqsTemplateError, Result};
use crate::names::{self, NameKind};

/// Convert a NIST security category to its symmetric-equivalent bit security.
///
/// Categories 1-2 → 128, 3-4 → 192, 5 → 256. Anything else has no equivalent.
pub fn nist_to_bits(level: i64) -> Option<u16> {
    match level {
        1 | 2 => Some(128),
        3 | 4 => Some(192),
        5 => Some(256),
        _ => None,
    }
}

/// Find the claimed level of the first parameter set matching `name`.
fn claimed_level(
    provider: &dyn DatasheetProvider,
    kind: AlgorithmKind,
    family: &str,
    name: &str,
) -> Result<Option<i64>> {
    let sheet = provider.datasheet(kind, family)?;
    let name_kind = match kind {
        AlgorithmKind::Kem => NameKind::Kem,
        AlgorithmKind::Sig => NameKind::Sig,
    };
    Ok(sheet
        .parameter_sets
        .iter()
        .find(|set| names::matches(&set.name, name, name_kind))
        .and_then(|set| set.claimed_nist_level))
}

/// Claimed NIST level of a KEM, or `None` if no parameter set matches its group name.
pub fn resolve_kem_level(provider: &dyn DatasheetProvider, kem: &KemEntry) -> Result<Option<i64>> {
    claimed_level(provider, AlgorithmKind::Kem, &kem.family, &kem.name_group)
}

/// Claimed NIST level of a signature variant, or `None` if no parameter set matches.
pub fn resolve_sig_level(
    provider: &dyn DatasheetProvider,
    family: &SigFamily,
    variant: &SigVariant,
) -> Result<Option<i64>> {
    claimed_level(provider, AlgorithmKind::Sig, &family.family, &variant.name)
}

/// Annotate every KEM (`bit_security`) and signature variant (`security`) in `config`.
///
/// Returns the annotated copy; fails with
/// [`OqsTemplateError::UnresolvedSecurityLevel`] naming the first entry that has no
/// match or whose level is outside 1-5.
pub fn complete_config(provider: &dyn DatasheetProvider, config: &Config) -> Result<Config> {
    let mut completed = config.clone();

    for kem in &mut completed.kems {
        let bits = resolve_kem_level(provider, kem)?
            .and_then(nist_to_bits)
            .ok_or_else(|| OqsTemplateError::UnresolvedSecurityLevel {
                family: kem.family.clone(),
                variant: kem.name_group.clone(),
            })?;
        tracing::debug!("{} {}: {bits} bits", kem.family, kem.name_group);
        kem.bit_security = Some(bits);
    }

    for family in &mut completed.sigs {
        let mut levels = Vec::with_capacity(family.variants.len());
        for variant in &family.variants {
            let bits = resolve_sig_level(provider, family, variant)?
                .and_then(nist_to_bits)
                .ok_or_else(|| OqsTemplateError::UnresolvedSecurityLevel {
                    family: family.family.clone(),
                    variant: variant.name.clone(),
                })?;
            tracing::debug!("{} {}: {bits} bits", family.family, variant.name);
            levels.push(bits);
        }
        for (variant, bits) in family.variants.iter_mut().zip(levels) {
            variant.security = Some(bits);
        }
    }

    Ok(completed)
}
