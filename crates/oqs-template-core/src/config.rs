//! Typed algorithm registry (`oqs-template/generate.yml`).
//!
//! The registry lists every KEM and signature family the fork knows about.
//! [`load`] parses it into [`Config`] and applies the two working-set filters:
//!
//! - KEM entries without a registry identifier (`nid`) are dropped unconditionally.
//!   They describe algorithms that are not integrated into the object namespace yet.
//!   A present but empty `nid: ~` is rejected rather than treated as absent.
//! - Signature variants with `enable: false` are dropped unless the caller asks for
//!   disabled variants (the README table lists them all). Families are kept even
//!   when every variant is filtered out.
//!
//! Unknown keys are rejected at load time, so a typo in the registry fails fast
//! instead of silently rendering as an empty template variable.
//!
//! ## Example
//!
//! ```yaml
//! kems:
//!   - family: CRYSTALS-Kyber
//!     name_group: kyber512
//!     oqs_alg: OQS_KEM_alg_kyber_512
//!     nid: '0x023A'
//! sigs:
//!   - family: CRYSTALS-Dilithium
//!     variants:
//!       - name: dilithium2
//!         enable: true
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OqsTemplateError, Result};

/// Identifier of an algorithm in the host library's object namespace.
///
/// Registries write these either as integers or as hex strings (`'0x0200'`).
/// The literal text is kept so templates can paste it into C sources verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistryId(String);

impl RegistryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RegistryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RegistryId(n.to_string()),
            Raw::Text(s) => RegistryId(s),
        })
    }
}

/// Deserialize a key that may be omitted but must not be null when present.
fn present_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<RegistryId>, D::Error> {
    RegistryId::deserialize(deserializer).map(Some)
}

/// One key-encapsulation mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KemEntry {
    pub family: String,
    /// TLS group name, matched against datasheet parameter-set names.
    pub name_group: String,
    /// liboqs algorithm identifier, e.g. `OQS_KEM_alg_kyber_512`.
    pub oqs_alg: String,
    #[serde(default, deserialize_with = "present_id")]
    pub nid: Option<RegistryId>,
    /// Identifier of the classical hybrid group, if any.
    #[serde(default)]
    pub nid_hybrid: Option<RegistryId>,
    #[serde(default)]
    pub extra_nids: Vec<RegistryId>,
    /// Filled in by [`crate::security::complete_config`].
    #[serde(default, skip_deserializing)]
    pub bit_security: Option<u16>,
}

/// A classical algorithm combined with a signature variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HybridVariant {
    pub name: String,
    #[serde(default)]
    pub pretty_name: Option<String>,
    #[serde(default)]
    pub oid: Option<String>,
    #[serde(default)]
    pub code_point: Option<String>,
}

/// One parameter set of a signature family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigVariant {
    pub name: String,
    #[serde(rename = "enable")]
    pub enabled: bool,
    #[serde(default)]
    pub pretty_name: Option<String>,
    #[serde(default)]
    pub oqs_meth: Option<String>,
    #[serde(default)]
    pub oid: Option<String>,
    #[serde(default)]
    pub code_point: Option<String>,
    #[serde(default)]
    pub mix_with: Vec<HybridVariant>,
    /// Bit security, filled in by [`crate::security::complete_config`].
    #[serde(default, skip_deserializing)]
    pub security: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigFamily {
    pub family: String,
    pub variants: Vec<SigVariant>,
}

/// All registry records for one generation run.
///
/// Built once by [`load`], annotated by [`crate::security::complete_config`], then
/// only read (as the `config` template variable) while merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub kems: Vec<KemEntry>,
    #[serde(default)]
    pub sigs: Vec<SigFamily>,
}

impl Config {
    /// Parse registry text and apply the working-set filters.
    ///
    /// `path` is only used for error reporting.
    pub fn from_yaml(text: &str, path: &Path, include_disabled: bool) -> Result<Self> {
        let mut config: Config =
            serde_yaml::from_str(text).map_err(|e| OqsTemplateError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.kems.retain(|kem| kem.nid.is_some());

        if !include_disabled {
            for family in &mut config.sigs {
                family.variants.retain(|variant| variant.enabled);
            }
        }

        Ok(config)
    }

    /// Iterate over every `(family, variant)` pair in registry order.
    pub fn sig_variants(&self) -> impl Iterator<Item = (&SigFamily, &SigVariant)> {
        self.sigs
            .iter()
            .flat_map(|family| family.variants.iter().map(move |variant| (family, variant)))
    }
}

/// Load the registry from `path`.
pub fn load(path: &Path, include_disabled: bool) -> Result<Config> {
    let text = std::fs::read_to_string(path).map_err(|e| OqsTemplateError::ConfigNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = Config::from_yaml(&text, path, include_disabled)?;
    tracing::debug!(
        "loaded {} KEMs and {} signature families from {}",
        config.kems.len(),
        config.sigs.len(),
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
kems:
  - family: CRYSTALS-Kyber
    name_group: kyber512
    oqs_alg: OQS_KEM_alg_kyber_512
    nid: '0x023A'
    nid_hybrid: '0x2F3A'
  - family: BIKE
    name_group: bike1l1cpa
    oqs_alg: OQS_KEM_alg_bike1_l1_cpa
  - family: SIDH
    name_group: sikep434
    oqs_alg: OQS_KEM_alg_sike_p434
    nid: 572
sigs:
  - family: CRYSTALS-Dilithium
    variants:
      - name: dilithium2
        enable: true
        oid: '1.3.6.1.4.1.2.267.7.4.4'
        mix_with:
          - name: p256
            pretty_name: ECDSA p256
      - name: dilithium3
        enable: false
  - family: Picnic
    variants:
      - name: picnicl1full
        enable: false
"#;

    fn parse(include_disabled: bool) -> Config {
        Config::from_yaml(REGISTRY, Path::new("generate.yml"), include_disabled).unwrap()
    }

    #[test]
    fn test_kems_without_nid_are_dropped() {
        let config = parse(true);
        let groups: Vec<_> = config.kems.iter().map(|k| k.name_group.as_str()).collect();
        assert_eq!(groups, vec!["kyber512", "sikep434"]);
    }

    #[test]
    fn test_integer_and_string_nids() {
        let config = parse(false);
        assert_eq!(config.kems[0].nid.as_ref().unwrap().as_str(), "0x023A");
        assert_eq!(config.kems[1].nid.as_ref().unwrap().as_str(), "572");
    }

    #[test]
    fn test_null_nid_is_rejected() {
        let text = "kems:\n  - family: BIKE\n    name_group: bike1l1cpa\n    oqs_alg: OQS_KEM_alg_bike1_l1_cpa\n    nid: ~\n";
        let err = Config::from_yaml(text, Path::new("generate.yml"), false).unwrap_err();
        assert!(matches!(err, OqsTemplateError::ConfigParse { .. }));
    }

    #[test]
    fn test_disabled_variants_filtered_by_default() {
        let config = parse(false);
        assert_eq!(config.sigs.len(), 2);
        assert_eq!(config.sigs[0].variants.len(), 1);
        assert_eq!(config.sigs[0].variants[0].name, "dilithium2");
        // Emptied families are kept.
        assert!(config.sigs[1].variants.is_empty());
    }

    #[test]
    fn test_include_disabled_keeps_variants_unchanged() {
        let config = parse(true);
        let names: Vec<_> = config.sig_variants().map(|(_, v)| v.name.as_str()).collect();
        assert_eq!(names, vec!["dilithium2", "dilithium3", "picnicl1full"]);
        assert!(!config.sigs[0].variants[1].enabled);
        assert_eq!(config.sigs[0].variants[0].mix_with[0].name, "p256");
    }

    #[test]
    fn test_security_is_not_read_from_registry() {
        let config = parse(false);
        assert!(config.kems.iter().all(|k| k.bit_security.is_none()));
        assert!(config.sig_variants().all(|(_, v)| v.security.is_none()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let text = "kems:\n  - family: X\n    name_group: x\n    oqs_alg: X\n    nid: 1\n    colour: red\n";
        let err = Config::from_yaml(text, Path::new("generate.yml"), false).unwrap_err();
        assert!(matches!(err, OqsTemplateError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let text = "sigs:\n  - family: Falcon\n    variants:\n      - name: falcon512\n";
        assert!(Config::from_yaml(text, Path::new("generate.yml"), false).is_err());
    }

    #[test]
    fn test_load_nonexistent() {
        let err = load(Path::new("/tmp/nonexistent_oqs_template/generate.yml"), false).unwrap_err();
        assert!(matches!(err, OqsTemplateError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generate.yml");
        std::fs::write(&path, REGISTRY).unwrap();
        let config = load(&path, false).unwrap();
        assert_eq!(config.kems.len(), 2);
    }
}
