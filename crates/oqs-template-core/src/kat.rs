//! Known-answer-test comparison between two liboqs releases.
//!
//! A diagnostic only: it reports KEM groups whose KAT digest changed (their code
//! point needs an update) or that have no KAT in one of the registries (they need a
//! new code point). It never affects what gets generated.
//!
//! KAT registries are JSON objects keyed by liboqs algorithm name. Registry group
//! names are mapped to those names through the `#define OQS_KEM_alg_* "<name>"`
//! lines of liboqs' `kem.h`.

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{OqsTemplateError, Result};

/// Registry group name → liboqs algorithm name, in registry order.
pub type KatIndex = Vec<(String, String)>;

/// Build the group-name index from the text of `kem.h`.
///
/// KEMs whose `oqs_alg` has no `#define` are left out.
pub fn kat_names(config: &Config, kem_header: &str) -> KatIndex {
    config
        .kems
        .iter()
        .filter_map(|kem| {
            let prefix = format!("#define {} ", kem.oqs_alg);
            kem_header
                .lines()
                .find_map(|line| line.strip_prefix(prefix.as_str()))
                .map(|rest| {
                    let name = rest.trim().trim_matches('"');
                    (kem.name_group.clone(), name.to_string())
                })
        })
        .collect()
}

/// Read `kem.h` and build the group-name index.
pub fn load_kat_names(config: &Config, kem_header: &Path) -> Result<KatIndex> {
    let text = std::fs::read_to_string(kem_header).map_err(|e| OqsTemplateError::KatRegistry {
        path: kem_header.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(kat_names(config, &text))
}

/// Load a KAT registry (a JSON object keyed by algorithm name).
pub fn load_registry(path: &Path) -> Result<Map<String, Value>> {
    let err = |message: String| OqsTemplateError::KatRegistry {
        path: path.to_path_buf(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
    match serde_json::from_str::<Value>(&text).map_err(|e| err(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(err("expected a JSON object".into())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KatDiscrepancy {
    /// Both registries have a KAT for the group, and they differ.
    Changed { group: String },
    /// At least one registry has no KAT for the group.
    Missing { group: String },
}

impl fmt::Display for KatDiscrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Changed { group } => {
                write!(f, "Different KATs for {group}: Code point update needed")
            }
            Self::Missing { group } => {
                write!(f, "No KAT for KEM {group}: New code point needed")
            }
        }
    }
}

/// Compare the `current` registry against `reference` for every indexed group.
pub fn compare(
    index: &KatIndex,
    current: &Map<String, Value>,
    reference: &Map<String, Value>,
) -> Vec<KatDiscrepancy> {
    index
        .iter()
        .filter_map(|(group, alg)| match (reference.get(alg), current.get(alg)) {
            (Some(old), Some(new)) if old == new => None,
            (Some(_), Some(_)) => Some(KatDiscrepancy::Changed {
                group: group.clone(),
            }),
            _ => Some(KatDiscrepancy::Missing {
                group: group.clone(),
            }),
        })
        .collect()
}

/// Run the whole diagnostic for two registry files.
pub fn diagnose(
    config: &Config,
    kem_header: &Path,
    current: &Path,
    reference: &Path,
) -> Result<Vec<KatDiscrepancy>> {
    let index = load_kat_names(config, kem_header)?;
    let current = load_registry(current)?;
    let reference = load_registry(reference)?;
    Ok(compare(&index, &current, &reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEM_H: &str = r#"
#define OQS_KEM_alg_kyber_512 "Kyber512"
#define OQS_KEM_alg_kyber_768 "Kyber768"
#define OQS_KEM_alg_kyber_512_90s "Kyber512-90s"
"#;

    fn config() -> Config {
        let text = r#"
kems:
  - family: CRYSTALS-Kyber
    name_group: kyber512
    oqs_alg: OQS_KEM_alg_kyber_512
    nid: '0x023A'
  - family: CRYSTALS-Kyber
    name_group: kyber768
    oqs_alg: OQS_KEM_alg_kyber_768
    nid: '0x023C'
  - family: CRYSTALS-Kyber
    name_group: kyber90s512
    oqs_alg: OQS_KEM_alg_kyber_512_90s
    nid: '0x023D'
  - family: HQC
    name_group: hqc128
    oqs_alg: OQS_KEM_alg_hqc_128
    nid: '0x022C'
"#;
        Config::from_yaml(text, Path::new("generate.yml"), false).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_kat_names_from_header() {
        let index = kat_names(&config(), KEM_H);
        assert_eq!(
            index,
            vec![
                ("kyber512".to_string(), "Kyber512".to_string()),
                ("kyber768".to_string(), "Kyber768".to_string()),
                ("kyber90s512".to_string(), "Kyber512-90s".to_string()),
            ]
        );
    }

    #[test]
    fn test_compare_reports_changed_and_missing() {
        let index = kat_names(&config(), KEM_H);
        let current = object(json!({ "Kyber512": "aa", "Kyber768": "bb", "Kyber512-90s": "cc" }));
        let reference = object(json!({ "Kyber512": "aa", "Kyber768": "b0" }));

        let report = compare(&index, &current, &reference);
        assert_eq!(
            report,
            vec![
                KatDiscrepancy::Changed { group: "kyber768".into() },
                KatDiscrepancy::Missing { group: "kyber90s512".into() },
            ]
        );
        assert_eq!(
            report[0].to_string(),
            "Different KATs for kyber768: Code point update needed"
        );
        assert_eq!(
            report[1].to_string(),
            "No KAT for KEM kyber90s512: New code point needed"
        );
    }

    #[test]
    fn test_diagnose_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("kem.h");
        let current = dir.path().join("kats.json");
        let reference = dir.path().join("kats_v040.json");
        std::fs::write(&header, KEM_H).unwrap();
        std::fs::write(&current, r#"{"Kyber512": "aa", "Kyber768": "bb", "Kyber512-90s": "cc"}"#).unwrap();
        std::fs::write(&reference, r#"{"Kyber512": "aa", "Kyber768": "bb", "Kyber512-90s": "cc"}"#).unwrap();

        let report = diagnose(&config(), &header, &current, &reference).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_registry_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kats.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            load_registry(&path),
            Err(OqsTemplateError::KatRegistry { .. })
        ));
    }

    #[test]
    fn test_missing_header() {
        let err = load_kat_names(&config(), Path::new("/tmp/nonexistent_oqs_kem.h")).unwrap_err();
        assert!(matches!(err, OqsTemplateError::KatRegistry { .. }));
    }
}
