//! Name matching between the registry and liboqs datasheets.
//!
//! The two sides name the same parameter set differently: the registry uses TLS
//! group names (`kyber512`, `frodo640aes`) while datasheets use the submission
//! names (`Kyber512`, `FrodoKEM-640-AES`). Matching happens in two steps:
//!
//! 1. Datasheet names are rewritten by [`KEM_REWRITE_RULES`] to undo known
//!    naming divergences. Rules apply in table order; each fires only when its
//!    trigger substring is present.
//! 2. Both names are normalized (lower-cased, separators removed) and compared.

/// Which naming convention is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Kem,
    Sig,
}

impl NameKind {
    /// Characters dropped during normalization.
    fn separators(self) -> &'static [char] {
        match self {
            NameKind::Kem => &['_', '-'],
            // SPHINCS+ variant names carry a `+` that the registry omits.
            NameKind::Sig => &['_', '-', '+'],
        }
    }
}

/// A conditional rewrite applied to a datasheet name before normalization.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// The rule fires only if the name contains this substring.
    pub trigger: &'static str,
    /// `(pattern, replacement)` pairs applied in order once the rule fires.
    pub replacements: &'static [(&'static str, &'static str)],
}

impl RewriteRule {
    fn apply(&self, name: &str) -> Option<String> {
        if !name.contains(self.trigger) {
            return None;
        }
        let mut out = name.to_string();
        for (pattern, replacement) in self.replacements {
            out = out.replace(pattern, replacement);
        }
        Some(out)
    }
}

pub const KEM_REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        trigger: "FrodoKEM",
        replacements: &[("FrodoKEM", "Frodo")],
    },
    RewriteRule {
        trigger: "Saber-KEM",
        replacements: &[("-KEM", "")],
    },
    RewriteRule {
        trigger: "-90s",
        replacements: &[("-90s", ""), ("Kyber", "Kyber90s")],
    },
];

pub const SIG_REWRITE_RULES: &[RewriteRule] = &[];

/// Apply every matching rule of `rules` to `name`, in order.
pub fn rewrite(name: &str, rules: &[RewriteRule]) -> String {
    rules
        .iter()
        .fold(name.to_string(), |acc, rule| rule.apply(&acc).unwrap_or(acc))
}

/// Case-fold and strip separator characters.
pub fn normalize(name: &str, kind: NameKind) -> String {
    name.chars()
        .filter(|c| !kind.separators().contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Does the datasheet parameter-set name `datasheet_name` denote the registry name?
pub fn matches(datasheet_name: &str, registry_name: &str, kind: NameKind) -> bool {
    let rules = match kind {
        NameKind::Kem => KEM_REWRITE_RULES,
        NameKind::Sig => SIG_REWRITE_RULES,
    };
    normalize(&rewrite(datasheet_name, rules), kind) == normalize(registry_name, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ignores_case_and_separators() {
        assert_eq!(normalize("Kyber_512-AES", NameKind::Kem), "kyber512aes");
        assert_eq!(
            normalize("kyber-512_aes", NameKind::Kem),
            normalize("KYBER512AES", NameKind::Kem)
        );
    }

    #[test]
    fn test_plus_only_stripped_for_signatures() {
        assert_eq!(
            normalize("SPHINCS+-Haraka-128f-robust", NameKind::Sig),
            "sphincsharaka128frobust"
        );
        assert_eq!(normalize("a+b", NameKind::Kem), "a+b");
    }

    #[test]
    fn test_frodo_rule() {
        assert!(matches("FrodoKEM-640-AES", "frodo640aes", NameKind::Kem));
    }

    #[test]
    fn test_saber_rule() {
        assert!(matches("LightSaber-KEM", "lightsaber", NameKind::Kem));
        assert!(matches("Saber-KEM", "saber", NameKind::Kem));
    }

    #[test]
    fn test_kyber_90s_rule() {
        assert!(matches("Kyber512-90s", "kyber90s512", NameKind::Kem));
        assert!(!matches("Kyber512-90s", "kyber512", NameKind::Kem));
    }

    #[test]
    fn test_rules_only_fire_on_trigger() {
        assert_eq!(rewrite("Kyber512", KEM_REWRITE_RULES), "Kyber512");
        // "-KEM" is only removed for Saber.
        assert!(!matches("Foo-KEM", "foo", NameKind::Kem));
    }

    #[test]
    fn test_kem_rules_not_applied_to_signatures() {
        assert!(!matches("FrodoKEM-640-AES", "frodo640aes", NameKind::Sig));
        assert!(matches("Dilithium2", "dilithium2", NameKind::Sig));
    }

    #[test]
    fn test_plain_mismatch() {
        assert!(!matches("Kyber768", "kyber512", NameKind::Kem));
    }
}
