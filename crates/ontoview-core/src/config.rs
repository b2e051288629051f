//! # Configuration
//!
//! Read settings and personality options consumed by the translators and the
//! view engine.
//!
//! Configuration is pure data. It is built by the host (directly or from a
//! TOML document) and never mutated by the core: every `with_*` setter
//! returns a new value.
//!
//! ```toml
//! [read]
//! read-annotation-axioms = false
//! split-axiom-annotations = true
//!
//! [personality]
//! punnings = "strict"
//! anonymous-individuals = "tolerant"
//! ```

use crate::OntError;
use crate::personality::Personality;
use serde::{Deserialize, Serialize};

// =============================================================================
// READ SETTINGS
// =============================================================================

/// Flags controlling how statements are read as axioms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReadSettings {
    /// Read annotation assertions and annotation-property axioms as separate
    /// axioms. When off, assertions fold into the subject's declaration.
    pub read_annotation_axioms: bool,
    /// Allow annotation assertions to carry their own bulk annotations. When
    /// off, annotated assertions fold into the subject's declaration.
    pub allow_bulk_annotation_assertions: bool,
    /// Do not read domain/range/sub-property statements of punned properties
    /// as annotation-property axioms.
    pub ignore_annotation_axiom_overlaps: bool,
    /// Read declaration axioms.
    pub allow_read_declarations: bool,
    /// Produce one axiom per reified annotation node instead of merging.
    pub split_axiom_annotations: bool,
    /// Skip statements that fail to decode instead of failing the read.
    pub ignore_axiom_read_errors: bool,
}

impl Default for ReadSettings {
    fn default() -> Self {
        Self {
            read_annotation_axioms: true,
            allow_bulk_annotation_assertions: true,
            ignore_annotation_axiom_overlaps: true,
            allow_read_declarations: true,
            split_axiom_annotations: false,
            ignore_axiom_read_errors: false,
        }
    }
}

impl ReadSettings {
    #[must_use]
    pub fn with_read_annotation_axioms(self, value: bool) -> Self {
        Self {
            read_annotation_axioms: value,
            ..self
        }
    }

    #[must_use]
    pub fn with_allow_bulk_annotation_assertions(self, value: bool) -> Self {
        Self {
            allow_bulk_annotation_assertions: value,
            ..self
        }
    }

    #[must_use]
    pub fn with_ignore_annotation_axiom_overlaps(self, value: bool) -> Self {
        Self {
            ignore_annotation_axiom_overlaps: value,
            ..self
        }
    }

    #[must_use]
    pub fn with_allow_read_declarations(self, value: bool) -> Self {
        Self {
            allow_read_declarations: value,
            ..self
        }
    }

    #[must_use]
    pub fn with_split_axiom_annotations(self, value: bool) -> Self {
        Self {
            split_axiom_annotations: value,
            ..self
        }
    }

    #[must_use]
    pub fn with_ignore_axiom_read_errors(self, value: bool) -> Self {
        Self {
            ignore_axiom_read_errors: value,
            ..self
        }
    }
}

// =============================================================================
// PERSONALITY SETTINGS
// =============================================================================

/// Which entity-type overlaps a node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunningMode {
    /// No property or class/datatype punning.
    Strict,
    /// Class/datatype and object/data punning forbidden.
    DlWeak,
    /// Everything allowed.
    #[default]
    Lax,
}

/// How blank nodes without positive evidence are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnonymousIndividualPolicy {
    /// Accept any blank node no rule excludes.
    #[default]
    Tolerant,
    /// Additionally require a class assertion or an individual position.
    Strict,
}

/// Personality options that can be expressed as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PersonalitySettings {
    pub punnings: PunningMode,
    pub anonymous_individuals: AnonymousIndividualPolicy,
}

// =============================================================================
// MODEL CONFIG
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigDocument {
    read: ReadSettings,
    personality: PersonalitySettings,
}

/// Read settings plus the active personality.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    settings: ReadSettings,
    personality: Personality,
}

impl ModelConfig {
    #[must_use]
    pub fn new(settings: ReadSettings, personality: Personality) -> Self {
        Self {
            settings,
            personality,
        }
    }

    /// Parse a TOML document with optional `[read]` and `[personality]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, OntError> {
        let doc: ConfigDocument =
            toml::from_str(source).map_err(|e| OntError::Config(e.to_string()))?;
        Ok(Self {
            settings: doc.read,
            personality: Personality::from_settings(&doc.personality),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &ReadSettings {
        &self.settings
    }

    #[must_use]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    #[must_use]
    pub fn with_settings(&self, settings: ReadSettings) -> Self {
        Self {
            settings,
            personality: self.personality.clone(),
        }
    }

    #[must_use]
    pub fn with_personality(&self, personality: Personality) -> Self {
        Self {
            settings: self.settings,
            personality,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = ReadSettings::default();
        assert!(s.read_annotation_axioms);
        assert!(s.allow_bulk_annotation_assertions);
        assert!(s.ignore_annotation_axiom_overlaps);
        assert!(s.allow_read_declarations);
        assert!(!s.split_axiom_annotations);
        assert!(!s.ignore_axiom_read_errors);
    }

    #[test]
    fn setters_copy_on_write() {
        let base = ReadSettings::default();
        let changed = base.with_read_annotation_axioms(false);
        assert!(base.read_annotation_axioms);
        assert!(!changed.read_annotation_axioms);
    }

    #[test]
    fn toml_document_parses() {
        let config = ModelConfig::from_toml_str(
            r#"
            [read]
            read-annotation-axioms = false
            ignore-axiom-read-errors = true

            [personality]
            punnings = "strict"
            anonymous-individuals = "strict"
            "#,
        )
        .expect("parse");
        assert!(!config.settings().read_annotation_axioms);
        assert!(config.settings().ignore_axiom_read_errors);
        assert!(config.settings().allow_read_declarations);
        assert_eq!(config.personality().punning_mode(), PunningMode::Strict);
        assert_eq!(
            config.personality().anonymous_policy(),
            AnonymousIndividualPolicy::Strict
        );
    }

    #[test]
    fn empty_toml_is_default() {
        let config = ModelConfig::from_toml_str("").expect("parse");
        assert_eq!(*config.settings(), ReadSettings::default());
        assert_eq!(config.personality().punning_mode(), PunningMode::Lax);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = ModelConfig::from_toml_str("[read]\nread-everything = true\n");
        assert!(matches!(result, Err(OntError::Config(_))));
    }
}
