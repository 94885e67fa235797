//! Rule presets and the rule factory.

use crate::{
    attr_duplication, class_naming, invalid_attr, no_empty_palpable_content, AttrDuplication,
    ClassNaming, InvalidAttr, NoEmptyPalpableContent,
};
use markup_lint_core::{Config, RuleBox, RuleConfig, RuleError};
use tracing::debug;

/// Names of every built-in rule, in registration order.
pub const RULE_NAMES: &[&str] = &[
    invalid_attr::NAME,
    class_naming::NAME,
    no_empty_palpable_content::NAME,
    attr_duplication::NAME,
];

const RULE_IDS: &[(&str, &str)] = &[
    (invalid_attr::NAME, invalid_attr::CODE),
    (class_naming::NAME, class_naming::CODE),
    (no_empty_palpable_content::NAME, no_empty_palpable_content::CODE),
    (attr_duplication::NAME, attr_duplication::CODE),
];

/// Resolves a rule name or code to the built-in rule's `(name, code)`.
#[must_use]
pub fn rule_id(name_or_code: &str) -> Option<(&'static str, &'static str)> {
    RULE_IDS
        .iter()
        .find(|(name, code)| *name == name_or_code || *code == name_or_code)
        .copied()
}

/// Errors building a rule set.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No built-in rule has this name or code.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// No preset has this name.
    #[error("Unknown preset: {0}. Valid values: recommended, strict, minimal")]
    UnknownPreset(String),

    /// A rule rejected its configuration.
    #[error("Invalid configuration for `{rule}`: {source}")]
    Rule {
        /// Rule name.
        rule: String,
        /// Rejection reason.
        #[source]
        source: RuleError,
    },
}

/// Preset configurations for markup-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// The recommended rules, with fewer exemptions.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(RegistryError::UnknownPreset(other.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `invalid-attr` (ML001)
/// - `no-empty-palpable-content` (ML003)
/// - `attr-duplication` (ML004)
///
/// `class-naming` has no useful default and is added only when configured.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InvalidAttr::new()),
        Box::new(NoEmptyPalpableContent::new()),
        Box::new(AttrDuplication::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Same rules as [`recommended_rules`], but `no-empty-palpable-content`
/// also reports `aria-busy` elements. `class-naming` still needs patterns
/// and is added only when configured.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InvalidAttr::new()),
        Box::new(NoEmptyPalpableContent::new().ignore_if_aria_busy(false)),
        Box::new(AttrDuplication::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes `invalid-attr`.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(InvalidAttr::new())]
}

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InvalidAttr::new()),
        Box::new(ClassNaming::new()),
        Box::new(NoEmptyPalpableContent::new()),
        Box::new(AttrDuplication::new()),
    ]
}

/// Creates a built-in rule by name or code from its configuration table.
///
/// # Errors
///
/// Returns an error for an unknown name or a rejected option.
pub fn create_rule(name: &str, config: &RuleConfig) -> Result<RuleBox, RegistryError> {
    let invalid = |source| RegistryError::Rule {
        rule: name.to_string(),
        source,
    };

    let rule: RuleBox = match name {
        invalid_attr::NAME | invalid_attr::CODE => {
            Box::new(InvalidAttr::from_config(config).map_err(invalid)?)
        }
        class_naming::NAME | class_naming::CODE => {
            Box::new(ClassNaming::from_config(config).map_err(invalid)?)
        }
        no_empty_palpable_content::NAME | no_empty_palpable_content::CODE => {
            Box::new(NoEmptyPalpableContent::from_config(config))
        }
        attr_duplication::NAME | attr_duplication::CODE => Box::new(AttrDuplication::new()),
        other => return Err(RegistryError::UnknownRule(other.to_string())),
    };

    Ok(rule)
}

/// Builds the rule set a configuration asks for.
///
/// Starts from the configured preset (default: recommended). Rules with a
/// `[rules.<name>]` or `[rules.<code>]` table are rebuilt from it, and
/// configured rules outside the preset are added once each. Disabled rules
/// are left for the linter to skip.
///
/// # Errors
///
/// Returns an error for an unknown preset or rule, or a rejected option.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, RegistryError> {
    let preset: Preset = config.preset.as_deref().unwrap_or("recommended").parse()?;
    debug!("Using preset {:?}", preset);

    let mut rules = Vec::new();
    for rule in preset.rules() {
        match config.rule_for(rule.name(), rule.code()) {
            Some(rule_config) => rules.push(create_rule(rule.name(), rule_config)?),
            None => rules.push(rule),
        }
    }

    let mut extra: Vec<(&'static str, &RuleConfig)> = Vec::new();
    for (key, rule_config) in &config.rules {
        if !rule_config.is_enabled() {
            continue;
        }
        let (name, code) = rule_id(key).ok_or_else(|| RegistryError::UnknownRule(key.clone()))?;
        let present = rules.iter().any(|r| r.name() == name)
            || extra.iter().any(|(added, _)| *added == name);
        if present {
            continue;
        }
        if let Some(resolved) = config.rule_for(name, code) {
            if resolved.is_enabled() {
                extra.push((name, resolved));
            }
        }
    }
    extra.sort_by(|a, b| a.0.cmp(b.0));

    for (name, rule_config) in extra {
        debug!("Adding configured rule: {}", name);
        rules.push(create_rule(name, rule_config)?);
    }

    Ok(rules)
}
