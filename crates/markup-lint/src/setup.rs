//! Linter construction from a configuration file.

use markup_lint_core::{Config, LintError, Linter};
use markup_lint_rules::{configured_rules, RegistryError};

/// Errors building a linter from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The rule set could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The linter rejected its settings.
    #[error(transparent)]
    Lint(#[from] LintError),
}

/// Builds a linter with the rules, locale and overrides `config` describes.
///
/// # Errors
///
/// Returns an error for unknown presets, rules or locales, and for rule
/// options the rule rejects.
pub fn linter_from_config(config: Config) -> Result<Linter, SetupError> {
    let rules = configured_rules(&config)?;
    let linter = Linter::builder().rules(rules).config(config).build()?;
    Ok(linter)
}
