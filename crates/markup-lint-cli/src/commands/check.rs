//! Check command implementation.

use anyhow::{bail, Context, Result};
use markup_lint_core::document::Document;
use markup_lint_core::{Config, LintResult, Linter, RuleBox, RuleConfig};
use markup_lint_rules::{configured_rules, create_rule, rule_id};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when violations reach the configured `fail_on` severity.
pub async fn run(
    documents: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<&str>,
    locale: Option<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;
    let fail_on = config
        .fail_on_severity()
        .context("Invalid `fail_on` in config")?;

    let rules = match rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&names, &config)?
        }
        None => configured_rules(&config).context("Failed to build rule set")?,
    };

    let mut builder = Linter::builder().rules(rules).config(config);
    if let Some(locale) = locale {
        builder = builder.locale(locale);
    }
    let linter = builder.build().context("Failed to build linter")?;

    tracing::info!(
        "Checking {} document(s) with {} rules",
        documents.len(),
        linter.rule_count()
    );

    let mut result = LintResult::new();
    for path in documents {
        let document = load_document(path)?;
        let document_result = linter
            .verify(&document)
            .await
            .with_context(|| format!("Lint failed for {}", path.display()))?;
        result.extend(document_result);
    }

    super::output::print(&result, format)?;

    Ok(result.has_violations_at(fail_on))
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    let document = Document::from_json(&content)
        .with_context(|| format!("Failed to decode document: {}", path.display()))?;

    Ok(match document.path() {
        Some(_) => document,
        None => document.with_path(path),
    })
}

fn filter_rules(names: &[&str], config: &Config) -> Result<Vec<RuleBox>> {
    let defaults = RuleConfig::default();
    let mut rules: Vec<RuleBox> = Vec::new();

    for key in names {
        let Some((name, code)) = rule_id(key) else {
            tracing::warn!("Unknown rule: {}", key);
            continue;
        };
        if rules.iter().any(|r| r.name() == name) {
            continue;
        }
        let rule_config = config.rule_for(name, code).unwrap_or(&defaults);
        match create_rule(name, rule_config) {
            Ok(rule) => rules.push(rule),
            Err(e) => bail!(e),
        }
    }

    Ok(rules)
}
