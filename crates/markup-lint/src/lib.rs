//! # markup-lint
//!
//! Rule-based linter for HTML-like markup documents.
//!
//! This is the main facade crate that re-exports core functionality and rules.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use markup_lint::document::Document;
//! use markup_lint::{linter_from_config, Config};
//!
//! let config = Config::parse(r#"
//! preset = "recommended"
//!
//! [rules.class-naming]
//! value = "^c-[a-z]+$"
//! "#)?;
//!
//! let linter = linter_from_config(config)?;
//! let result = linter.verify(&Document::from_json(&json)?).await?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use markup_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use markup_lint_rules::*;
}

mod setup;

pub use setup::{linter_from_config, SetupError};
