//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# markup-lint configuration

# Rule set to start from: "recommended", "strict" or "minimal"
preset = "recommended"

# Exit with a failure status at or above this severity
fail_on = "error"

# Message locale: "en" or "ja"
# locale = "ja"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.invalid-attr]
enabled = true
# ignore_attr_name_prefix = ["v-", "@"]

# [rules.invalid-attr.attrs.x-size]
# type = "Uint"

# [rules.class-naming]
# value = ["^c-[a-z][a-z0-9-]*$"]
# severity = "warning"

[rules.no-empty-palpable-content]
ignore_if_aria_busy = true
extends_exposable_elements = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("markup-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created markup-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit markup-lint.toml to configure rules");
    println!("  2. Run: markup-lint check <document.json>");

    Ok(())
}
