//! List rules command implementation.

use markup_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<28} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        println!(
            "{:<8} {:<28} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
        for option in rule.default_options() {
            println!(
                "{:<8}   {} = {}  ({})",
                "", option.name, option.default, option.description
            );
        }
    }

    println!("\nPresets:");
    println!("  recommended  - ML001, ML003, ML004; ML002 when configured (default)");
    println!("  strict       - As recommended, aria-busy elements are not exempt");
    println!("  minimal      - ML001 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  markup-lint check --rules invalid-attr,attr-duplication page.json");
    println!("  markup-lint check --rules ML001,ML004 page.json");
}
