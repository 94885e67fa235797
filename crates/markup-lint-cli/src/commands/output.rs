//! Shared output formatting for lint results.

use anyhow::Result;
use markup_lint_core::{LintResult, ViolationDiagnostic};
use miette::GraphicalReportHandler;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    print!("{}", render_text(result, &GraphicalReportHandler::new()));

    let (errors, warnings, _) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!("{}{}\x1b[0m", summary_color, summary(result));
}

/// Renders every violation as a miette report.
fn render_text(result: &LintResult, handler: &GraphicalReportHandler) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for violation in &result.violations {
        let diagnostic = ViolationDiagnostic::from(violation);
        if handler.render_report(&mut out, &diagnostic).is_err() {
            let _ = writeln!(out, "{violation}");
        }
        out.push('\n');
    }
    out
}

fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    format!(
        "Found {} error(s), {} warning(s), {} info(s) in {} document(s)",
        errors, warnings, infos, result.documents_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
