//! Output formatting for filter results.

use anyhow::Result;
use suppressor_core::FilterReport;

use crate::OutputFormat;

/// Print filter results in the specified format.
pub fn print(report: &FilterReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", report.render_text()),
    }
    Ok(())
}

fn print_text(report: &FilterReport) {
    for diagnostic in &report.diagnostics {
        println!(
            "{} at {}:{}",
            diagnostic.error_id, diagnostic.file_name, diagnostic.line_number
        );
        println!("  \x1b[31merror\x1b[0m: {}", diagnostic.message);
        let symbols: Vec<&str> = diagnostic.symbols().collect();
        if !symbols.is_empty() {
            println!("  = symbols: {}", symbols.join(", "));
        }
        println!();
    }

    for rule in &report.unmatched {
        println!("{}", FilterReport::format_unmatched(rule));
    }
    if !report.unmatched.is_empty() {
        println!();
    }

    let summary_color = if report.has_diagnostics() {
        "\x1b[31m"
    } else if !report.unmatched.is_empty() {
        "\x1b[34m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}{} diagnostic(s) reported, {} suppressed, {} unmatched suppression(s)\x1b[0m",
        summary_color,
        report.diagnostics.len(),
        report.suppressed,
        report.unmatched.len()
    );
}

fn print_json(report: &FilterReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
