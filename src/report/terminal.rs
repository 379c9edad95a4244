use std::path::Path;

use colored::*;

use crate::report::text::Tally;

/// Print the end-of-run summary to stderr.
pub fn render(output: &Path, tally: &Tally, quiet: bool) {
    let resolved = tally.written - tally.unresolved.len();

    if quiet {
        eprintln!(
            "Total: {}  Resolved: {}  Unresolved: {}",
            tally.written,
            resolved.to_string().green(),
            tally.unresolved.len().to_string().red(),
        );
        return;
    }

    eprintln!(
        "\n {} Wrote {} license(s) to {}",
        "✓".green(),
        tally.written,
        output.display().to_string().bold()
    );

    if !tally.unresolved.is_empty() {
        eprintln!(
            " {} {} package(s) without license text:",
            "✗".red(),
            tally.unresolved.len()
        );
        for id in &tally.unresolved {
            eprintln!("     {}", id.yellow());
        }
    }
}
