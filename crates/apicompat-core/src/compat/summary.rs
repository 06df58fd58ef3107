//! Human-readable rendering of a compatibility verdict.

use crate::compat::violation::{CompatReport, ViolationKind};

/// Render a short Markdown/text summary of a [`CompatReport`].
///
/// Informational only; tooling that needs structure should serialize the
/// report itself.
pub fn render_summary(report: &CompatReport) -> String {
    let mut out = String::new();
    out.push_str("## API Compatibility\n\n");

    let verdict = if report.compatible {
        "Compatible"
    } else {
        "Incompatible"
    };
    out.push_str(&format!(
        "**Verdict**: {verdict}  \n**Checked**: {} package(s), {} symbol(s)\n",
        report.packages_checked, report.symbols_checked
    ));

    let Some(violation) = &report.violation else {
        return out;
    };

    out.push_str("\n### First Violation\n\n");
    out.push_str(&format!("- **Kind**: `{}`\n", violation.kind.code()));
    out.push_str(&format!("- **Package**: `{}`\n", violation.package));
    if let Some(symbol) = &violation.symbol {
        out.push_str(&format!("- **Symbol**: `{}`\n", symbol));
    }
    if !violation.path.is_empty() {
        out.push_str(&format!("- **Path**: {}\n", violation.path.join(" > ")));
    }
    out.push_str(&format!("- **Detail**: {}\n", violation));

    let hint = match violation.kind {
        ViolationKind::PackageMissing => "Restore the package or release a new major version.",
        ViolationKind::PackageCorrupted => "The stored snapshot disagrees with itself; re-baseline it.",
        ViolationKind::DefinitionMissing => "Restore the declaration or release a new major version.",
        ViolationKind::CorruptedSymbol => "Revert the signature change or release a new major version.",
    };
    out.push_str(&format!("\n_{hint}_\n"));
    out
}
