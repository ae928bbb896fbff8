//! Plain-text rendering of an analysis report.
//!
//! One aligned row per insight, label column padded to the widest label,
//! counts grouped with thousands separators, and a short footer naming the
//! analysed archive.

use insights_core::formatting::format_count;
use insights_core::models::StatValue;
use insights_data::analysis::ArchiveReport;

/// Render `report` as an aligned two-column text table.
pub fn render_table(report: &ArchiveReport) -> String {
    if report.stats.is_empty() {
        return "No insights derived.\n".to_string();
    }

    let width = report
        .stats
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, value) in report.stats.iter() {
        let rendered = match value {
            StatValue::Count(n) => format_count(*n),
            other => other.to_string(),
        };
        out.push_str(&format!("{:<width$}  {}\n", label, rendered, width = width));
    }

    out.push_str(&format!(
        "\n{} insights from {}\n",
        report.stats.len(),
        report.metadata.archive_path
    ));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
