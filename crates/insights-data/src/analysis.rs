//! Top-level analysis pipeline.
//!
//! Loads one archive document from disk, runs [`StatsExtractor`] over it and
//! wraps the result with run metadata for the rendering layer.

use std::path::Path;

use chrono::Utc;
use insights_core::error::Result;
use insights_core::models::StatsReport;
use tracing::debug;

use crate::extractor::StatsExtractor;
use crate::store::load_archive;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the insight report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// The archive file that was analysed.
    pub archive_path: String,
    /// Number of labelled insights derived.
    pub insight_count: usize,
    /// Wall-clock seconds spent reading and parsing the archive.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent deriving the statistics.
    pub analyze_time_seconds: f64,
}

/// The complete output of [`analyze_archive`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveReport {
    /// The ordered label → value insight mapping.
    pub stats: StatsReport,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline against the archive file at `path`.
///
/// 1. Read and parse the JSON document.
/// 2. Derive the ordered insight report.
/// 3. Attach run metadata.
///
/// A malformed timestamp anywhere in a present section fails the whole run;
/// the caller is responsible for presenting the error.
pub fn analyze_archive(path: &Path) -> Result<ArchiveReport> {
    let load_start = std::time::Instant::now();
    let document = load_archive(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let analyze_start = std::time::Instant::now();
    let stats = StatsExtractor::analyze(&document)?;
    let analyze_time = analyze_start.elapsed().as_secs_f64();

    debug!(
        "analyzed {} in {:.3}s ({} insights)",
        path.display(),
        load_time + analyze_time,
        stats.len()
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        archive_path: path.display().to_string(),
        insight_count: stats.len(),
        load_time_seconds: load_time,
        analyze_time_seconds: analyze_time,
    };

    Ok(ArchiveReport { stats, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
