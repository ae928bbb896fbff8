mod bootstrap;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use insights_core::error::Result as InsightsResult;
use insights_core::settings::Settings;
use insights_data::analysis::analyze_archive;
use insights_data::store::ArchiveStore;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Archive Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Output: {}, Keep: {}", settings.output, settings.keep);

    if let Err(err) = run(&settings) {
        // A malformed archive is reported as an error, not a panic.
        tracing::error!("analysis failed: {}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve the archive to analyse, run the pipeline and print the result.
fn run(settings: &Settings) -> InsightsResult<()> {
    let store = match &settings.store_dir {
        Some(dir) => ArchiveStore::new(dir.clone()),
        None => ArchiveStore::new(ArchiveStore::default_dir()),
    };

    let archive_path = resolve_archive(settings, &store)?;
    let report = analyze_archive(&archive_path)?;

    match settings.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render::render_table(&report)),
    }

    Ok(())
}

/// Decide which archive file this run analyses.
///
/// An explicit archive argument is ingested into the store first (unless
/// `--no-save`), so the next argument-less run sees it as the newest archive.
/// Without an argument, the newest previously ingested archive is used.
fn resolve_archive(settings: &Settings, store: &ArchiveStore) -> InsightsResult<PathBuf> {
    match &settings.archive {
        Some(source) if settings.no_save => Ok(source.clone()),
        Some(source) => {
            let (stored, _document) = store.ingest(source)?;
            let pruned = store.prune(settings.keep as usize)?;
            if pruned > 0 {
                tracing::debug!("pruned {} old archives", pruned);
            }
            Ok(stored)
        }
        None => store.latest(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
