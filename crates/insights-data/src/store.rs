//! Archive persistence for the insights tool.
//!
//! Ingested exports are kept as individual JSON files under a store
//! directory, each under a unique per-ingest name so that two ingests never
//! overwrite each other. The newest stored archive is what an argument-less
//! run analyses.

use std::path::{Path, PathBuf};

use chrono::Utc;
use insights_core::error::{InsightsError, Result};
use serde_json::Value;
use tracing::{debug, warn};

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read `path` as UTF-8 text and parse it as one JSON document.
pub fn load_archive(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| InsightsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document = serde_json::from_str(&content)?;
    Ok(document)
}

// ── ArchiveStore ──────────────────────────────────────────────────────────────

/// File-backed store of ingested archive documents.
pub struct ArchiveStore {
    dir: PathBuf,
}

impl ArchiveStore {
    /// Create a store rooted at `dir`. The directory is created lazily on the
    /// first ingest.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The default store location, `~/.archive-insights/archives`.
    pub fn default_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".archive-insights").join("archives")
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an uploaded archive file.
    ///
    /// Rejects empty file names, requires the source to exist, decodes it as
    /// UTF-8 and parses it as JSON before anything is written. The stored
    /// copy gets a unique `archive-<stamp>-<n>.json` name; the parsed
    /// document and the stored path are returned together so callers can
    /// analyse without re-reading.
    pub fn ingest(&self, source: &Path) -> Result<(PathBuf, Value)> {
        let file_name = source.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name.is_empty() {
            return Err(InsightsError::EmptyFileName);
        }
        if !source.exists() {
            return Err(InsightsError::ArchiveNotFound(source.to_path_buf()));
        }

        let document = load_archive(source)?;

        std::fs::create_dir_all(&self.dir)?;
        let stored = self.unique_store_path();
        let pretty = serde_json::to_string_pretty(&document)?;
        std::fs::write(&stored, pretty)?;

        debug!("ingested {} as {}", source.display(), stored.display());
        Ok((stored, document))
    }

    /// All stored archives, name-sorted ascending.
    ///
    /// Stored names embed the ingest timestamp, so name order is ingest
    /// order.
    pub fn list(&self) -> Vec<PathBuf> {
        if !self.dir.exists() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .map(|ext| ext == "json")
                        .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    /// The most recently ingested archive.
    pub fn latest(&self) -> Result<PathBuf> {
        self.list()
            .into_iter()
            .next_back()
            .ok_or_else(|| InsightsError::NoArchives(self.dir.clone()))
    }

    /// Delete all but the newest `keep` archives; returns how many were
    /// removed. Files that fail to delete are logged and skipped.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let files = self.list();
        if files.len() <= keep {
            return Ok(0);
        }

        let excess = files.len() - keep;
        let mut removed = 0usize;
        for path in files.into_iter().take(excess) {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!("failed to prune {}: {}", path.display(), e),
            }
        }
        Ok(removed)
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    /// Build a store path that no existing file occupies.
    ///
    /// Second-resolution timestamps can collide when tests ingest quickly, so
    /// a counter suffix disambiguates.
    fn unique_store_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S");
        let mut counter = 0u32;
        loop {
            let candidate = self.dir.join(format!("archive-{}-{:03}.json", stamp, counter));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
