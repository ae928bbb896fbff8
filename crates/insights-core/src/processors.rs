use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{InsightsError, Result};

// ── TimestampParser ───────────────────────────────────────────────────────────

/// The one date format archive exports use for every record.
pub const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses the fixed-format timestamps found in archive records.
pub struct TimestampParser;

impl TimestampParser {
    /// Parse a `Date` string of the exact form `YYYY-MM-DD HH:MM:SS`.
    ///
    /// Archive timestamps carry no timezone, so the result is naive. Any
    /// deviation from the fixed format is an error; a malformed date inside a
    /// present section fails the whole analysis rather than being skipped.
    pub fn parse(date_str: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(date_str, ARCHIVE_DATE_FORMAT)
            .map_err(|_| InsightsError::TimestampParse(date_str.to_string()))
    }
}

// ── TagExtractor ──────────────────────────────────────────────────────────────

/// Extracts `@` mentions from comment text.
pub struct TagExtractor;

impl TagExtractor {
    /// Return every `@word` token in `text`, in order of appearance.
    ///
    /// A token is `@` followed by one or more word characters (letters,
    /// digits, underscore). Matching is case-sensitive and duplicates are
    /// kept so callers can count frequencies.
    pub fn extract(text: &str) -> Vec<String> {
        let re = Regex::new(r"@\w+").expect("regex is valid");
        re.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

// ── FirstSeenCounter ──────────────────────────────────────────────────────────

/// A frequency counter that preserves first-seen key order.
///
/// Backed by a vector rather than a hash map so that `most_common` ties
/// resolve deterministically to the earliest-seen key, which is the tie-break
/// contract for "most logins in a day" and "most common @tag".
#[derive(Debug, Clone, Default)]
pub struct FirstSeenCounter<K> {
    counts: Vec<(K, u64)>,
}

impl<K: PartialEq> FirstSeenCounter<K> {
    pub fn new() -> Self {
        Self { counts: Vec::new() }
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        match self.counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((key, 1)),
        }
    }

    /// Count every key in `keys`.
    pub fn add_all(&mut self, keys: impl IntoIterator<Item = K>) {
        for key in keys {
            self.add(key);
        }
    }

    /// The key with the highest count, with its count.
    ///
    /// Explicit linear scan using strict `>` so that among equal counts the
    /// first-seen key wins. Returns `None` for an empty counter; callers must
    /// guard empty sections before aggregating.
    pub fn most_common(&self) -> Option<(&K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (key, count) in &self.counts {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((key, *count)),
            }
        }
        best
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
