//! Statistic derivation over a parsed archive document.
//!
//! Walks a fixed, ordered list of independent section analyses — favorites,
//! logins, shares, viewing, comments, direct messages, shopping — and builds
//! the ordered [`StatsReport`]. A missing section contributes nothing; a
//! malformed `Date` inside a present section fails the whole call.

use chrono::{NaiveDate, NaiveDateTime};
use insights_core::error::{InsightsError, Result};
use insights_core::formatting::format_event_time;
use insights_core::models::StatsReport;
use insights_core::processors::{FirstSeenCounter, TagExtractor, TimestampParser};
use serde_json::Value;
use tracing::debug;

use crate::navigate::{list_len, lookup_list, record_str};

// ── Section paths ─────────────────────────────────────────────────────────────

const FAVORITE_VIDEOS: &[&str] = &["Activity", "Favorite Videos", "FavoriteVideoList"];
const FAVORITE_SOUNDS: &[&str] = &["Activity", "Favorite Sounds", "FavoriteSoundList"];
const LOGIN_HISTORY: &[&str] = &["Activity", "Login History", "LoginHistoryList"];
const SHARE_HISTORY: &[&str] = &["Activity", "Share History", "ShareHistoryList"];
const VIDEO_BROWSING: &[&str] = &["Activity", "Video Browsing History", "VideoList"];
const COMMENTS: &[&str] = &["Comment", "Comments", "CommentsList"];
const CHAT_HISTORY: &[&str] = &["Direct Messages", "Chat History", "ChatHistory"];
const PRODUCT_BROWSING: &[&str] = &[
    "Tik Tok Shopping",
    "Product Browsing History",
    "ProductBrowsingHistories",
];

// ── StatsExtractor ────────────────────────────────────────────────────────────

/// Derives the flat insight report from one parsed archive document.
pub struct StatsExtractor;

impl StatsExtractor {
    /// Analyse `document` and return the ordered label → value report.
    ///
    /// Each section analysis is independent: an absent or empty section skips
    /// its labels, the three share/favorite totals are always emitted. The
    /// first record whose `Date` is missing or malformed aborts the call.
    pub fn analyze(document: &Value) -> Result<StatsReport> {
        let mut stats = StatsReport::new();

        Self::favorites(document, &mut stats)?;
        Self::logins(document, &mut stats)?;
        Self::shares(document, &mut stats)?;
        Self::video_browsing(document, &mut stats)?;
        Self::comments(document, &mut stats)?;
        Self::totals(document, &mut stats);
        Self::direct_messages(document, &mut stats)?;
        Self::shopping(document, &mut stats)?;

        debug!("StatsExtractor: derived {} insights", stats.len());
        Ok(stats)
    }

    // ── Section analyses ──────────────────────────────────────────────────────

    /// First liked video, first favorited sound, first favorited video.
    ///
    /// The export keeps liked and favorited videos in the same list, so the
    /// "liked" and "favorited" labels are derived from identical data.
    fn favorites(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let videos = lookup_list(document, FAVORITE_VIDEOS).unwrap_or(&[]);
        if let Some((_, first_ts)) = earliest(videos)? {
            stats.insert("First liked video date and time", format_event_time(first_ts));
        }

        let sounds = lookup_list(document, FAVORITE_SOUNDS).unwrap_or(&[]);
        if let Some((_, first_ts)) = earliest(sounds)? {
            stats.insert(
                "First favorited sound date and time",
                format_event_time(first_ts),
            );
        }

        if let Some((_, first_ts)) = earliest(videos)? {
            stats.insert(
                "First favorited video date and time",
                format_event_time(first_ts),
            );
        }
        Ok(())
    }

    /// Per-day login peak, total count and earliest/latest calendar dates.
    fn logins(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let logins = lookup_list(document, LOGIN_HISTORY).unwrap_or(&[]);
        if logins.is_empty() {
            debug!("login history absent or empty; skipping login insights");
            return Ok(());
        }

        let days: Vec<NaiveDate> = logins
            .iter()
            .map(|record| record_date(record).map(|ts| ts.date()))
            .collect::<Result<_>>()?;

        let mut per_day: FirstSeenCounter<NaiveDate> = FirstSeenCounter::new();
        per_day.add_all(days.iter().copied());

        if let Some((_, max_count)) = per_day.most_common() {
            stats.insert("Most amount of log-ins in a day", max_count);
        }
        stats.insert("Total number of logins", logins.len());
        if let (Some(min_day), Some(max_day)) = (days.iter().min(), days.iter().max()) {
            stats.insert("Earliest log-in", *min_day);
            stats.insert("Most recent log-in", *max_day);
        }
        Ok(())
    }

    /// First shared video date/time. The share total is emitted separately
    /// and unconditionally by [`Self::totals`].
    fn shares(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let shared = lookup_list(document, SHARE_HISTORY).unwrap_or(&[]);
        if let Some((_, first_ts)) = earliest(shared)? {
            stats.insert(
                "First shared video date and time",
                format_event_time(first_ts),
            );
        }
        Ok(())
    }

    /// First/most recent viewed video and the watch total.
    fn video_browsing(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let viewed = lookup_list(document, VIDEO_BROWSING).unwrap_or(&[]);
        if let (Some((_, first_ts)), Some((_, last_ts))) = (earliest(viewed)?, latest(viewed)?) {
            stats.insert(
                "First viewed video date and time",
                format_event_time(first_ts),
            );
            stats.insert(
                "Most recent viewed video date and time",
                format_event_time(last_ts),
            );
            stats.insert("Total number of videos watched", viewed.len());
        }
        Ok(())
    }

    /// First/most recent comment with dates, the comment total and the most
    /// common `@tag` pooled across every comment's text.
    fn comments(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let comments = lookup_list(document, COMMENTS).unwrap_or(&[]);
        let (Some((first, first_ts)), Some((last, last_ts))) =
            (earliest(comments)?, latest(comments)?)
        else {
            return Ok(());
        };

        let mut tag_counts: FirstSeenCounter<String> = FirstSeenCounter::new();
        for comment in comments {
            let text = record_str(comment, "Comment").unwrap_or("");
            tag_counts.add_all(TagExtractor::extract(text));
        }

        stats.insert(
            "First comment",
            record_str(first, "Comment").unwrap_or("No comment text found"),
        );
        stats.insert("First comment date", format_event_time(first_ts));
        stats.insert(
            "Most recent comment",
            record_str(last, "Comment").unwrap_or("No comment text found"),
        );
        stats.insert("Most recent comment date", format_event_time(last_ts));
        stats.insert("Total number of comments", comments.len());
        match tag_counts.most_common() {
            Some((tag, _)) => stats.insert("Most common @tag", tag.clone()),
            None => stats.insert("Most common @tag", "No @tags found"),
        }
        Ok(())
    }

    /// The three counts that are always reported, defaulting to 0 when the
    /// backing list was never exported.
    fn totals(document: &Value, stats: &mut StatsReport) {
        stats.insert("Total number of shares", list_len(document, SHARE_HISTORY));
        stats.insert(
            "Total number of favorited sounds",
            list_len(document, FAVORITE_SOUNDS),
        );
        stats.insert(
            "Total number of favorited videos",
            list_len(document, FAVORITE_VIDEOS),
        );
    }

    /// Busiest DM day, reported as a count only.
    fn direct_messages(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let messages = lookup_list(document, CHAT_HISTORY).unwrap_or(&[]);
        if messages.is_empty() {
            return Ok(());
        }

        let mut per_day: FirstSeenCounter<NaiveDate> = FirstSeenCounter::new();
        for message in messages {
            per_day.add(record_date(message)?.date());
        }
        if let Some((_, max_count)) = per_day.most_common() {
            stats.insert("Most amount of messages in a private DM", max_count);
        }
        Ok(())
    }

    /// Earliest-viewed shop product and its date.
    fn shopping(document: &Value, stats: &mut StatsReport) -> Result<()> {
        let products = lookup_list(document, PRODUCT_BROWSING).unwrap_or(&[]);
        if let Some((first, first_ts)) = earliest(products)? {
            stats.insert(
                "First TikTok shop product viewed",
                record_str(first, "ProductName").unwrap_or("No product name found"),
            );
            stats.insert("First shop product viewed date", format_event_time(first_ts));
        }
        Ok(())
    }
}

// ── Record helpers ────────────────────────────────────────────────────────────

/// Parse a record's `Date` field.
///
/// Missing field and malformed value are both fatal for the section the
/// record belongs to.
fn record_date(record: &Value) -> Result<NaiveDateTime> {
    let date_str = record_str(record, "Date").ok_or(InsightsError::MissingDate)?;
    TimestampParser::parse(date_str)
}

/// The record with the earliest `Date`, with its parsed timestamp.
///
/// Ties keep the first record encountered in list order. `None` for an empty
/// slice; a bad date in any record propagates.
fn earliest(records: &[Value]) -> Result<Option<(&Value, NaiveDateTime)>> {
    let mut best: Option<(&Value, NaiveDateTime)> = None;
    for record in records {
        let ts = record_date(record)?;
        match best {
            Some((_, best_ts)) if ts >= best_ts => {}
            _ => best = Some((record, ts)),
        }
    }
    Ok(best)
}

/// The record with the latest `Date`; otherwise identical to [`earliest`].
fn latest(records: &[Value]) -> Result<Option<(&Value, NaiveDateTime)>> {
    let mut best: Option<(&Value, NaiveDateTime)> = None;
    for record in records {
        let ts = record_date(record)?;
        match best {
            Some((_, best_ts)) if ts <= best_ts => {}
            _ => best = Some((record, ts)),
        }
    }
    Ok(best)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
