use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

// ── StatValue ─────────────────────────────────────────────────────────────────

/// One computed insight value.
///
/// Formatted date/time strings are carried as [`StatValue::Text`]; only
/// day-granularity values (earliest/latest log-in) keep their calendar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatValue {
    /// Free-form text, including pre-formatted timestamps and sentinels.
    Text(String),
    /// A non-negative count.
    Count(u64),
    /// A calendar date compared and rendered at day granularity.
    Day(NaiveDate),
}

impl StatValue {
    /// The count carried by this value, if it is a [`StatValue::Count`].
    pub fn as_count(&self) -> Option<u64> {
        match self {
            StatValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The text carried by this value, if it is a [`StatValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The calendar date carried by this value, if it is a [`StatValue::Day`].
    pub fn as_day(&self) -> Option<NaiveDate> {
        match self {
            StatValue::Day(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::Text(s) => f.write_str(s),
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Text(s) => serializer.serialize_str(s),
            StatValue::Count(n) => serializer.serialize_u64(*n),
            StatValue::Day(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        StatValue::Text(s.to_string())
    }
}

impl From<String> for StatValue {
    fn from(s: String) -> Self {
        StatValue::Text(s)
    }
}

impl From<u64> for StatValue {
    fn from(n: u64) -> Self {
        StatValue::Count(n)
    }
}

impl From<usize> for StatValue {
    fn from(n: usize) -> Self {
        StatValue::Count(n as u64)
    }
}

impl From<NaiveDate> for StatValue {
    fn from(d: NaiveDate) -> Self {
        StatValue::Day(d)
    }
}

// ── StatsReport ───────────────────────────────────────────────────────────────

/// The ordered label → value mapping produced by one analysis run.
///
/// Insertion order is the fixed section-analysis order and is preserved both
/// when iterating and when serializing to JSON, so rendered output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsReport {
    entries: Vec<(String, StatValue)>,
}

impl StatsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a labelled insight. Labels are expected to be unique; a repeat
    /// label is appended as-is rather than replacing the earlier entry.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<StatValue>) {
        self.entries.push((label.into(), value.into()));
    }

    /// Look up the first entry with the given label.
    pub fn get(&self, label: &str) -> Option<&StatValue> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// All labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }
}

impl Serialize for StatsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut report = StatsReport::new();
        report.insert("Total number of logins", 42u64);
        report.insert("First comment", "hello @world");

        assert_eq!(
            report.get("Total number of logins"),
            Some(&StatValue::Count(42))
        );
        assert_eq!(
            report.get("First comment").and_then(|v| v.as_text()),
            Some("hello @world")
        );
        assert!(report.get("missing label").is_none());
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut report = StatsReport::new();
        report.insert("b", 1u64);
        report.insert("a", 2u64);
        report.insert("c", 3u64);

        assert_eq!(report.labels(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut report = StatsReport::new();
        report.insert("zulu", 1u64);
        report.insert("alpha", "text");

        let json = serde_json::to_string(&report).unwrap();
        // "zulu" was inserted first and must serialize first.
        assert_eq!(json, r#"{"zulu":1,"alpha":"text"}"#);
    }

    #[test]
    fn test_serialize_day_value_iso() {
        let mut report = StatsReport::new();
        report.insert(
            "Earliest log-in",
            NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
        );
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"Earliest log-in":"2023-07-04"}"#);
    }

    #[test]
    fn test_display_variants() {
        assert_eq!(StatValue::Text("hi".to_string()).to_string(), "hi");
        assert_eq!(StatValue::Count(1234).to_string(), "1234");
        assert_eq!(
            StatValue::Day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).to_string(),
            "2024-01-05"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = StatsReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(StatValue::Count(7).as_count(), Some(7));
        assert_eq!(StatValue::Count(7).as_text(), None);
        assert_eq!(
            StatValue::Day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).as_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
