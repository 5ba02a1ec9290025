//! Record type representing a single timestamped measurement

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Topic;

/// A single named, timestamped scalar value, optionally tagged with a unit
/// of measurement and the topic it was published under
///
/// Records are immutable once constructed. The `Display` form is
/// `[<topic-path>] <name>@<epoch-seconds> <value> <unit>`, with the topic
/// path empty when no topic is set and the unit suffix omitted entirely
/// when no unit is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Measurement name (e.g., "temperature")
    pub name: String,

    /// When the value was observed
    pub timestamp: DateTime<Utc>,

    /// The observed value
    pub value: f64,

    /// Unit of measurement (e.g., "C", "W")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Topic the record was published under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

impl Record {
    /// Create a new record with no unit and no topic
    pub fn new(name: impl Into<String>, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            name: name.into(),
            timestamp,
            value,
            unit: None,
            topic: None,
        }
    }

    /// Attach a unit of measurement
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Attach the topic the record was published under
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Seconds since the Unix epoch (UTC), truncated toward zero
    pub fn epoch_seconds(&self) -> i64 {
        let secs = self.timestamp.timestamp();
        // chrono floors the fractional part; flooring and truncation toward
        // zero only disagree before the epoch
        if secs < 0 && self.timestamp.timestamp_subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.topic.as_ref().map(Topic::path).unwrap_or_default();
        write!(
            f,
            "[{}] {}@{} {}",
            path,
            self.name,
            self.epoch_seconds(),
            self.value
        )?;
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_new() {
        let r = Record::new("t", ts(), 10.0);
        assert_eq!(r.name, "t");
        assert_eq!(r.timestamp, ts());
        assert_eq!(r.value, 10.0);
        assert!(r.unit.is_none());
        assert!(r.topic.is_none());
    }

    #[test]
    fn test_display_basic() {
        let r = Record::new("t", ts(), 10.0);
        assert_eq!(r.to_string(), "[] t@1700000000 10");
    }

    #[test]
    fn test_display_full() {
        let r = Record::new("t", ts(), 10.0)
            .with_unit("W")
            .with_topic(Topic::new("topic").unwrap());
        assert_eq!(r.to_string(), "[topic] t@1700000000 10 W");
    }

    #[test]
    fn test_display_nested_topic() {
        let topic = Topic::with_parent("topic", Topic::new("my").unwrap()).unwrap();
        let r = Record::new("t", ts(), 10.0).with_unit("W").with_topic(topic);
        assert_eq!(r.to_string(), "[my/topic] t@1700000000 10 W");
    }

    #[test]
    fn test_display_fractional_value() {
        let r = Record::new("t", ts(), 21.5).with_unit("C");
        assert_eq!(r.to_string(), "[] t@1700000000 21.5 C");
    }

    #[test]
    fn test_epoch_seconds_truncates_subseconds() {
        let half_past = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
        let r = Record::new("t", half_past, 1.0);
        assert_eq!(r.epoch_seconds(), 1_700_000_000);
    }

    #[test]
    fn test_epoch_seconds_pre_epoch_truncates_toward_zero() {
        // 0.5s before the epoch: floor gives -1, truncation gives 0
        let before = DateTime::from_timestamp(-1, 500_000_000).unwrap();
        let r = Record::new("t", before, 1.0);
        assert_eq!(r.epoch_seconds(), 0);
    }

    #[test]
    fn test_serde_omits_absent_fields() {
        let r = Record::new("t", ts(), 10.0);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("unit").is_none());
        assert!(json.get("topic").is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let r = Record::new("power", ts(), 10.0)
            .with_unit("W")
            .with_topic(Topic::new("my/topic").unwrap());
        let json = serde_json::to_string(&r).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
        assert_eq!(parsed.topic.unwrap().path(), "my/topic");
    }
}
