//! Lifecycle history tracking.
//!
//! Records each perform and teardown a registry drives, in order, so
//! callers can inspect what ran and when. Histories are immutable: the
//! `record` method returns a new history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle transition of one conditional.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// The handler ran because the condition became satisfied.
    Performed,
    /// The conditional was revoked; its teardown ran if it had one.
    TornDown,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Performed => f.write_str("performed"),
            Self::TornDown => f.write_str("torn down"),
        }
    }
}

/// Record of a single lifecycle transition.
///
/// # Example
///
/// ```rust
/// use conditional::core::{LifecycleEvent, LifecycleRecord};
/// use chrono::Utc;
///
/// let record = LifecycleRecord {
///     conditional: "welcome-banner".to_string(),
///     event: LifecycleEvent::Performed,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.event, LifecycleEvent::Performed);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LifecycleRecord {
    /// Name of the conditional, or `#<slot>` for unnamed ones
    pub conditional: String,
    /// What happened
    pub event: LifecycleEvent,
    /// When it happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded history of lifecycle transitions.
///
/// # Example
///
/// ```rust
/// use conditional::core::{LifecycleEvent, LifecycleHistory, LifecycleRecord};
/// use chrono::Utc;
///
/// let history = LifecycleHistory::new();
/// let history = history.record(LifecycleRecord {
///     conditional: "tooltip".to_string(),
///     event: LifecycleEvent::Performed,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.records().len(), 1);
/// assert_eq!(history.count("tooltip", LifecycleEvent::Performed), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LifecycleHistory {
    records: Vec<LifecycleRecord>,
}

impl LifecycleHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conditional::core::{LifecycleEvent, LifecycleHistory, LifecycleRecord};
    /// use chrono::Utc;
    ///
    /// let history = LifecycleHistory::new();
    /// let record = LifecycleRecord {
    ///     conditional: "#0".to_string(),
    ///     event: LifecycleEvent::TornDown,
    ///     timestamp: Utc::now(),
    /// };
    ///
    /// let new_history = history.record(record);
    /// assert_eq!(new_history.records().len(), 1);
    /// assert_eq!(history.records().len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, record: LifecycleRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Keep only the most recent `capacity` records.
    pub fn retain_last(mut self, capacity: usize) -> Self {
        if self.records.len() > capacity {
            let excess = self.records.len() - capacity;
            self.records.drain(..excess);
        }
        self
    }

    pub fn records(&self) -> &[LifecycleRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&LifecycleRecord> {
        self.records.last()
    }

    /// Number of recorded `event`s for the conditional labelled `conditional`.
    pub fn count(&self, conditional: &str, event: LifecycleEvent) -> usize {
        self.records
            .iter()
            .filter(|r| r.conditional == conditional && r.event == event)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(conditional: &str, event: LifecycleEvent) -> LifecycleRecord {
        LifecycleRecord {
            conditional: conditional.to_string(),
            event,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = LifecycleHistory::new();
        assert!(history.records().is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = LifecycleHistory::new();
        let new_history = history.record(record("banner", LifecycleEvent::Performed));

        assert_eq!(history.records().len(), 0);
        assert_eq!(new_history.records().len(), 1);
    }

    #[test]
    fn count_filters_by_label_and_event() {
        let history = LifecycleHistory::new()
            .record(record("banner", LifecycleEvent::Performed))
            .record(record("banner", LifecycleEvent::TornDown))
            .record(record("banner", LifecycleEvent::Performed))
            .record(record("#1", LifecycleEvent::Performed));

        assert_eq!(history.count("banner", LifecycleEvent::Performed), 2);
        assert_eq!(history.count("banner", LifecycleEvent::TornDown), 1);
        assert_eq!(history.count("#1", LifecycleEvent::TornDown), 0);
    }

    #[test]
    fn retain_last_drops_oldest_records() {
        let history = LifecycleHistory::new()
            .record(record("a", LifecycleEvent::Performed))
            .record(record("b", LifecycleEvent::Performed))
            .record(record("c", LifecycleEvent::Performed))
            .retain_last(2);

        let labels: Vec<_> = history
            .records()
            .iter()
            .map(|r| r.conditional.as_str())
            .collect();
        assert_eq!(labels, vec!["b", "c"]);
        assert!(history.retain_last(0).records().is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = LifecycleHistory::new().record(record("banner", LifecycleEvent::Performed));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: LifecycleHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.records().len(), 1);
        assert_eq!(deserialized.records()[0].event, LifecycleEvent::Performed);
    }
}
