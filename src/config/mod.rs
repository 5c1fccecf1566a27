//! Named conditions loaded from configuration.
//!
//! A condition table maps names to conditions so the rules that drive a
//! UI can live in a JSON file rather than in code:
//!
//! ```json
//! {
//!     "welcome": { "done": ["signed_in"], "undone": ["welcome_dismissed"] },
//!     "always_on": null
//! }
//! ```

use crate::core::{Action, Condition};
use crate::effects::{Conditional, Handler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;

pub use error::ConfigError;

/// Conditions keyed by name, in name order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de>"
))]
pub struct ConditionTable<T> {
    conditions: BTreeMap<String, Condition<T>>,
}

impl<T> Default for ConditionTable<T> {
    fn default() -> Self {
        Self {
            conditions: BTreeMap::new(),
        }
    }
}

impl<T: Action> ConditionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the condition named `name`.
    pub fn insert(&mut self, name: impl Into<String>, when: Condition<T>) {
        self.conditions.insert(name.into(), when);
    }

    pub fn get(&self, name: &str) -> Option<&Condition<T>> {
        self.conditions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Named conditional for the condition `name`, bound to `handler`.
    pub fn conditional(&self, name: &str, handler: Handler) -> Result<Conditional<T>, ConfigError> {
        let when = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownCondition {
                name: name.to_string(),
            })?
            .clone();

        Ok(Conditional::new(when, handler).named(name))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, when) in &self.conditions {
            if when.requirements().is_some_and(|r| r.is_empty()) {
                return Err(ConfigError::EmptyRequirements { name: name.clone() });
            }
        }
        Ok(())
    }
}

impl<T: Action + DeserializeOwned> ConditionTable<T> {
    /// Load a table from JSON.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conditional::config::ConditionTable;
    /// use conditional::core::Condition;
    ///
    /// let table: ConditionTable<String> = ConditionTable::from_json(
    ///     r#"{"welcome": {"done": ["signed_in"]}, "always_on": null}"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(table.get("always_on"), Some(&Condition::Always));
    /// assert_eq!(table.names().collect::<Vec<_>>(), vec!["always_on", "welcome"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Deserialization(e.to_string()))?;
        table.validate()?;

        tracing::debug!(conditions = table.len(), "condition table loaded");
        Ok(table)
    }
}

impl<T: Action + Serialize> ConditionTable<T> {
    /// Serialize the table to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}
