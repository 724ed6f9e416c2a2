//! State transitions: the append-only audit history of a transaction.
//!
//! A record is immutable once created. History entries are never edited or
//! removed; corrections are new transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable record of one completed state change
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    /// When the transition happened
    pub timestamp: DateTime<Utc>,
    /// State the transaction left; None only for the very first transition
    #[serde(default)]
    pub from_state: Option<String>,
    /// State the transaction entered
    pub to_state: String,
    /// Free-form notes supplied by the caller
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl StateTransition {
    /// Record a transition happening now
    pub fn new(
        from_state: Option<String>,
        to_state: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            from_state,
            to_state: to_state.into(),
            notes: notes.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
