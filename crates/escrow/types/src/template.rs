//! Task templates: blueprints for work items created on state entry.
//!
//! A template describes one task the transaction should pick up when it
//! enters the owning state. Templates may depend on each other **by title**;
//! those references are resolved when the engine expands a state's template
//! list, and only against templates of that same list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A blueprint for a task created when a transaction enters a state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskTemplate {
    /// Title of the produced task; also the key other templates in the same
    /// state use to declare a dependency on it. Must be unique within one
    /// state's template list.
    pub title: String,
    /// Description copied onto the produced task
    #[serde(default)]
    pub description: String,
    /// Who the produced task is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Due-date offset in days from the moment the state is entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<i64>,
    /// Titles of templates in the same state whose tasks must complete first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Metadata copied onto the produced task
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl TaskTemplate {
    /// Create a new template with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assignee: None,
            days_until_due: None,
            dependencies: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Due the produced task this many days after state entry
    pub fn due_in_days(mut self, days: i64) -> Self {
        self.days_until_due = Some(days);
        self
    }

    /// Declare a dependency on another template of the same state, by title
    pub fn depends_on(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
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
