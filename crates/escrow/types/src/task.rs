//! Tasks: trackable work items with dependencies and a status lifecycle.
//!
//! Dependency evaluation is pull-based: a task never changes status on its
//! own when a dependency completes. Callers re-query
//! [`Task::can_start`] against the current task map instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Task Identifier ──────────────────────────────────────────────────

/// Unique identifier for a task
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(uuid::Uuid);

impl TaskId {
    /// Generate a new random task ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Task Status ──────────────────────────────────────────────────────

/// Task status lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not yet picked up
    #[default]
    Pending,
    /// Someone is working on it
    InProgress,
    /// Done; `completed_at` is stamped
    Completed,
    /// Waiting on something outside the task itself
    Blocked,
}

// ── Task ─────────────────────────────────────────────────────────────

/// A work item owned by one transaction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// What needs doing
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Current lifecycle status
    pub status: TaskStatus,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// When the task was completed; set only by [`Task::mark_completed`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Who the task is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Absolute due date, computed at creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Ids of tasks that must complete before this one can start
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Task {
    /// Create a new pending task
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            assignee: None,
            due_date: None,
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

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Require another task to complete before this one can start
    pub fn depends_on(mut self, id: TaskId) -> Self {
        self.dependencies.push(id);
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

    // ── Status transitions ───────────────────────────────────────────

    /// Move a pending task into progress. Any other status is left
    /// untouched.
    pub fn mark_in_progress(&mut self) {
        if self.status == TaskStatus::Pending {
            self.status = TaskStatus::InProgress;
        }
    }

    /// Complete the task and stamp the completion time, whatever the prior
    /// status.
    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the task blocked, whatever the prior status.
    pub fn mark_blocked(&mut self) {
        self.status = TaskStatus::Blocked;
    }

    // ── Dependency queries ───────────────────────────────────────────

    /// Check whether any dependency is known and still incomplete.
    ///
    /// Re-scans the supplied task map on every call. A dependency id absent
    /// from the map does not block.
    pub fn is_blocked_by_dependencies(&self, all_tasks: &HashMap<TaskId, Task>) -> bool {
        self.dependencies.iter().any(|dep_id| {
            all_tasks
                .get(dep_id)
                .map(|dep| dep.status != TaskStatus::Completed)
                .unwrap_or(false)
        })
    }

    /// Check whether the task's dependencies are all satisfied.
    pub fn can_start(&self, all_tasks: &HashMap<TaskId, Task>) -> bool {
        !self.is_blocked_by_dependencies(all_tasks)
    }

    /// Check whether the task is past due and not completed
    pub fn is_overdue(&self) -> bool {
        match self.due_date {
            Some(due) => self.status != TaskStatus::Completed && Utc::now() >= due,
            None => false,
        }
    }
}
