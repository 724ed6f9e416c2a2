//! Transactions: the aggregate root of one real-estate deal.
//!
//! A Transaction owns its task set and transition history and consults the
//! attached [`StateRegistry`] to validate every move. Entering a state can
//! expand that state's task templates into concrete tasks, wiring
//! dependencies between tasks created in the same batch.
//!
//! Two failure channels, deliberately distinct: configuration mistakes (no
//! registry attached, a name that does not resolve) are hard errors, while
//! a move the current state's rules disallow is reported as `Ok(false)`
//! with nothing changed. Callers depend on that split.

use crate::StateRegistry;
use chrono::{DateTime, Duration, Utc};
use escrow_types::{EscrowError, EscrowResult, State, StateTransition, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ── Transaction Identifier ───────────────────────────────────────────

/// Unique identifier for a transaction
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(uuid::Uuid);

impl TransactionId {
    /// Generate a new random transaction ID
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

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Transaction ──────────────────────────────────────────────────────

/// One real-estate deal: current lifecycle state, audit history, task set
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    #[serde(default)]
    pub property_address: String,
    /// Name of the current state; None before the first transition
    #[serde(default)]
    pub current_state: Option<String>,
    /// Append-only transition history, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state_history: Vec<StateTransition>,
    /// Every task this transaction owns, keyed by id
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tasks: HashMap<TaskId, Task>,
    /// Facts about the property itself (beds, lot size, escrow number, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub property_metadata: HashMap<String, serde_json::Value>,
    /// When the transaction record was created
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Registry consulted for validation. Attached explicitly and never
    /// persisted; a deserialized transaction must be re-attached before it
    /// can transition.
    #[serde(skip)]
    registry: Option<Arc<StateRegistry>>,
}

impl Transaction {
    /// Create a new transaction for a property, in no state
    pub fn new(property_address: impl Into<String>) -> Self {
        Self {
            id: TransactionId::generate(),
            property_address: property_address.into(),
            current_state: None,
            state_history: Vec::new(),
            tasks: HashMap::new(),
            property_metadata: HashMap::new(),
            created_at: Utc::now(),
            metadata: HashMap::new(),
            registry: None,
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

    pub fn with_property_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.property_metadata.insert(key.into(), value.into());
        self
    }

    /// Attach the registry this transaction validates against.
    ///
    /// Required before any transition, including after deserialization.
    pub fn attach_registry(&mut self, registry: Arc<StateRegistry>) {
        self.registry = Some(registry);
    }

    /// Check whether a registry is attached
    pub fn has_registry(&self) -> bool {
        self.registry.is_some()
    }

    // ── State transitions ────────────────────────────────────────────

    /// Move the transaction into `target`.
    ///
    /// Returns `Ok(true)` on success: a [`StateTransition`] is appended,
    /// `current_state` is updated, and — when `auto_create_tasks` is set —
    /// the entered state's templates are expanded into tasks.
    ///
    /// Returns `Ok(false)` when the current state's rules do not allow the
    /// move; nothing is changed in that case. The first transition of a
    /// fresh transaction is always allowed.
    ///
    /// Errors are reserved for configuration mistakes: no attached
    /// registry, or a state name (target or current) that does not resolve.
    pub fn transition_to(
        &mut self,
        target: &str,
        notes: impl Into<String>,
        auto_create_tasks: bool,
    ) -> EscrowResult<bool> {
        let registry = self
            .registry
            .clone()
            .ok_or(EscrowError::RegistryNotAttached)?;
        let target_state = registry
            .get(target)
            .ok_or_else(|| EscrowError::UnknownState(target.to_string()))?;

        if let Some(current) = &self.current_state {
            let current_state = registry
                .get(current)
                .ok_or_else(|| EscrowError::UnknownState(current.clone()))?;
            if !current_state.can_transition_to(target) {
                tracing::debug!(
                    transaction = %self.id,
                    from = %current,
                    to = %target,
                    "transition rejected"
                );
                return Ok(false);
            }
        }

        let previous = self.current_state.clone();
        self.state_history
            .push(StateTransition::new(previous.clone(), target, notes));
        self.current_state = Some(target.to_string());

        tracing::info!(
            transaction = %self.id,
            from = previous.as_deref().unwrap_or("-"),
            to = %target,
            "transaction state changed"
        );

        if auto_create_tasks {
            self.expand_templates(target_state);
        }

        Ok(true)
    }

    /// Expand the entered state's task templates into concrete tasks.
    ///
    /// Two passes over an in-memory batch: instantiate every template, then
    /// wire dependencies by template title. Only titles from this batch
    /// resolve — a reference to another state's template records no edge.
    /// An unresolved title is skipped without error (matching shipped
    /// behavior; pending product review). The batch is committed in one
    /// step so readers never observe a task without its dependency edges.
    fn expand_templates(&mut self, state: &State) {
        let now = Utc::now();
        let mut batch: Vec<Task> = Vec::with_capacity(state.task_templates.len());
        let mut by_title: HashMap<&str, TaskId> = HashMap::new();

        for template in &state.task_templates {
            let mut task = Task::new(template.title.clone());
            task.description = template.description.clone();
            task.assignee = template.assignee.clone();
            task.metadata = template.metadata.clone();
            if let Some(days) = template.days_until_due {
                task.due_date = Some(now + Duration::days(days));
            }
            by_title.insert(template.title.as_str(), task.id.clone());
            batch.push(task);
        }

        for (template, task) in state.task_templates.iter().zip(batch.iter_mut()) {
            for dep_title in &template.dependencies {
                if let Some(dep_id) = by_title.get(dep_title.as_str()) {
                    task.dependencies.push(dep_id.clone());
                }
            }
        }

        tracing::debug!(
            transaction = %self.id,
            state = %state.name,
            count = batch.len(),
            "tasks created from templates"
        );

        for task in batch {
            self.tasks.insert(task.id.clone(), task);
        }
    }

    // ── Task management ──────────────────────────────────────────────

    /// Add an externally created task; returns its id
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let id = task.id.clone();
        self.tasks.insert(id.clone(), task);
        id
    }

    /// Look up a task by id
    pub fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Look up a task mutably, for status changes
    pub fn get_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// All tasks with the given status
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.values().filter(|t| t.status == status).collect()
    }

    /// Pending tasks whose dependencies are all satisfied
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|t| t.status == TaskStatus::Pending && t.can_start(&self.tasks))
            .collect()
    }

    /// Total number of tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    // ── State queries ────────────────────────────────────────────────

    /// Root-to-current sequence of state names.
    ///
    /// Empty when no state has been entered yet, or when no registry is
    /// attached to resolve the hierarchy.
    pub fn state_path(&self) -> Vec<String> {
        match (&self.registry, &self.current_state) {
            (Some(registry), Some(current)) => registry.state_path(current),
            _ => Vec::new(),
        }
    }

    /// Number of recorded transitions
    pub fn history_len(&self) -> usize {
        self.state_history.len()
    }
}
