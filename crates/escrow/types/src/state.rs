//! Lifecycle states: the nodes of the transaction state machine.
//!
//! States form a tree via name references (`parent` up, `children` down) and
//! carry the transition rules and task templates consulted when a
//! transaction enters them. Cross-state references are names resolved
//! against the registry, never owning pointers, so a state serializes flat.
//!
//! The persisted relation is `parent`; `children` is runtime wiring rebuilt
//! by the loader and is not serialized.

use crate::TaskTemplate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A named stage in the transaction lifecycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    /// Unique key (e.g. "under_contract")
    pub name: String,
    /// Human-readable name (e.g. "Under Contract")
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Parent state name; None for a root state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Child state names. Authoritative for tree structure and kept
    /// consistent with `parent` by [`State::add_child`].
    #[serde(skip)]
    pub children: Vec<String>,
    /// Names of states this state may transition to. Entries are expected
    /// to resolve against the owning registry; dangling entries are
    /// detectable via the registry's validation pass, not rejected here.
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub allowed_transitions: HashSet<String>,
    /// Templates expanded into tasks when a transaction enters this state.
    /// Order is significant: it drives dependency resolution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub task_templates: Vec<TaskTemplate>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl State {
    /// Create a new state with no rules, templates, or hierarchy
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            parent: None,
            children: Vec::new(),
            allowed_transitions: HashSet::new(),
            task_templates: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Allow a transition from this state to the named state
    pub fn with_allowed_transition(mut self, name: impl Into<String>) -> Self {
        self.allowed_transitions.insert(name.into());
        self
    }

    /// Append a task template; order of calls is the expansion order
    pub fn with_task_template(mut self, template: TaskTemplate) -> Self {
        self.task_templates.push(template);
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

    /// Check whether a transition to the named state is allowed
    pub fn can_transition_to(&self, target: &str) -> bool {
        self.allowed_transitions.contains(target)
    }

    /// Allow a transition from this state to the named state
    pub fn add_allowed_transition(&mut self, name: impl Into<String>) {
        self.allowed_transitions.insert(name.into());
    }

    /// Wire `child` under this state: sets the child's parent reference and
    /// records the child's name. Idempotent.
    pub fn add_child(&mut self, child: &mut State) {
        child.parent = Some(self.name.clone());
        if !self.children.iter().any(|c| c == &child.name) {
            self.children.push(child.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_transition_to() {
        let state = State::new("under_contract", "Under Contract")
            .with_allowed_transition("pending_inspection")
            .with_allowed_transition("cancelled");

        assert!(state.can_transition_to("pending_inspection"));
        assert!(state.can_transition_to("cancelled"));
        assert!(!state.can_transition_to("closed"));
    }

    #[test]
    fn test_add_allowed_transition() {
        let mut state = State::new("new_listing", "New Listing");
        assert!(!state.can_transition_to("under_contract"));
        state.add_allowed_transition("under_contract");
        assert!(state.can_transition_to("under_contract"));
    }

    #[test]
    fn test_add_child_wires_both_directions() {
        let mut active = State::new("active", "Active");
        let mut under_contract = State::new("under_contract", "Under Contract");

        active.add_child(&mut under_contract);
        assert_eq!(under_contract.parent.as_deref(), Some("active"));
        assert_eq!(active.children, vec!["under_contract"]);

        // Idempotent: re-adding does not duplicate.
        active.add_child(&mut under_contract);
        assert_eq!(active.children.len(), 1);
    }

    #[test]
    fn test_parent_serializes_as_name_reference() {
        let mut root = State::new("active", "Active");
        let mut child = State::new("under_contract", "Under Contract");
        root.add_child(&mut child);

        let value = serde_json::to_value(&child).unwrap();
        assert_eq!(value["parent"], "active");

        // A root state omits the field entirely.
        let root_value = serde_json::to_value(&root).unwrap();
        assert!(root_value.get("parent").is_none());
        // Children are runtime wiring, never persisted.
        assert!(root_value.get("children").is_none());
    }

    #[test]
    fn test_round_trip() {
        let state = State::new("under_contract", "Under Contract")
            .with_description("Offer accepted, working toward close")
            .with_allowed_transition("pending_inspection")
            .with_allowed_transition("cancelled")
            .with_task_template(TaskTemplate::new("Order inspection").due_in_days(7))
            .with_metadata("phase", "diligence");

        let value = serde_json::to_value(&state).unwrap();
        let back: State = serde_json::from_value(value).unwrap();

        assert_eq!(back.name, state.name);
        assert_eq!(back.display_name, state.display_name);
        assert_eq!(back.description, state.description);
        assert_eq!(back.allowed_transitions, state.allowed_transitions);
        assert_eq!(back.task_templates.len(), 1);
        assert_eq!(back.task_templates[0].title, "Order inspection");
        assert_eq!(back.metadata.get("phase").unwrap(), "diligence");
    }

    #[test]
    fn test_deserialize_minimal() {
        let state: State =
            serde_json::from_str(r#"{"name": "closed", "display_name": "Closed"}"#).unwrap();

        assert_eq!(state.name, "closed");
        assert!(state.parent.is_none());
        assert!(state.allowed_transitions.is_empty());
        assert!(state.task_templates.is_empty());
    }
}
