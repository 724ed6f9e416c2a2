//! State registry: the catalog of lifecycle states.
//!
//! The registry is populated once at startup (normally via [`crate::loader`])
//! and treated as read-only during normal operation; mutation is reserved
//! for setup and migration. Registration is last-write-wins by name.

use escrow_types::{EscrowError, EscrowResult, State};
use std::collections::HashMap;

/// Catalog of all lifecycle states, keyed by name
#[derive(Clone, Debug, Default)]
pub struct StateRegistry {
    states: HashMap<String, State>,
}

impl StateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Register a state, replacing any previous state with the same name.
    ///
    /// Last write wins; re-registering is how setup and migration code
    /// amends a state definition.
    pub fn register(&mut self, state: State) {
        tracing::debug!(state = %state.name, "state registered");
        self.states.insert(state.name.clone(), state);
    }

    /// Look up a state by name
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Snapshot of every registered state, keyed by name.
    ///
    /// Returns a copy; mutating it does not touch the registry.
    pub fn all_states(&self) -> HashMap<String, State> {
        self.states.clone()
    }

    /// Check whether a state name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Number of registered states
    pub fn count(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Wire an already-registered child under an already-registered parent.
    ///
    /// Sets the child's parent reference and records the child in the
    /// parent's children list. Idempotent; errors when either name is
    /// unregistered.
    pub fn link_child(&mut self, parent: &str, child: &str) -> EscrowResult<()> {
        if !self.states.contains_key(parent) {
            return Err(EscrowError::UnknownState(parent.to_string()));
        }
        match self.states.get_mut(child) {
            Some(child_state) => child_state.parent = Some(parent.to_string()),
            None => return Err(EscrowError::UnknownState(child.to_string())),
        }
        if let Some(parent_state) = self.states.get_mut(parent) {
            if !parent_state.children.iter().any(|c| c == child) {
                parent_state.children.push(child.to_string());
            }
        }
        Ok(())
    }

    /// Check every state's allowed transitions against the catalog.
    ///
    /// Returns one message per `(state, target)` pair whose target is not
    /// registered; empty when consistent. This is the registry's only
    /// validation concern — reachability and cycles are not its business.
    pub fn validate_transitions(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for state in self.states.values() {
            for target in &state.allowed_transitions {
                if !self.states.contains_key(target) {
                    errors.push(format!(
                        "state '{}' allows transition to undefined state '{}'",
                        state.name, target
                    ));
                }
            }
        }
        errors
    }

    /// Root-to-state sequence of names, following parent references.
    ///
    /// An unknown name produces an empty path; a dangling parent reference
    /// ends the walk at the last resolvable state. The hierarchy is expected
    /// to be acyclic (unchecked precondition).
    pub fn state_path(&self, name: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.states.get(name);
        while let Some(state) = current {
            path.push(state.name.clone());
            current = state.parent.as_deref().and_then(|p| self.states.get(p));
        }
        path.reverse();
        path
    }
}
