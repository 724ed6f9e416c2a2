//! Configuration loader: builds a populated [`StateRegistry`].
//!
//! Loading is two-phase: every state is registered first, then children
//! lists are rebuilt from parent references. The registry must be fully
//! loaded before any transaction referencing it is deserialized — state
//! names in stored transactions resolve against it.

use crate::StateRegistry;
use escrow_types::{EscrowError, EscrowResult, State};

/// Build a registry from already-constructed states.
///
/// Children lists are rebuilt from each state's parent reference. A parent
/// name outside the set is left dangling rather than rejected; dangling
/// references surface when the hierarchy is walked or validated.
pub fn registry_from_states(states: Vec<State>) -> StateRegistry {
    let links: Vec<(String, String)> = states
        .iter()
        .filter_map(|s| s.parent.clone().map(|p| (p, s.name.clone())))
        .collect();

    let mut registry = StateRegistry::new();
    for state in states {
        registry.register(state);
    }
    for (parent, child) in links {
        if registry.link_child(&parent, &child).is_err() {
            tracing::warn!(parent = %parent, child = %child, "parent state not registered");
        }
    }

    tracing::info!(states = registry.count(), "state registry loaded");
    registry
}

/// Parse a JSON array of states into a registry.
///
/// The document is the persisted state shape; see [`registry_from_states`]
/// for the hierarchy rebuild. Callers wanting transition consistency run
/// [`StateRegistry::validate_transitions`] on the result.
pub fn registry_from_json(json: &str) -> EscrowResult<StateRegistry> {
    let states: Vec<State> =
        serde_json::from_str(json).map_err(|e| EscrowError::InvalidConfig(e.to_string()))?;
    Ok(registry_from_states(states))
}
