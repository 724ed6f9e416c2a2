//! Transaction lifecycle engine for real-estate deals
//!
//! The engine layers orchestration over the `escrow-types` domain model:
//!
//! - [`StateRegistry`] — the catalog of lifecycle states, with transition
//!   validation and hierarchy resolution
//! - [`Transaction`] — the aggregate root: one deal's current state,
//!   append-only transition history, and task set
//! - [`loader`] — builds a populated registry from configuration, two-phase
//!   (register everything, then rebuild hierarchy wiring)
//!
//! Transitions are validated against the registry attached to each
//! transaction. Entering a state expands that state's task templates into
//! concrete tasks, wiring dependencies between tasks created in the same
//! batch.
//!
//! The engine is synchronous and performs no I/O; persistence and
//! concurrency control belong to the caller. Attach the registry before
//! transitioning — including after deserializing a stored transaction.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use escrow_engine::{StateRegistry, Transaction};
//! use escrow_types::{State, TaskTemplate};
//!
//! let mut registry = StateRegistry::new();
//! registry.register(
//!     State::new("new_listing", "New Listing").with_allowed_transition("under_contract"),
//! );
//! registry.register(
//!     State::new("under_contract", "Under Contract")
//!         .with_task_template(TaskTemplate::new("Order inspection").due_in_days(7)),
//! );
//! assert!(registry.validate_transitions().is_empty());
//!
//! let mut deal = Transaction::new("7250 Franklin Ave");
//! deal.attach_registry(Arc::new(registry));
//!
//! assert!(deal.transition_to("new_listing", "initial listing", true).unwrap());
//! assert!(deal.transition_to("under_contract", "offer accepted", true).unwrap());
//! assert_eq!(deal.task_count(), 1);
//! ```

#![deny(unsafe_code)]

pub mod loader;
pub mod registry;
pub mod transaction;

// Re-export main types
pub use registry::StateRegistry;
pub use transaction::{Transaction, TransactionId};
