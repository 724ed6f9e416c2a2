//! Domain types for the escrow transaction lifecycle
//!
//! A real-estate deal moves through a tree of named [`State`]s. Each state
//! carries the transition rules that gate the next move and a list of
//! [`TaskTemplate`]s that the engine expands into concrete [`Task`]s when a
//! transaction enters it. Every completed move is recorded as an immutable
//! [`StateTransition`].
//!
//! This crate is pure data plus intrinsic behavior: no I/O, no catalogs, no
//! multi-entity coordination. The registry and the transaction aggregate
//! live in `escrow-engine`. All cross-state references here are **names**
//! resolved against the registry, never owning pointers, so the hierarchy
//! serializes flat and cannot form ownership cycles.
//!
//! # Example
//!
//! ```rust
//! use escrow_types::{State, TaskTemplate};
//!
//! let under_contract = State::new("under_contract", "Under Contract")
//!     .with_description("Offer accepted, working toward close")
//!     .with_allowed_transition("pending_inspection")
//!     .with_allowed_transition("cancelled")
//!     .with_task_template(
//!         TaskTemplate::new("Order inspection")
//!             .with_assignee("inspector@example.com")
//!             .due_in_days(7),
//!     );
//!
//! assert!(under_contract.can_transition_to("cancelled"));
//! assert!(!under_contract.can_transition_to("closed"));
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod state;
pub mod task;
pub mod template;
pub mod transition;

// Re-export main types
pub use error::{EscrowError, EscrowResult};
pub use state::State;
pub use task::{Task, TaskId, TaskStatus};
pub use template::TaskTemplate;
pub use transition::StateTransition;
