//! Error types for the escrow lifecycle crates.
//!
//! Only caller and configuration mistakes surface as errors. A transition
//! that is well-formed but disallowed by the current state's rules is a
//! business outcome, reported as `Ok(false)` by the engine, never through
//! this enum.

use thiserror::Error;

/// Errors raised by lifecycle operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    /// A transition was attempted before a registry was attached.
    #[error("state registry not attached; call attach_registry() first")]
    RegistryNotAttached,

    /// A state name did not resolve against the registry.
    #[error("unknown state: {0}")]
    UnknownState(String),

    /// A registry configuration document could not be parsed.
    #[error("invalid registry configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for lifecycle operations.
pub type EscrowResult<T> = std::result::Result<T, EscrowError>;
