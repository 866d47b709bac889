//! Routing error definitions.
//!
//! Only construction-time conflicts are errors. A request that matches
//! nothing is a normal `NotFound` result, never an error.

use thiserror::Error;

/// Errors raised while assembling the routing engine.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Two lookups declare the same weight; chain order would be ambiguous.
    #[error("lookup \"{incoming}\" has weight {weight}, already taken by \"{existing}\"")]
    WeightConflict {
        weight: u32,
        existing: &'static str,
        incoming: &'static str,
    },

    /// Two domains share a host pattern and path prefix.
    #[error("domain \"{0}\" is registered more than once")]
    DuplicateDomain(String),

    /// A host pattern is empty or malformed.
    #[error("invalid host pattern \"{0}\"")]
    InvalidHostPattern(String),
}
