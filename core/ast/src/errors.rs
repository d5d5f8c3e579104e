//! Error types for the AST kernel.
//!
//! Absence of a result (no enclosing method, no declared element) is always
//! `Option::None`, never an error. `TreeError` is reserved for structural
//! operations whose preconditions do not hold.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur while mutating the tree.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum TreeError {
    /// A structural operation required a parent/child relationship that
    /// does not hold, e.g. replacing a node that is not attached anywhere.
    #[error("invariant violation on node {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },

    /// A constant value that has no literal node form.
    #[error("unsupported literal kind: {kind}")]
    UnsupportedLiteralKind { kind: &'static str },
}
