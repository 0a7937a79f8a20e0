//! Error types for graph validation.

use crate::automaton::state::NodeId;
use thiserror::Error;

/// Errors raised while building or validating a graph.
///
/// Rejecting an input is not an error; see [`crate::automaton::Verdict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// An edge label is longer than one character.
    #[error("edge {symbol:?} leaving node {node} must be one symbol")]
    InvalidEdgeSymbol { node: NodeId, symbol: String },

    /// A node id does not name a node in the graph.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("graph must have at least one start state")]
    NoStartState,

    #[error("graph must have at least one accept state")]
    NoAcceptState,
}

pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;
