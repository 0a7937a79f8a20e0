//! Lambda-NFA simulation.
//!
//! This module provides:
//! - An immutable node/edge graph with lazy validation
//! - Epsilon closure computation with an optional per-node cache
//! - Step-wise simulation of the active node set
//! - PyO3 bindings for Python interoperability (feature `python`)

mod closure;
mod config;
mod error;
mod graph;
#[cfg(feature = "python")]
mod python_bindings;
mod sim;
mod state;
mod symbol;

#[cfg(test)]
mod tests;

pub use closure::{closure, closure_of, is_epsilon_closed};
pub use config::GraphConfig;
pub use error::{AutomatonError, Result};
pub use graph::{Edge, Graph, GraphBuilder, Node};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use sim::{Rejection, State, Step, Verdict, accepts, advance, run, start, step};
pub use state::{NodeId, NodeSet};
pub use symbol::Symbol;
