//! Step-wise simulation over the active node set.
//!
//! A run starts from the epsilon closure of every start node and, for each
//! input character, moves to the union of the closures of every node reached
//! by a matching edge. This is subset construction performed lazily, one
//! input at a time, without materializing a DFA.

use crate::automaton::closure::{closure, closure_of};
use crate::automaton::error::Result;
use crate::automaton::graph::Graph;
use crate::automaton::state::NodeSet;
use std::fmt;
use tracing::{debug, trace};

/// Why an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No active node had an edge for `symbol`, found after `position`
    /// characters had been consumed. The rest of the input was not read.
    NoTransition { symbol: char, position: usize },
    /// The input was consumed but no active node accepts.
    NotAccepting,
}

/// Final outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// A snapshot of a run: the active nodes and the input still to be read.
#[derive(Clone)]
pub struct State<'g, 'i> {
    graph: &'g Graph,
    active: NodeSet,
    input_left: &'i str,
    consumed: usize,
}

impl<'g, 'i> State<'g, 'i> {
    #[cfg(feature = "python")]
    pub(crate) fn from_parts(
        graph: &'g Graph,
        active: NodeSet,
        input_left: &'i str,
        consumed: usize,
    ) -> Self {
        Self {
            graph,
            active,
            input_left,
            consumed,
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn active(&self) -> &NodeSet {
        &self.active
    }

    /// The unread suffix of the input.
    pub fn input_left(&self) -> &'i str {
        self.input_left
    }

    /// Number of characters consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether the run would accept if the input ended here.
    pub fn is_accepting(&self) -> bool {
        self.graph.any_accepting(&self.active)
    }

    pub fn step(&self) -> Step<'g, 'i> {
        step(self)
    }
}

impl fmt::Debug for State<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("active", &self.active)
            .field("input_left", &self.input_left)
            .field("consumed", &self.consumed)
            .finish()
    }
}

/// Result of advancing a [`State`] by one character.
#[derive(Debug, Clone)]
pub enum Step<'g, 'i> {
    Continue(State<'g, 'i>),
    Accepted,
    Rejected(Rejection),
}

impl<'g, 'i> Step<'g, 'i> {
    /// The verdict, if this step ended the run.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Step::Continue(_) => None,
            Step::Accepted => Some(Verdict::Accepted),
            Step::Rejected(rejection) => Some(Verdict::Rejected(*rejection)),
        }
    }

    pub fn into_state(self) -> Option<State<'g, 'i>> {
        match self {
            Step::Continue(state) => Some(state),
            _ => None,
        }
    }
}

/// Validate `graph` and build the initial state for `input`.
pub fn start<'g, 'i>(graph: &'g Graph, input: &'i str) -> Result<State<'g, 'i>> {
    graph.validate()?;

    let active = closure_of(graph, graph.start_nodes());
    debug!(?active, input_chars = input.chars().count(), "initial active set");

    Ok(State {
        graph,
        active,
        input_left: input,
        consumed: 0,
    })
}

/// Consume one character, or decide acceptance once the input is exhausted.
///
/// `current` is left untouched; a successor is returned as a new state.
pub fn step<'g, 'i>(current: &State<'g, 'i>) -> Step<'g, 'i> {
    let mut chars = current.input_left.chars();
    let Some(c) = chars.next() else {
        return if current.is_accepting() {
            Step::Accepted
        } else {
            Step::Rejected(Rejection::NotAccepting)
        };
    };

    let destinations = advance(current.graph, &current.active, c);
    trace!(
        symbol = %c,
        position = current.consumed,
        from = ?current.active,
        to = ?destinations,
        "step"
    );

    if destinations.is_empty() {
        return Step::Rejected(Rejection::NoTransition {
            symbol: c,
            position: current.consumed,
        });
    }

    Step::Continue(State {
        graph: current.graph,
        active: destinations,
        input_left: chars.as_str(),
        consumed: current.consumed + 1,
    })
}

/// The closed set of nodes reached from `active` on `c`.
pub fn advance(graph: &Graph, active: &NodeSet, c: char) -> NodeSet {
    let mut destinations = NodeSet::with_capacity(graph.len());
    for id in active.iter() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        for edge in node.children() {
            if edge.consumes(c) {
                closure(graph, edge.destination(), &mut destinations);
            }
        }
    }
    destinations
}

/// Run `input` to completion.
pub fn run(graph: &Graph, input: &str) -> Result<Verdict> {
    let mut state = start(graph, input)?;
    loop {
        match step(&state) {
            Step::Continue(next) => state = next,
            Step::Accepted => return Ok(Verdict::Accepted),
            Step::Rejected(rejection) => return Ok(Verdict::Rejected(rejection)),
        }
    }
}

/// Whether `graph` accepts `input`.
pub fn accepts(graph: &Graph, input: &str) -> Result<bool> {
    run(graph, input).map(|verdict| verdict.is_accepted())
}
