//! Epsilon closure.

use crate::automaton::graph::Graph;
use crate::automaton::state::{NodeId, NodeSet};

/// Add `seed` and every node reachable from it over epsilon edges to `into`.
///
/// `into` may already hold the closure of other seeds; the result is the
/// union. `into` must be epsilon-closed on entry (every member's closure is
/// already in it), which holds for any set built only by this function. Apart
/// from the seed, a node already in `into` is not expanded again, which is
/// what makes epsilon cycles terminate.
///
/// Ids with no node behind them are ignored, so the set never grows past the
/// graph's node count.
pub fn closure(graph: &Graph, seed: NodeId, into: &mut NodeSet) {
    debug_assert!(
        is_epsilon_closed(graph, into),
        "closure target must be epsilon-closed: {into:?}"
    );

    if let Some(table) = graph.cached_closures() {
        if let Some(cached) = table.get(seed as usize) {
            into.union_with(cached);
        }
        return;
    }

    expand(graph, seed, into);
}

/// The union of the closures of all `seeds`.
pub fn closure_of(graph: &Graph, seeds: impl IntoIterator<Item = NodeId>) -> NodeSet {
    let mut set = NodeSet::with_capacity(graph.len());
    for seed in seeds {
        closure(graph, seed, &mut set);
    }
    set
}

/// Whether every epsilon edge leaving a member of `set` stays inside it.
pub fn is_epsilon_closed(graph: &Graph, set: &NodeSet) -> bool {
    set.iter().all(|id| {
        graph.node(id).is_none_or(|node| {
            node.epsilon_edges().all(|edge| {
                graph.node(edge.destination()).is_none() || set.contains(edge.destination())
            })
        })
    })
}

/// Closure of a single node, ignoring any cache.
pub(crate) fn closure_uncached(graph: &Graph, seed: NodeId) -> NodeSet {
    let mut set = NodeSet::with_capacity(graph.len());
    expand(graph, seed, &mut set);
    set
}

fn expand(graph: &Graph, seed: NodeId, into: &mut NodeSet) {
    if graph.node(seed).is_none() {
        return;
    }
    // The seed is expanded even if `into` already holds it.
    into.insert(seed);
    let mut stack = vec![seed];

    while let Some(id) = stack.pop() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        for edge in node.epsilon_edges() {
            let destination = edge.destination();
            if graph.node(destination).is_some() && into.insert(destination) {
                stack.push(destination);
            }
        }
    }
}
