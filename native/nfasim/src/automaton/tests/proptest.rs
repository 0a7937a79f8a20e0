use crate::automaton::{
    Graph, GraphConfig, NodeId, NodeSet, Rejection, Verdict, accepts, closure, closure_of,
    is_epsilon_closed, run,
};
use proptest::{collection, prelude::*};
use std::collections::{HashSet, VecDeque};

const LABELS: [&str; 3] = ["", "a", "b"];

/// A small random graph: node flags plus `(source, label, destination)` edges.
#[derive(Debug, Clone)]
struct RawGraph {
    flags: Vec<(bool, bool)>,
    edges: Vec<(NodeId, &'static str, NodeId)>,
}

impl RawGraph {
    fn build(&self, config: GraphConfig) -> Graph {
        let mut builder = Graph::builder().with_config(config);
        for (i, &(is_start, is_accept)) in self.flags.iter().enumerate() {
            builder.add_node_with(format!("q{i}"), is_start, is_accept);
        }
        for &(src, label, dst) in &self.edges {
            builder.add_edge(src, label, dst).unwrap();
        }
        builder.build()
    }
}

fn raw_graph() -> impl Strategy<Value = RawGraph> {
    (1usize..7).prop_flat_map(|n| {
        let flags = collection::vec((any::<bool>(), any::<bool>()), n);
        let edge = (0..n as NodeId, 0..LABELS.len(), 0..n as NodeId)
            .prop_map(|(src, label, dst)| (src, LABELS[label], dst));
        let edges = collection::vec(edge, 0..(3 * n));
        (flags, edges).prop_map(|(mut flags, edges)| {
            // Guarantee a start and an accept node so runs can begin.
            flags[0].0 = true;
            let last = flags.len() - 1;
            flags[last].1 = true;
            RawGraph { flags, edges }
        })
    })
}

fn input_string() -> impl Strategy<Value = String> {
    collection::vec(prop_oneof![Just('a'), Just('b')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Search over `(node, position)` configurations, independent of the
/// active-set machinery.
fn reference_accepts(graph: &Graph, input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();
    let mut seen = HashSet::new();
    let mut queue: VecDeque<(NodeId, usize)> = graph.start_nodes().map(|id| (id, 0)).collect();

    while let Some((id, pos)) = queue.pop_front() {
        if !seen.insert((id, pos)) {
            continue;
        }
        let node = graph.node(id).unwrap();
        if pos == chars.len() && node.is_accept() {
            return true;
        }
        for edge in node.children() {
            if edge.is_epsilon() {
                queue.push_back((edge.destination(), pos));
            } else if pos < chars.len() && edge.consumes(chars[pos]) {
                queue.push_back((edge.destination(), pos + 1));
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn closure_is_idempotent(raw in raw_graph()) {
        let graph = raw.build(GraphConfig::default());
        for seed in 0..graph.len() as NodeId {
            let mut set = closure_of(&graph, [seed]);
            let before = set.clone();
            for member in before.iter() {
                closure(&graph, member, &mut set);
            }
            prop_assert_eq!(set, before);
        }
    }

    #[test]
    fn closure_is_closed_under_epsilon(raw in raw_graph()) {
        let graph = raw.build(GraphConfig::default());
        let set = closure_of(&graph, graph.start_nodes());
        for id in set.iter() {
            for edge in graph.node(id).unwrap().epsilon_edges() {
                prop_assert!(set.contains(edge.destination()));
            }
        }
    }

    #[test]
    fn cached_closures_match_on_demand(
        raw in raw_graph(),
        prefill in collection::vec(0..8 as NodeId, 0..4),
    ) {
        let plain = raw.build(GraphConfig::default());
        let cached = raw.build(GraphConfig::cached());
        let all: NodeSet = (0..plain.len() as NodeId).collect();
        prop_assert_eq!(closure_of(&plain, all.iter()), closure_of(&cached, all.iter()));

        // Extend a non-empty closed set, as `advance` does after its first match.
        for seed in 0..plain.len() as NodeId {
            let mut from_plain = closure_of(&plain, prefill.iter().copied());
            let mut from_cached = closure_of(&cached, prefill.iter().copied());
            prop_assert_eq!(&from_plain, &from_cached);
            prop_assert!(is_epsilon_closed(&plain, &from_plain));

            closure(&plain, seed, &mut from_plain);
            closure(&cached, seed, &mut from_cached);
            prop_assert_eq!(from_plain, from_cached);
        }
    }

    #[test]
    fn run_matches_configuration_search(raw in raw_graph(), input in input_string()) {
        for config in [GraphConfig::default(), GraphConfig::cached()] {
            let graph = raw.build(config);
            prop_assert_eq!(accepts(&graph, &input).unwrap(), reference_accepts(&graph, &input));
        }
    }

    #[test]
    fn stuck_runs_report_where(raw in raw_graph(), input in input_string()) {
        let graph = raw.build(GraphConfig::default());
        let verdict = run(&graph, &input).unwrap();
        if let Verdict::Rejected(Rejection::NoTransition { symbol, position }) = verdict {
            prop_assert_eq!(input.chars().nth(position), Some(symbol));
        }
    }
}
