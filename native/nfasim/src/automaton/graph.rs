//! The node/edge graph an automaton is simulated over.

use crate::automaton::closure;
use crate::automaton::config::GraphConfig;
use crate::automaton::error::{AutomatonError, Result};
use crate::automaton::state::{NodeId, NodeSet};
use crate::automaton::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// A transition to another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Raw label: empty for epsilon, otherwise the character consumed.
    symbol: String,
    destination: NodeId,
}

impl Edge {
    pub fn new(symbol: impl Into<String>, destination: NodeId) -> Self {
        Self {
            symbol: symbol.into(),
            destination,
        }
    }

    pub fn epsilon(destination: NodeId) -> Self {
        Self::new(String::new(), destination)
    }

    /// The raw label as it was supplied.
    pub fn label(&self) -> &str {
        &self.symbol
    }

    /// The parsed symbol, or `None` if the label is longer than one char.
    pub fn symbol(&self) -> Option<Symbol> {
        Symbol::parse(&self.symbol)
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_empty()
    }

    /// Whether taking this edge consumes exactly `c`.
    #[inline]
    pub fn consumes(&self, c: char) -> bool {
        let mut chars = self.symbol.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }
}

/// A state of the automaton.
///
/// The label is display text only and plays no part in acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    label: String,
    #[serde(default)]
    is_start: bool,
    #[serde(default)]
    is_accept: bool,
    /// Outgoing edges in insertion order. Absent in serialized form means none.
    #[serde(default)]
    children: Vec<Edge>,
}

impl Node {
    pub fn new(label: impl Into<String>, is_start: bool, is_accept: bool) -> Self {
        Self {
            label: label.into(),
            is_start,
            is_accept,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_accept(&self) -> bool {
        self.is_accept
    }

    pub fn children(&self) -> &[Edge] {
        &self.children
    }

    /// Epsilon edges leaving this node.
    pub fn epsilon_edges(&self) -> impl Iterator<Item = &Edge> {
        self.children.iter().filter(|edge| edge.is_epsilon())
    }
}

/// An immutable automaton graph.
///
/// Nodes live in an arena and are addressed by their index. The graph is not
/// validated on construction; [`Graph::validate`] runs when a simulation
/// starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    #[serde(default)]
    config: GraphConfig,
    /// Epsilon closure of each node, filled on first use when enabled.
    #[serde(skip)]
    closures: OnceLock<Vec<NodeSet>>,
}

impl Graph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self::from_nodes_with_config(nodes, GraphConfig::default())
    }

    pub fn from_nodes_with_config(nodes: Vec<Node>, config: GraphConfig) -> Self {
        Self {
            nodes,
            config,
            closures: OnceLock::new(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Iterate over `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (idx as NodeId, node))
    }

    pub fn start_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_start)
            .map(|(id, _)| id)
    }

    pub fn accept_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_accept)
            .map(|(id, _)| id)
    }

    /// Whether any node of `set` is an accept node.
    pub fn any_accepting(&self, set: &NodeSet) -> bool {
        set.iter()
            .any(|id| self.node(id).is_some_and(Node::is_accept))
    }

    /// Check that the graph can be simulated.
    ///
    /// Edge checks run over the whole graph before the start/accept checks, so
    /// a bad edge is reported even if the graph also lacks a start state.
    pub fn validate(&self) -> Result<()> {
        let mut has_start = false;
        let mut has_accept = false;

        for (id, node) in self.iter() {
            has_start |= node.is_start;
            has_accept |= node.is_accept;

            for edge in &node.children {
                if edge.symbol().is_none() {
                    return Err(AutomatonError::InvalidEdgeSymbol {
                        node: id,
                        symbol: edge.symbol.clone(),
                    });
                }
                if self.node(edge.destination).is_none() {
                    return Err(AutomatonError::UnknownNode(edge.destination));
                }
            }
        }

        if !has_start {
            return Err(AutomatonError::NoStartState);
        }
        if !has_accept {
            return Err(AutomatonError::NoAcceptState);
        }
        Ok(())
    }

    /// The per-node closure table, if this graph is configured to keep one.
    pub(crate) fn cached_closures(&self) -> Option<&[NodeSet]> {
        if !self.config.cache_epsilon_closures {
            return None;
        }

        let table = self.closures.get_or_init(|| {
            let table: Vec<NodeSet> = (0..self.len() as NodeId)
                .map(|id| closure::closure_uncached(self, id))
                .collect();
            debug!(nodes = table.len(), "computed epsilon closure table");
            table
        });
        Some(table)
    }
}

/// Incremental construction of a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    config: GraphConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a node and return its id.
    pub fn add_node_with(
        &mut self,
        label: impl Into<String>,
        is_start: bool,
        is_accept: bool,
    ) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(label, is_start, is_accept));
        id
    }

    /// Add a node that is neither start nor accept.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        self.add_node_with(label, false, false)
    }

    pub fn add_start_node(&mut self, label: impl Into<String>) -> NodeId {
        self.add_node_with(label, true, false)
    }

    pub fn add_accept_node(&mut self, label: impl Into<String>) -> NodeId {
        self.add_node_with(label, false, true)
    }

    pub fn set_start(&mut self, id: NodeId, is_start: bool) -> Result<()> {
        self.node_mut(id)?.is_start = is_start;
        Ok(())
    }

    pub fn set_accept(&mut self, id: NodeId, is_accept: bool) -> Result<()> {
        self.node_mut(id)?.is_accept = is_accept;
        Ok(())
    }

    /// Add an edge labeled `symbol` from `source` to `destination`.
    ///
    /// Labels are not checked here; an over-long label makes the finished
    /// graph fail validation. The destination is likewise checked then, so
    /// edges may point at nodes added later.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        symbol: impl Into<String>,
        destination: NodeId,
    ) -> Result<()> {
        self.node_mut(source)?
            .children
            .push(Edge::new(symbol, destination));
        Ok(())
    }

    pub fn add_epsilon_edge(&mut self, source: NodeId, destination: NodeId) -> Result<()> {
        self.add_edge(source, String::new(), destination)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn build(self) -> Graph {
        Graph::from_nodes_with_config(self.nodes, self.config)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id as usize)
            .ok_or(AutomatonError::UnknownNode(id))
    }
}
