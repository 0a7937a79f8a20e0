//! Node identifiers and node sets.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A node identifier: the node's index in its graph's arena.
pub type NodeId = u32;

/// A set of nodes backed by a growable bit set.
///
/// Iteration is always in ascending id order, which keeps closure and step
/// results deterministic for a given graph.
#[derive(Clone, Default)]
pub struct NodeSet {
    bits: FixedBitSet,
}

impl NodeSet {
    /// Create a new empty node set with room for `capacity` ids.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a node set containing a single node.
    pub fn singleton(node: NodeId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(node);
        set
    }

    /// Insert a node. Returns `true` if it was not already present.
    pub fn insert(&mut self, node: NodeId) -> bool {
        let idx = node as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        let idx = node as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Number of nodes in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bits.ones().map(|i| i as NodeId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &NodeSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Whether every node of `self` is also in `other`.
    pub fn is_subset(&self, other: &NodeSet) -> bool {
        self.iter().all(|node| other.contains(node))
    }

    /// Sorted list of the member ids.
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.iter().collect()
    }
}

// Two sets with the same members compare equal regardless of capacity.
impl PartialEq for NodeSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for NodeSet {}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}
