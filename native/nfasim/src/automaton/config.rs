//! Graph configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Precompute the epsilon closure of every node the first time the graph
    /// is simulated, and answer later closure queries from that table.
    ///
    /// Pays off when the same graph is run against many inputs. Off by default.
    pub cache_epsilon_closures: bool,
}

impl GraphConfig {
    /// Create a config with the closure cache enabled.
    pub fn cached() -> Self {
        Self {
            cache_epsilon_closures: true,
        }
    }
}
