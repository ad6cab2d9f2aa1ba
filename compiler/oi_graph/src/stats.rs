//! Per-variant node counts reachable from the roots.

use rustc_hash::FxHashSet;

use crate::{walk_node, NodeId, NodeKind, TypeGraph, Visitor};

/// Node counts by variant, over the nodes reachable from a graph's roots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphStats {
    counts: [usize; NodeKind::COUNT],
    seen: FxHashSet<NodeId>,
}

impl GraphStats {
    /// Count every node reachable from `graph.roots()`.
    pub fn collect(graph: &TypeGraph) -> Self {
        let mut stats = Self::default();
        for &root in graph.roots() {
            stats.visit_node(graph, root);
        }
        stats
    }

    /// Number of reachable nodes of `kind`.
    #[inline]
    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts[kind.index()]
    }

    /// Number of reachable nodes.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Visitor for GraphStats {
    fn visit_node(&mut self, graph: &TypeGraph, id: NodeId) {
        if !self.seen.insert(id) {
            return;
        }
        self.counts[graph.get(id).kind().index()] += 1;
        walk_node(self, graph, id);
    }
}
