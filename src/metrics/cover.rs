//! Minimum vertex cover.
//!
//! Exact branch-and-bound on small graphs, maximal-matching 2-approximation
//! otherwise. Self-loops are not coverable edges; a lone repeated character
//! needs no cover.

use crate::graph::InducedGraph;

/// Size of a vertex cover of the induced graph's loop-free edges.
/// `approximate` marks covers from the 2-approximation or from an
/// interrupted exact search; such covers are valid but possibly larger than
/// the minimum.
#[derive(Debug, Clone, Copy)]
pub struct VertexCover {
    pub size: usize,
    pub approximate: bool,
}

/// Node-count threshold above which branch-and-bound is not attempted.
pub const EXACT_NODE_LIMIT: usize = 20;

/// Computes a minimum (or approximately minimum) vertex cover.
pub fn minimum_vertex_cover(graph: &InducedGraph, budget: usize) -> VertexCover {
    let edges: Vec<(usize, usize)> = graph.simple_edges().map(|e| (e.a, e.b)).collect();
    if edges.is_empty() {
        return VertexCover { size: 0, approximate: false };
    }

    let matching_cover = matching_cover_size(&edges);
    if graph.node_count() > EXACT_NODE_LIMIT {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = graph.node_count(),
            "graph above exact cover threshold, using 2-approximation"
        );
        return VertexCover { size: matching_cover, approximate: true };
    }

    let mut search = Search { best: matching_cover, steps_left: budget };
    search.branch(&edges, 0);
    VertexCover { size: search.best, approximate: search.steps_left == 0 }
}

struct Search {
    best: usize,
    steps_left: usize,
}

impl Search {
    /// Classic edge branching: the first uncovered edge (u, v) forces u or v
    /// into any cover. `taken` counts nodes already committed.
    fn branch(&mut self, edges: &[(usize, usize)], taken: usize) {
        if self.steps_left == 0 {
            return;
        }
        self.steps_left -= 1;

        let Some(&(u, v)) = edges.first() else {
            if taken < self.best {
                self.best = taken;
            }
            return;
        };
        // lower bound: committed nodes plus one per edge of a greedy matching
        if taken + matching_lower_bound(edges) >= self.best {
            return;
        }
        self.branch(&without_endpoint(edges, u), taken + 1);
        self.branch(&without_endpoint(edges, v), taken + 1);
    }
}

fn without_endpoint(edges: &[(usize, usize)], node: usize) -> Vec<(usize, usize)> {
    edges.iter().copied().filter(|&(a, b)| a != node && b != node).collect()
}

/// Greedy maximal matching: any cover needs at least one endpoint per
/// matched edge.
fn matching_lower_bound(edges: &[(usize, usize)]) -> usize {
    let mut matched: Vec<usize> = Vec::new();
    let mut size = 0;
    for &(a, b) in edges {
        if !matched.contains(&a) && !matched.contains(&b) {
            matched.push(a);
            matched.push(b);
            size += 1;
        }
    }
    size
}

/// The 2-approximation: both endpoints of every greedily matched edge.
fn matching_cover_size(edges: &[(usize, usize)]) -> usize {
    matching_lower_bound(edges) * 2
}
