//! Structural metrics engine
//!
//! Turns the induced graph into the four structural signals of the analysis:
//! adjacency ratio, longest simple path (with its realizing segment),
//! vertex-cover ratio and average log-degree. The two combinatorially hard
//! searches run under fixed step budgets and degrade to documented
//! approximations instead of blocking.

mod cover;
mod path;

pub use cover::{EXACT_NODE_LIMIT, VertexCover, minimum_vertex_cover};
pub use path::{LongestPath, longest_simple_path};

use crate::graph::InducedGraph;
use crate::reference::ReferenceGraph;

/// Backtracking steps granted to the exact longest-path search per request.
pub const PATH_STEP_BUDGET: usize = 200_000;
/// Branch-and-bound steps granted to the exact vertex-cover search.
pub const COVER_STEP_BUDGET: usize = 200_000;

/// Structural signals of one analyzed password.
#[derive(Debug, Clone)]
pub struct StructuralMetrics {
    pub adjacency_ratio: f64,
    pub longest_path_length: usize,
    pub longest_path_segment: String,
    pub path_approximate: bool,
    pub vc_ratio: f64,
    pub vc_approximate: bool,
    pub avg_log_degree: f64,
}

/// Computes all structural metrics for one password and its induced graph.
pub fn compute(
    password: &[char],
    graph: &InducedGraph,
    reference: &ReferenceGraph,
) -> StructuralMetrics {
    let path = longest_simple_path(graph, password, PATH_STEP_BUDGET);
    let cover = minimum_vertex_cover(graph, COVER_STEP_BUDGET);

    let segment: String = path.nodes.iter().map(|&n| graph.nodes()[n]).collect();

    StructuralMetrics {
        adjacency_ratio: adjacency_ratio(password, reference),
        longest_path_length: path.length,
        longest_path_segment: segment,
        path_approximate: path.approximate,
        vc_ratio: cover.size as f64 / graph.node_count().max(1) as f64,
        vc_approximate: cover.approximate,
        avg_log_degree: avg_log_degree(graph),
    }
}

/// Fraction of consecutive character pairs carrying at least one weak
/// relation. Zero for single-character input.
pub fn adjacency_ratio(password: &[char], reference: &ReferenceGraph) -> f64 {
    if password.len() <= 1 {
        return 0.0;
    }
    let related = password
        .windows(2)
        .filter(|pair| reference.related(pair[0], pair[1]))
        .count();
    related as f64 / (password.len() - 1) as f64
}

/// Mean of `ln(1 + degree)` over the induced graph's nodes. Self-loops count
/// one degree; repeated-pattern hubs push the mean up.
pub fn avg_log_degree(graph: &InducedGraph) -> f64 {
    if graph.node_count() == 0 {
        return 0.0;
    }
    let sum: f64 = (0..graph.node_count())
        .map(|n| (1.0 + graph.degree(n) as f64).ln())
        .sum();
    sum / graph.node_count() as f64
}
