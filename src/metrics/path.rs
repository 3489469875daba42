//! Longest simple path search.
//!
//! Exact depth-first backtracking over the induced graph, seeded with a
//! greedy contiguous-walk scan of the password so that running out of budget
//! still leaves a valid (if conservative) answer.

use std::collections::HashSet;

use crate::graph::InducedGraph;

/// Result of the longest simple path search. `nodes` is the realizing node
/// sequence; `approximate` is set when the exact search could not finish
/// within its step budget.
#[derive(Debug, Clone)]
pub struct LongestPath {
    pub length: usize,
    pub nodes: Vec<usize>,
    pub approximate: bool,
}

/// Graphs wider than the visited bitmask skip the exact search entirely.
const MAX_EXACT_NODES: usize = 128;

/// Finds the longest simple path in the induced graph.
///
/// `password` is the character sequence the graph was built from; it seeds
/// the search with the longest contiguous typed run and breaks ties toward
/// the earliest-starting path (start nodes and neighbors are explored in
/// first-occurrence order, and only strictly longer paths replace the
/// incumbent). A graph of isolated nodes yields a single-node path.
///
/// The realizing node sequence spells a substring of the password whenever
/// the winning path is a contiguous typed run, which is the common case.
/// When the exact search stitches edges typed in separate places (say
/// `"ab1bc"`, whose graph holds the path a-b-c), the sequence is instead the
/// path's characters ordered by first occurrence, a subsequence of the
/// input.
pub fn longest_simple_path(graph: &InducedGraph, password: &[char], budget: usize) -> LongestPath {
    debug_assert!(!password.is_empty());

    let mut best = greedy_walk(graph, password);
    if graph.node_count() > MAX_EXACT_NODES {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            nodes = graph.node_count(),
            "induced graph too wide for exact path search, keeping greedy result"
        );
        best.approximate = true;
        return best;
    }

    let mut search = Search {
        graph,
        best_nodes: best.nodes,
        stack: Vec::with_capacity(graph.node_count()),
        seen: HashSet::new(),
        steps_left: budget,
    };
    for start in 0..graph.node_count() {
        search.stack.clear();
        search.stack.push(start);
        search.dfs(start, 1u128 << start);
        if search.steps_left == 0 {
            break;
        }
    }

    let exhausted = search.steps_left == 0;
    #[cfg(feature = "tracing")]
    if exhausted {
        tracing::debug!("path search budget exhausted, result is a lower bound");
    }

    let mut nodes = search.best_nodes;
    // orient toward the endpoint typed first
    if nodes.first() > nodes.last() {
        nodes.reverse();
    }
    LongestPath { length: nodes.len(), nodes, approximate: exhausted }
}

struct Search<'g> {
    graph: &'g InducedGraph,
    best_nodes: Vec<usize>,
    stack: Vec<usize>,
    /// Explored (node, visited-set) states. Reaching one again cannot extend
    /// further than the first visit did, since the visited set fixes both
    /// the path length so far and every reachable extension.
    seen: HashSet<(usize, u128)>,
    steps_left: usize,
}

impl Search<'_> {
    fn dfs(&mut self, node: usize, visited: u128) {
        if self.steps_left == 0 {
            return;
        }
        self.steps_left -= 1;

        if !self.seen.insert((node, visited)) {
            return;
        }
        if self.stack.len() > self.best_nodes.len() {
            self.best_nodes = self.stack.clone();
        }
        for &next in self.graph.neighbors(node) {
            if visited & (1u128 << next) != 0 {
                continue;
            }
            self.stack.push(next);
            self.dfs(next, visited | (1u128 << next));
            self.stack.pop();
        }
    }
}

/// Longest contiguous run of the password that walks the induced graph
/// without revisiting a node. Always a substring of the input; earliest
/// start wins ties.
fn greedy_walk(graph: &InducedGraph, password: &[char]) -> LongestPath {
    let mut best: Vec<usize> = vec![first_node(graph, password)];

    for start in 0..password.len() {
        let mut run = vec![graph
            .node_index(password[start])
            .unwrap_or_default()];
        let mut j = start;
        while j + 1 < password.len() {
            let here = run[run.len() - 1];
            let Some(next) = graph.node_index(password[j + 1]) else { break };
            if run.contains(&next) || !graph.neighbors(here).contains(&next) {
                break;
            }
            run.push(next);
            j += 1;
        }
        if run.len() > best.len() {
            best = run;
        }
    }

    LongestPath { length: best.len(), nodes: best, approximate: false }
}

fn first_node(graph: &InducedGraph, password: &[char]) -> usize {
    graph.node_index(password[0]).unwrap_or_default()
}
