//! Induced graph builder
//!
//! Builds the small per-request graph over the distinct characters of a
//! password. Edges are restricted to weak relations the user actually typed:
//! a reference relation survives only when its two endpoints occur as a
//! consecutive pair somewhere in the password.

use std::collections::HashMap;

use crate::reference::{ReferenceGraph, RelationSet};

/// Undirected edge between two node indices. `a == b` marks the self-loop a
/// consecutively repeated character creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InducedEdge {
    pub a: usize,
    pub b: usize,
    pub kinds: RelationSet,
}

impl InducedEdge {
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Request-scoped graph over the distinct characters of one password.
///
/// Nodes are compact indices in first-occurrence order; nothing here outlives
/// the request and nothing is shared across requests.
#[derive(Debug)]
pub struct InducedGraph {
    nodes: Vec<char>,
    edges: Vec<InducedEdge>,
    adjacency: Vec<Vec<usize>>,
    loops: Vec<bool>,
}

impl InducedGraph {
    /// Builds the induced graph in O(password length): one reference lookup
    /// per consecutive character pair.
    pub fn build(password: &str, reference: &ReferenceGraph) -> InducedGraph {
        let chars: Vec<char> = password.chars().collect();

        let mut nodes = Vec::new();
        let mut index: HashMap<char, usize> = HashMap::new();
        for &c in &chars {
            index.entry(c).or_insert_with(|| {
                nodes.push(c);
                nodes.len() - 1
            });
        }

        let mut graph = InducedGraph {
            adjacency: vec![Vec::new(); nodes.len()],
            loops: vec![false; nodes.len()],
            nodes,
            edges: Vec::new(),
        };

        let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();
        for pair in chars.windows(2) {
            let kinds = reference.relations(pair[0], pair[1]);
            if kinds.is_empty() {
                continue;
            }
            let (mut a, mut b) = (index[&pair[0]], index[&pair[1]]);
            if a > b {
                std::mem::swap(&mut a, &mut b);
            }
            match edge_index.get(&(a, b)) {
                Some(&e) => {
                    // relation seen again from another position: union kinds
                    graph.edges[e].kinds = graph.edges[e].kinds.union(kinds);
                }
                None => {
                    edge_index.insert((a, b), graph.edges.len());
                    graph.edges.push(InducedEdge { a, b, kinds });
                    if a == b {
                        graph.loops[a] = true;
                    } else {
                        graph.adjacency[a].push(b);
                        graph.adjacency[b].push(a);
                    }
                }
            }
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct password characters, first-occurrence order.
    pub fn nodes(&self) -> &[char] {
        &self.nodes
    }

    /// All edges, self-loops included.
    pub fn edges(&self) -> &[InducedEdge] {
        &self.edges
    }

    /// Edges excluding self-loops; the input to path and cover searches.
    pub fn simple_edges(&self) -> impl Iterator<Item = &InducedEdge> {
        self.edges.iter().filter(|e| !e.is_loop())
    }

    /// Loop-free neighbors of `node`, in the order their edges were first
    /// typed.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Index of the node holding `c`, if the character occurs in the
    /// password. Linear scan; node counts stay tiny.
    pub fn node_index(&self, c: char) -> Option<usize> {
        self.nodes.iter().position(|&n| n == c)
    }

    pub fn has_loop(&self, node: usize) -> bool {
        self.loops[node]
    }

    /// Edge-multiplicity degree: incident loop-free edges, plus one for a
    /// self-loop.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len() + usize::from(self.loops[node])
    }
}
