//! Trigraph with exact undo.
//!
//! A [`Trigraph`] starts as a copy of a graph with all edges black. Each call to
//! [`Trigraph::contract`] merges one node into another following the twin-width
//! contraction rule and pushes a [`ContractionRecord`]; [`Trigraph::rollback`] pops the
//! latest record and restores edges, colors, and red degrees as they were before.

mod history;
pub use history::ContractionRecord;

use bitvec::prelude::*;
use log::trace;
use smallvec::SmallVec;

use crate::{errors::*, graph::*};

#[derive(Clone)]
pub struct Trigraph {
    graph: AdjArray,
    alive: BitVec,
    history: Vec<ContractionRecord>,

    /// scratch space of `contract`; `EdgeKind::None` for every node between calls
    marks: Vec<EdgeKind>,
}

impl Trigraph {
    /// Creates a trigraph on a private copy of `graph`: every edge is black, every red
    /// degree is zero, and the history is empty. The caller's graph is not touched.
    pub fn new<G: AdjacencyList>(graph: &G) -> Self {
        let mut copy = AdjArray::new(graph.number_of_nodes());
        for Edge(u, v) in graph.ordered_edges() {
            copy.add_edge(u, v, EdgeColor::Black);
        }
        Self::with_black_graph(copy)
    }

    /// Same as [`Trigraph::new`] but consumes the graph instead of copying it.
    /// Red edges of `graph` are recolored black.
    pub fn from_owned(mut graph: AdjArray) -> Self {
        for u in graph.vertices_range() {
            while let Some(&v) = graph.red_neighbors_of(u).first() {
                graph.try_add_edge(u, v, EdgeColor::Black);
            }
        }
        Self::with_black_graph(graph)
    }

    fn with_black_graph(graph: AdjArray) -> Self {
        debug_assert!(graph.red_degrees().all(|d| d == 0));
        let n = graph.len();
        Self {
            graph,
            alive: bitvec![1; n],
            history: Vec::new(),
            marks: vec![EdgeKind::None; n],
        }
    }

    /// Merges `removed` into `survivor` and returns the largest red degree in the closed
    /// neighborhood of `survivor` afterwards.
    ///
    /// A black edge `{survivor, v}` turns red unless `v` is a black neighbor of `removed`.
    /// Each neighbor of `removed` that is not adjacent to `survivor` becomes a red neighbor
    /// of `survivor`. Runs in time linear in the degrees of both nodes (times the cost
    /// of an edge update).
    ///
    /// # Panics
    /// If `survivor == removed` or either node was already removed.
    pub fn contract(&mut self, survivor: Node, removed: Node) -> NumNodes {
        assert_ne!(survivor, removed);
        assert!(self.is_alive(survivor), "node {survivor} was already removed");
        assert!(self.is_alive(removed), "node {removed} was already removed");

        let removed_edges: SmallVec<[(Node, EdgeColor); 8]> = self
            .graph
            .black_neighbors_of(removed)
            .iter()
            .map(|&u| (u, EdgeColor::Black))
            .chain(
                self.graph
                    .red_neighbors_of(removed)
                    .iter()
                    .map(|&u| (u, EdgeColor::Red)),
            )
            .collect();

        for &(u, color) in &removed_edges {
            self.marks[u as usize] = color.into();
        }

        let recolored: SmallVec<[Node; 8]> = self
            .graph
            .black_neighbors_of(survivor)
            .iter()
            .copied()
            .filter(|&v| v != removed && !self.marks[v as usize].is_black())
            .collect();

        // unmark common neighbors; the remaining marks are exactly the new neighbors
        for &v in self.graph.neighbors_of(survivor) {
            self.marks[v as usize] = EdgeKind::None;
        }

        let new_red: SmallVec<[Node; 8]> = removed_edges
            .iter()
            .map(|&(u, _)| u)
            .filter(|&u| u != survivor && self.marks[u as usize].is_some())
            .collect();

        for &(u, _) in &removed_edges {
            self.marks[u as usize] = EdgeKind::None;
        }

        // apply; removing all edges at `removed` also drops the red degree of its red neighbors
        self.graph.remove_edges_at_node(removed);
        self.alive.set(removed as usize, false);

        for &v in &recolored {
            let prev = self.graph.try_add_edge(survivor, v, EdgeColor::Red);
            debug_assert!(prev.is_black());
        }

        for &v in &new_red {
            self.graph.add_edge(survivor, v, EdgeColor::Red);
        }

        trace!(
            "contract {removed} into {survivor}: {} removed, {} new red, {} recolored",
            removed_edges.len(),
            new_red.len(),
            recolored.len()
        );

        self.history.push(ContractionRecord {
            survivor,
            removed,
            removed_edges,
            new_red,
            recolored,
        });

        self.max_red_degree_in_closed_neighborhood(survivor)
    }

    /// Undoes the latest contraction and returns its `(survivor, removed)` pair, or `None`
    /// if no contraction is left to undo.
    pub fn rollback(&mut self) -> Option<(Node, Node)> {
        let ContractionRecord {
            survivor,
            removed,
            removed_edges,
            new_red,
            recolored,
        } = self.history.pop()?;

        for v in new_red {
            let prev = self.graph.try_remove_edge(survivor, v);
            debug_assert!(prev.is_red());
        }

        for v in recolored {
            let prev = self.graph.try_add_edge(survivor, v, EdgeColor::Black);
            debug_assert!(prev.is_red());
        }

        self.alive.set(removed as usize, true);
        for (u, color) in removed_edges {
            self.graph.add_edge(removed, u, color);
        }

        trace!("rollback {removed} from {survivor}");

        Some((survivor, removed))
    }

    pub fn is_alive(&self, u: Node) -> bool {
        self.alive.get(u as usize).is_some_and(|b| *b)
    }

    pub fn number_of_alive_nodes(&self) -> NumNodes {
        self.alive.count_ones() as NumNodes
    }

    pub fn alive_nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.alive.iter_ones().map(|u| u as Node)
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[ContractionRecord] {
        &self.history
    }

    pub fn edge_kind(&self, u: Node, v: Node) -> EdgeKind {
        self.graph.type_of_edge(u, v)
    }

    /// Edges `(u, v, color)` with `u < v`
    pub fn colored_edges(&self) -> impl Iterator<Item = ColoredEdge> + '_ {
        self.graph.ordered_colored_edges()
    }

    /// Largest red degree of any node
    pub fn max_red_degree(&self) -> NumNodes {
        self.graph.red_degrees().max().unwrap_or(0)
    }

    fn max_red_degree_in_closed_neighborhood(&self, u: Node) -> NumNodes {
        self.graph
            .neighbors_of(u)
            .iter()
            .map(|&v| self.graph.red_degree_of(v))
            .max()
            .unwrap_or(0)
            .max(self.graph.red_degree_of(u))
    }
}

impl GraphNodeOrder for Trigraph {
    /// Number of nodes including removed ones
    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }
}

impl GraphEdgeOrder for Trigraph {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl AdjacencyList for Trigraph {
    fn neighbors_of(&self, u: Node) -> &[Node] {
        self.graph.neighbors_of(u)
    }
}

impl ColoredAdjacencyList for Trigraph {
    fn black_neighbors_of(&self, u: Node) -> &[Node] {
        self.graph.black_neighbors_of(u)
    }

    fn red_neighbors_of(&self, u: Node) -> &[Node] {
        self.graph.red_neighbors_of(u)
    }
}

impl AdjacencyTest for Trigraph {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.graph.has_edge(u, v)
    }
}

impl ColoredAdjacencyTest for Trigraph {
    fn type_of_edge(&self, u: Node, v: Node) -> EdgeKind {
        self.graph.type_of_edge(u, v)
    }
}

impl std::fmt::Debug for Trigraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trigraph {{ alive: {}, history: {}, graph: {:?} }}",
            self.number_of_alive_nodes(),
            self.history_depth(),
            self.graph
        )
    }
}

impl InvariantCheck<TrigraphInvariantError> for Trigraph {
    fn is_correct(&self) -> Result<(), TrigraphInvariantError> {
        for u in self.vertices_range() {
            for (neighbors, kind) in [
                (self.black_neighbors_of(u), EdgeKind::Black),
                (self.red_neighbors_of(u), EdgeKind::Red),
            ] {
                if let Some(&v) = neighbors.iter().find(|&&v| self.type_of_edge(v, u) != kind) {
                    return Err(TrigraphInvariantError::Asymmetric { u, v });
                }
            }

            let counted = self
                .neighbors_of(u)
                .iter()
                .filter(|&&v| self.type_of_edge(v, u).is_red())
                .count() as NumNodes;
            if counted != self.red_degree_of(u) {
                return Err(TrigraphInvariantError::RedDegree {
                    node: u,
                    reported: self.red_degree_of(u),
                    counted,
                });
            }

            if !self.is_alive(u) && self.degree_of(u) > 0 {
                return Err(TrigraphInvariantError::RemovedNodeNotIsolated {
                    node: u,
                    degree: self.degree_of(u),
                });
            }
        }

        let removed = self.alive.count_zeros();
        if removed != self.history.len() {
            return Err(TrigraphInvariantError::HistoryDepth {
                depth: self.history.len(),
                removed,
            });
        }

        Ok(())
    }
}
