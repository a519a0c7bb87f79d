pub mod adj_array;
pub mod degeneracy;
pub mod edge;
pub mod gnp;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;

use std::ops::Range;

pub use adj_array::*;
pub use degeneracy::*;
pub use edge::*;
pub use gnp::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over all nodes. The range does not borrow self and hence
    /// may be used where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices_range().map(|u| self.$single(u))
        }
    };
}

pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns a slice of neighbors of a given vertex.
    /// ** Panics if the v >= n **
    fn neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of neighbors of from [`u`]
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    node_iterator!(degrees, degree_of, NumNodes);
    node_iterator!(neighbors, neighbors_of, &[Node]);

    /// Returns each undirected edge exactly once as `Edge(u, v)` with `u < v`
    fn ordered_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range().flat_map(move |u| {
            self.neighbors_of(u)
                .iter()
                .filter(move |&&v| u < v)
                .map(move |&v| Edge(u, v))
        })
    }
}

pub trait ColoredAdjacencyList: AdjacencyList {
    /// Returns a slice of black neighbors of a given vertex.
    /// ** Panics if the v >= n **
    fn black_neighbors_of(&self, u: Node) -> &[Node];

    /// Returns a slice of red neighbors of a given vertex.
    /// ** Panics if the v >= n **
    fn red_neighbors_of(&self, u: Node) -> &[Node];

    /// Returns the number of black neighbors of from [`u`]
    fn black_degree_of(&self, u: Node) -> NumNodes {
        self.black_neighbors_of(u).len() as NumNodes
    }

    /// Returns the number of red neighbors of from [`u`]
    fn red_degree_of(&self, u: Node) -> NumNodes {
        self.red_neighbors_of(u).len() as NumNodes
    }

    node_iterator!(black_degrees, black_degree_of, NumNodes);
    node_iterator!(red_degrees, red_degree_of, NumNodes);

    /// Returns each undirected colored edge exactly once with `u < v`
    fn ordered_colored_edges(&self) -> impl Iterator<Item = ColoredEdge> + '_ {
        self.vertices_range().flat_map(move |u| {
            let black = self
                .black_neighbors_of(u)
                .iter()
                .map(move |&v| ColoredEdge(u, v, EdgeColor::Black));
            let red = self
                .red_neighbors_of(u)
                .iter()
                .map(move |&v| ColoredEdge(u, v, EdgeColor::Red));
            black.chain(red).filter(|e| e.is_normalized())
        })
    }
}

/// Provides efficient tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains the undirected edge {u, v}
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

pub trait ColoredAdjacencyTest: AdjacencyTest {
    fn has_black_edge(&self, u: Node, v: Node) -> bool {
        self.type_of_edge(u, v).is_black()
    }

    fn has_red_edge(&self, u: Node, v: Node) -> bool {
        self.type_of_edge(u, v).is_red()
    }

    fn type_of_edge(&self, u: Node, v: Node) -> EdgeKind;
}

pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the undirected edge {u, v} with the given color.
    /// ** Panics if the edge is already contained or possibly if u, v >= n **
    fn add_edge(&mut self, u: Node, v: Node, color: EdgeColor) {
        assert!(self.try_add_edge(u, v, color).is_none())
    }

    /// Adds the undirected edge {u, v} or recolors it if it already exists.
    /// Returns the kind of the edge before the call.
    /// ** Can panic if u, v >= n, depending on implementation **
    fn try_add_edge(&mut self, u: Node, v: Node, color: EdgeColor) -> EdgeKind;

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>, color: EdgeColor) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v, color);
        }
    }

    /// Removes the undirected edge {u, v}.
    /// ** Panics if the edge is not present or u, v >= n **
    fn remove_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_remove_edge(u, v).is_some())
    }

    /// Removes the undirected edge {u, v} and returns its kind before the removal
    /// (`EdgeKind::None` if it did not exist).
    /// ** Panics if u, v >= n **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> EdgeKind;

    /// Removes all edges incident to node u
    fn remove_edges_at_node(&mut self, u: Node);
}
