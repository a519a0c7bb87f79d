use super::*;
use std::fmt;

/// Adjacency array of a trigraph. Each neighborhood is stored as a single vector
/// whose prefix holds the black neighbors and whose suffix holds the red neighbors;
/// hence the red degree of a node is maintained implicitly by every edge update.
#[derive(Clone)]
pub struct AdjArray {
    adj: Vec<Neighborhood>,
    number_of_edges: NumEdges,
}

macro_rules! forward {
    ($single : ident, $internal : ident, $type : ty) => {
        fn $single(&self, node: Node) -> $type {
            self.adj[node as usize].$internal()
        }
    };
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl AdjacencyList for AdjArray {
    forward!(neighbors_of, neighbors, &[Node]);
    forward!(degree_of, degree, NumNodes);
}

impl ColoredAdjacencyList for AdjArray {
    forward!(black_neighbors_of, black_neighbors, &[Node]);
    forward!(red_neighbors_of, red_neighbors, &[Node]);
    forward!(black_degree_of, black_degree, NumNodes);
    forward!(red_degree_of, red_degree, NumNodes);
}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].has_neighbor(v)
    }
}

impl ColoredAdjacencyTest for AdjArray {
    fn type_of_edge(&self, u: Node, v: Node) -> EdgeKind {
        self.adj[u as usize].edge_type_with(v)
    }
}

impl GraphNew for AdjArray {
    fn new(number_of_nodes: NumNodes) -> Self {
        Self {
            adj: vec![Default::default(); number_of_nodes as usize],
            number_of_edges: 0,
        }
    }
}

impl GraphEdgeEditing for AdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node, color: EdgeColor) -> EdgeKind {
        debug_assert_ne!(u, v);
        let prev = self.adj[u as usize].try_add_edge(v, color);

        if prev != color {
            assert_eq!(self.adj[v as usize].try_add_edge(u, color), prev)
        }

        if prev.is_none() {
            self.number_of_edges += 1;
        }

        prev
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> EdgeKind {
        let prev = self.adj[u as usize].try_delete_edge(v);

        if prev.is_some() {
            let _other = self.adj[v as usize].try_delete_edge(u);
            debug_assert_eq!(prev, _other);
            self.number_of_edges -= 1;
        }

        prev
    }

    fn remove_edges_at_node(&mut self, u: Node) {
        let neighbors = std::mem::take(&mut self.adj[u as usize]);
        self.number_of_edges -= neighbors.nodes.len() as NumEdges;

        for &v in &neighbors.nodes {
            assert!(self.adj[v as usize].try_delete_edge(u).is_some());
        }
    }
}

impl AdjArray {
    /// Builds a graph with black edges only. Duplicates (in either direction) are stored once.
    pub fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut graph = Self::new(n);
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            graph.try_add_edge(u, v, EdgeColor::Black);
        }
        graph
    }

    /// Builds a black graph on the smallest node range that covers all edges
    pub fn test_only_from(edges: impl Clone + IntoIterator<Item = impl Into<Edge>>) -> Self {
        let n = edges
            .clone()
            .into_iter()
            .map(|e| e.into())
            .map(|e| e.0.max(e.1) + 1)
            .max()
            .unwrap_or(0);

        Self::from_edges(n, edges)
    }
}

#[derive(Default, Clone)]
struct Neighborhood {
    nodes: Vec<Node>,
    red_degree: NumNodes,
}

impl Neighborhood {
    fn degree(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }

    fn black_degree(&self) -> NumNodes {
        self.nodes.len() as NumNodes - self.red_degree
    }

    fn red_degree(&self) -> NumNodes {
        self.red_degree
    }

    fn neighbors(&self) -> &[Node] {
        &self.nodes
    }

    fn black_neighbors(&self) -> &[Node] {
        &self.nodes[0..self.black_degree() as usize]
    }

    fn red_neighbors(&self) -> &[Node] {
        &self.nodes[self.black_degree() as usize..]
    }

    fn edge_type_with(&self, v: Node) -> EdgeKind {
        self.find_neighbor(v).1
    }

    fn has_neighbor(&self, v: Node) -> bool {
        self.nodes.contains(&v)
    }

    fn try_add_edge(&mut self, v: Node, kind: EdgeColor) -> EdgeKind {
        let (position, previous) = self.find_neighbor(v);

        match (previous, position) {
            (EdgeKind::None, _) => {
                self.push_red(v);
                if kind.is_black() {
                    self.recolor_red_to_black(self.nodes.len() - 1);
                }
            }

            (EdgeKind::Black, Some(idx)) if kind.is_red() => {
                self.recolor_black_to_red(idx);
            }

            (EdgeKind::Red, Some(idx)) if kind.is_black() => {
                self.recolor_red_to_black(idx);
            }

            _ => {}
        }

        previous
    }

    fn find_neighbor(&self, v: Node) -> (Option<usize>, EdgeKind) {
        let position = self.nodes.iter().position(|&x| x == v);

        match position {
            None => (None, EdgeKind::None),
            Some(x) if x < self.black_degree() as usize => (Some(x), EdgeKind::Black),
            Some(x) => (Some(x), EdgeKind::Red),
        }
    }

    fn try_delete_edge(&mut self, v: Node) -> EdgeKind {
        let (position, previous) = self.find_neighbor(v);

        let Some(position) = position else {
            return EdgeKind::None;
        };

        // move the entry into the red suffix; then swap_remove keeps the partition intact
        let idx = if previous.is_black() {
            self.recolor_black_to_red(position)
        } else {
            position
        };

        self.nodes.swap_remove(idx);
        self.red_degree -= 1;

        previous
    }

    fn push_red(&mut self, v: Node) {
        self.nodes.push(v);
        self.red_degree += 1;
    }

    fn recolor_red_to_black(&mut self, idx: usize) -> usize {
        let first_red = self.black_degree() as usize;
        debug_assert!(idx >= first_red);
        self.nodes.swap(first_red, idx);
        self.red_degree -= 1;
        first_red
    }

    fn recolor_black_to_red(&mut self, idx: usize) -> usize {
        debug_assert!(self.black_degree() > 0);
        let last_black = self.black_degree() as usize - 1;
        debug_assert!(idx <= last_black);
        self.nodes.swap(last_black, idx);
        self.red_degree += 1;
        last_black
    }
}

impl fmt::Debug for AdjArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use super::super::io::DotWriter;
        use std::str;

        let mut buf = Vec::new();
        if self.try_write_dot(&mut buf).is_ok() {
            f.write_str(str::from_utf8(&buf).map_err(|_| fmt::Error)?.trim())?;
        }

        Ok(())
    }
}
