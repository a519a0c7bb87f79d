//! Degeneracy ordering by bucket-queue peeling (Matula & Beck).
//!
//! The vertices are kept in a single permutation `order` that is grouped ascending by the
//! current degree. `pos` is the inverse permutation and `bucket_start[d]` points to the first
//! position of `order` that still holds a live degree-`d` vertex. Removing the vertex at the
//! front moves each of its live neighbors one bucket down by swapping it to the front of its
//! bucket and advancing that bucket's start. The whole peeling takes time `O(n + m)`.

use super::*;
use crate::errors::LabelingError;
use bitvec::prelude::*;

/// Result of [`Degeneracy::degeneracy_ordering`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DegeneracyOrdering {
    /// Maximum degree of a vertex at the time of its removal
    pub degeneracy: NumNodes,
    /// Vertices in removal order
    pub order: Vec<Node>,
}

pub trait Degeneracy: AdjacencyList {
    /// Computes the degeneracy and a degeneracy ordering of the graph.
    /// Nodes are `0..n` by construction of [`AdjacencyList`].
    fn degeneracy_ordering(&self) -> DegeneracyOrdering {
        let n = self.len();

        let mut degree: Vec<NumNodes> = self.degrees().collect();

        // counting sort of the nodes by degree
        let mut bucket_start = vec![0usize; n + 1];
        for &d in &degree {
            bucket_start[d as usize] += 1;
        }
        let mut sum = 0;
        for start in bucket_start.iter_mut() {
            let size = *start;
            *start = sum;
            sum += size;
        }

        let mut order: Vec<Node> = vec![0; n];
        let mut pos = vec![0usize; n];
        {
            let mut next = bucket_start.clone();
            for u in self.vertices_range() {
                let slot = &mut next[degree[u as usize] as usize];
                order[*slot] = u;
                pos[u as usize] = *slot;
                *slot += 1;
            }
        }

        let mut degeneracy = 0;
        for i in 0..n {
            let v = order[i];
            degeneracy = degeneracy.max(degree[v as usize]);

            for &u in self.neighbors_of(v) {
                let j = pos[u as usize];
                if j < i {
                    continue; // already removed
                }
                debug_assert!(i < j);

                let du = degree[u as usize] as usize;
                let swap_with = bucket_start[du].max(i + 1);
                if j != swap_with {
                    let w = order[swap_with];
                    order.swap(j, swap_with);
                    pos[u as usize] = swap_with;
                    pos[w as usize] = j;
                }

                // advance from the clamped position; the bucket of `v` itself may still
                // point at the already removed position `i`
                bucket_start[du] = swap_with + 1;
                degree[u as usize] -= 1;
            }
        }

        DegeneracyOrdering { degeneracy, order }
    }
}

impl<G: AdjacencyList> Degeneracy for G {}

/// Computes the degeneracy ordering of a graph given by an explicit vertex list.
/// The vertices have to be labeled exactly `0..n` (in any order); otherwise a
/// [`LabelingError`] is returned and nothing is computed.
pub fn degeneracy_of_labeled_graph(
    vertices: &[Node],
    edges: impl IntoIterator<Item = impl Into<Edge>>,
) -> Result<DegeneracyOrdering, LabelingError> {
    let n = vertices.len() as NumNodes;

    let mut seen = bitvec![0; vertices.len()];
    for &u in vertices {
        if u >= n {
            return Err(LabelingError::OutOfRange { node: u, n });
        }
        if seen.replace(u as usize, true) {
            return Err(LabelingError::Duplicate { node: u });
        }
    }

    let mut graph = AdjArray::new(n);
    for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
        if u >= n || v >= n || u == v {
            return Err(LabelingError::DanglingEdge { u, v });
        }
        graph.try_add_edge(u, v, EdgeColor::Black);
    }

    Ok(graph.degeneracy_ordering())
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    /// Replays the ordering and returns the largest number of live neighbors seen at removal
    fn max_live_degree_at_removal(graph: &AdjArray, order: &[Node]) -> NumNodes {
        let mut removed = bitvec![0; graph.len()];
        order
            .iter()
            .map(|&u| {
                let live = graph
                    .neighbors_of(u)
                    .iter()
                    .filter(|&&v| !removed[v as usize])
                    .count() as NumNodes;
                removed.set(u as usize, true);
                live
            })
            .max()
            .unwrap_or(0)
    }

    /// Asserts that each vertex has minimum live degree at the time of its removal
    fn assert_min_degree_first(graph: &AdjArray, order: &[Node]) {
        let mut live_degree: Vec<NumNodes> = graph.degrees().collect();
        let mut removed = bitvec![0; graph.len()];
        for &u in order {
            let min = graph
                .vertices_range()
                .filter(|&v| !removed[v as usize])
                .map(|v| live_degree[v as usize])
                .min()
                .unwrap();
            assert_eq!(live_degree[u as usize], min, "order: {order:?}");

            removed.set(u as usize, true);
            for &v in graph.neighbors_of(u) {
                live_degree[v as usize] -= 1;
            }
        }
    }

    fn assert_is_permutation(order: &[Node], n: NumNodes) {
        assert_eq!(order.iter().copied().sorted().collect_vec(), (0..n).collect_vec());
    }

    #[test]
    fn empty_and_singletons() {
        let res = AdjArray::new(0).degeneracy_ordering();
        assert_eq!(res.degeneracy, 0);
        assert!(res.order.is_empty());

        let res = AdjArray::new(5).degeneracy_ordering();
        assert_eq!(res.degeneracy, 0);
        assert_is_permutation(&res.order, 5);
    }

    #[test]
    fn cycles() {
        for n in 3..30 {
            let graph = AdjArray::from_edges(n, (0..n).map(|u| (u, (u + 1) % n)));
            let res = graph.degeneracy_ordering();

            assert_eq!(res.degeneracy, 2);
            assert_is_permutation(&res.order, n);
            assert!(max_live_degree_at_removal(&graph, &res.order) <= 2);
            assert_min_degree_first(&graph, &res.order);
        }
    }

    #[test]
    fn cliques() {
        for n in 1..20 {
            let graph = AdjArray::from_edges(n, (0..n).tuple_combinations::<(_, _)>());
            let res = graph.degeneracy_ordering();

            assert_eq!(res.degeneracy, n - 1);
            assert_is_permutation(&res.order, n);
        }
    }

    #[test]
    fn star_and_path() {
        let star = AdjArray::from_edges(6, (1..6).map(|u| (0, u)));
        let res = star.degeneracy_ordering();
        assert_eq!(res.degeneracy, 1);
        assert_eq!(*res.order.last().unwrap_or(&0), 0);

        let path = AdjArray::from_edges(7, (0..6).map(|u| (u, u + 1)));
        assert_eq!(path.degeneracy_ordering().degeneracy, 1);
    }

    #[test]
    fn random_graphs() {
        let rng = &mut Pcg64::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let n = rng.gen_range(1..40);
            let p = rng.gen_range(0.01..0.6);
            let graph = AdjArray::random_black_gnp(rng, n, p);
            let res = graph.degeneracy_ordering();

            assert_is_permutation(&res.order, n);

            // the ordering achieves the reported value ...
            assert_eq!(max_live_degree_at_removal(&graph, &res.order), res.degeneracy);
            assert_min_degree_first(&graph, &res.order);

            // ... and no vertex ordering can beat the minimum degree of the densest core
            let min_degree = graph.degrees().min().unwrap_or(0);
            assert!(res.degeneracy >= min_degree);
        }
    }

    #[test]
    fn labeled_graph() {
        let res = degeneracy_of_labeled_graph(&[2, 0, 1], [(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(res.degeneracy, 2);

        assert_eq!(
            degeneracy_of_labeled_graph(&[0, 1, 3], [(0, 1)]),
            Err(LabelingError::OutOfRange { node: 3, n: 3 })
        );
        assert_eq!(
            degeneracy_of_labeled_graph(&[0, 1, 1], [(0, 1)]),
            Err(LabelingError::Duplicate { node: 1 })
        );
        assert_eq!(
            degeneracy_of_labeled_graph(&[0, 1], [(0, 2)]),
            Err(LabelingError::DanglingEdge { u: 0, v: 2 })
        );
    }
}
