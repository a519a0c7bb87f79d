use crate::graph::*;
use rand::Rng;
use rand_distr::Geometric;

pub trait GnpGenerator: Sized {
    /// Samples a Gilbert graph `G(n, p)` with black edges only: each of the `n(n-1)/2`
    /// node pairs is an edge independently with probability `p`.
    ///
    /// # Panics
    /// If `p` is not within `[0, 1]`.
    fn random_black_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self;
}

impl<G: GraphEdgeEditing> GnpGenerator for G {
    fn random_black_gnp<R: Rng>(rng: &mut R, n: Node, p: f64) -> Self {
        assert!((0.0..=1.0).contains(&p), "edge probability {p} not in [0, 1]");

        let mut graph = Self::new(n);
        let Ok(gaps) = Geometric::new(p) else {
            return graph;
        };

        // pairs are numbered row by row: row `v` holds the pairs (0, v) .. (v - 1, v),
        // so the number of pairs skipped between two edges is geometrically distributed
        let pairs = n as u64 * (n as u64).saturating_sub(1) / 2;
        let (mut row, mut row_begin) = (1u64, 0u64);
        let mut next = 0u64;

        loop {
            next = match next.checked_add(rng.sample(gaps)) {
                Some(k) if k < pairs => k,
                _ => break,
            };

            while next >= row_begin + row {
                row_begin += row;
                row += 1;
            }

            graph.add_edge((next - row_begin) as Node, row as Node, EdgeColor::Black);
            next += 1;
        }

        graph
    }
}
