//! Twin-width of a contraction sequence computed from first principles.
//!
//! The sequence is normalized first, so the `t`-th merge `(p, v)` removes the label `v`
//! and `phi[t] = v` for `t < n - 1`; the label `n - 1` is never removed and occupies the
//! last slot. After `t` merges exactly the slots `t..n` are alive. Then `r(t, i, j)`, with
//! `t <= i < j`, states whether slots `i` and `j` share a red edge after `t` merges:
//!
//!  - `r(0, i, j)` is false,
//!  - a red edge stays red,
//!  - after merging `v` into `p`, the edge between the slot of `p` and another slot turns
//!    red if the slot of `v` had a red edge to it, or if the other slot's label is adjacent
//!    to exactly one of `v` and `p` in the input graph.
//!
//! Only the input graph is consulted; no trigraph is maintained. Since `r(t, ..)` only
//! depends on `r(t - 1, ..)` and touches the slots `t..n`, a single triangular bit matrix
//! is updated in place layer by layer. Time is cubic and memory quadratic in `n`.

use std::iter;

use bitvec::prelude::*;
use log::debug;

use crate::{errors::SequenceError, graph::*, utils::ContractionSequence};

/// Symmetric boolean relation on `0..n` without the diagonal
struct TriangularMatrix {
    bits: BitVec,
}

impl TriangularMatrix {
    fn new(n: usize) -> Self {
        Self {
            bits: bitvec![0; n * n.saturating_sub(1) / 2],
        }
    }

    fn index(i: usize, j: usize) -> usize {
        debug_assert_ne!(i, j);
        let (i, j) = (i.min(j), i.max(j));
        j * (j - 1) / 2 + i
    }

    fn get(&self, i: usize, j: usize) -> bool {
        self.bits[Self::index(i, j)]
    }

    fn set(&mut self, i: usize, j: usize) {
        self.bits.set(Self::index(i, j), true);
    }
}

/// Computes the twin-width of `seq` on `graph` without maintaining a trigraph.
/// Returns the same value (and the same errors) as
/// [`crate::utils::verify_contraction_sequence`]; intended as a cross-check on small graphs.
pub fn recursive_twin_width<G>(graph: &G, seq: &[(Node, Node)]) -> Result<NumNodes, SequenceError>
where
    G: GraphNodeOrder + AdjacencyTest,
{
    let n = graph.number_of_nodes();
    if n == 0 {
        return if seq.is_empty() {
            Ok(0)
        } else {
            Err(SequenceError::NonEmptyForEmptyGraph(seq.len()))
        };
    }

    if seq.len() != n as usize - 1 {
        return Err(SequenceError::LengthMismatch {
            expected: n as usize - 1,
            actual: seq.len(),
        });
    }

    let raw = ContractionSequence::from_merges(n, seq.iter().copied());
    raw.remaining_nodes()?;
    let normalized = raw.normalized()?;
    let merges = normalized.merges();

    let phi: Vec<Node> = merges
        .iter()
        .map(|&(_, v)| v)
        .chain(iter::once(n - 1))
        .collect();

    let n = n as usize;
    let mut red = TriangularMatrix::new(n);
    let mut twin_width = 0;

    for t in 1..n {
        let (p, v) = merges[t - 1];
        debug_assert!(p > v);
        debug_assert_eq!(phi[t - 1], v);

        for j in t..n {
            for i in t..j {
                if red.get(i, j) {
                    continue;
                }

                let turns_red = [(i, j), (j, i)].into_iter().any(|(slot, other)| {
                    if phi[slot] != p {
                        return false;
                    }

                    // transfer from the removed slot, which is not updated in this layer
                    if red.get(t - 1, other) {
                        return true;
                    }

                    let q = phi[other];
                    graph.has_edge(q, v) != graph.has_edge(q, p)
                });

                if turns_red {
                    red.set(i, j);
                }
            }
        }

        for i in t..n {
            let red_degree = (t..n).filter(|&j| j != i && red.get(i, j)).count();
            twin_width = twin_width.max(red_degree as NumNodes);
        }
    }

    debug!("recursive twin-width of {} merges on {n} nodes: {twin_width}", seq.len());

    Ok(twin_width)
}
