use std::io::{BufRead, Write};

use bitvec::prelude::*;
use log::{debug, trace};
use serde::Serialize;

use crate::{
    errors::{FormatError, SequenceError},
    graph::*,
    io::PaceReader,
    trigraph::Trigraph,
};

/// Sequence of merges `(survivor, removed)`; each merge removes `removed` by contracting
/// it into `survivor`. A complete sequence of a graph with `n > 0` nodes has `n - 1` merges.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct ContractionSequence {
    #[serde(skip_serializing)]
    num_nodes: NumNodes,

    seq: Vec<(Node, Node)>,
}

impl ContractionSequence {
    pub fn new(num_nodes: NumNodes) -> Self {
        Self {
            seq: Vec::new(),
            num_nodes,
        }
    }

    pub fn with_capacity(num_nodes: NumNodes) -> Self {
        Self {
            seq: Vec::with_capacity(num_nodes.saturating_sub(1) as usize),
            num_nodes,
        }
    }

    /// Takes the merges as `(survivor, removed)` pairs without checking them
    pub fn from_merges(num_nodes: NumNodes, merges: impl IntoIterator<Item = (Node, Node)>) -> Self {
        Self {
            seq: merges.into_iter().collect(),
            num_nodes,
        }
    }

    pub fn merge_node_into(&mut self, removed: Node, survivor: Node) {
        self.seq.push((survivor, removed))
    }

    pub fn merges(&self) -> &[(Node, Node)] {
        &self.seq
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    pub fn len(&self) -> NumNodes {
        self.merges().len() as NumNodes
    }

    pub fn is_empty(&self) -> bool {
        self.merges().is_empty()
    }

    /// Returns the nodes that are not removed by the sequence, or the first step that
    /// references a node outside `0..n`, merges a node into itself, or uses a removed node.
    /// Unlike [`ContractionSequence::verify`] no trigraph is built.
    pub fn remaining_nodes(&self) -> Result<BitVec, SequenceError> {
        let mut alive = bitvec![1; self.num_nodes as usize];

        for (step, &(survivor, removed)) in self.seq.iter().enumerate() {
            for node in [survivor, removed] {
                if !alive.get(node as usize).is_some_and(|b| *b) {
                    return Err(SequenceError::UnknownVertex { step, node });
                }
            }

            if survivor == removed {
                return Err(SequenceError::SelfMerge {
                    step,
                    node: survivor,
                });
            }

            alive.set(removed as usize, false);
        }

        Ok(alive)
    }

    /// Replays the sequence on a private trigraph of `graph` and returns the largest red
    /// degree ever observed. See [`verify_contraction_sequence`].
    pub fn verify<G: AdjacencyList>(&self, graph: &G) -> Result<NumNodes, SequenceError> {
        verify_contraction_sequence(graph, &self.seq)
    }

    /// Relabels the merges such that each pair `(u, v)` satisfies `u > v` and the merged
    /// node continues under the larger label. See [`normalize_contraction_sequence`].
    pub fn normalized(&self) -> Result<Self, SequenceError> {
        Ok(Self {
            seq: normalize_contraction_sequence(self.num_nodes, &self.seq)?,
            num_nodes: self.num_nodes,
        })
    }

    /// Writes one line `survivor removed` (1-indexed) per merge
    pub fn pace_writer<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for &(sur, rem) in &self.seq {
            writeln!(writer, "{} {}", sur + 1, rem + 1)?;
        }
        Ok(())
    }

    /// Parses solver output, i.e. lines `u v` (1-indexed) meaning "merge `v` into `u`".
    /// Blank lines and comment lines starting with `c` are skipped.
    pub fn pace_reader<R: BufRead>(
        reader: R,
        number_of_nodes: NumNodes,
    ) -> Result<Self, FormatError> {
        let reader = PaceReader::new_contraction_sequence(reader, number_of_nodes);
        let mut cs = ContractionSequence::with_capacity(number_of_nodes);
        for edge in reader {
            let Edge(sur, rem) = edge?;
            cs.merge_node_into(rem, sur);
        }
        Ok(cs)
    }
}

/// Checks that `seq` contracts `graph` into a single node and returns the twin-width of
/// the sequence, i.e. the maximum red degree seen after any merge. The graph itself is
/// not modified.
///
/// A graph without nodes only accepts the empty sequence. Otherwise the sequence needs
/// exactly `n - 1` merges `(survivor, removed)` of two distinct nodes that both still
/// exist at the time of the merge.
pub fn verify_contraction_sequence<G: AdjacencyList>(
    graph: &G,
    seq: &[(Node, Node)],
) -> Result<NumNodes, SequenceError> {
    let n = graph.number_of_nodes();
    if n == 0 {
        return if seq.is_empty() {
            Ok(0)
        } else {
            Err(SequenceError::NonEmptyForEmptyGraph(seq.len()))
        };
    }

    let expected = n as usize - 1;
    if seq.len() != expected {
        return Err(SequenceError::LengthMismatch {
            expected,
            actual: seq.len(),
        });
    }

    let mut trigraph = Trigraph::new(graph);
    let mut twin_width = 0;

    for (step, &(survivor, removed)) in seq.iter().enumerate() {
        for node in [survivor, removed] {
            if !trigraph.is_alive(node) {
                return Err(SequenceError::UnknownVertex { step, node });
            }
        }

        if survivor == removed {
            return Err(SequenceError::SelfMerge {
                step,
                node: survivor,
            });
        }

        let width = trigraph.contract(survivor, removed);
        trace!("step {step}: merged {removed} into {survivor} with width {width}");
        twin_width = twin_width.max(width);
    }

    debug!("verified {expected} merges on {n} nodes; twin-width {twin_width}");

    Ok(twin_width)
}

/// Translates a sequence of `(i, j)` merges into stable labels: every node starts with its
/// own id as label and after the merge both `i` and `j` carry the larger of their labels.
/// The emitted pair is `(larger, smaller)`, so each pair satisfies `u > v` and `v` is the
/// label that vanishes.
///
/// Only the labels `0..n` exist; indices outside are reported as unknown.
pub fn normalize_contraction_sequence(
    num_nodes: NumNodes,
    seq: &[(Node, Node)],
) -> Result<Vec<(Node, Node)>, SequenceError> {
    let mut label: Vec<Node> = (0..num_nodes).collect();

    seq.iter()
        .enumerate()
        .map(|(step, &(i, j))| {
            for node in [i, j] {
                if node >= num_nodes {
                    return Err(SequenceError::UnknownVertex { step, node });
                }
            }

            let (li, lj) = (label[i as usize], label[j as usize]);
            if li == lj {
                return Err(SequenceError::SelfMerge { step, node: li });
            }

            let (u, v) = (li.max(lj), li.min(lj));
            label[i as usize] = u;
            label[j as usize] = u;
            Ok((u, v))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn empty_graph() {
        let graph = AdjArray::new(0);
        assert_eq!(verify_contraction_sequence(&graph, &[]), Ok(0));
        assert_eq!(
            verify_contraction_sequence(&graph, &[(0, 1)]),
            Err(SequenceError::NonEmptyForEmptyGraph(1))
        );
    }

    #[test]
    fn single_node() {
        let graph = AdjArray::new(1);
        assert_eq!(verify_contraction_sequence(&graph, &[]), Ok(0));
        assert_eq!(
            verify_contraction_sequence(&graph, &[(0, 0)]),
            Err(SequenceError::LengthMismatch {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn single_edge() {
        let graph = AdjArray::test_only_from([(0, 1)]);
        assert_eq!(verify_contraction_sequence(&graph, &[(0, 1)]), Ok(0));
        assert_eq!(verify_contraction_sequence(&graph, &[(1, 0)]), Ok(0));
    }

    #[test]
    fn star() {
        let graph = AdjArray::test_only_from([(0, 1), (0, 2), (0, 3)]);
        let cs = ContractionSequence::from_merges(4, [(1, 2), (1, 3), (0, 1)]);
        assert_eq!(cs.verify(&graph), Ok(0));

        // absorbing one leaf turns the edges to the other leaves red
        let cs = ContractionSequence::from_merges(4, [(0, 1), (0, 2), (0, 3)]);
        assert_eq!(cs.verify(&graph), Ok(2));

        // merging the center into a leaf first leaves the other leaves with a red edge
        let cs = ContractionSequence::from_merges(4, [(1, 0), (1, 2), (1, 3)]);
        assert_eq!(cs.verify(&graph), Ok(2));
    }

    #[test]
    fn cycles() {
        // merging the neighbor of the previous survivor keeps a path with two red edges
        for n in 5..12 {
            let graph = AdjArray::from_edges(n, (0..n).map(|u| (u, (u + 1) % n)));
            let cs = ContractionSequence::from_merges(n, (1..n).map(|u| (0, u)));
            assert_eq!(cs.verify(&graph), Ok(2), "n={n}");
        }
    }

    #[test]
    fn does_not_touch_graph() {
        let graph = AdjArray::test_only_from([(0, 1), (1, 2), (2, 3)]);
        let before = graph.ordered_colored_edges().collect_vec();
        verify_contraction_sequence(&graph, &[(0, 3), (0, 2), (0, 1)]).unwrap();
        assert_eq!(graph.ordered_colored_edges().collect_vec(), before);
    }

    #[test]
    fn errors() {
        let graph = AdjArray::test_only_from([(0, 1), (1, 2)]);

        assert_eq!(
            verify_contraction_sequence(&graph, &[(0, 1)]),
            Err(SequenceError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            verify_contraction_sequence(&graph, &[(0, 1), (1, 2)]),
            Err(SequenceError::UnknownVertex { step: 1, node: 1 })
        );
        assert_eq!(
            verify_contraction_sequence(&graph, &[(0, 1), (0, 7)]),
            Err(SequenceError::UnknownVertex { step: 1, node: 7 })
        );
        assert_eq!(
            verify_contraction_sequence(&graph, &[(2, 2), (0, 1)]),
            Err(SequenceError::SelfMerge { step: 0, node: 2 })
        );
    }

    #[test]
    fn remaining_nodes() {
        let cs = ContractionSequence::from_merges(5, [(0, 1), (3, 2)]);
        assert_eq!(cs.remaining_nodes().unwrap().iter_ones().collect_vec(), [0, 3, 4]);

        let cs = ContractionSequence::from_merges(5, [(0, 1), (3, 2), (1, 4)]);
        assert_eq!(
            cs.remaining_nodes(),
            Err(SequenceError::UnknownVertex { step: 2, node: 1 })
        );

        let cs = ContractionSequence::from_merges(5, [(4, 4)]);
        assert_eq!(
            cs.remaining_nodes(),
            Err(SequenceError::SelfMerge { step: 0, node: 4 })
        );
    }

    #[test]
    fn normalize() {
        assert_eq!(
            normalize_contraction_sequence(4, &[(0, 1), (0, 2), (0, 3)]).unwrap(),
            [(1, 0), (2, 1), (3, 2)]
        );
        assert_eq!(
            normalize_contraction_sequence(4, &[(3, 0), (1, 2), (1, 3)]).unwrap(),
            [(3, 0), (2, 1), (3, 2)]
        );
        assert_eq!(
            normalize_contraction_sequence(3, &[(0, 5)]),
            Err(SequenceError::UnknownVertex { step: 0, node: 5 })
        );
    }

    #[test]
    fn normalized_pairs_are_ordered_and_equivalent() {
        let rng = &mut Pcg64::seed_from_u64(0x0123);

        for (graph, seq) in random_graphs_with_sequences(rng, 2..30).take(300) {
            let n = graph.number_of_nodes();
            let normalized = ContractionSequence::from_merges(n, seq.iter().copied())
                .normalized()
                .unwrap();

            assert!(normalized.merges().iter().all(|&(u, v)| u > v));

            // each label vanishes at most once and the largest label survives
            let removed = normalized.merges().iter().map(|&(_, v)| v).sorted().collect_vec();
            assert_eq!(removed, (0..n - 1).collect_vec());

            // labels are node ids of the merged parts, so the width does not change
            assert_eq!(
                normalized.verify(&graph),
                verify_contraction_sequence(&graph, &seq)
            );
        }
    }

    #[test]
    fn pace_roundtrip() {
        let cs = ContractionSequence::pace_reader("c comment\n2 1\n\n2 3\n".as_bytes(), 3).unwrap();
        assert_eq!(cs.merges(), [(1, 0), (1, 2)]);

        let mut buffer = Vec::new();
        cs.pace_writer(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "2 1\n2 3\n");

        for input in ["0 1\n", "1\n", "1 2 3\n", "a b\n"] {
            assert!(
                matches!(
                    ContractionSequence::pace_reader(input.as_bytes(), 3),
                    Err(FormatError::InvalidData { .. })
                ),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn serialize() {
        let cs = ContractionSequence::from_merges(3, [(0, 1), (0, 2)]);
        assert_eq!(serde_json::to_string(&cs).unwrap(), r#"{"seq":[[0,1],[0,2]]}"#);
    }
}
