use std::ops::Range;

use rand::{Rng, seq::SliceRandom};

use crate::graph::*;

/// Returns a uniformly random complete contraction sequence on `n` nodes; in each step two
/// distinct nodes that are still alive are picked and the second is merged into the first.
pub fn random_contraction_sequence(rng: &mut impl Rng, n: NumNodes) -> Vec<(Node, Node)> {
    let mut alive: Vec<Node> = (0..n).collect();
    alive.shuffle(rng);

    let mut seq = Vec::with_capacity(n.saturating_sub(1) as usize);
    while alive.len() > 1 {
        let removed = alive.swap_remove(rng.gen_range(0..alive.len()));
        let survivor = alive[rng.gen_range(0..alive.len())];
        seq.push((survivor, removed));
    }

    seq
}

/// Infinite stream of random `G(n,p)` graphs with `n` drawn from `nodes` and a random
/// complete contraction sequence for each of them.
pub fn random_graphs_with_sequences<R: Rng>(
    rng: &mut R,
    nodes: Range<NumNodes>,
) -> impl Iterator<Item = (AdjArray, Vec<(Node, Node)>)> + '_ {
    std::iter::repeat_with(move || {
        let n = rng.gen_range(nodes.clone());
        let p = rng.gen_range(0.05..0.7);
        let graph = AdjArray::random_black_gnp(rng, n, p);
        let seq = random_contraction_sequence(rng, n);
        (graph, seq)
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::ContractionSequence;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn sequences_are_complete() {
        let rng = &mut Pcg64::seed_from_u64(3);
        for n in 0..20 {
            let seq = random_contraction_sequence(rng, n);
            let cs = ContractionSequence::from_merges(n, seq);
            assert_eq!(cs.len(), n.saturating_sub(1));
            assert_eq!(cs.remaining_nodes().unwrap().count_ones(), n.min(1) as usize);
        }
    }
}
