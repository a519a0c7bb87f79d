use smallvec::SmallVec;

use crate::graph::*;

/// Undo information of a single contraction merging `removed` into `survivor`.
///
/// Together with the state right after the contraction, the record determines the
/// state right before it:
///  - `removed_edges` are all edges that were incident to `removed`, with their colors,
///  - `new_red` are the red edges `{survivor, v}` that did not exist before,
///  - `recolored` are the edges `{survivor, v}` that were black before and are red now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractionRecord {
    pub(super) survivor: Node,
    pub(super) removed: Node,
    pub(super) removed_edges: SmallVec<[(Node, EdgeColor); 8]>,
    pub(super) new_red: SmallVec<[Node; 8]>,
    pub(super) recolored: SmallVec<[Node; 8]>,
}

impl ContractionRecord {
    pub fn survivor(&self) -> Node {
        self.survivor
    }

    pub fn removed(&self) -> Node {
        self.removed
    }

    pub fn removed_edges(&self) -> &[(Node, EdgeColor)] {
        &self.removed_edges
    }

    pub fn new_red_neighbors(&self) -> &[Node] {
        &self.new_red
    }

    pub fn recolored_neighbors(&self) -> &[Node] {
        &self.recolored
    }
}
