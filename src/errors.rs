use std::error::Error;

use thiserror::Error;

use crate::graph::{Node, NumEdges, NumNodes};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Reasons why a contraction sequence is rejected for a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("incomplete sequence: expected {expected} contractions but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("node {node} does not exist in the graph at time {step}")]
    UnknownVertex { step: usize, node: Node },

    #[error("the graph is empty but the sequence contains {0} contractions")]
    NonEmptyForEmptyGraph(usize),

    #[error("node {node} is merged into itself at time {step}")]
    SelfMerge { step: usize, node: Node },
}

/// Raised if a vertex list does not label its vertices exactly `0..n`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelingError {
    #[error("vertices must be labeled from 0 to n-1; found {node} with n={n}")]
    OutOfRange { node: Node, n: NumNodes },

    #[error("vertex {node} is listed more than once")]
    Duplicate { node: Node },

    #[error("edge ({u}, {v}) does not connect two distinct listed vertices")]
    DanglingEdge { u: Node, v: Node },
}

/// Errors while reading graphs or contraction sequences in the PACE format
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    InvalidData { line: usize, reason: String },

    #[error("no header found")]
    MissingHeader,

    #[error("inconsistent edges: header declares {declared} but {found} were read")]
    EdgeCountMismatch { declared: NumEdges, found: NumEdges },
}

/// Violations reported by [`crate::trigraph::Trigraph`]'s invariant check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrigraphInvariantError {
    #[error("edge ({u}, {v}) is not stored symmetrically")]
    Asymmetric { u: Node, v: Node },

    #[error("node {node} reports red degree {reported} but has {counted} red edges")]
    RedDegree {
        node: Node,
        reported: NumNodes,
        counted: NumNodes,
    },

    #[error("removed node {node} still has {degree} incident edges")]
    RemovedNodeNotIsolated { node: Node, degree: NumNodes },

    #[error("history holds {depth} records but {removed} nodes are removed")]
    HistoryDepth { depth: usize, removed: usize },
}
