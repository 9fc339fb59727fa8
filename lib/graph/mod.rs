//! Graph-based representation of ZX-diagrams and the machinery to rewrite
//! them.
//!
//! Diagrams are represented as an undirected, simple graph with typed,
//! phase-labeled nodes and two kinds of wires (see [`ZXWire`]). Parallel wires
//! are never stored: adding a wire between two already-connected nodes
//! normalizes the pair on the spot (see [`Diagram::add_wire`]).
//!
//! - [`translate`] converts a [`Circuit`][crate::circuit::Circuit] to a
//! `Diagram`.
//! - [`rules`] contains the individual rewrite rules.
//! - [`simplify`] applies the rewrite rules to a fixpoint.
//! - [`extract`] recovers a circuit from a (usually simplified) `Diagram`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("missing node {0}")]
    MissingNode(NodeId),

    #[error("error adding wire: self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("error adding wire: input/output node {0} is already connected")]
    ConnectedIO(NodeId),

    #[error("error removing node: node {0} is an input/output")]
    RemoveIO(NodeId),

    #[error("error removing wire: nodes {0} and {1} are not connected")]
    MissingWire(NodeId, NodeId),

    #[error("input/output node {0} has {1} wire(s); expected exactly 1")]
    IOArity(NodeId, usize),

    #[error("nodes {0} and {1} are connected by {2} wires")]
    NotSimple(NodeId, NodeId, usize),

    #[error("wire bookkeeping mismatch between nodes {0} and {1}")]
    Asymmetric(NodeId, NodeId),

    #[error("wire count mismatch: recorded {0}, found {1}")]
    WireCount(usize, usize),

    #[error("inputs and outputs do not partition the boundary nodes")]
    BoundaryBookkeeping,

    #[error("linear map too large to compute: {0} summed bits")]
    TooLarge(usize),

    #[error("error rendering diagram: {0}")]
    Render(String),
}
pub type GraphResult<T> = Result<T, GraphError>;

/// Identifies a node in a diagram.
pub type NodeId = usize;

/// Identifies an input or output qubit in a diagram.
pub type QubitId = usize;

pub(crate) mod node;
pub use node::*;

pub(crate) mod diagram;
pub use diagram::*;

pub(crate) mod tensor;

pub mod translate;

pub mod rules;

pub mod simplify;

pub mod extract;
