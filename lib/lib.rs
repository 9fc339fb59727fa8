//! This package optimizes quantum circuits by rewriting them as diagrams in the
//! [ZX-calculus][wiki].
//!
//! A circuit is translated to a ZX-diagram, the diagram is simplified with a
//! fixed set of rewrite rules that preserve its linear map, and a new circuit
//! over `H`, `ZRot`, and `CX` gates is extracted from what remains.
//!
//! - [`circuit`] describes gate sequences in conventional [circuit
//! notation][qcircuits] and computes their unitaries for verification.
//! - [`graph`] holds the diagram representation, the rewrite rules, and the
//! translation to and from circuits.
//! - [`phase`] provides exact phases as rational multiples of 2π.
//! - [`hamiltonian`] and [`trotter`] build product-formula circuits for time
//! evolution under sums of Pauli strings, the usual inputs to the optimizer.
//!
//! [wiki]: https://en.wikipedia.org/wiki/ZX-calculus
//! [qcircuits]: https://en.wikipedia.org/wiki/Quantum_circuit
//!
//! # Example
//! ```
//! use zx_opt::{ circuit::{ Circuit, Gate }, optimize };
//!
//! let circ =
//!     Circuit::from_gates(2, [
//!         Gate::CX(0, 1),
//!         Gate::zrot_frac(1, 1, 8),
//!         Gate::CX(0, 1),
//!         Gate::CX(0, 1),
//!     ])
//!     .unwrap();
//! let res = optimize(&circ).unwrap();
//! assert!(res.after.cx <= res.before.cx);
//! ```
//!
//! # See also
//! - [PyZX](https://github.com/Quantomatic/pyzx): a Python implementation of
//! the ZX-calculus and its rewrite rules.
//! - [QuiZX](https://github.com/Quantomatic/quizx/tree/master): a Rust
//! implementation of the above.
//!
//! # Further reading
//! - R. Duncan, A. Kissinger, S. Perdrix, J. van de Wetering, "Graph-theoretic
//! simplification of quantum circuits with the ZX-calculus."
//! [arXiv:1902.03178](https://arxiv.org/abs/1902.03178)
//! - J. van de Wetering, "ZX-calculus for the working quantum computer
//! scientist." [arXiv:2012.13966](https://arxiv.org/abs/2012.13966)

use thiserror::Error;
use tracing::{ debug, info, instrument };

pub mod circuit;
pub mod graph;
pub mod hamiltonian;
pub mod phase;
pub mod trotter;
pub(crate) mod vizdefs;

use crate::{
    circuit::{ Circuit, CircuitError, CircuitStats },
    graph::{
        Diagram,
        GraphError,
        extract::ExtractError,
        simplify::{ SimplifyOptions, SimplifyStats },
    },
};

pub extern crate num_complex;
/// Handy macro to create `num_complex::Complex64`s from more natural and
/// succinct syntax.
///
/// ```
/// use std::f64::consts::PI;
/// use num_complex::Complex64;
/// use zx_opt::c;
///
/// assert_eq!( c!(i (-1.0)),    Complex64::new(0.0, -1.0)      );
/// assert_eq!( c!(e PI),        Complex64::cis(PI)             );
/// assert_eq!( c!(1.0),         Complex64::new(1.0, 0.0)       );
/// assert_eq!( c!(1.0 + i 1.0), Complex64::new(1.0, 1.0)       );
/// assert_eq!( c!(1.0, e PI),   Complex64::from_polar(1.0, PI) );
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr )
        => { $crate::num_complex::Complex64::new(0.0, $im) };
    ( e $ph:expr )
        => { $crate::num_complex::Complex64::cis($ph) };
    ( $re:expr )
        => { $crate::num_complex::Complex64::new($re, 0.0) };
    ( $re:literal + i $im:literal )
        => { $crate::num_complex::Complex64::new($re, $im) };
    ( $re:literal - i $im:literal )
        => { $crate::num_complex::Complex64::new($re, -$im) };
    ( $r:expr, e $ph:expr )
        => { $crate::num_complex::Complex64::from_polar($r, $ph) };
    ( $re:expr, $im:expr )
        => { $crate::num_complex::Complex64::new($re, $im) };
}

/// Failure modes of [`optimize`], one for each stage that can go wrong.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The input circuit is malformed.
    #[error("invalid input: {0}")]
    Input(#[from] CircuitError),

    /// A diagram invariant was broken. This indicates a bug rather than a
    /// problem with the input.
    #[error("diagram invariant violated: {0}")]
    Invariant(#[from] GraphError),

    /// No circuit could be recovered from the simplified diagram.
    #[error("extraction failed: {0}")]
    Extract(ExtractError),
}

impl From<ExtractError> for OptimizeError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Graph(e) => Self::Invariant(e),
            e => Self::Extract(e),
        }
    }
}

impl OptimizeError {
    /// Return `true` if the error leaves the input circuit usable as is, i.e.
    /// the caller can fall back to the unoptimized circuit.
    pub fn is_recoverable(&self) -> bool { matches!(self, Self::Extract(_)) }
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// The output of [`optimize`].
#[derive(Clone, Debug)]
pub struct Optimized {
    /// The optimized circuit.
    pub circuit: Circuit,
    /// Gate counts of the input circuit.
    pub before: CircuitStats,
    /// Gate counts of the optimized circuit.
    pub after: CircuitStats,
    /// Rewrites performed on the diagram.
    pub simplify: SimplifyStats,
}

/// Optimize a circuit with the default [`SimplifyOptions`].
pub fn optimize(circuit: &Circuit) -> OptimizeResult<Optimized> {
    optimize_with(circuit, &SimplifyOptions::default())
}

/// Optimize a circuit: translate it to a diagram, simplify, and extract.
///
/// The returned circuit implements the same unitary as the input up to a
/// global phase, using only `H`, `ZRot`, and `CX` gates.
#[instrument(skip(circuit, opts), fields(qubits = circuit.num_qubits()))]
pub fn optimize_with(circuit: &Circuit, opts: &SimplifyOptions)
    -> OptimizeResult<Optimized>
{
    let before = circuit.stats();
    let mut dg = Diagram::from_circuit(circuit)?;
    debug!(spiders = dg.count_spiders(), wires = dg.count_wires(), "translated");
    let simplify = dg.simplify(opts)?;
    debug!(
        spiders = dg.count_spiders(),
        interactions = dg.count_spider_wires(),
        "simplified",
    );
    let optimized = dg.extract_circuit()?;
    let after = optimized.stats();
    info!(
        gates_before = before.total,
        gates_after = after.total,
        two_qubit_before = before.two_qubit,
        two_qubit_after = after.two_qubit,
        "optimized circuit",
    );
    Ok(Optimized { circuit: optimized, before, after, simplify })
}
