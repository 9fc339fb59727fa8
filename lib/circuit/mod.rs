//! Ordered gate sequences on indexed qubits.
//!
//! A [`Circuit`] is always valid by construction: every gate is checked
//! against the qubit count when it is added, so downstream stages never see an
//! out-of-range index.

use std::fmt;
use thiserror::Error;
use crate::phase::Phase;

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("gate {0:?} targets qubit {1}, but the circuit only has {2}")]
    QubitOutOfRange(Gate, usize, usize),

    #[error("gate {0:?} uses qubit {1} as both of its operands")]
    SameQubit(Gate, usize),

    #[error("cannot convert non-finite angle {0} to a phase")]
    NonFiniteAngle(f64),

    #[error("Pauli string has length {0}, but the system has {1} qubit(s)")]
    PauliLength(usize, usize),

    #[error("a product formula needs at least one step")]
    ZeroSteps,
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

pub mod tensor;

/// A unitary gate to apply in a quantum circuit.
///
/// Rotation angles are exact [`Phase`]s. `ZRot(k, θ)` is diag(1, e^{iθ}), and
/// `XRot(k, θ)` is the same rotation conjugated by Hadamards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// Rotation about *z*.
    ZRot(usize, Phase),
    /// Rotation about *x*.
    XRot(usize, Phase),
    /// π-rotation about *x* on the second qubit, controlled by the first.
    CX(usize, usize),
    /// π-rotation about *z* on the second qubit, controlled by the first.
    CZ(usize, usize),
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `ZRot`.
    pub fn is_zrot(&self) -> bool { matches!(self, Self::ZRot(..)) }

    /// Return `true` if `self` is `XRot`.
    pub fn is_xrot(&self) -> bool { matches!(self, Self::XRot(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` is `CZ`.
    pub fn is_cz(&self) -> bool { matches!(self, Self::CZ(..)) }

    /// Return `true` if `self` acts on two qubits.
    pub fn is_two_qubit(&self) -> bool { self.is_cx() || self.is_cz() }

    /// Return `true` if `self` is a rotation by a non-Clifford angle.
    pub fn is_non_clifford(&self) -> bool {
        match self {
            Self::ZRot(_, ph) | Self::XRot(_, ph) => !ph.is_clifford(),
            _ => false,
        }
    }

    /// Create a new Z-rotation gate on qubit `k` with phase `(a / b) × 2π`.
    pub fn zrot_frac(k: usize, a: i64, b: i64) -> Self {
        Self::ZRot(k, Phase::new(a, b))
    }

    /// Create a new X-rotation gate on qubit `k` with phase `(a / b) × 2π`.
    pub fn xrot_frac(k: usize, a: i64, b: i64) -> Self {
        Self::XRot(k, Phase::new(a, b))
    }

    /// Return the qubits acted on by `self`.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::H(k) | Self::ZRot(k, _) | Self::XRot(k, _) => vec![k],
            Self::CX(a, b) | Self::CZ(a, b) => vec![a, b],
        }
    }

    /// Return the inverse of `self`.
    pub fn inv(&self) -> Self {
        match *self {
            Self::H(k) => Self::H(k),
            Self::ZRot(k, ang) => Self::ZRot(k, -ang),
            Self::XRot(k, ang) => Self::XRot(k, -ang),
            Self::CX(c, t) => Self::CX(c, t),
            Self::CZ(a, b) => Self::CZ(a, b),
        }
    }

    // check qubit indices against a qubit count
    fn validate(&self, n: usize) -> CircuitResult<()> {
        if let Some(&k) = self.qubits().iter().find(|k| **k >= n) {
            return Err(QubitOutOfRange(*self, k, n));
        }
        match *self {
            Self::CX(a, b) | Self::CZ(a, b) if a == b
                => Err(SameQubit(*self, a)),
            _ => Ok(()),
        }
    }
}

/// An ordered sequence of [`Gate`]s on a fixed number of qubits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    n: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new, empty circuit on `n` qubits.
    pub fn new(n: usize) -> Self { Self { n, gates: Vec::new() } }

    /// Create a new circuit from a sequence of gates.
    ///
    /// Fails if any gate targets a qubit index `>= n` or uses the same qubit
    /// twice.
    pub fn from_gates<I>(n: usize, gates: I) -> CircuitResult<Self>
    where I: IntoIterator<Item = Gate>
    {
        let mut circ = Self::new(n);
        circ.extend(gates)?;
        Ok(circ)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the gates in application order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// Return `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Append a gate, checking its qubit indices.
    pub fn push(&mut self, gate: Gate) -> CircuitResult<&mut Self> {
        gate.validate(self.n)?;
        self.gates.push(gate);
        Ok(self)
    }

    /// Append a sequence of gates, checking each one.
    ///
    /// Gates before the first invalid one are kept.
    pub fn extend<I>(&mut self, gates: I) -> CircuitResult<&mut Self>
    where I: IntoIterator<Item = Gate>
    {
        for gate in gates.into_iter() { self.push(gate)?; }
        Ok(self)
    }

    /// Return the total number of gates.
    pub fn count_gates(&self) -> usize { self.gates.len() }

    /// Return the number of two-qubit gates.
    pub fn count_two_qubit(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Return the number of `CX` gates.
    pub fn count_cx(&self) -> usize {
        self.gates.iter().filter(|g| g.is_cx()).count()
    }

    /// Return a breakdown of the gate content.
    pub fn stats(&self) -> CircuitStats {
        let mut stats = CircuitStats { qubits: self.n, ..Default::default() };
        for gate in self.gates.iter() {
            stats.total += 1;
            match gate {
                Gate::H(_) => { stats.h += 1; },
                Gate::ZRot(..) => { stats.zrot += 1; },
                Gate::XRot(..) => { stats.xrot += 1; },
                Gate::CX(..) => { stats.cx += 1; },
                Gate::CZ(..) => { stats.cz += 1; },
            }
            if gate.is_two_qubit() { stats.two_qubit += 1; }
            if gate.is_non_clifford() { stats.non_clifford += 1; }
        }
        stats
    }

    /// Return the inverse circuit.
    pub fn inverse(&self) -> Self {
        Self {
            n: self.n,
            gates: self.gates.iter().rev().map(|g| g.inv()).collect(),
        }
    }
}

/// Gate counts for a [`Circuit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CircuitStats {
    pub qubits: usize,
    pub total: usize,
    pub two_qubit: usize,
    pub h: usize,
    pub zrot: usize,
    pub xrot: usize,
    pub cx: usize,
    pub cz: usize,
    /// Rotations by angles that are not multiples of π/2.
    pub non_clifford: usize,
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit on {} qubits with {} gates.", self.qubits, self.total)?;
        writeln!(f, "  {} are two-qubit gates ({} CX, {} CZ)", self.two_qubit, self.cx, self.cz)?;
        writeln!(f, "  {} are Hadamard gates", self.h)?;
        writeln!(f, "  {} are rotations ({} Z, {} X)", self.zrot + self.xrot, self.zrot, self.xrot)?;
        write!(f, "  {} are non-Clifford rotations", self.non_clifford)
    }
}

/// Return the relative reduction from `before` to `after` as a percentage of
/// `before`, or `None` if `before` is zero.
///
/// ```
/// # use zx_opt::circuit::reduction_percent;
/// assert_eq!(reduction_percent(200, 150), Some(25.0));
/// assert_eq!(reduction_percent(0, 0), None);
/// ```
pub fn reduction_percent(before: usize, after: usize) -> Option<f64> {
    (before > 0)
        .then(|| 100.0 * (before as f64 - after as f64) / before as f64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation() {
        let mut circ = Circuit::new(2);
        assert!(circ.push(Gate::H(1)).is_ok());
        assert!(matches!(circ.push(Gate::H(2)), Err(QubitOutOfRange(_, 2, 2))));
        assert!(matches!(circ.push(Gate::CX(0, 5)), Err(QubitOutOfRange(_, 5, 2))));
        assert!(matches!(circ.push(Gate::CZ(1, 1)), Err(SameQubit(_, 1))));
        assert_eq!(circ.count_gates(), 1);
        assert!(Circuit::from_gates(1, [Gate::zrot_frac(0, 1, 8)]).is_ok());
        assert!(Circuit::from_gates(0, [Gate::zrot_frac(0, 1, 8)]).is_err());
    }

    #[test]
    fn counts() {
        let circ =
            Circuit::from_gates(3, [
                Gate::H(0),
                Gate::CX(0, 1),
                Gate::zrot_frac(1, 1, 8),
                Gate::xrot_frac(2, 1, 4),
                Gate::CZ(1, 2),
                Gate::CX(2, 0),
            ])
            .unwrap();
        assert_eq!(circ.count_gates(), 6);
        assert_eq!(circ.count_two_qubit(), 3);
        assert_eq!(circ.count_cx(), 2);
        let stats = circ.stats();
        assert_eq!(stats.h, 1);
        assert_eq!(stats.zrot, 1);
        assert_eq!(stats.xrot, 1);
        assert_eq!(stats.cz, 1);
        assert_eq!(stats.non_clifford, 1);
        assert!(format!("{}", stats).starts_with("Circuit on 3 qubits with 6 gates."));
    }

    #[test]
    fn inverse() {
        let circ =
            Circuit::from_gates(2, [Gate::zrot_frac(0, 1, 8), Gate::CX(0, 1)])
            .unwrap();
        let inv = circ.inverse();
        assert_eq!(inv.gates(), &[Gate::CX(0, 1), Gate::zrot_frac(0, 7, 8)]);
    }
}
