//! First-order product-formula synthesis of time evolution.
//!
//! The evolution `exp(−i H t)` under `H = Σ_k c_k P_k` is approximated by
//!
//!   [∏_k exp(−i c_k P_k t / n)]^n
//!
//! with error *O*(t² / n). Each factor is synthesized with the usual circuit
//! identity
//!
//!   exp(−i θ/2 · Z ⊗ ... ⊗ Z) = (CX ladder)† · RZ(θ) · (CX ladder)
//!
//! after rotating every `X` factor into `Z` with a Hadamard, and every `Y`
//! factor with an X-rotation by a quarter turn.
//!
//! Rotation angles are real numbers here and are rounded onto the dyadic grid
//! of [`Phase::from_radians`] when the gates are created.

use tracing::debug;
use crate::{
    circuit::{ Circuit, CircuitError, CircuitResult, Gate },
    hamiltonian::{ Hamiltonian, HamiltonianTerm, PauliOp },
    phase::Phase,
};

/// First-order Trotter synthesizer.
#[derive(Clone, Debug)]
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    t: f64,
    n_steps: usize,
    n_qubits: Option<usize>,
}

impl TrotterEvolution {
    /// Create a new synthesizer for evolution under `hamiltonian` for a time
    /// `t`, split into `n_steps` slices.
    pub fn new(hamiltonian: Hamiltonian, t: f64, n_steps: usize) -> Self {
        Self { hamiltonian, t, n_steps, n_qubits: None }
    }

    /// Override the circuit width, which by default is the minimum needed by
    /// the Hamiltonian.
    pub fn with_n_qubits(mut self, n: usize) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Synthesize the circuit.
    ///
    /// Fails if `n_steps` is zero, if a term acts outside the circuit width,
    /// or if a rotation angle is not finite.
    pub fn first_order(&self) -> CircuitResult<Circuit> {
        if self.n_steps == 0 { return Err(CircuitError::ZeroSteps); }
        let n = self.n_qubits.unwrap_or_else(|| self.hamiltonian.min_qubits());
        let step_t = self.t / self.n_steps as f64;
        debug!(
            terms = self.hamiltonian.n_terms(),
            steps = self.n_steps,
            qubits = n,
            "synthesizing first-order product formula",
        );
        let mut circuit = Circuit::new(n);
        for _ in 0..self.n_steps {
            for term in self.hamiltonian.terms().iter() {
                append_exp_pauli(&mut circuit, term, step_t)?;
            }
        }
        Ok(circuit)
    }
}

/// Append the circuit for `exp(−i · coeff · t · P)` to `circuit`.
///
/// Identity strings contribute only a global phase and are skipped.
pub fn append_exp_pauli(circuit: &mut Circuit, term: &HamiltonianTerm, t: f64)
    -> CircuitResult<()>
{
    let ops = term.pauli.ops();
    let Some(last) = term.pauli.max_qubit() else { return Ok(()); };
    if last >= circuit.num_qubits() {
        return Err(CircuitError::PauliLength(last + 1, circuit.num_qubits()));
    }
    let theta = 2.0 * term.coeff * t;
    let phase =
        Phase::from_radians(theta).ok_or(CircuitError::NonFiniteAngle(theta))?;
    let qubits: Vec<usize> = ops.iter().map(|(q, _)| *q).collect();

    circuit.extend(ops.iter().flat_map(|&(q, op)| basis_in(q, op)))?;
    circuit.extend(qubits.windows(2).map(|w| Gate::CX(w[0], w[1])))?;
    circuit.push(Gate::ZRot(last, phase))?;
    circuit.extend(qubits.windows(2).rev().map(|w| Gate::CX(w[0], w[1])))?;
    circuit.extend(ops.iter().flat_map(|&(q, op)| basis_out(q, op)))?;
    Ok(())
}

// rotate the eigenbasis of `op` onto that of Z
fn basis_in(q: usize, op: PauliOp) -> Option<Gate> {
    match op {
        PauliOp::X => Some(Gate::H(q)),
        PauliOp::Y => Some(Gate::XRot(q, Phase::pi2())),
        PauliOp::Z | PauliOp::I => None,
    }
}

fn basis_out(q: usize, op: PauliOp) -> Option<Gate> {
    match op {
        PauliOp::X => Some(Gate::H(q)),
        PauliOp::Y => Some(Gate::XRot(q, -Phase::pi2())),
        PauliOp::Z | PauliOp::I => None,
    }
}

#[cfg(test)]
mod test {
    use ndarray::Array2;
    use num_complex::Complex64 as C64;
    use crate::{
        c,
        circuit::tensor::approx_eq_upto_scalar,
        hamiltonian::PauliString,
    };
    use super::*;

    fn single(term: HamiltonianTerm, t: f64) -> Circuit {
        TrotterEvolution::new(Hamiltonian::from_terms(vec![term]), t, 1)
            .first_order()
            .unwrap()
    }

    #[test]
    fn zz_rotation() {
        let (c, t) = (0.3, 0.7);
        let circ = single(HamiltonianTerm::zz(0, 1, c), t);
        assert_eq!(circ.count_cx(), 2);
        let (m, p) = (c!(e -c * t), c!(e c * t));
        let zero = c!(0.0);
        let expected = ndarray::array![
            [m, zero, zero, zero],
            [zero, p, zero, zero],
            [zero, zero, p, zero],
            [zero, zero, zero, m],
        ];
        assert!(approx_eq_upto_scalar(&circ.unitary(), &expected, 1e-5));
    }

    #[test]
    fn yy_rotation() {
        let (c, t) = (-0.45, 1.1);
        let circ = single(HamiltonianTerm::yy(0, 1, c), t);
        let i = c!(i 1.0);
        let yy: Array2<C64> = ndarray::array![
            [0.0, 0.0, 0.0, -1.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
        ].mapv(C64::from);
        let id: Array2<C64> = Array2::eye(4);
        let expected =
            id.mapv(|z| z * (c * t).cos()) - yy.mapv(|z| z * i * (c * t).sin());
        assert!(approx_eq_upto_scalar(&circ.unitary(), &expected, 1e-5));
    }

    #[test]
    fn identity_terms_and_errors() {
        let id = HamiltonianTerm::new(1.0, PauliString::from_label("II").unwrap());
        let circ =
            TrotterEvolution::new(Hamiltonian::from_terms(vec![id.clone()]), 1.0, 3)
            .with_n_qubits(2)
            .first_order()
            .unwrap();
        assert!(circ.is_empty());

        let h = Hamiltonian::from_terms(vec![id]);
        assert!(matches!(
            TrotterEvolution::new(h, 1.0, 0).first_order(),
            Err(CircuitError::ZeroSteps),
        ));

        let wide = Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 3, 1.0)]);
        assert!(matches!(
            TrotterEvolution::new(wide, 1.0, 1).with_n_qubits(2).first_order(),
            Err(CircuitError::PauliLength(4, 2)),
        ));

        let inf = Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 1, f64::INFINITY)]);
        assert!(matches!(
            TrotterEvolution::new(inf, 1.0, 1).first_order(),
            Err(CircuitError::NonFiniteAngle(_)),
        ));
    }

    #[test]
    fn steps_repeat() {
        let h =
            Hamiltonian::from_terms(vec![
                HamiltonianTerm::xx(0, 2, 0.5),
                HamiltonianTerm::zz(1, 2, 0.25),
            ]);
        let one = TrotterEvolution::new(h.clone(), 1.0, 1).first_order().unwrap();
        let three = TrotterEvolution::new(h, 1.0, 3).first_order().unwrap();
        assert_eq!(one.num_qubits(), 3);
        assert_eq!(three.count_gates(), 3 * one.count_gates());
        assert_eq!(three.count_cx(), 12);
    }

    #[test]
    fn toluene_shape() {
        let circ =
            TrotterEvolution::new(Hamiltonian::toluene(), 0.5, 1)
            .first_order()
            .unwrap();
        assert_eq!(circ.num_qubits(), 9);
        assert_eq!(circ.count_cx(), 2 * 64);
        assert_eq!(circ.stats().zrot, 64);
    }
}
