//! Dense unitary simulation of small circuits.

use std::f64::consts::FRAC_1_SQRT_2;
use ndarray::{ Array2, Axis };
use num_complex::Complex64 as C64;
use crate::circuit::{ Circuit, Gate };

impl Circuit {
    /// Compute the full unitary matrix of the circuit.
    ///
    /// The matrix has shape `(2^n, 2^n)`, with qubit 0 as the most significant
    /// bit. Intended for verification on a handful of qubits.
    pub fn unitary(&self) -> Array2<C64> {
        let n = self.num_qubits();
        let mut u: Array2<C64> = Array2::eye(1 << n);
        for gate in self.gates().iter() {
            for mut col in u.axis_iter_mut(Axis(1)) {
                let mut state = col.to_vec();
                apply_gate(&mut state, n, gate);
                col.iter_mut().zip(state).for_each(|(c, s)| { *c = s; });
            }
        }
        u
    }
}

// mask for qubit `k` in a register of `n` qubits, qubit 0 most significant
fn mask(n: usize, k: usize) -> usize { 1 << (n - 1 - k) }

fn apply_gate(state: &mut [C64], n: usize, gate: &Gate) {
    match *gate {
        Gate::H(k) => apply_h(state, mask(n, k)),
        Gate::ZRot(k, ph) => apply_zrot(state, mask(n, k), ph.cis()),
        Gate::XRot(k, ph) => {
            let m = mask(n, k);
            apply_h(state, m);
            apply_zrot(state, m, ph.cis());
            apply_h(state, m);
        },
        Gate::CX(c, t) => {
            let (mc, mt) = (mask(n, c), mask(n, t));
            for i in 0..state.len() {
                if i & mc != 0 && i & mt == 0 { state.swap(i, i | mt); }
            }
        },
        Gate::CZ(a, b) => {
            let m = mask(n, a) | mask(n, b);
            state.iter_mut().enumerate()
                .filter(|(i, _)| i & m == m)
                .for_each(|(_, s)| { *s = -*s; });
        },
    }
}

fn apply_h(state: &mut [C64], m: usize) {
    for i in 0..state.len() {
        if i & m == 0 {
            let (a, b) = (state[i], state[i | m]);
            state[i] = (a + b) * FRAC_1_SQRT_2;
            state[i | m] = (a - b) * FRAC_1_SQRT_2;
        }
    }
}

fn apply_zrot(state: &mut [C64], m: usize, z: C64) {
    state.iter_mut().enumerate()
        .filter(|(i, _)| i & m != 0)
        .for_each(|(_, s)| { *s *= z; });
}

/// Return `true` if `a` and `b` have the same shape and `b = λ a` for some
/// nonzero λ, within an absolute tolerance `eps` on the normalized entries.
pub fn approx_eq_upto_scalar(a: &Array2<C64>, b: &Array2<C64>, eps: f64)
    -> bool
{
    if a.shape() != b.shape() { return false; }
    let Some((k, a_max)) =
        a.iter().enumerate()
        .max_by(|(_, x), (_, y)| x.norm().total_cmp(&y.norm()))
    else {
        return true;
    };
    let b_at = b.iter().nth(k).copied().unwrap_or_default();
    if a_max.norm() < eps || b_at.norm() < eps {
        return a.iter().chain(b.iter()).all(|z| z.norm() < eps);
    }
    let ratio = b_at / a_max;
    let scale = a_max.norm();
    a.iter().zip(b.iter())
        .all(|(x, y)| (x * ratio - y).norm() < eps * scale * ratio.norm())
}
