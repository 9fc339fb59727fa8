//! Hamiltonians as weighted sums of Pauli strings.
//!
//! A Hamiltonian is a sum
//!
//!   H = Σ_k c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators and c_k
//! is real. Qubit `k` of a string corresponds to character `k` of its label,
//! counting from the left.
//!
//! # Example
//! ```
//! use zx_opt::hamiltonian::{ Hamiltonian, HamiltonianTerm, PauliString };
//!
//! // H = 0.5·Z₀Z₁ − 0.25·X₀X₁
//! let h: Hamiltonian =
//!     [
//!         HamiltonianTerm::new(0.5, PauliString::from_label("ZZ").unwrap()),
//!         HamiltonianTerm::xx(0, 1, -0.25),
//!     ]
//!     .into_iter()
//!     .collect();
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.min_qubits(), 2);
//! ```

use std::fmt;

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PauliOp {
    I,
    X,
    Y,
    Z,
}

impl PauliOp {
    /// Parse a single character `I`, `X`, `Y`, or `Z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        };
        f.write_str(c)
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Identities are not stored; unlisted qubits are implicitly `I`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PauliString {
    // sorted by qubit
    ops: Vec<(usize, PauliOp)>,
}

impl PauliString {
    /// Construct from `(qubit, op)` pairs, dropping identities and sorting by
    /// qubit.
    pub fn from_ops<I>(ops: I) -> Self
    where I: IntoIterator<Item = (usize, PauliOp)>
    {
        let mut ops: Vec<(usize, PauliOp)> =
            ops.into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        ops.sort_by_key(|(q, _)| *q);
        Self { ops }
    }

    /// Parse a label like `"IXXZ"`, where character `k` acts on qubit `k`.
    ///
    /// Returns `None` on any character other than `I`, `X`, `Y`, or `Z`.
    pub fn from_label(label: &str) -> Option<Self> {
        let ops: Vec<(usize, PauliOp)> =
            label.chars().enumerate()
            .map(|(k, c)| PauliOp::from_char(c).map(|op| (k, op)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_ops(ops))
    }

    /// Return the non-identity `(qubit, op)` pairs, sorted by qubit.
    pub fn ops(&self) -> &[(usize, PauliOp)] { &self.ops }

    /// Return `true` if there are no non-identity operators.
    pub fn is_identity(&self) -> bool { self.ops.is_empty() }

    /// Return the highest qubit index acted on, if any.
    pub fn max_qubit(&self) -> Option<usize> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Render as a label over `n` qubits.
    pub fn label(&self, n: usize) -> String {
        let mut chars: Vec<PauliOp> = vec![PauliOp::I; n];
        for &(q, op) in self.ops.iter() {
            if q < n { chars[q] = op; }
        }
        chars.into_iter().map(|op| op.to_string()).collect()
    }
}

/// A single weighted Pauli string `coeff · pauli`.
#[derive(Clone, Debug, PartialEq)]
pub struct HamiltonianTerm {
    pub coeff: f64,
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Create a two-qubit `Z ⊗ Z` term.
    pub fn zz(a: usize, b: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(a, PauliOp::Z), (b, PauliOp::Z)]))
    }

    /// Create a two-qubit `X ⊗ X` term.
    pub fn xx(a: usize, b: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(a, PauliOp::X), (b, PauliOp::X)]))
    }

    /// Create a two-qubit `Y ⊗ Y` term.
    pub fn yy(a: usize, b: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(a, PauliOp::Y), (b, PauliOp::Y)]))
    }
}

/// A sum of weighted Pauli strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self { Self { terms } }

    /// Return all terms, in order.
    pub fn terms(&self) -> &[HamiltonianTerm] { &self.terms }

    /// Return the number of terms.
    pub fn n_terms(&self) -> usize { self.terms.len() }

    /// Return the minimum number of qubits needed to represent `self`, which
    /// is zero if every term is an identity.
    pub fn min_qubits(&self) -> usize {
        self.terms.iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// The nine-qubit dipolar coupling Hamiltonian of toluene, with its ¹³C
    /// nucleus on qubit 0 and the eight protons on qubits 1 through 8.
    ///
    /// Carbon–proton couplings D contribute `(D / 2)·ZZ`; proton–proton
    /// couplings contribute `(−D / 4)·XX + (D / 4)·YY`. There are 64 terms:
    /// the eight `ZZ` terms first, then an `XX`, `YY` pair for each proton
    /// pair in lexicographic order.
    pub fn toluene() -> Self {
        let ch = TOLUENE_CH.iter().enumerate()
            .map(|(k, d)| HamiltonianTerm::zz(0, k + 1, d / 2.0));
        let hh = TOLUENE_HH.iter()
            .flat_map(|&(a, b, d)| {
                [HamiltonianTerm::xx(a, b, -d / 4.0), HamiltonianTerm::yy(a, b, d / 4.0)]
            });
        ch.chain(hh).collect()
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = HamiltonianTerm>
    {
        Self { terms: iter.into_iter().collect() }
    }
}

/// Number of qubits in [`Hamiltonian::toluene`].
pub const TOLUENE_QUBITS: usize = 9;

// carbon-proton dipolar couplings D_C1..D_C8, Hz
const TOLUENE_CH: [f64; 8] = [
    -4139.45, 50.16, 50.16, -77.68, -77.68, -45.33, -45.33, -45.33,
];

// proton-proton dipolar couplings (i, j, D_ij), Hz
const TOLUENE_HH: [(usize, usize, f64); 28] = [
    (1, 2, -242.25), (1, 3, -242.25), (1, 4, -196.73), (1, 5, -196.73),
    (1, 6, -100.95), (1, 7, -100.95), (1, 8, -100.95),
    (2, 3, 26.64), (2, 4, -1412.40), (2, 5, -30.53),
    (2, 6, -126.91), (2, 7, -126.91), (2, 8, -126.91),
    (3, 4, -30.53), (3, 5, -1412.40),
    (3, 6, -126.91), (3, 7, -126.91), (3, 8, -126.91),
    (4, 5, 27.38), (4, 6, -405.22), (4, 7, -405.22), (4, 8, -405.22),
    (5, 6, -405.22), (5, 7, -405.22), (5, 8, -405.22),
    (6, 7, 1860.23), (6, 8, 1860.23), (7, 8, 1860.23),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels() {
        let p = PauliString::from_label("IXIY").unwrap();
        assert_eq!(p.ops(), &[(1, PauliOp::X), (3, PauliOp::Y)]);
        assert_eq!(p.max_qubit(), Some(3));
        assert_eq!(p.label(5), "IXIYI");
        assert!(PauliString::from_label("III").unwrap().is_identity());
        assert!(PauliString::from_label("XQ").is_none());
        assert_eq!(
            PauliString::from_ops([(2, PauliOp::Z), (0, PauliOp::I), (1, PauliOp::X)]),
            PauliString::from_label("IXZ").unwrap(),
        );
    }

    #[test]
    fn toluene_terms() {
        let h = Hamiltonian::toluene();
        assert_eq!(h.n_terms(), 64);
        assert_eq!(h.min_qubits(), TOLUENE_QUBITS);

        let first = &h.terms()[0];
        assert_eq!(first.pauli.label(TOLUENE_QUBITS), "ZZIIIIIII");
        assert_eq!(first.coeff, -4139.45 / 2.0);
        let n_zz =
            h.terms().iter()
            .filter(|t| t.pauli.ops().iter().all(|(_, op)| *op == PauliOp::Z))
            .count();
        assert_eq!(n_zz, 8);

        let xx = &h.terms()[8];
        let yy = &h.terms()[9];
        assert_eq!(xx.pauli.label(TOLUENE_QUBITS), "IXXIIIIII");
        assert_eq!(yy.pauli.label(TOLUENE_QUBITS), "IYYIIIIII");
        assert_eq!(xx.coeff, 242.25 / 4.0);
        assert_eq!(yy.coeff, -242.25 / 4.0);

        let last = &h.terms()[63];
        assert_eq!(last.pauli.label(TOLUENE_QUBITS), "IIIIIIIYY");
        assert_eq!(last.coeff, 1860.23 / 4.0);
    }
}
