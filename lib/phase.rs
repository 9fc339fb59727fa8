//! Numerically exact, real phases backed by rational numbers.
//!
//! A phase is stored as a fraction of a full turn, so that the phase
//! represented by a `Phase` as a whole is 2*π* × *φ*. All arithmetic is
//! performed modulo one turn and results are always reduced into [0, 1).

use std::f64::consts::TAU;
use num_complex::Complex64 as C64;
use num_rational::Rational64 as R64;
use num_traits::{ One, Zero };

/// Floating-point angles are snapped to multiples of 2^-24 turns.
///
/// A single common power-of-two denominator keeps sums of many converted
/// angles from overflowing the inner `i64`s.
pub const FLOAT_DENOM: i64 = 1 << 24;

// return the reduction of `a` modulo 1, constrained to [0, 1)
pub(crate) fn rem1(a: R64) -> R64 { a - a.floor() }

// convert a rational number to a floating-point number.
pub(crate) fn r2f(a: R64) -> f64 { *a.numer() as f64 / *a.denom() as f64 }

/// A description of a phase.
///
/// This type holds an inner [`R64`] representing the number *φ* such that the
/// phase represented by a `Phase` as a whole is 2*π* × *φ*, constrained to
/// [0, 1).
///
/// ```
/// # use zx_opt::phase::Phase;
/// assert_eq!(  Phase::new(3, 4),      -Phase::new(1, 4) );
/// assert_eq!(  Phase::new(7, 10) + Phase::new(6, 10), Phase::new(3, 10) );
/// assert_eq!( -Phase::new(5, 8),       Phase::new(3, 8) );
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phase(R64);

impl Default for Phase {
    fn default() -> Self { Self::zero() }
}

impl From<Phase> for f64 {
    fn from(ph: Phase) -> Self { TAU * r2f(ph.0) }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Phase {
    /// Construct a new `Phase` as `(numer / denom) × 2π`.
    ///
    /// *Panics if `denom` is zero.*
    pub fn new(numer: i64, denom: i64) -> Self {
        Self(rem1(R64::new(numer, denom)))
    }

    /// Construct from an angle in radians, snapping to the nearest multiple
    /// of 2π / [`FLOAT_DENOM`].
    ///
    /// Returns `None` if the angle is not finite.
    pub fn from_radians(angle: f64) -> Option<Self> {
        angle.is_finite().then_some(())?;
        let turns = (angle / TAU).rem_euclid(1.0);
        let numer = (turns * FLOAT_DENOM as f64).round() as i64;
        Some(Self::new(numer, FLOAT_DENOM))
    }

    /// Convert to a floating-point angle in radians.
    pub fn into_radians(self) -> f64 { self.into() }

    /// Return the inner fraction of a full turn, in [0, 1).
    pub fn turns(self) -> R64 { self.0 }

    /// Return the `Phase` representation of 0 ≡ 2π mod 2π.
    pub fn zero() -> Self { Self(R64::zero()) }

    /// Return the `Phase` representation of π.
    pub fn pi() -> Self { Self(R64::new(1, 2)) }

    /// Return the `Phase` representation of π/2.
    pub fn pi2() -> Self { Self(R64::new(1, 4)) }

    /// Return the `Phase` representation of π/4.
    pub fn pi4() -> Self { Self(R64::new(1, 8)) }

    /// Return the `Phase` representation of 2π/`n`.
    pub fn frac(n: i64) -> Self { Self(rem1(R64::new(1, n))) }

    /// Return `true` if `self` is zero.
    pub fn is_zero(self) -> bool { self.0.is_zero() }

    /// Return `true` if `self` is an integer multiple of 2π/`n`.
    pub fn is_mult(self, n: i64) -> bool { (self.0 * n).is_integer() }

    /// Return `true` if `self` is 0 or π.
    pub fn is_pauli(self) -> bool { self.is_mult(2) }

    /// Return `true` if `self` is a multiple of π/2.
    pub fn is_clifford(self) -> bool { self.is_mult(4) }

    /// Return `true` if `self` is ±π/2.
    pub fn is_proper_clifford(self) -> bool {
        self.is_clifford() && !self.is_pauli()
    }

    /// Convert to a complex number with modulus 1 and argument equal to `self`.
    pub fn cis(self) -> C64 { C64::cis(self.into()) }

    pub(crate) fn label(&self) -> String {
        if self.is_zero() {
            return "".to_string();
        } else if *self == Self::pi() {
            return "π".to_string();
        }
        let modpi = self.0 * 2;
        if *modpi.numer() == 1 {
            format!("π/{}", modpi.denom())
        } else if *modpi.denom() <= 1000 {
            format!("({})π", modpi)
        } else {
            format!("{:.5}π", r2f(modpi))
        }
    }
}

impl std::ops::Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Self::Output { Self(rem1(-self.0)) }
}

macro_rules! impl_addsub_phase {
    (
        $trait:ident,
        $fun:ident,
        $op:tt,
        $trait_assign:ident,
        $fun_assign:ident,
        $op_assign:tt
    ) => {
        impl std::ops::$trait<Phase> for Phase {
            type Output = Phase;

            fn $fun(self, rhs: Phase) -> Self::Output {
                Self(rem1(self.0 $op rhs.0))
            }
        }

        impl std::ops::$trait_assign<Phase> for Phase {
            fn $fun_assign(&mut self, rhs: Phase) {
                *self = *self $op rhs;
            }
        }
    }
}
impl_addsub_phase!(Add, add, +, AddAssign, add_assign, +=);
impl_addsub_phase!(Sub, sub, -, SubAssign, sub_assign, -=);

impl std::iter::Sum for Phase {
    fn sum<I>(iter: I) -> Self
    where I: IntoIterator<Item = Self>
    {
        iter.into_iter().fold(Self::zero(), |acc, ph| acc + ph)
    }
}

impl std::ops::Mul<i64> for Phase {
    type Output = Phase;

    fn mul(self, rhs: i64) -> Self::Output { Self(rem1(self.0 * rhs)) }
}

impl std::ops::Mul<Phase> for i64 {
    type Output = Phase;

    fn mul(self, rhs: Phase) -> Self::Output { Phase(rem1(rhs.0 * self)) }
}

impl std::ops::Div<i64> for Phase {
    type Output = Phase;

    fn div(self, rhs: i64) -> Self::Output { Self(rem1(self.0 / rhs)) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn init_mod() {
        assert_eq!(Phase::new(5, 3), Phase(R64::new(2, 3)));
        assert_eq!(Phase::new(4, 3), Phase::new(1, 3));
        assert_eq!(Phase::new(-1, 3), Phase::new(2, 3));
        assert_eq!(Phase::new(1, -3), Phase::new(2, 3));
        assert_eq!(Phase::pi(), Phase::new(1, 2));
        assert_eq!(Phase::pi2(), Phase::new(1, 4));
        assert_eq!(Phase::frac(1), Phase::zero());
        assert_eq!(Phase::frac(2), Phase::pi());
        assert!(Phase::new(1, 1).is_zero());
    }

    #[test]
    fn float_conv() {
        fn approx_eq(f1: f64, f2: f64) -> bool { (f1 - f2).abs() < 1e-6 }

        assert_eq!(Phase::from_radians(TAU), Some(Phase::zero()));
        assert_eq!(Phase::from_radians(TAU / 2.0), Some(Phase::pi()));
        assert_eq!(Phase::from_radians(-TAU / 4.0), Some(Phase::new(3, 4)));
        assert_eq!(Phase::from_radians(f64::NAN), None);
        assert_eq!(Phase::from_radians(f64::INFINITY), None);
        let third = Phase::from_radians(TAU / 3.0).unwrap();
        assert!(approx_eq(third.into_radians(), TAU / 3.0));
        assert_eq!(FLOAT_DENOM % *third.turns().denom(), 0);
    }

    #[test]
    fn add() {
        assert_eq!(Phase::zero() + Phase::zero(), Phase::zero());
        assert_eq!(Phase::pi() + Phase::pi(), Phase::zero());
        assert_eq!(Phase::new(1, 3) + Phase::new(2, 3), Phase::zero());
        assert_eq!(Phase::new(7, 10) + Phase::new(6, 10), Phase::new(3, 10));
        assert_eq!(
            [Phase::pi4(), Phase::pi4(), Phase::pi2()].into_iter().sum::<Phase>(),
            Phase::pi(),
        );
    }

    #[test]
    fn sub() {
        assert_eq!(Phase::pi() - Phase::pi(), Phase::zero());
        assert_eq!(Phase::new(1, 3) - Phase::new(2, 3), Phase::new(2, 3));
        assert_eq!(-Phase::pi2(), Phase::new(3, 4));
    }

    #[test]
    fn mul_div() {
        assert_eq!(Phase::new(1, 3) * 2, Phase::new(2, 3));
        assert_eq!(2 * Phase::new(1, 3), Phase::new(2, 3));
        assert_eq!(Phase::new(1, 3) * 3, Phase::zero());
        assert_eq!(Phase::new(1, 3) / 2, Phase::new(1, 6));
    }

    #[test]
    fn classes() {
        assert!(Phase::zero().is_pauli());
        assert!(Phase::pi().is_pauli());
        assert!(!Phase::pi2().is_pauli());
        assert!(Phase::pi2().is_clifford());
        assert!(Phase::new(3, 4).is_proper_clifford());
        assert!(!Phase::pi().is_proper_clifford());
        assert!(!Phase::pi4().is_clifford());
    }

    #[test]
    fn labels() {
        assert_eq!(Phase::zero().label(), "");
        assert_eq!(Phase::pi().label(), "π");
        assert_eq!(Phase::pi4().label(), "π/4");
        assert_eq!(Phase::new(3, 4).label(), "(3/2)π");
    }
}
