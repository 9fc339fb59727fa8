//! Brute-force evaluation of small diagrams as dense matrices.

use ndarray::Array2;
use num_complex::Complex64 as C64;
use rustc_hash::FxHashMap;
use crate::graph::{ Diagram, GraphError, GraphResult, NodeId, WireKind };

/// Maximum number of bits (spiders plus boundary nodes) summed over by
/// [`Diagram::linear_map`].
pub const MAX_SUM_BITS: usize = 22;

impl Diagram {
    /// Compute the linear map represented by `self`, up to a global scalar.
    ///
    /// The returned matrix has shape `(2^outputs, 2^inputs)`, with qubit 0 as
    /// the most significant bit of both indices. Evaluation is a direct sum
    /// over every assignment of a bit to each spider and boundary node, so
    /// this is only usable for small diagrams; fails with
    /// [`GraphError::TooLarge`] past [`MAX_SUM_BITS`].
    pub fn linear_map(&self) -> GraphResult<Array2<C64>> {
        let mut dg = self.clone();
        let xs: Vec<NodeId> =
            dg.nodes_inner()
            .filter_map(|(id, n)| n.is_x().then_some(id))
            .collect();
        for id in xs.into_iter() { dg.color_change(id)?; }

        let n_in = dg.inputs.len();
        let n_out = dg.outputs.len();
        let spiders: Vec<NodeId> =
            dg.nodes_inner()
            .filter_map(|(id, n)| n.is_spider().then_some(id))
            .collect();
        let nbits = spiders.len() + n_in + n_out;
        if nbits > MAX_SUM_BITS { return Err(GraphError::TooLarge(nbits)); }

        let var: FxHashMap<NodeId, usize> =
            spiders.iter()
            .chain(dg.inputs.iter())
            .chain(dg.outputs.iter())
            .enumerate()
            .map(|(k, id)| (*id, k))
            .collect();
        let wires: Vec<(usize, usize, WireKind)> =
            dg.wires_inner()
            .map(|(a, w)| (var[&a], var[&w.id()], w.kind()))
            .collect();
        let phases: Vec<C64> =
            spiders.iter()
            .map(|id| dg.phase(*id).unwrap_or_default().cis())
            .collect();
        let in0 = spiders.len();
        let out0 = in0 + n_in;

        let mut map: Array2<C64> = Array2::zeros((1 << n_out, 1 << n_in));
        let bit = |assignment: usize, k: usize| (assignment >> k) & 1;
        'outer: for assignment in 0_usize..(1 << nbits) {
            let mut amp = C64::new(1.0, 0.0);
            for &(a, b, kind) in wires.iter() {
                let (ba, bb) = (bit(assignment, a), bit(assignment, b));
                match kind {
                    WireKind::E if ba != bb => { continue 'outer; },
                    WireKind::H if ba == 1 && bb == 1 => { amp = -amp; },
                    _ => { },
                }
            }
            for (k, ph) in phases.iter().enumerate() {
                if bit(assignment, k) == 1 { amp *= ph; }
            }
            let x =
                (0..n_in)
                .fold(0, |acc, q| (acc << 1) | bit(assignment, in0 + q));
            let y =
                (0..n_out)
                .fold(0, |acc, q| (acc << 1) | bit(assignment, out0 + q));
            map[[y, x]] += amp;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        circuit::tensor::approx_eq_upto_scalar,
        phase::Phase,
    };

    #[test]
    fn single_wire() {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        dg.add_wire(i, o, WireKind::E).unwrap();
        let map = dg.linear_map().unwrap();
        let id = Array2::from_diag(&ndarray::arr1(&[C64::from(1.0); 2]));
        assert!(approx_eq_upto_scalar(&map, &id, 1e-9));

        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        dg.add_wire(i, o, WireKind::H).unwrap();
        let map = dg.linear_map().unwrap();
        let h = ndarray::array![[1.0, 1.0], [1.0, -1.0]].mapv(C64::from);
        assert!(approx_eq_upto_scalar(&map, &h, 1e-9));
    }

    #[test]
    fn z_and_x_phases() {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        let z = dg.add_z(Phase::pi2());
        dg.add_wire(i, z, WireKind::E).unwrap();
        dg.add_wire(z, o, WireKind::E).unwrap();
        let map = dg.linear_map().unwrap();
        let s = ndarray::array![
            [C64::from(1.0), C64::from(0.0)],
            [C64::from(0.0), C64::new(0.0, 1.0)],
        ];
        assert!(approx_eq_upto_scalar(&map, &s, 1e-9));

        // an X(π) spider is a NOT gate
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        let x = dg.add_x(Phase::pi());
        dg.add_wire(i, x, WireKind::E).unwrap();
        dg.add_wire(x, o, WireKind::E).unwrap();
        let map = dg.linear_map().unwrap();
        let not = ndarray::array![[0.0, 1.0], [1.0, 0.0]].mapv(C64::from);
        assert!(approx_eq_upto_scalar(&map, &not, 1e-9));
    }

    #[test]
    fn too_large() {
        let mut dg = Diagram::new();
        (0..MAX_SUM_BITS + 1).for_each(|_| { dg.add_z(Phase::zero()); });
        assert!(matches!(dg.linear_map(), Err(GraphError::TooLarge(_))));
    }
}
