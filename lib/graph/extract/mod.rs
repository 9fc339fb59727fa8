//! Recovery of a [`Circuit`] from a [`Diagram`].
//!
//! Extraction works backwards from the outputs of a graph-like copy of the
//! diagram. Every output is attached by a plain wire to its own Z-spider, the
//! *frontier*. Gates are peeled off between the frontier and the outputs
//! until every frontier spider is connected directly to an input:
//!
//! - frontier phases become Z-rotations;
//! - Hadamard wires between frontier spiders become CZ gates (emitted as
//!   `H`–`CX`–`H`);
//! - when a frontier spider has a single other neighbor, the frontier moves
//!   onto that neighbor and a Hadamard is emitted;
//! - otherwise, the biadjacency matrix between the frontier and its
//!   neighborhood is row-reduced over GF(2), each row operation becoming a
//!   `CX` gate;
//! - when row reduction does not help, a frontier spider is pivoted away
//!   together with a suitable neighbor.
//!
//! Once every output is connected to an input, the remaining permutation is
//! realized with `CX` gates. The result uses only `H`, `ZRot`, and `CX`.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{ debug, trace };
use crate::{
    circuit::{ Circuit, CircuitError, Gate },
    graph::{
        Diagram,
        GraphError,
        NodeId,
        QubitId,
        WireKind,
        rules::{ PivotData, Rule, is_interior_h },
    },
    phase::Phase,
};

pub mod mat2;
use mat2::{ Mat2, RowAdd };

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction stalled: no frontier spider can be advanced or pivoted")]
    NoProgress,

    #[error("cannot extract a circuit from a diagram with {0} input(s) and {1} output(s)")]
    Unbalanced(usize, usize),

    #[error("outputs are not connected to inputs one-to-one")]
    NotPermutation,

    #[error("frontier spiders {0} and {1} are connected by a plain wire")]
    NotGraphLike(NodeId, NodeId),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("extracted an invalid gate: {0}")]
    Circuit(#[from] CircuitError),
}
pub type ExtractResult<T> = Result<T, ExtractError>;

impl Diagram {
    /// Extract a circuit implementing the linear map of `self`, up to a
    /// global scalar.
    ///
    /// `self` is left untouched; extraction runs on a graph-like copy. Fails
    /// with [`ExtractError::NoProgress`] if the diagram has no circuit-like
    /// structure to recover, which can happen for diagrams that were not
    /// obtained from a circuit by map-preserving rewrites.
    pub fn extract_circuit(&self) -> ExtractResult<Circuit> {
        self.check_invariants()?;
        let n_in = self.count_inputs();
        let n_out = self.count_outputs();
        if n_in != n_out { return Err(ExtractError::Unbalanced(n_in, n_out)); }
        let mut dg = self.clone();
        dg.to_graph_like()?;
        let mut ex = Extractor::new(dg)?;
        ex.run()?;
        let circuit = ex.finish()?;
        debug!(
            qubits = circuit.num_qubits(),
            gates = circuit.count_gates(),
            cx = circuit.count_cx(),
            "extracted circuit",
        );
        Ok(circuit)
    }
}

// where an output ended up: the input it is connected to, and whether
// through a Hadamard wire
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Done {
    input: QubitId,
    h: bool,
}

#[derive(Clone, Debug)]
struct Extractor {
    dg: Diagram,
    outputs: Vec<NodeId>,
    frontier: Vec<Option<NodeId>>,
    done: Vec<Option<Done>>,
    // gates in reverse order, outputs first
    log: Vec<Gate>,
}

impl Extractor {
    // attach every output to a distinct frontier spider by a plain wire
    fn new(mut dg: Diagram) -> ExtractResult<Self> {
        let outputs: Vec<NodeId> = dg.outputs().to_vec();
        let n = outputs.len();
        let mut frontier: Vec<Option<NodeId>> = vec![None; n];
        let mut done: Vec<Option<Done>> = vec![None; n];
        let mut log: Vec<Gate> = Vec::new();
        for (q, &o) in outputs.iter().enumerate() {
            let wire = *dg.wires_of(o).and_then(|nnb| nnb.first())
                .ok_or(GraphError::IOArity(o, 0))?;
            let nb = wire.id();
            if let Some(input) = dg.input_index(nb) {
                done[q] = Some(Done { input, h: wire.is_h() });
                continue;
            }
            if dg.is_boundary(nb) { return Err(ExtractError::NotPermutation); }
            if wire.is_h() {
                log.push(Gate::H(q));
                dg.set_wire_kind(o, nb, WireKind::E)?;
            }
            if frontier.contains(&Some(nb)) {
                dg.remove_wire(o, nb)?;
                let z1 = dg.add_z(Phase::zero());
                let z2 = dg.add_z(Phase::zero());
                dg.add_wire(o, z1, WireKind::E)?;
                dg.add_wire(z1, z2, WireKind::H)?;
                dg.add_wire(z2, nb, WireKind::H)?;
                frontier[q] = Some(z1);
            } else {
                frontier[q] = Some(nb);
            }
        }
        Ok(Self { dg, outputs, frontier, done, log })
    }

    fn active(&self) -> Vec<(QubitId, NodeId)> {
        self.frontier.iter().enumerate()
            .filter_map(|(q, mb_v)| mb_v.map(|v| (q, v)))
            .collect()
    }

    fn run(&mut self) -> ExtractResult<()> {
        loop {
            self.extract_phases();
            self.extract_cz()?;
            let mut progress = self.resolve_inputs()?;
            if self.frontier.iter().all(|v| v.is_none()) { break; }

            let (qv, cols, mut mat) = self.biadjacency();
            if self.advance(&qv, &cols, &mat)? {
                progress = true;
            } else {
                let ops = mat.gauss_jordan();
                if !ops.is_empty() {
                    self.apply_row_ops(&qv, &ops)?;
                    let (qv, cols, mat) = self.biadjacency();
                    progress |= self.advance(&qv, &cols, &mat)?;
                }
                if !progress {
                    progress = self.basis_change()?;
                }
            }
            if !progress { return Err(ExtractError::NoProgress); }
            trace!(
                remaining = self.frontier.iter().filter(|v| v.is_some()).count(),
                spiders = self.dg.count_spiders(),
                "extraction step",
            );
        }
        Ok(())
    }

    // move frontier phases onto the output wires
    fn extract_phases(&mut self) {
        for (q, v) in self.active().into_iter() {
            let ph = self.dg.phase(v).unwrap_or_default();
            if !ph.is_zero() {
                self.log.push(Gate::ZRot(q, ph));
                self.dg.set_phase(v, Phase::zero());
            }
        }
    }

    // turn wires between frontier spiders into CZ gates
    fn extract_cz(&mut self) -> ExtractResult<()> {
        let active = self.active();
        for (k, &(q1, v1)) in active.iter().enumerate() {
            for &(q2, v2) in active.iter().skip(k + 1) {
                match self.dg.wire_between(v1, v2) {
                    Some(WireKind::H) => {
                        self.dg.remove_wire(v1, v2)?;
                        self.log.push(Gate::H(q2));
                        self.log.push(Gate::CX(q1, q2));
                        self.log.push(Gate::H(q2));
                    },
                    Some(WireKind::E) => {
                        return Err(ExtractError::NotGraphLike(v1, v2));
                    },
                    None => { },
                }
            }
        }
        Ok(())
    }

    // finish frontier spiders connected only to an input, and separate inputs
    // from frontier spiders that have other neighbors
    fn resolve_inputs(&mut self) -> ExtractResult<bool> {
        let mut progress = false;
        for (q, v) in self.active().into_iter() {
            let o = self.outputs[q];
            let others: Vec<(NodeId, WireKind)> =
                self.dg.wires_of(v).unwrap_or_default()
                .iter()
                .filter(|w| !w.has_id(o))
                .map(|w| (w.id(), w.kind()))
                .collect();
            let inputs: Vec<(NodeId, WireKind)> =
                others.iter().copied()
                .filter(|(nb, _)| self.dg.input_index(*nb).is_some())
                .collect();
            match (others.as_slice(), inputs.as_slice()) {
                ([_], [(b, kind)]) => {
                    let input =
                        self.dg.input_index(*b).ok_or(GraphError::MissingNode(*b))?;
                    self.done[q] = Some(Done { input, h: *kind == WireKind::H });
                    self.frontier[q] = None;
                    progress = true;
                },
                (_, inputs) => {
                    for &(b, kind) in inputs.iter() {
                        self.dg.remove_wire(b, v)?;
                        let w = self.dg.add_z(Phase::zero());
                        self.dg.add_wire(b, w, kind.toggled())?;
                        self.dg.add_wire(w, v, WireKind::H)?;
                        progress = true;
                    }
                },
            }
        }
        Ok(progress)
    }

    // frontier spiders (by qubit), their non-output neighbors, and the
    // biadjacency matrix between the two
    fn biadjacency(&self) -> (Vec<(QubitId, NodeId)>, Vec<NodeId>, Mat2) {
        let qv = self.active();
        let mut cols: Vec<NodeId> =
            qv.iter()
            .flat_map(|(q, v)| {
                let o = self.outputs[*q];
                self.dg.neighbor_ids_of(*v)
                    .into_iter()
                    .flatten()
                    .filter(move |nb| *nb != o)
            })
            .collect::<FxHashSet<NodeId>>()
            .into_iter()
            .collect();
        cols.sort_unstable();
        let mat =
            Mat2::from_fn(qv.len(), cols.len(), |(r, c)| {
                self.dg.is_connected(qv[r].1, cols[c])
            });
        (qv, cols, mat)
    }

    // move the frontier past every spider whose row has a single 1 in a column
    // not already taken by another row
    fn advance(
        &mut self,
        qv: &[(QubitId, NodeId)],
        cols: &[NodeId],
        mat: &Mat2,
    ) -> ExtractResult<bool>
    {
        let mut taken: FxHashSet<usize> = FxHashSet::default();
        let mut progress = false;
        for (r, &(q, v)) in qv.iter().enumerate() {
            if mat.row_weight(r) != 1 { continue; }
            let Some(&c) = mat.row_ones(r).first() else { continue; };
            if !taken.insert(c) { continue; }
            let w = cols[c];
            let o = self.outputs[q];
            self.log.push(Gate::H(q));
            self.dg.remove_node(v)?;
            self.dg.add_wire(o, w, WireKind::E)?;
            self.frontier[q] = Some(w);
            progress = true;
        }
        Ok(progress)
    }

    // mirror row operations on the frontier's wires, recording a CX for each
    fn apply_row_ops(&mut self, qv: &[(QubitId, NodeId)], ops: &[RowAdd])
        -> ExtractResult<()>
    {
        let frontier: FxHashSet<NodeId> = qv.iter().map(|(_, v)| *v).collect();
        for op in ops.iter() {
            let (q_src, v_src) = qv[op.src];
            let (q_dst, v_dst) = qv[op.dst];
            let o_src = self.outputs[q_src];
            let targets: Vec<NodeId> =
                self.dg.neighbor_ids_of(v_src)
                .ok_or(GraphError::MissingNode(v_src))?
                .filter(|nb| *nb != o_src && !frontier.contains(nb))
                .collect();
            for w in targets.into_iter() {
                self.dg.add_wire(v_dst, w, WireKind::H)?;
            }
            self.log.push(Gate::CX(q_dst, q_src));
        }
        Ok(())
    }

    // pivot a frontier spider with an interior neighbor of phase 0 or π,
    // moving the frontier onto a fresh spider
    fn basis_change(&mut self) -> ExtractResult<bool> {
        let frontier: FxHashSet<NodeId> =
            self.frontier.iter().flatten().copied().collect();
        let candidate =
            self.active().into_iter()
            .find_map(|(q, v)| {
                self.dg.neighbor_ids_of(v)?
                    .find(|w| {
                        !frontier.contains(w) && self.is_pivot_partner(*w)
                    })
                    .map(|w| (q, v, w))
            });
        let Some((q, v, w)) = candidate else { return Ok(false); };
        let o = self.outputs[q];
        self.log.push(Gate::H(q));
        self.dg.remove_wire(o, v)?;
        let z = self.dg.add_z(Phase::zero());
        self.dg.add_wire(o, z, WireKind::E)?;
        self.dg.add_wire(z, v, WireKind::H)?;
        PivotData { dg: &mut self.dg, u: v, v: w }.simplify()?;
        self.frontier[q] = Some(z);
        Ok(true)
    }

    fn is_pivot_partner(&self, w: NodeId) -> bool {
        self.dg.get_node(w).is_some_and(|n| n.is_z_and(|ph| ph.is_pauli()))
            && is_interior_h(&self.dg, w)
    }

    // realize the final input-output connections and assemble the circuit
    fn finish(self) -> ExtractResult<Circuit> {
        let n = self.outputs.len();
        let done: Vec<Done> =
            self.done.iter().copied()
            .collect::<Option<Vec<Done>>>()
            .ok_or(ExtractError::NoProgress)?;
        let mut seen = vec![false; n];
        for d in done.iter() {
            if d.input >= n || seen[d.input] {
                return Err(ExtractError::NotPermutation);
            }
            seen[d.input] = true;
        }

        let mut circuit = Circuit::new(n);
        for d in done.iter().filter(|d| d.h) {
            circuit.push(Gate::H(d.input))?;
        }
        // `line[k]` is the input currently carried by wire `k`
        let mut line: Vec<QubitId> = (0..n).collect();
        for (q, d) in done.iter().enumerate() {
            if line[q] == d.input { continue; }
            let Some(k) = (q + 1..n).find(|k| line[*k] == d.input)
                else { return Err(ExtractError::NotPermutation); };
            circuit.extend([Gate::CX(q, k), Gate::CX(k, q), Gate::CX(q, k)])?;
            line.swap(q, k);
        }
        circuit.extend(self.log.into_iter().rev())?;
        Ok(circuit)
    }
}
