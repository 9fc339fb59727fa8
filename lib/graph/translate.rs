//! Conversion of [`Circuit`]s to [`Diagram`]s.
//!
//! Each qubit gets one input and one output node. Gates are laid down left to
//! right, tracking for every qubit the last node placed on its wire and the
//! kind of wire that will connect it to the next one. Hadamard gates only
//! toggle that pending kind and never produce a node.

use tracing::debug;
use crate::{
    circuit::{ Circuit, Gate },
    graph::{ Diagram, GraphResult, NodeId, WireKind, ZXNode },
};

// the open end of a qubit wire
#[derive(Copy, Clone, Debug)]
struct OutWire {
    last: NodeId,
    pending: WireKind,
}

impl Diagram {
    /// Build the diagram of a circuit.
    ///
    /// Inputs are nodes `0..n` and outputs are nodes `n..2n`, both in qubit
    /// order.
    pub fn from_circuit(circuit: &Circuit) -> GraphResult<Self> {
        let n = circuit.num_qubits();
        let mut dg = Diagram::new();
        let inputs: Vec<NodeId> = (0..n).map(|_| dg.add_input()).collect();
        let outputs: Vec<NodeId> = (0..n).map(|_| dg.add_output()).collect();
        let mut wires: Vec<OutWire> =
            inputs.iter()
            .map(|&last| OutWire { last, pending: WireKind::E })
            .collect();

        for gate in circuit.gates().iter() {
            match *gate {
                Gate::H(k) => {
                    wires[k].pending = wires[k].pending.toggled();
                },
                Gate::ZRot(k, ph) => {
                    dg.insert_node(&mut wires[k], ZXNode::Z(ph))?;
                },
                Gate::XRot(k, ph) => {
                    dg.insert_node(&mut wires[k], ZXNode::X(ph))?;
                },
                Gate::CX(c, t) => {
                    let z = dg.insert_node(&mut wires[c], ZXNode::z())?;
                    let x = dg.insert_node(&mut wires[t], ZXNode::x())?;
                    dg.add_wire(z, x, WireKind::E)?;
                },
                Gate::CZ(a, b) => {
                    let za = dg.insert_node(&mut wires[a], ZXNode::z())?;
                    let zb = dg.insert_node(&mut wires[b], ZXNode::z())?;
                    dg.add_wire(za, zb, WireKind::H)?;
                },
            }
        }
        for (wire, out) in wires.into_iter().zip(outputs) {
            dg.add_wire(wire.last, out, wire.pending)?;
        }
        debug!(
            qubits = n,
            gates = circuit.count_gates(),
            spiders = dg.count_spiders(),
            "translated circuit to diagram",
        );
        Ok(dg)
    }

    // place a node at the open end of a wire and advance the wire
    fn insert_node(&mut self, wire: &mut OutWire, node: ZXNode)
        -> GraphResult<NodeId>
    {
        let id = self.add_node(node);
        self.add_wire(wire.last, id, wire.pending)?;
        *wire = OutWire { last: id, pending: WireKind::E };
        Ok(id)
    }
}

impl TryFrom<&Circuit> for Diagram {
    type Error = crate::graph::GraphError;

    fn try_from(circuit: &Circuit) -> GraphResult<Self> {
        Self::from_circuit(circuit)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::circuit::tensor::approx_eq_upto_scalar;

    #[test]
    fn empty_circuit() {
        let circ = Circuit::new(2);
        let dg = Diagram::from_circuit(&circ).unwrap();
        assert_eq!(dg.count_nodes(), 4);
        assert_eq!(dg.count_spiders(), 0);
        assert_eq!(dg.wire_between(0, 2), Some(WireKind::E));
        assert_eq!(dg.wire_between(1, 3), Some(WireKind::E));
        dg.check_invariants().unwrap();
    }

    #[test]
    fn hadamards_are_wires() {
        let circ =
            Circuit::from_gates(1, [
                Gate::H(0),
                Gate::zrot_frac(0, 1, 8),
                Gate::H(0),
                Gate::H(0),
                Gate::H(0),
            ])
            .unwrap();
        let dg = Diagram::from_circuit(&circ).unwrap();
        assert_eq!(dg.count_spiders(), 1);
        assert_eq!(dg.wire_between(0, 2), Some(WireKind::H));
        assert_eq!(dg.wire_between(2, 1), Some(WireKind::H));
        dg.check_invariants().unwrap();
    }

    #[test]
    fn two_qubit_gates() {
        let circ =
            Circuit::from_gates(2, [Gate::CX(0, 1), Gate::CZ(1, 0)]).unwrap();
        let dg = Diagram::from_circuit(&circ).unwrap();
        assert_eq!(dg.count_z(), 3);
        assert_eq!(dg.count_x(), 1);
        assert_eq!(dg.wire_between(4, 5), Some(WireKind::E));
        assert_eq!(dg.wire_between(6, 7), Some(WireKind::H));
        dg.check_invariants().unwrap();
    }

    #[test]
    fn map_matches_unitary() {
        let circ =
            Circuit::from_gates(2, [
                Gate::zrot_frac(0, 1, 4),
                Gate::H(1),
                Gate::CX(0, 1),
                Gate::xrot_frac(1, 1, 8),
                Gate::CZ(0, 1),
                Gate::H(0),
            ])
            .unwrap();
        let dg = Diagram::from_circuit(&circ).unwrap();
        let map = dg.linear_map().unwrap();
        assert!(approx_eq_upto_scalar(&map, &circ.unitary(), 1e-9));
    }
}
