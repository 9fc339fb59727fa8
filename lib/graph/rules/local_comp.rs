use itertools::Itertools;
use super::*;

/// Remove an interior Z-spider with phase ±π/2 by local complementation.
///
/// The spider must be connected only to other Z-spiders, and only by Hadamard
/// wires. Removing it complements the Hadamard wires among its neighbors and
/// subtracts its phase from each of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalComp;

/// Output of [`LocalComp::find`].
#[derive(Debug)]
pub struct LocalCompData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) s: NodeId, // spider
}

impl RuleSeal for LocalComp { }
impl RuleFinder for LocalComp {
    type Output<'a> = LocalCompData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let s =
            dg.nodes_inner()
            .filter(|(_, n)| n.is_z_and(|ph| ph.is_proper_clifford()))
            .map(|(id, _)| id)
            .find(|id| {
                dg.arity(*id).is_some_and(|k| k > 0) && is_interior_h(dg, *id)
            })?;
        Some(LocalCompData { dg, s })
    }
}

impl<'a> RuleSeal for LocalCompData<'a> { }
impl<'a> Rule for LocalCompData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, s } = self;
        let (node, nnb) = dg.remove_node_nb(s)?;
        let alpha = node.phase().unwrap_or_default();
        for (a, b) in nnb.iter().map(|w| w.id()).tuple_combinations() {
            dg.add_wire(a, b, WireKind::H)?;
        }
        for w in nnb.iter() {
            dg.add_phase(w.id(), -alpha);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ graph::rules::test_util::*, phase::Phase };

    #[test]
    fn complements_neighborhood() {
        let mut dg = Diagram::new();
        let a = z_on_line(&mut dg, Phase::zero());
        let b = z_on_line(&mut dg, Phase::new(1, 8));
        let c = z_on_line(&mut dg, Phase::pi());
        let u = dg.add_z(Phase::pi2());
        for nb in [a, b, c] { dg.add_wire(u, nb, WireKind::H).unwrap(); }
        dg.add_wire(a, b, WireKind::H).unwrap();
        let before = dg.clone();

        assert!(dg.simplify_rule(LocalComp).unwrap());
        assert!(!dg.has_node(u));
        assert!(!dg.is_connected(a, b));
        assert_eq!(dg.wire_between(a, c), Some(WireKind::H));
        assert_eq!(dg.wire_between(b, c), Some(WireKind::H));
        assert_eq!(dg.phase(a), Some(Phase::new(3, 4)));
        assert_eq!(dg.phase(b), Some(Phase::new(7, 8)));
        assert_eq!(dg.phase(c), Some(Phase::new(1, 4)));
        dg.check_invariants().unwrap();
        assert_same_map(&before, &dg);
    }

    #[test]
    fn boundary_neighbor_blocks() {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let a = z_on_line(&mut dg, Phase::zero());
        let u = dg.add_z(Phase::new(3, 4));
        dg.add_wire(i, u, WireKind::H).unwrap();
        dg.add_wire(u, a, WireKind::H).unwrap();
        assert!(dg.find_rule(LocalComp).is_none());
    }

    #[test]
    fn pauli_phase_is_not_candidate() {
        let mut dg = Diagram::new();
        let a = z_on_line(&mut dg, Phase::zero());
        let b = z_on_line(&mut dg, Phase::zero());
        let u = dg.add_z(Phase::pi());
        dg.add_wire(u, a, WireKind::H).unwrap();
        dg.add_wire(u, b, WireKind::H).unwrap();
        assert!(dg.find_rule(LocalComp).is_none());
    }
}
