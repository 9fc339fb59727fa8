use super::*;

/// Merge two spiders of the same color connected by a plain wire, adding their
/// phases.
///
/// The surviving spider is the one with the smaller ID. Wires inherited from
/// the removed spider are re-attached one at a time, so any parallel wires
/// this creates are resolved on the spot (see [`Diagram::add_wire`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fuse;

/// Output of [`Fuse::find`].
#[derive(Debug)]
pub struct FuseData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) s1: NodeId, // survivor
    pub(crate) s2: NodeId, // absorbed
}

impl RuleSeal for Fuse { }
impl RuleFinder for Fuse {
    type Output<'a> = FuseData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let (s1, s2) = find_fusable(dg)?;
        Some(FuseData { dg, s1, s2 })
    }
}

fn find_fusable(dg: &Diagram) -> Option<(NodeId, NodeId)> {
    for (id, node) in dg.nodes_inner() {
        if !node.is_spider() { continue; }
        let mb_pair =
            dg.neighbors_of(id)?
            .find(|(w, n)| w.is_e() && n.is_same_color(node) && w.id() > id)
            .map(|(w, _)| (id, w.id()));
        if mb_pair.is_some() { return mb_pair; }
    }
    None
}

impl<'a> RuleSeal for FuseData<'a> { }
impl<'a> Rule for FuseData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, s1, s2 } = self;
        dg.remove_wire(s1, s2)?;
        let (node2, nnb2) = dg.remove_node_nb(s2)?;
        dg.add_phase(s1, node2.phase().unwrap_or_default());
        for w in nnb2.into_iter() {
            dg.add_wire(s1, w.id(), w.kind())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ graph::rules::test_util::*, phase::Phase };

    #[test]
    fn phases_add() {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        let a = dg.add_z(Phase::new(7, 10));
        let b = dg.add_z(Phase::new(6, 10));
        dg.add_wire(i, a, WireKind::E).unwrap();
        dg.add_wire(a, b, WireKind::E).unwrap();
        dg.add_wire(b, o, WireKind::E).unwrap();
        let before = dg.clone();

        assert_eq!(dg.simplify_rule_n(Fuse, None).unwrap(), 1);
        assert_eq!(dg.count_spiders(), 1);
        assert!(!dg.has_node(b));
        assert_eq!(dg.phase(a), Some(Phase::new(3, 10)));
        assert_eq!(dg.wire_between(a, o), Some(WireKind::E));
        dg.check_invariants().unwrap();
        assert_same_map(&before, &dg);
    }

    #[test]
    fn h_wire_is_not_fused() {
        let mut dg = Diagram::new();
        let a = z_on_line(&mut dg, Phase::pi4());
        let b = z_on_line(&mut dg, Phase::pi4());
        dg.add_wire(a, b, WireKind::H).unwrap();
        assert!(dg.find_rule(Fuse).is_none());
    }

    #[test]
    fn fusion_resolves_parallel_wires() {
        // two Z-spiders both attached to the same X-spider; fusing them leaves
        // a pair of plain wires between different colors, which cancel
        let mut dg = Diagram::new();
        let z1 = z_on_line(&mut dg, Phase::zero());
        let z2 = z_on_line(&mut dg, Phase::pi4());
        let x = dg.add_x(Phase::pi2());
        let o = dg.add_output();
        dg.add_wire(x, o, WireKind::E).unwrap();
        dg.add_wire(z1, x, WireKind::E).unwrap();
        dg.add_wire(z2, x, WireKind::E).unwrap();
        dg.add_wire(z1, z2, WireKind::E).unwrap();
        let before = dg.clone();

        assert!(dg.simplify_rule(Fuse).unwrap());
        assert!(!dg.is_connected(z1, x));
        assert_eq!(dg.phase(z1), Some(Phase::pi4()));
        dg.check_invariants().unwrap();
        assert_same_map(&before, &dg);
    }
}
