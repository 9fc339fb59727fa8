use super::*;

/// Remove a phaseless spider with exactly two wires, joining its neighbors
/// directly.
///
/// The new wire is Hadamard if exactly one of the two old wires was.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity;

/// Output of [`Identity::find`].
#[derive(Debug)]
pub struct IdentityData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) s: NodeId, // spider
    pub(crate) w1: ZXWire,
    pub(crate) w2: ZXWire,
}

impl RuleSeal for Identity { }
impl RuleFinder for Identity {
    type Output<'a> = IdentityData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let (s, w1, w2) =
            dg.nodes_inner()
            .filter(|(_, n)| n.is_spider() && n.phase().is_some_and(|ph| ph.is_zero()))
            .find_map(|(id, _)| match dg.wires_of(id)? {
                [w1, w2] => Some((id, *w1, *w2)),
                _ => None,
            })?;
        Some(IdentityData { dg, s, w1, w2 })
    }
}

impl<'a> RuleSeal for IdentityData<'a> { }
impl<'a> Rule for IdentityData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, s, w1, w2 } = self;
        dg.remove_node(s)?;
        dg.add_wire(w1.id(), w2.id(), w1.kind().compose(w2.kind()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ graph::rules::test_util::*, phase::Phase };

    fn line(k1: WireKind, k2: WireKind) -> (Diagram, NodeId, NodeId) {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        let z = dg.add_z(Phase::zero());
        dg.add_wire(i, z, k1).unwrap();
        dg.add_wire(z, o, k2).unwrap();
        (dg, i, o)
    }

    #[test]
    fn wire_kinds_compose() {
        let cases = [
            (WireKind::E, WireKind::E, WireKind::E),
            (WireKind::E, WireKind::H, WireKind::H),
            (WireKind::H, WireKind::E, WireKind::H),
            (WireKind::H, WireKind::H, WireKind::E),
        ];
        for (k1, k2, k) in cases.into_iter() {
            let (mut dg, i, o) = line(k1, k2);
            let before = dg.clone();
            assert!(dg.simplify_rule(Identity).unwrap());
            assert_eq!(dg.count_spiders(), 0);
            assert_eq!(dg.wire_between(i, o), Some(k));
            dg.check_invariants().unwrap();
            assert_same_map(&before, &dg);
        }
    }

    #[test]
    fn phased_spider_stays() {
        let mut dg = Diagram::new();
        z_on_line(&mut dg, Phase::pi4());
        assert!(dg.find_rule(Identity).is_none());
    }

    #[test]
    fn neighbors_already_connected() {
        // a phaseless spider between two Z-spiders that already share an H
        // wire; the new H wire cancels it
        let mut dg = Diagram::new();
        let a = z_on_line(&mut dg, Phase::pi4());
        let b = z_on_line(&mut dg, Phase::new(1, 8));
        let s = dg.add_z(Phase::zero());
        dg.add_wire(a, s, WireKind::H).unwrap();
        dg.add_wire(s, b, WireKind::E).unwrap();
        dg.add_wire(a, b, WireKind::H).unwrap();
        let before = dg.clone();

        assert!(dg.simplify_rule(Identity).unwrap());
        assert!(!dg.has_node(s));
        assert!(!dg.is_connected(a, b));
        assert_same_map(&before, &dg);
    }
}
