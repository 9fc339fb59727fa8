use rustc_hash::FxHashMap;
use crate::phase::Phase;
use super::*;

/// Merge two phase gadgets acting on the same set of spiders.
///
/// A phase gadget is a *leaf* Z-spider with a single Hadamard wire to a *hub*
/// Z-spider with phase 0 or π, where the hub is connected only to Z-spiders,
/// only by Hadamard wires, and to at least one spider besides the leaf. Two
/// gadgets whose hubs have the same neighbors (leaves aside) are replaced by a
/// single one whose leaf carries the sum of both phases. A hub with phase π is
/// first normalized to 0 by negating its leaf's phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GadgetFuse;

/// Output of [`GadgetFuse::find`].
#[derive(Debug)]
pub struct GadgetFuseData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) g1: Gadget, // survivor
    pub(crate) g2: Gadget, // absorbed
}

/// A phase gadget found by [`GadgetFuse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gadget {
    pub hub: NodeId,
    pub leaf: NodeId,
}

fn gadget_at(dg: &Diagram, leaf: NodeId) -> Option<Gadget> {
    if !dg.get_node(leaf)?.is_z() { return None; }
    let [wire] = dg.wires_of(leaf)? else { return None; };
    if !wire.is_h() { return None; }
    let hub = wire.id();
    let is_hub =
        dg.get_node(hub)?.is_z_and(|ph| ph.is_pauli())
        && dg.arity(hub)? >= 2
        && is_interior_h(dg, hub);
    is_hub.then_some(Gadget { hub, leaf })
}

fn find_gadget_pair(dg: &Diagram) -> Option<(Gadget, Gadget)> {
    let mut seen: FxHashMap<Vec<NodeId>, Gadget> = FxHashMap::default();
    for (id, _) in dg.nodes_inner() {
        let Some(gadget) = gadget_at(dg, id) else { continue; };
        let mut key: Vec<NodeId> =
            dg.neighbor_ids_of(gadget.hub)?
            .filter(|nb| *nb != gadget.leaf)
            .collect();
        key.sort_unstable();
        if let Some(first) = seen.get(&key) {
            return Some((*first, gadget));
        }
        seen.insert(key, gadget);
    }
    None
}

impl RuleSeal for GadgetFuse { }
impl RuleFinder for GadgetFuse {
    type Output<'a> = GadgetFuseData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let (g1, g2) = find_gadget_pair(dg)?;
        Some(GadgetFuseData { dg, g1, g2 })
    }
}

impl<'a> RuleSeal for GadgetFuseData<'a> { }
impl<'a> Rule for GadgetFuseData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, g1, g2 } = self;
        for g in [g1, g2] {
            if dg.phase(g.hub) == Some(Phase::pi()) {
                dg.set_phase(g.hub, Phase::zero());
                let leaf_ph = dg.phase(g.leaf).unwrap_or_default();
                dg.set_phase(g.leaf, -leaf_ph);
            }
        }
        let leaf_ph = dg.remove_node(g2.leaf)?.phase().unwrap_or_default();
        dg.remove_node(g2.hub)?;
        dg.add_phase(g1.leaf, leaf_ph);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::rules::test_util::*;

    fn add_gadget(dg: &mut Diagram, hub_ph: Phase, leaf_ph: Phase, on: &[NodeId])
        -> Gadget
    {
        let hub = dg.add_z(hub_ph);
        let leaf = dg.add_z(leaf_ph);
        dg.add_wire(hub, leaf, WireKind::H).unwrap();
        for t in on.iter() { dg.add_wire(hub, *t, WireKind::H).unwrap(); }
        Gadget { hub, leaf }
    }

    #[test]
    fn merges_matching_gadgets() {
        let mut dg = Diagram::new();
        let t0 = z_on_line(&mut dg, Phase::zero());
        let t1 = z_on_line(&mut dg, Phase::zero());
        let g1 = add_gadget(&mut dg, Phase::zero(), Phase::new(1, 8), &[t0, t1]);
        let g2 = add_gadget(&mut dg, Phase::zero(), Phase::new(1, 16), &[t1, t0]);
        let before = dg.clone();

        assert!(dg.simplify_rule(GadgetFuse).unwrap());
        assert!(!dg.has_node(g2.hub));
        assert!(!dg.has_node(g2.leaf));
        assert_eq!(dg.phase(g1.leaf), Some(Phase::new(3, 16)));
        dg.check_invariants().unwrap();
        assert_same_map(&before, &dg);
    }

    #[test]
    fn pi_hub_is_normalized() {
        let mut dg = Diagram::new();
        let t0 = z_on_line(&mut dg, Phase::zero());
        let t1 = z_on_line(&mut dg, Phase::new(1, 4));
        let g1 = add_gadget(&mut dg, Phase::zero(), Phase::new(1, 8), &[t0, t1]);
        add_gadget(&mut dg, Phase::pi(), Phase::new(1, 16), &[t0, t1]);
        let before = dg.clone();

        assert!(dg.simplify_rule(GadgetFuse).unwrap());
        assert_eq!(dg.phase(g1.hub), Some(Phase::zero()));
        assert_eq!(dg.phase(g1.leaf), Some(Phase::new(1, 16)));
        assert_same_map(&before, &dg);
    }

    #[test]
    fn different_targets_stay() {
        let mut dg = Diagram::new();
        let t0 = z_on_line(&mut dg, Phase::zero());
        let t1 = z_on_line(&mut dg, Phase::zero());
        let t2 = z_on_line(&mut dg, Phase::zero());
        add_gadget(&mut dg, Phase::zero(), Phase::new(1, 8), &[t0, t1]);
        add_gadget(&mut dg, Phase::zero(), Phase::new(1, 8), &[t1, t2]);
        assert!(dg.find_rule(GadgetFuse).is_none());
    }
}
