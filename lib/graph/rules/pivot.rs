use itertools::Itertools;
use rustc_hash::FxHashSet;
use crate::phase::Phase;
use super::*;

/// Remove a pair of adjacent interior Z-spiders with phases 0 or π by pivoting
/// along the wire between them.
///
/// Both spiders must be connected only to Z-spiders, and only by Hadamard
/// wires. Write *A* for the neighbors of only the first, *B* for the
/// neighbors of only the second, and *C* for their shared neighbors. Removing
/// the pair toggles the wires between each pair of sets, adds the second
/// spider's phase to *A*, the first's to *B*, and both plus π to *C*.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pivot;

/// Output of [`Pivot::find`].
#[derive(Debug)]
pub struct PivotData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) u: NodeId,
    pub(crate) v: NodeId,
}

fn is_pivot_candidate(dg: &Diagram, id: NodeId) -> bool {
    dg.get_node(id).is_some_and(|n| n.is_z_and(|ph| ph.is_pauli()))
        && is_interior_h(dg, id)
}

impl RuleSeal for Pivot { }
impl RuleFinder for Pivot {
    type Output<'a> = PivotData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let (u, v) =
            dg.nodes_inner()
            .map(|(id, _)| id)
            .filter(|id| is_pivot_candidate(dg, *id))
            .find_map(|u| {
                dg.neighbor_ids_of(u)?
                    .find(|v| *v > u && is_pivot_candidate(dg, *v))
                    .map(|v| (u, v))
            })?;
        Some(PivotData { dg, u, v })
    }
}

impl<'a> RuleSeal for PivotData<'a> { }
impl<'a> Rule for PivotData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, u, v } = self;
        let (node_u, nnb_u) = dg.remove_node_nb(u)?;
        let (node_v, nnb_v) = dg.remove_node_nb(v)?;
        let ph_u = node_u.phase().unwrap_or_default();
        let ph_v = node_v.phase().unwrap_or_default();
        let nb_u: Vec<NodeId> =
            nnb_u.iter().map(|w| w.id()).filter(|id| *id != v).collect();
        let nb_v: Vec<NodeId> =
            nnb_v.iter().map(|w| w.id()).filter(|id| *id != u).collect();
        let set_u: FxHashSet<NodeId> = nb_u.iter().copied().collect();
        let set_v: FxHashSet<NodeId> = nb_v.iter().copied().collect();
        let only_u: Vec<NodeId> =
            nb_u.iter().copied().filter(|id| !set_v.contains(id)).collect();
        let only_v: Vec<NodeId> =
            nb_v.iter().copied().filter(|id| !set_u.contains(id)).collect();
        let both: Vec<NodeId> =
            nb_u.iter().copied().filter(|id| set_v.contains(id)).collect();

        let pairs =
            only_u.iter().cartesian_product(only_v.iter())
            .chain(only_u.iter().cartesian_product(both.iter()))
            .chain(only_v.iter().cartesian_product(both.iter()));
        for (a, b) in pairs {
            dg.add_wire(*a, *b, WireKind::H)?;
        }
        only_u.iter().for_each(|id| { dg.add_phase(*id, ph_v); });
        only_v.iter().for_each(|id| { dg.add_phase(*id, ph_u); });
        both.iter()
            .for_each(|id| { dg.add_phase(*id, ph_u + ph_v + Phase::pi()); });
        Ok(())
    }
}
