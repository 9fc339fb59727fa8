//! Fixpoint simplification of diagrams.
//!
//! [`Diagram::simplify`] first brings a diagram into graph-like form, then
//! alternates between cheap, local rewrites ([`Fuse`], [`Identity`]) applied
//! to a fixpoint and single applications of the vertex-eliminating rules
//! ([`LocalComp`], [`Pivot`], [`GadgetFuse`]), in that order of preference.
//! Every rewrite other than a color change removes at least one node, so the
//! process always terminates.

use tracing::{ debug, trace };
use crate::graph::{
    Diagram,
    GraphResult,
    rules::{ ColorChange, Fuse, GadgetFuse, Identity, LocalComp, Pivot },
};

/// Options controlling [`Diagram::simplify`].
///
/// All rules are enabled by default, with no limit on the number of rewrites.
///
/// ```
/// # use zx_opt::graph::simplify::SimplifyOptions;
/// let opts = SimplifyOptions::default().pivot(false).max_rewrites(Some(100));
/// assert!(opts.local_comp);
/// assert!(!opts.pivot);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Apply [`LocalComp`].
    pub local_comp: bool,
    /// Apply [`Pivot`].
    pub pivot: bool,
    /// Apply [`GadgetFuse`].
    pub gadget_fusion: bool,
    /// Stop after this many node-removing rewrites.
    pub max_rewrites: Option<usize>,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            local_comp: true,
            pivot: true,
            gadget_fusion: true,
            max_rewrites: None,
        }
    }
}

impl SimplifyOptions {
    /// Enable or disable local complementation.
    pub fn local_comp(mut self, onoff: bool) -> Self {
        self.local_comp = onoff;
        self
    }

    /// Enable or disable pivoting.
    pub fn pivot(mut self, onoff: bool) -> Self {
        self.pivot = onoff;
        self
    }

    /// Enable or disable phase gadget fusion.
    pub fn gadget_fusion(mut self, onoff: bool) -> Self {
        self.gadget_fusion = onoff;
        self
    }

    /// Set the rewrite budget.
    pub fn max_rewrites(mut self, max: Option<usize>) -> Self {
        self.max_rewrites = max;
        self
    }

    /// Disable all vertex-eliminating rules, leaving only spider fusion and
    /// identity removal.
    pub fn basic() -> Self {
        Self::default().local_comp(false).pivot(false).gadget_fusion(false)
    }
}

/// Record of the rewrites performed by [`Diagram::simplify`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub color_change: usize,
    pub fuse: usize,
    pub identity: usize,
    pub local_comp: usize,
    pub pivot: usize,
    pub gadget_fusion: usize,
    /// Number of nodes before simplification.
    pub nodes_before: usize,
    /// Number of nodes after simplification.
    pub nodes_after: usize,
    /// `true` if simplification stopped because the rewrite budget ran out
    /// rather than at a fixpoint.
    pub exhausted: bool,
}

impl SimplifyStats {
    /// Return the total number of node-removing rewrites.
    pub fn rewrites(&self) -> usize {
        self.fuse + self.identity + self.local_comp + self.pivot
            + self.gadget_fusion
    }
}

impl Diagram {
    /// Bring `self` into graph-like form by converting every X-spider to a
    /// Z-spider and fusing all Z-spiders connected by plain wires.
    ///
    /// Returns the number of `(color changes, fusions)` performed.
    pub fn to_graph_like(&mut self) -> GraphResult<(usize, usize)> {
        let n_color = self.simplify_rule_n(ColorChange, None)?;
        let n_fuse = self.simplify_rule_n(Fuse, None)?;
        Ok((n_color, n_fuse))
    }

    /// Simplify `self` in place, preserving its linear map up to a global
    /// scalar.
    ///
    /// The diagram's inputs and outputs are left in place. Fails only if the
    /// structural invariants of the diagram are found to be broken, either on
    /// entry or after rewriting.
    pub fn simplify(&mut self, opts: &SimplifyOptions)
        -> GraphResult<SimplifyStats>
    {
        self.check_invariants()?;
        let mut stats =
            SimplifyStats { nodes_before: self.count_nodes(), ..Default::default() };
        stats.color_change = self.simplify_rule_n(ColorChange, None)?;
        let in_budget = |stats: &SimplifyStats| {
            opts.max_rewrites.map_or(true, |max| stats.rewrites() < max)
        };

        'outer: loop {
            loop {
                if !in_budget(&stats) {
                    stats.exhausted = true;
                    break 'outer;
                }
                if self.simplify_rule(Fuse)? {
                    stats.fuse += 1;
                } else if self.simplify_rule(Identity)? {
                    stats.identity += 1;
                } else {
                    break;
                }
            }
            if opts.local_comp && self.simplify_rule(LocalComp)? {
                trace!(nodes = self.count_nodes(), "local complementation");
                stats.local_comp += 1;
            } else if opts.pivot && self.simplify_rule(Pivot)? {
                trace!(nodes = self.count_nodes(), "pivot");
                stats.pivot += 1;
            } else if opts.gadget_fusion && self.simplify_rule(GadgetFuse)? {
                trace!(nodes = self.count_nodes(), "gadget fusion");
                stats.gadget_fusion += 1;
            } else {
                break;
            }
        }

        self.check_invariants()?;
        stats.nodes_after = self.count_nodes();
        debug!(
            nodes_before = stats.nodes_before,
            nodes_after = stats.nodes_after,
            fuse = stats.fuse,
            identity = stats.identity,
            local_comp = stats.local_comp,
            pivot = stats.pivot,
            gadget_fusion = stats.gadget_fusion,
            exhausted = stats.exhausted,
            "simplified diagram",
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        circuit::{ Circuit, Gate },
        graph::rules::test_util::assert_same_map,
        phase::Phase,
    };

    fn sample_circuit() -> Circuit {
        Circuit::from_gates(3, [
            Gate::H(0),
            Gate::CX(0, 1),
            Gate::zrot_frac(1, 1, 8),
            Gate::CX(1, 2),
            Gate::CZ(0, 2),
            Gate::zrot_frac(2, 1, 4),
            Gate::xrot_frac(0, 1, 2),
            Gate::CX(2, 0),
            Gate::H(2),
            Gate::zrot_frac(0, 3, 8),
            Gate::CX(0, 1),
        ])
        .unwrap()
    }

    #[test]
    fn fixpoint_is_reached() {
        let mut dg = Diagram::from_circuit(&sample_circuit()).unwrap();
        let stats = dg.simplify(&SimplifyOptions::default()).unwrap();
        assert!(!stats.exhausted);
        assert!(dg.is_graph_like());
        assert!(stats.nodes_after <= stats.nodes_before);
        assert_eq!(stats.nodes_after, dg.count_nodes());

        let again = dg.simplify(&SimplifyOptions::default()).unwrap();
        assert_eq!(again.rewrites(), 0);
        assert_eq!(again.color_change, 0);
    }

    #[test]
    fn preserves_map_and_boundary() {
        let circ = sample_circuit();
        let orig = Diagram::from_circuit(&circ).unwrap();
        for opts in [SimplifyOptions::default(), SimplifyOptions::basic()] {
            let mut dg = orig.clone();
            dg.simplify(&opts).unwrap();
            assert_eq!(dg.inputs(), orig.inputs());
            assert_eq!(dg.outputs(), orig.outputs());
            assert_same_map(&orig, &dg);
        }
    }

    #[test]
    fn more_rules_never_hurt() {
        let circ = sample_circuit();
        let mut basic = Diagram::from_circuit(&circ).unwrap();
        basic.simplify(&SimplifyOptions::basic()).unwrap();
        let mut full = Diagram::from_circuit(&circ).unwrap();
        full.simplify(&SimplifyOptions::default()).unwrap();
        assert!(full.count_spiders() <= basic.count_spiders());
    }

    #[test]
    fn budget_is_respected() {
        let mut dg = Diagram::from_circuit(&sample_circuit()).unwrap();
        let opts = SimplifyOptions::default().max_rewrites(Some(2));
        let stats = dg.simplify(&opts).unwrap();
        assert!(stats.exhausted);
        assert_eq!(stats.rewrites(), 2);
        dg.check_invariants().unwrap();
    }

    #[test]
    fn cancelling_rotations_vanish() {
        let circ =
            Circuit::from_gates(1, [
                Gate::zrot_frac(0, 7, 10),
                Gate::zrot_frac(0, 3, 10),
            ])
            .unwrap();
        let mut dg = Diagram::from_circuit(&circ).unwrap();
        dg.simplify(&SimplifyOptions::default()).unwrap();
        assert_eq!(dg.count_spiders(), 0);
        assert_eq!(dg.wire_between(0, 1), Some(crate::graph::WireKind::E));
    }

    #[test]
    fn graph_like_conversion() {
        let mut dg = Diagram::new();
        let i = dg.add_input();
        let o = dg.add_output();
        let x1 = dg.add_x(Phase::pi4());
        let x2 = dg.add_x(Phase::pi4());
        dg.add_wire(i, x1, crate::graph::WireKind::E).unwrap();
        dg.add_wire(x1, x2, crate::graph::WireKind::E).unwrap();
        dg.add_wire(x2, o, crate::graph::WireKind::E).unwrap();
        let before = dg.clone();
        assert_eq!(dg.to_graph_like().unwrap(), (2, 1));
        assert!(dg.is_graph_like());
        assert_eq!(dg.phase(x1), Some(Phase::pi2()));
        assert_same_map(&before, &dg);
    }
}
