//! Rewrite rules for diagram simplification.
//!
//! Application of particular rules is facilitated through the [`RuleFinder`]
//! and [`Rule`] traits. Usually their methods are not called as such; a
//! particular rule is instead represented by a type implementing `RuleFinder`,
//! which is passed to [`Diagram::find_rule`], [`Diagram::simplify_rule`], or
//! [`Diagram::simplify_rule_n`].
//!
//! Every rule preserves the linear map of the diagram up to a global scalar,
//! which is not tracked. All rules other than [`ColorChange`] and [`Fuse`]
//! expect the diagram to be in graph-like form (see
//! [`Diagram::to_graph_like`]).
//!
//! See [`SimplifyZX`] for the master list of rewrite rules, and
//! [`Diagram::simplify`] for the full simplification strategy.
//!
//! # Example
//! ```
//! use zx_opt::{ graph::{ Diagram, WireKind, rules::Fuse }, phase::Phase };
//!
//! let mut dg = Diagram::new();
//! let i = dg.add_input();
//! let o = dg.add_output();
//! let a = dg.add_z(Phase::new(7, 10));
//! let b = dg.add_z(Phase::new(6, 10));
//! dg.add_wire(i, a, WireKind::E).unwrap();
//! dg.add_wire(a, b, WireKind::E).unwrap();
//! dg.add_wire(b, o, WireKind::E).unwrap();
//!
//! assert!(dg.simplify_rule(Fuse).unwrap());
//! assert_eq!(dg.count_spiders(), 1);
//! assert_eq!(dg.phase(a), Some(Phase::new(3, 10)));
//! ```

use std::fmt;
use tracing::trace;
use crate::graph::{ Diagram, GraphResult, NodeId };
pub(crate) use crate::graph::{ WireKind, ZXNode, ZXWire };

pub(crate) mod private { pub trait RuleSeal { } }
pub(crate) use private::RuleSeal;

/// A trait for types that can explore a [`Diagram`] and find a particular
/// structure to simplify.
///
/// Types implementing this trait (usually unit structs) have the only purpose
/// of denoting the existence of a particular rewrite rule. This is to allow for
/// programmatic manipulation of rewrite rules.
///
/// This trait is sealed to ensure that no invalid operations are performed on
/// diagrams; toward this purpose, all types created by this trait via
/// [`find`][RuleFinder::find] (i.e. [`Self::Output`]) store a mutable reference
/// to the diagram they will simplify.
pub trait RuleFinder: RuleSeal {
    /// The type representing the instantiated (but not executed) rewrite rule.
    type Output<'a>: Rule;

    /// Explore a [`Diagram`] to find a particular structure. Returns `None` if
    /// the structure does not exist.
    ///
    /// Candidates are searched in order of increasing node ID, so the result
    /// is deterministic.
    fn find(self, diagram: &mut Diagram) -> Option<Self::Output<'_>>;
}

/// A trait representing an unexecuted rewrite rule on a [`Diagram`].
///
/// This trait is sealed to ensure that no invalid operations are performed on
/// diagrams; toward this purpose, all types implementing this trait are not
/// constructable as such (see [`RuleFinder`]) and store a mutable reference to
/// the diagram they will simplify.
pub trait Rule: RuleSeal {
    /// Execute the rewrite rule, consuming self and releasing the inner hold on
    /// the diagram.
    ///
    /// An error here means the diagram's structural invariants were broken and
    /// the diagram should be discarded.
    fn simplify(self) -> GraphResult<()>;
}

// true if every wire of `id` is a Hadamard wire to a Z-spider
pub(crate) fn is_interior_h(dg: &Diagram, id: NodeId) -> bool {
    dg.neighbors_of(id)
        .is_some_and(|mut nbs| nbs.all(|(w, n)| w.is_h() && n.is_z()))
}

mod color_change;
pub use color_change::*;
mod fuse;
pub use fuse::*;
mod identity;
pub use identity::*;
mod local_comp;
pub use local_comp::*;
mod pivot;
pub use pivot::*;
mod gadget_fuse;
pub use gadget_fuse::*;

/// Master list of available rewrite rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimplifyZX {
    ColorChange,
    Fuse,
    Identity,
    LocalComp,
    Pivot,
    GadgetFuse,
}

impl fmt::Display for SimplifyZX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ColorChange => "color-change",
            Self::Fuse => "fuse",
            Self::Identity => "identity",
            Self::LocalComp => "local-comp",
            Self::Pivot => "pivot",
            Self::GadgetFuse => "gadget-fuse",
        };
        f.write_str(name)
    }
}

/// Output of [`SimplifyZX::find`].
#[derive(Debug)]
pub enum SimplifyZXData<'a> {
    ColorChangeData(ColorChangeData<'a>),
    FuseData(FuseData<'a>),
    IdentityData(IdentityData<'a>),
    LocalCompData(LocalCompData<'a>),
    PivotData(PivotData<'a>),
    GadgetFuseData(GadgetFuseData<'a>),
}

impl RuleSeal for SimplifyZX { }
impl RuleFinder for SimplifyZX {
    type Output<'a> = SimplifyZXData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        use SimplifyZXData::*;
        match self {
            Self::ColorChange => ColorChange.find(dg).map(ColorChangeData),
            Self::Fuse => Fuse.find(dg).map(FuseData),
            Self::Identity => Identity.find(dg).map(IdentityData),
            Self::LocalComp => LocalComp.find(dg).map(LocalCompData),
            Self::Pivot => Pivot.find(dg).map(PivotData),
            Self::GadgetFuse => GadgetFuse.find(dg).map(GadgetFuseData),
        }
    }
}

impl<'a> RuleSeal for SimplifyZXData<'a> { }
impl<'a> Rule for SimplifyZXData<'a> {
    fn simplify(self) -> GraphResult<()> {
        match self {
            Self::ColorChangeData(data) => data.simplify(),
            Self::FuseData(data) => data.simplify(),
            Self::IdentityData(data) => data.simplify(),
            Self::LocalCompData(data) => data.simplify(),
            Self::PivotData(data) => data.simplify(),
            Self::GadgetFuseData(data) => data.simplify(),
        }
    }
}

impl Diagram {
    /// Shortcut to calling [`RuleFinder::find`] on `self`, returning any
    /// output.
    pub fn find_rule<R>(&mut self, rule: R) -> Option<R::Output<'_>>
    where R: RuleFinder
    {
        rule.find(self)
    }

    /// Find and immediately apply a rewrite rule, returning `true` if the rule
    /// was successfully applied.
    pub fn simplify_rule<R>(&mut self, rule: R) -> GraphResult<bool>
    where R: RuleFinder + fmt::Debug
    {
        trace!(?rule, "searching");
        match rule.find(self) {
            Some(rule_data) => {
                rule_data.simplify()?;
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Repeatedly apply a rewrite rule a maximum of `max` times, returning the
    /// number of times the rule was actually applied.
    pub fn simplify_rule_n<R>(&mut self, rule: R, max: Option<usize>)
        -> GraphResult<usize>
    where R: RuleFinder + fmt::Debug + Clone
    {
        let mut count: usize = 0;
        while max.map_or(true, |m| count < m) {
            if !self.simplify_rule(rule.clone())? { break; }
            count += 1;
        }
        Ok(count)
    }
}
