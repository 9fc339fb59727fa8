use crate::{ graph::NodeId, phase::Phase };

/// A single node in a ZX-diagram and its data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZXNode {
    /// A Z-spider, parameterized by a real phase.
    Z(Phase),
    /// An X-spider, parameterized by a real phase.
    X(Phase),
    /// Termination of a wire as an input to the diagram.
    Input,
    /// Termination of a wire as an output of the diagram.
    Output,
}

impl ZXNode {
    /// Create a new, phaseless Z-spider.
    pub fn z() -> Self { Self::Z(Phase::zero()) }

    /// Create a new Z-spider with phase `(a / b) × 2π`.
    pub fn z_frac(a: i64, b: i64) -> Self { Self::Z(Phase::new(a, b)) }

    /// Create a new, phaseless X-spider.
    pub fn x() -> Self { Self::X(Phase::zero()) }

    /// Create a new X-spider with phase `(a / b) × 2π`.
    pub fn x_frac(a: i64, b: i64) -> Self { Self::X(Phase::new(a, b)) }

    pub(crate) fn map_phase<F>(&mut self, f: F)
    where F: FnOnce(Phase) -> Phase
    {
        match self {
            Self::Z(ph) | Self::X(ph) => { *ph = f(*ph); },
            Self::Input | Self::Output => { },
        }
    }

    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z(_)) }

    /// Return `true` if `self` is `Z` and the phase satisfies some predicate.
    pub fn is_z_and<F>(&self, pred: F) -> bool
    where F: FnOnce(Phase) -> bool
    {
        match self {
            Self::Z(ph) => pred(*ph),
            _ => false,
        }
    }

    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X(_)) }

    /// Return `true` if `self` is `Input`.
    pub fn is_input(&self) -> bool { matches!(self, Self::Input) }

    /// Return `true` if `self` is `Output`.
    pub fn is_output(&self) -> bool { matches!(self, Self::Output) }

    /// Return `true` if `self` is `Input` or `Output`.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Input | Self::Output)
    }

    /// Return `true` if `self` is `Z` or `X`.
    pub fn is_spider(&self) -> bool { matches!(self, Self::Z(_) | Self::X(_)) }

    /// If `self` is `Z` or `X`, return the associated phase.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Z(ph) | Self::X(ph) => Some(*ph),
            _ => None,
        }
    }

    /// Return `true` if `self` and `other` are both spiders with the same
    /// color.
    pub fn is_same_color(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Z(_), Self::Z(_)) | (Self::X(_), Self::X(_))
        )
    }

    pub(crate) fn graph_attrs(&self) -> tabbycat::AttrList {
        use tabbycat::*;
        use tabbycat::attributes::*;
        use crate::vizdefs::*;
        match self {
            ZXNode::Z(ph) => {
                AttrList::new()
                    .add_pair(label(ph.label()))
                    .add_pair(shape(Shape::Circle))
                    .add_pair(height(CIRCLE_HEIGHT))
                    .add_pair(style(Style::Filled))
                    .add_pair(fillcolor(Z_COLOR))
            },
            ZXNode::X(ph) => {
                AttrList::new()
                    .add_pair(label(ph.label()))
                    .add_pair(shape(Shape::Circle))
                    .add_pair(height(CIRCLE_HEIGHT))
                    .add_pair(style(Style::Filled))
                    .add_pair(fillcolor(X_COLOR))
            },
            ZXNode::Input => {
                AttrList::new()
                    .add_pair(label("Input"))
                    .add_pair(shape(Shape::Plaintext))
            },
            ZXNode::Output => {
                AttrList::new()
                    .add_pair(label("Output"))
                    .add_pair(shape(Shape::Plaintext))
            },
        }
    }
}

/// The type of a wire, independent of its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WireKind {
    /// A normal, empty wire.
    E,
    /// A Hadamard wire.
    H,
}

impl WireKind {
    /// Return the other kind.
    pub fn toggled(self) -> Self {
        match self {
            Self::E => Self::H,
            Self::H => Self::E,
        }
    }

    /// Return the kind of the single wire equivalent to two wires of kinds
    /// `self` and `other` joined end to end through a phaseless, binary
    /// spider.
    ///
    /// ```
    /// # use zx_opt::graph::WireKind;
    /// assert_eq!(WireKind::E.compose(WireKind::E), WireKind::E);
    /// assert_eq!(WireKind::E.compose(WireKind::H), WireKind::H);
    /// assert_eq!(WireKind::H.compose(WireKind::H), WireKind::E);
    /// ```
    pub fn compose(self, other: Self) -> Self {
        if self == other { Self::E } else { Self::H }
    }
}

/// A wire in a ZX-diagram connecting to a certain node ID.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZXWire {
    /// A normal, empty wire.
    E(NodeId),
    /// A Hadamard wire.
    H(NodeId),
}

impl ZXWire {
    /// Create a new wire of the given kind.
    pub fn new(kind: WireKind, id: NodeId) -> Self {
        match kind {
            WireKind::E => Self::E(id),
            WireKind::H => Self::H(id),
        }
    }

    pub(crate) fn toggle(&mut self) {
        match self {
            Self::E(id) => { *self = Self::H(*id); },
            Self::H(id) => { *self = Self::E(*id); },
        }
    }

    /// Return `true` if `self` is `E`.
    pub fn is_e(&self) -> bool { matches!(self, Self::E(_)) }

    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(_)) }

    /// Return `true` if `self` has an underlying node ID equal to `id`.
    pub fn has_id(&self, id: NodeId) -> bool { self.id() == id }

    /// Return the underlying node ID.
    pub fn id(&self) -> NodeId {
        match self {
            Self::E(id) | Self::H(id) => *id
        }
    }

    /// Return the kind of the wire.
    pub fn kind(&self) -> WireKind {
        match self {
            Self::E(_) => WireKind::E,
            Self::H(_) => WireKind::H,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire_toggle() {
        let mut w = ZXWire::E(3);
        w.toggle();
        assert_eq!(w, ZXWire::H(3));
        assert_eq!(w.kind(), WireKind::H);
        w.toggle();
        assert!(w.is_e() && w.has_id(3));
        assert_eq!(ZXWire::new(WireKind::H, 5), ZXWire::H(5));
        assert_eq!(WireKind::H.toggled(), WireKind::E);
    }

    #[test]
    fn node_queries() {
        let mut z = ZXNode::z_frac(1, 4);
        assert!(z.is_z_and(|ph| ph.is_proper_clifford()));
        z.map_phase(|ph| ph + Phase::pi4());
        assert_eq!(z.phase(), Some(Phase::new(3, 8)));
        assert!(z.is_same_color(&ZXNode::z()));
        assert!(!z.is_same_color(&ZXNode::x()));
        assert!(!ZXNode::Input.is_same_color(&ZXNode::Input));
        assert!(ZXNode::Output.is_boundary());
        assert_eq!(ZXNode::Input.phase(), None);
    }
}
