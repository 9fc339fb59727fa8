use super::*;

/// Convert an X-spider to a Z-spider by toggling the kind of every wire
/// attached to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorChange;

/// Output of [`ColorChange::find`].
#[derive(Debug)]
pub struct ColorChangeData<'a> {
    pub(crate) dg: &'a mut Diagram,
    pub(crate) s: NodeId, // x-spider
}

impl RuleSeal for ColorChange { }
impl RuleFinder for ColorChange {
    type Output<'a> = ColorChangeData<'a>;

    fn find(self, dg: &mut Diagram) -> Option<Self::Output<'_>> {
        let s =
            dg.nodes_inner()
            .find_map(|(id, n)| n.is_x().then_some(id))?;
        Some(ColorChangeData { dg, s })
    }
}

impl<'a> RuleSeal for ColorChangeData<'a> { }
impl<'a> Rule for ColorChangeData<'a> {
    fn simplify(self) -> GraphResult<()> {
        let Self { dg, s } = self;
        dg.color_change(s)
    }
}

impl Diagram {
    // turn an X-spider into a Z-spider of the same phase; no-op on anything
    // else
    pub(crate) fn color_change(&mut self, id: NodeId) -> GraphResult<()> {
        let Some(ZXNode::X(ph)) = self.get_node(id).copied() else {
            return Ok(());
        };
        if let Some(node) = self.get_node_mut(id) { *node = ZXNode::Z(ph); }
        self.toggle_wires_of(id)
    }
}
