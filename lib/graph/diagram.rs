use rustc_hash::FxHashSet;
use crate::{
    graph::{
        GraphResult,
        NodeId,
        QubitId,
        WireKind,
        ZXNode,
        ZXWire,
    },
    phase::Phase,
};

use crate::graph::GraphError::*;

/// Represents a diagram in the ZX-calculus.
///
/// Every node is given a unique index for identification purposes. Indices are
/// allocated monotonically and never reused, so an ID held across rewrites
/// either refers to the same node or to no node at all.
///
/// The underlying graph is kept simple: at most one wire connects any two
/// nodes, and there are no self-loops. Input and output nodes always carry
/// exactly one wire once the diagram is complete; their qubit index is their
/// position in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct Diagram {
    pub(crate) nodes: Vec<Option<ZXNode>>,
    pub(crate) node_count: usize,
    pub(crate) wires: Vec<Option<Vec<ZXWire>>>,
    pub(crate) wire_count: usize,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
}

impl Diagram {
    /// Create a new, empty diagram.
    pub fn new() -> Self { Self::default() }

    /// Return the number of nodes.
    pub fn count_nodes(&self) -> usize { self.node_count }

    /// Return the number of Z-spiders.
    pub fn count_z(&self) -> usize {
        self.nodes_inner().filter(|(_, n)| n.is_z()).count()
    }

    /// Return the number of X-spiders.
    pub fn count_x(&self) -> usize {
        self.nodes_inner().filter(|(_, n)| n.is_x()).count()
    }

    /// Return the total number of spiders.
    pub fn count_spiders(&self) -> usize {
        self.nodes_inner().filter(|(_, n)| n.is_spider()).count()
    }

    /// Return the number of inputs.
    pub fn count_inputs(&self) -> usize { self.inputs.len() }

    /// Return the number of outputs.
    pub fn count_outputs(&self) -> usize { self.outputs.len() }

    /// Return the number of wires.
    pub fn count_wires(&self) -> usize { self.wire_count }

    /// Return the number of Hadamard wires.
    pub fn count_h(&self) -> usize {
        self.wires_inner().filter(|(_, w)| w.is_h()).count()
    }

    /// Return the number of wires with spiders at both ends.
    ///
    /// For a diagram in graph-like form this is the number of two-qubit
    /// interactions the diagram encodes.
    pub fn count_spider_wires(&self) -> usize {
        self.wires_inner()
            .filter(|(a, w)| {
                self.get_node(*a).is_some_and(|n| n.is_spider())
                    && self.get_node(w.id()).is_some_and(|n| n.is_spider())
            })
            .count()
    }

    /// Get the node associated with a particular ID if it exists.
    pub fn get_node(&self, id: NodeId) -> Option<&ZXNode> {
        self.nodes.get(id).and_then(|mb_n| mb_n.as_ref())
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> Option<&mut ZXNode> {
        self.nodes.get_mut(id).and_then(|mb_n| mb_n.as_mut())
    }

    /// Return `true` if a node exists with the given ID.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|mb_n| mb_n.is_some())
    }

    /// Return the phase of a node, if it exists and is a spider.
    pub fn phase(&self, id: NodeId) -> Option<Phase> {
        self.get_node(id).and_then(|n| n.phase())
    }

    /// Return `true` if the node exists and is an input or output.
    pub fn is_boundary(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.is_boundary())
    }

    /// Return the IDs of all input nodes, ordered by qubit index.
    pub fn inputs(&self) -> &[NodeId] { &self.inputs }

    /// Return the IDs of all output nodes, ordered by qubit index.
    pub fn outputs(&self) -> &[NodeId] { &self.outputs }

    /// Return the ID of the `q`-th input, if it exists.
    pub fn input_id(&self, q: QubitId) -> Option<NodeId> {
        self.inputs.get(q).copied()
    }

    /// Return the ID of the `q`-th output, if it exists.
    pub fn output_id(&self, q: QubitId) -> Option<NodeId> {
        self.outputs.get(q).copied()
    }

    /// Return the qubit index corresponding to a node ID, if the node is an
    /// input.
    pub fn input_index(&self, id: NodeId) -> Option<QubitId> {
        self.inputs.iter().position(|nid| *nid == id)
    }

    /// Return the qubit index corresponding to a node ID, if the node is an
    /// output.
    pub fn output_index(&self, id: NodeId) -> Option<QubitId> {
        self.outputs.iter().position(|nid| *nid == id)
    }

    /// Get the number of wires attached to a node, if it exists.
    pub fn arity(&self, id: NodeId) -> Option<usize> {
        self.wires.get(id)
            .and_then(|mb_nnb| mb_nnb.as_ref().map(|nnb| nnb.len()))
    }

    /// Get the wires attached to a node, if it exists.
    pub fn wires_of(&self, id: NodeId) -> Option<&[ZXWire]> {
        self.wires.get(id)
            .and_then(|mb_nnb| mb_nnb.as_deref())
    }

    /// Iterate over the IDs of the neighbors of a node, if it exists.
    pub fn neighbor_ids_of(&self, id: NodeId)
        -> Option<impl Iterator<Item = NodeId> + '_>
    {
        self.wires_of(id).map(|nnb| nnb.iter().map(|w| w.id()))
    }

    /// Iterate over the neighbors of a node and their data, if it exists.
    pub fn neighbors_of(&self, id: NodeId)
        -> Option<impl Iterator<Item = (&ZXWire, &ZXNode)> + '_>
    {
        self.wires_of(id)
            .map(|nnb| {
                nnb.iter()
                    .filter_map(|w| self.get_node(w.id()).map(|n| (w, n)))
            })
    }

    /// Return the kind of the wire connecting two nodes, if there is one.
    pub fn wire_between(&self, a: NodeId, b: NodeId) -> Option<WireKind> {
        self.wires_of(a)?
            .iter()
            .find_map(|w| w.has_id(b).then(|| w.kind()))
    }

    /// Return `true` if two nodes are connected by a wire.
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.wire_between(a, b).is_some()
    }

    /// Iterate over all nodes.
    pub fn nodes_inner(&self) -> impl Iterator<Item = (NodeId, &ZXNode)> + '_ {
        self.nodes.iter().enumerate()
            .filter_map(|(id, mb_n)| mb_n.as_ref().map(|n| (id, n)))
    }

    /// Iterate over all wires, visiting each exactly once as `(left, right)`
    /// with `left < right.id()`.
    pub fn wires_inner(&self) -> impl Iterator<Item = (NodeId, &ZXWire)> + '_ {
        self.wires.iter().enumerate()
            .filter_map(|(id, mb_nnb)| mb_nnb.as_ref().map(|nnb| (id, nnb)))
            .flat_map(|(id, nnb)| {
                nnb.iter()
                    .filter(move |w| w.id() > id)
                    .map(move |w| (id, w))
            })
    }

    /// Add a node to the diagram and return its ID.
    pub fn add_node(&mut self, node: ZXNode) -> NodeId {
        let id = self.nodes.len();
        if node.is_input() {
            self.inputs.push(id);
        } else if node.is_output() {
            self.outputs.push(id);
        }
        self.nodes.push(Some(node));
        self.wires.push(Some(Vec::new()));
        self.node_count += 1;
        id
    }

    /// Add a Z-spider to the diagram and return its ID.
    pub fn add_z(&mut self, phase: Phase) -> NodeId {
        self.add_node(ZXNode::Z(phase))
    }

    /// Add an X-spider to the diagram and return its ID.
    pub fn add_x(&mut self, phase: Phase) -> NodeId {
        self.add_node(ZXNode::X(phase))
    }

    /// Add an input node to the diagram and return its ID.
    pub fn add_input(&mut self) -> NodeId { self.add_node(ZXNode::Input) }

    /// Add an output node to the diagram and return its ID.
    pub fn add_output(&mut self) -> NodeId { self.add_node(ZXNode::Output) }

    /// Remove the spider associated with a particular ID and return its data.
    ///
    /// This method also removes all wires with an endpoint at the node. Fails
    /// if the node does not exist or is an input or output.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<ZXNode> {
        self.remove_node_nb(id).map(|(node, _)| node)
    }

    /// Like [`remove_node`][Self::remove_node], but returning the node's
    /// former wires alongside its data.
    pub fn remove_node_nb(&mut self, id: NodeId)
        -> GraphResult<(ZXNode, Vec<ZXWire>)>
    {
        let node = *self.get_node(id).ok_or(MissingNode(id))?;
        if node.is_boundary() { return Err(RemoveIO(id)); }
        self.nodes[id] = None;
        self.node_count -= 1;
        let nnb_of = self.wires[id].take().unwrap_or_default();
        self.wire_count -= nnb_of.len();
        for nb_of in nnb_of.iter() {
            if let Some(nnb) = self.wires[nb_of.id()].as_mut() {
                nnb.retain(|w| !w.has_id(id));
            }
        }
        Ok((node, nnb_of))
    }

    // add a phase to a node if it's a spider; no-op otherwise
    pub(crate) fn add_phase(&mut self, id: NodeId, phase: Phase) {
        if let Some(node) = self.get_node_mut(id) {
            node.map_phase(|ph| ph + phase);
        }
    }

    // overwrite the phase of a node if it's a spider; no-op otherwise
    pub(crate) fn set_phase(&mut self, id: NodeId, phase: Phase) {
        if let Some(node) = self.get_node_mut(id) {
            node.map_phase(|_| phase);
        }
    }

    /// Add a wire of a given kind between two nodes.
    ///
    /// If the nodes are already connected, the existing wire and the new one
    /// are immediately merged so that the graph stays simple. The outcome
    /// depends on the colors of the endpoints, discarding global scalars:
    ///
    /// | endpoints   | existing + new | result                     |
    /// |-------------|----------------|----------------------------|
    /// | same color  | E + E          | E                          |
    /// | same color  | H + H          | no wire                    |
    /// | same color  | E + H, H + E   | E, and `a` gains a π phase |
    /// | diff. color | E + E          | no wire                    |
    /// | diff. color | H + H          | H                          |
    /// | diff. color | E + H, H + E   | H, and `a` gains a π phase |
    ///
    /// Fails if either node does not exist, if `a == b`, or if either node is
    /// an input or output that already has a wire.
    pub fn add_wire(&mut self, a: NodeId, b: NodeId, kind: WireKind)
        -> GraphResult<()>
    {
        if a == b { return Err(SelfLoop(a)); }
        let node_a = *self.get_node(a).ok_or(MissingNode(a))?;
        let node_b = *self.get_node(b).ok_or(MissingNode(b))?;
        if node_a.is_boundary() && self.arity(a).unwrap_or(0) > 0 {
            return Err(ConnectedIO(a));
        }
        if node_b.is_boundary() && self.arity(b).unwrap_or(0) > 0 {
            return Err(ConnectedIO(b));
        }
        let Some(existing) = self.wire_between(a, b) else {
            self.push_wire(a, b, kind);
            return Ok(());
        };
        // both are spiders past this point
        let (cancel, keep) =
            if node_a.is_same_color(&node_b) {
                (WireKind::H, WireKind::E)
            } else {
                (WireKind::E, WireKind::H)
            };
        if existing == kind {
            if existing == cancel { self.remove_wire(a, b)?; }
        } else {
            self.set_wire_kind(a, b, keep)?;
            self.add_phase(a, Phase::pi());
        }
        Ok(())
    }

    // unconditionally record a new wire
    fn push_wire(&mut self, a: NodeId, b: NodeId, kind: WireKind) {
        if let Some(nnb) = self.wires[a].as_mut() {
            nnb.push(ZXWire::new(kind, b));
        }
        if let Some(nnb) = self.wires[b].as_mut() {
            nnb.push(ZXWire::new(kind, a));
        }
        self.wire_count += 1;
    }

    /// Remove the wire between two nodes and return its kind.
    ///
    /// Fails if either node does not exist or they are not connected.
    pub fn remove_wire(&mut self, a: NodeId, b: NodeId)
        -> GraphResult<WireKind>
    {
        self.has_node(a).then_some(()).ok_or(MissingNode(a))?;
        self.has_node(b).then_some(()).ok_or(MissingNode(b))?;
        let kind = self.wire_between(a, b).ok_or(MissingWire(a, b))?;
        if let Some(nnb) = self.wires[a].as_mut() {
            nnb.retain(|w| !w.has_id(b));
        }
        if let Some(nnb) = self.wires[b].as_mut() {
            nnb.retain(|w| !w.has_id(a));
        }
        self.wire_count -= 1;
        Ok(kind)
    }

    /// Change the kind of the wire between two nodes.
    ///
    /// Fails if either node does not exist or they are not connected.
    pub fn set_wire_kind(&mut self, a: NodeId, b: NodeId, kind: WireKind)
        -> GraphResult<()>
    {
        self.has_node(a).then_some(()).ok_or(MissingNode(a))?;
        self.has_node(b).then_some(()).ok_or(MissingNode(b))?;
        let w_ab =
            self.wires[a].as_mut()
            .and_then(|nnb| nnb.iter_mut().find(|w| w.has_id(b)))
            .ok_or(MissingWire(a, b))?;
        *w_ab = ZXWire::new(kind, b);
        let w_ba =
            self.wires[b].as_mut()
            .and_then(|nnb| nnb.iter_mut().find(|w| w.has_id(a)))
            .ok_or(Asymmetric(b, a))?;
        *w_ba = ZXWire::new(kind, a);
        Ok(())
    }

    // toggle the kinds of all wires attached to a node
    pub(crate) fn toggle_wires_of(&mut self, id: NodeId) -> GraphResult<()> {
        let nbs: Vec<NodeId> =
            self.neighbor_ids_of(id).ok_or(MissingNode(id))?.collect();
        for nb in nbs.into_iter() {
            if let Some(nnb) = self.wires[id].as_mut() {
                nnb.iter_mut()
                    .filter(|w| w.has_id(nb))
                    .for_each(|w| w.toggle());
            }
            if let Some(nnb) = self.wires[nb].as_mut() {
                nnb.iter_mut()
                    .filter(|w| w.has_id(id))
                    .for_each(|w| w.toggle());
            }
        }
        Ok(())
    }

    /// Return `true` if `self` is in graph-like form: all spiders are
    /// Z-spiders and every wire between two spiders is a Hadamard wire.
    pub fn is_graph_like(&self) -> bool {
        self.nodes_inner().all(|(_, n)| !n.is_x())
            && self.wires_inner()
                .all(|(a, w)| {
                    w.is_h() || self.is_boundary(a) || self.is_boundary(w.id())
                })
    }

    /// Check all structural invariants of the diagram.
    ///
    /// These are: wire records are symmetric, the graph is simple with no
    /// self-loops, every input and output carries exactly one wire, and the
    /// recorded inputs and outputs are exactly the boundary nodes.
    pub fn check_invariants(&self) -> GraphResult<()> {
        let mut total = 0;
        for (id, _) in self.nodes_inner() {
            let nnb = self.wires_of(id).ok_or(MissingNode(id))?;
            total += nnb.len();
            let mut seen: FxHashSet<NodeId> = FxHashSet::default();
            for w in nnb.iter() {
                let nb = w.id();
                if nb == id { return Err(SelfLoop(id)); }
                if !seen.insert(nb) {
                    let mult = nnb.iter().filter(|w2| w2.has_id(nb)).count();
                    return Err(NotSimple(id, nb, mult));
                }
                let back =
                    self.wires_of(nb).ok_or(MissingNode(nb))?
                    .iter()
                    .find(|w2| w2.has_id(id))
                    .ok_or(Asymmetric(id, nb))?;
                if back.kind() != w.kind() { return Err(Asymmetric(id, nb)); }
            }
        }
        if total != 2 * self.wire_count {
            return Err(WireCount(self.wire_count, total / 2));
        }
        let mut n_boundary = 0;
        for (id, node) in self.nodes_inner() {
            if !node.is_boundary() { continue; }
            n_boundary += 1;
            let arity = self.arity(id).unwrap_or(0);
            if arity != 1 { return Err(IOArity(id, arity)); }
            let recorded =
                (node.is_input() && self.inputs.contains(&id))
                || (node.is_output() && self.outputs.contains(&id));
            if !recorded { return Err(BoundaryBookkeeping); }
        }
        if n_boundary != self.inputs.len() + self.outputs.len() {
            return Err(BoundaryBookkeeping);
        }
        Ok(())
    }

    /// Return a graphviz representation of the diagram.
    ///
    /// Inputs are ranked at the left, outputs at the right; Hadamard wires are
    /// drawn dashed.
    pub fn to_graphviz(&self) -> GraphResult<tabbycat::Graph> {
        use tabbycat::*;
        use tabbycat::attributes::*;
        use crate::vizdefs::*;
        let mut statements =
            StmtList::new()
            .add_attr(
                AttrType::Graph,
                AttrList::new().add_pair(rankdir(RankDir::LR)),
            )
            .add_attr(
                AttrType::Node,
                AttrList::new()
                    .add_pair(fontname(FONT))
                    .add_pair(fontsize(FONTSIZE))
                    .add_pair(margin(NODE_MARGIN)),
            );
        let boundaries = [
            (&self.inputs, "In", RankType::Source),
            (&self.outputs, "Out", RankType::Sink),
        ];
        for (ids, name, rank_type) in boundaries.into_iter() {
            let mut subgraph_stmt =
                StmtList::new()
                .add_attr(
                    AttrType::Graph,
                    AttrList::new().add_pair(rank(rank_type)),
                );
            let mut prev: Option<NodeId> = None;
            for (qid, &nid) in ids.iter().enumerate() {
                let attrs =
                    AttrList::new()
                    .add_pair(label(format!("{} {}", name, qid)))
                    .add_pair(shape(Shape::Plaintext));
                subgraph_stmt =
                    subgraph_stmt.add_node(nid.into(), None, Some(attrs));
                if let Some(pid) = prev {
                    subgraph_stmt =
                        subgraph_stmt.add_edge(
                            Edge::head_node(
                                pid.into(),
                                Some(Port::compass(Compass::South)),
                            )
                            .line_to_node(
                                nid.into(),
                                Some(Port::compass(Compass::North)),
                            )
                            .add_attrpair(style(Style::Invisible))
                        );
                }
                prev = Some(nid);
            }
            statements =
                statements.add_subgraph(SubGraph::cluster(subgraph_stmt));
        }
        for (id, node) in self.nodes_inner() {
            if node.is_boundary() { continue; }
            statements =
                statements.add_node(id.into(), None, Some(node.graph_attrs()));
        }
        for (left, right) in self.wires_inner() {
            let edge =
                Edge::head_node(left.into(), None)
                .line_to_node(right.id().into(), None);
            let edge =
                if right.is_h() {
                    edge.add_attrpair(style(Style::Dashed))
                        .add_attrpair(color(H_WIRE))
                } else {
                    edge
                };
            statements = statements.add_edge(edge);
        }
        GraphBuilder::default()
            .graph_type(GraphType::Graph)
            .strict(false)
            .id(Identity::quoted(""))
            .stmts(statements)
            .build()
            .map_err(|e| Render(e.to_string()))
    }
}
