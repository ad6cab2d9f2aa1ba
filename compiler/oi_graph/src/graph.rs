//! The type graph arena.

use crate::{
    Array, Class, Container, Dummy, DummyAllocator, Enum, Incomplete, Node, NodeId, Pointer,
    PrimitiveKind, Reference, Typedef,
};

/// Owning storage for every node of one session, plus its roots.
///
/// Nodes are appended and never removed, except by [`TypeGraph::rollback`]
/// to a [`Checkpoint`] taken earlier. Primitive nodes are shared: asking for
/// the same [`PrimitiveKind`] twice yields the same id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    primitives: [Option<NodeId>; PrimitiveKind::COUNT],
}

/// Allocation watermark of a [`TypeGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    nodes: usize,
    roots: usize,
}

impl Checkpoint {
    /// Returns `true` if `id` was allocated after this checkpoint.
    #[inline]
    pub fn is_newer(self, id: NodeId) -> bool {
        id.index() >= self.nodes
    }
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let Ok(raw) = u32::try_from(self.nodes.len()) else {
            panic!("type graph exceeded u32::MAX nodes");
        };
        self.nodes.push(node);
        NodeId::from_raw(raw)
    }

    /// The shared node for a primitive kind, allocated on first use.
    pub fn add_primitive(&mut self, kind: PrimitiveKind) -> NodeId {
        if let Some(id) = self.primitives[kind.index()] {
            return id;
        }
        let id = self.push(Node::Primitive(kind));
        self.primitives[kind.index()] = Some(id);
        id
    }

    pub fn add_class(&mut self, class: Class) -> NodeId {
        self.push(Node::Class(class))
    }

    pub fn add_container(&mut self, container: Container) -> NodeId {
        self.push(Node::Container(container))
    }

    pub fn add_enum(&mut self, e: Enum) -> NodeId {
        self.push(Node::Enum(e))
    }

    pub fn add_array(&mut self, element: NodeId, len: u64) -> NodeId {
        self.push(Node::Array(Array { element, len }))
    }

    pub fn add_typedef(&mut self, name: impl Into<String>, underlying: NodeId) -> NodeId {
        self.push(Node::Typedef(Typedef {
            name: name.into(),
            underlying,
        }))
    }

    pub fn add_pointer(&mut self, pointee: NodeId) -> NodeId {
        self.push(Node::Pointer(Pointer { pointee }))
    }

    pub fn add_reference(&mut self, pointee: NodeId) -> NodeId {
        self.push(Node::Reference(Reference { pointee }))
    }

    pub fn add_incomplete(&mut self, label: impl Into<String>) -> NodeId {
        self.push(Node::Incomplete(Incomplete {
            label: label.into(),
        }))
    }

    pub fn add_dummy(&mut self, size: u64, align: u64) -> NodeId {
        self.push(Node::Dummy(Dummy { size, align }))
    }

    pub fn add_dummy_allocator(&mut self, alloc_type: NodeId, size: u64, align: u64) -> NodeId {
        self.push(Node::DummyAllocator(DummyAllocator {
            alloc_type,
            size,
            align,
        }))
    }

    /// Record `id` as one of the session's entry points.
    pub fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Get a node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a class node for filling in its children.
    pub fn class_mut(&mut self, id: NodeId) -> Option<&mut Class> {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn as_class(&self, id: NodeId) -> Option<&Class> {
        match self.nodes.get(id.index()) {
            Some(Node::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn as_enum(&self, id: NodeId) -> Option<&Enum> {
        match self.nodes.get(id.index()) {
            Some(Node::Enum(e)) => Some(e),
            _ => None,
        }
    }

    pub fn as_typedef(&self, id: NodeId) -> Option<&Typedef> {
        match self.nodes.get(id.index()) {
            Some(Node::Typedef(td)) => Some(td),
            _ => None,
        }
    }

    pub fn as_primitive(&self, id: NodeId) -> Option<PrimitiveKind> {
        match self.nodes.get(id.index()) {
            Some(Node::Primitive(kind)) => Some(*kind),
            _ => None,
        }
    }

    /// Number of allocated nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "push keeps the node count within u32"
            )]
            let raw = i as u32;
            (NodeId::from_raw(raw), node)
        })
    }

    /// The first id held by the graph that names no node, if any.
    ///
    /// Checks the roots, the shared primitive slots and every child id.
    /// A graph built through the `add_*` constructors never has one; a
    /// decoded graph may.
    pub fn first_dangling(&self) -> Option<NodeId> {
        let len = self.nodes.len();
        let dangling = |id: NodeId| id.index() >= len;
        if let Some(id) = self.roots.iter().copied().find(|&id| dangling(id)) {
            return Some(id);
        }
        if let Some(id) = self.primitives.iter().flatten().copied().find(|&id| dangling(id)) {
            return Some(id);
        }
        let mut found = None;
        for node in &self.nodes {
            node.for_each_child(|id| {
                if found.is_none() && dangling(id) {
                    found = Some(id);
                }
            });
            if found.is_some() {
                break;
            }
        }
        found
    }

    /// Current allocation watermark.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.nodes.len(),
            roots: self.roots.len(),
        }
    }

    /// Drop every node and root allocated after `checkpoint`.
    ///
    /// Nodes older than the checkpoint must not refer to newer ones; the
    /// enumeration engine guarantees this because a node's children are
    /// complete before the call that allocated it returns.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.nodes.truncate(checkpoint.nodes);
        self.roots.truncate(checkpoint.roots);
        for slot in &mut self.primitives {
            if slot.is_some_and(|id| checkpoint.is_newer(id)) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests;
