//! Read-only traversal of a finished type graph.
//!
//! A single `Visitor` trait is provided. Each `visit_*` method defaults to
//! the matching `walk_*` function, which visits the node's children.
//! Override `visit_*` methods to add behavior at specific variants.
//!
//! Dispatch in [`walk_node`] is an exhaustive match over [`Node`], so a new
//! variant cannot be added without every traversal handling it.
//!
//! The default walks do not remember where they have been. Type graphs
//! contain cycles (a class holding a pointer to itself), so visitors that
//! start from a root must keep their own visited set; see
//! [`GraphStats`](crate::GraphStats) for the usual shape.
//!
//! # Example
//!
//! ```text
//! struct CountMembers {
//!     seen: FxHashSet<NodeId>,
//!     members: usize,
//! }
//!
//! impl Visitor for CountMembers {
//!     fn visit_node(&mut self, graph: &TypeGraph, id: NodeId) {
//!         if self.seen.insert(id) {
//!             walk_node(self, graph, id);
//!         }
//!     }
//!
//!     fn visit_class(&mut self, graph: &TypeGraph, _id: NodeId, class: &Class) {
//!         self.members += class.members.len();
//!         walk_class(self, graph, class);
//!     }
//! }
//! ```

use crate::{
    Array, Class, Container, DummyAllocator, Enum, Incomplete, Node, NodeId, Pointer,
    PrimitiveKind, Reference, TemplateParam, TypeGraph, Typedef,
};

pub trait Visitor {
    /// Visit a node by id.
    fn visit_node(&mut self, graph: &TypeGraph, id: NodeId) {
        walk_node(self, graph, id);
    }

    fn visit_primitive(&mut self, _graph: &TypeGraph, _id: NodeId, _kind: PrimitiveKind) {}

    fn visit_class(&mut self, graph: &TypeGraph, _id: NodeId, class: &Class) {
        walk_class(self, graph, class);
    }

    fn visit_container(&mut self, graph: &TypeGraph, _id: NodeId, container: &Container) {
        walk_container(self, graph, container);
    }

    fn visit_enum(&mut self, _graph: &TypeGraph, _id: NodeId, _e: &Enum) {}

    fn visit_array(&mut self, graph: &TypeGraph, _id: NodeId, array: &Array) {
        walk_array(self, graph, array);
    }

    fn visit_typedef(&mut self, graph: &TypeGraph, _id: NodeId, td: &Typedef) {
        walk_typedef(self, graph, td);
    }

    fn visit_pointer(&mut self, graph: &TypeGraph, _id: NodeId, pointer: &Pointer) {
        walk_pointer(self, graph, pointer);
    }

    fn visit_reference(&mut self, graph: &TypeGraph, _id: NodeId, reference: &Reference) {
        walk_reference(self, graph, reference);
    }

    fn visit_incomplete(&mut self, _graph: &TypeGraph, _id: NodeId, _incomplete: &Incomplete) {}

    fn visit_dummy(&mut self, _graph: &TypeGraph, _id: NodeId, _size: u64, _align: u64) {}

    fn visit_dummy_allocator(&mut self, graph: &TypeGraph, _id: NodeId, d: &DummyAllocator) {
        walk_dummy_allocator(self, graph, d);
    }

    /// Visit a template parameter of a class or container.
    fn visit_template_param(&mut self, graph: &TypeGraph, param: &TemplateParam) {
        walk_template_param(self, graph, param);
    }
}

/// Dispatch on the variant of `id`.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, graph: &TypeGraph, id: NodeId) {
    match graph.get(id) {
        Node::Primitive(kind) => visitor.visit_primitive(graph, id, *kind),
        Node::Class(class) => visitor.visit_class(graph, id, class),
        Node::Container(container) => visitor.visit_container(graph, id, container),
        Node::Enum(e) => visitor.visit_enum(graph, id, e),
        Node::Array(array) => visitor.visit_array(graph, id, array),
        Node::Typedef(td) => visitor.visit_typedef(graph, id, td),
        Node::Pointer(pointer) => visitor.visit_pointer(graph, id, pointer),
        Node::Reference(reference) => visitor.visit_reference(graph, id, reference),
        Node::Incomplete(incomplete) => visitor.visit_incomplete(graph, id, incomplete),
        Node::Dummy(d) => visitor.visit_dummy(graph, id, d.size, d.align),
        Node::DummyAllocator(d) => visitor.visit_dummy_allocator(graph, id, d),
    }
}

/// Visit template params, then parents, then members.
pub fn walk_class<V: Visitor + ?Sized>(visitor: &mut V, graph: &TypeGraph, class: &Class) {
    for param in &class.template_params {
        visitor.visit_template_param(graph, param);
    }
    for parent in &class.parents {
        visitor.visit_node(graph, parent.ty);
    }
    for member in &class.members {
        visitor.visit_node(graph, member.ty);
    }
}

pub fn walk_container<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &TypeGraph,
    container: &Container,
) {
    for param in &container.template_params {
        visitor.visit_template_param(graph, param);
    }
}

pub fn walk_template_param<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &TypeGraph,
    param: &TemplateParam,
) {
    if let Some(ty) = param.ty() {
        visitor.visit_node(graph, ty);
    }
}

pub fn walk_array<V: Visitor + ?Sized>(visitor: &mut V, graph: &TypeGraph, array: &Array) {
    visitor.visit_node(graph, array.element);
}

pub fn walk_typedef<V: Visitor + ?Sized>(visitor: &mut V, graph: &TypeGraph, td: &Typedef) {
    visitor.visit_node(graph, td.underlying);
}

pub fn walk_pointer<V: Visitor + ?Sized>(visitor: &mut V, graph: &TypeGraph, pointer: &Pointer) {
    visitor.visit_node(graph, pointer.pointee);
}

pub fn walk_reference<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &TypeGraph,
    reference: &Reference,
) {
    visitor.visit_node(graph, reference.pointee);
}

pub fn walk_dummy_allocator<V: Visitor + ?Sized>(
    visitor: &mut V,
    graph: &TypeGraph,
    d: &DummyAllocator,
) {
    visitor.visit_node(graph, d.alloc_type);
}
