use pretty_assertions::assert_eq;

use super::*;
use crate::{ClassKind, Member, NodeKind, TemplateParam};

#[test]
fn ids_follow_allocation_order() {
    let mut graph = TypeGraph::new();
    let a = graph.add_incomplete("a");
    let b = graph.add_incomplete("b");
    assert_eq!(a.raw(), 0);
    assert_eq!(b.raw(), 1);
    assert_eq!(graph.len(), 2);
}

#[test]
fn primitives_are_shared() {
    let mut graph = TypeGraph::new();
    let a = graph.add_primitive(PrimitiveKind::Int32);
    let b = graph.add_primitive(PrimitiveKind::Int32);
    let c = graph.add_primitive(PrimitiveKind::UInt32);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(graph.len(), 2);
}

#[test]
fn roots_keep_insertion_order() {
    let mut graph = TypeGraph::new();
    let a = graph.add_primitive(PrimitiveKind::Bool);
    let b = graph.add_incomplete("b");
    graph.add_root(b);
    graph.add_root(a);
    assert_eq!(graph.roots(), &[b, a]);
}

#[test]
fn class_can_be_filled_after_allocation() {
    let mut graph = TypeGraph::new();
    let id = graph.add_class(Class::new(ClassKind::Struct, "Node", "ns::Node", 16));
    let ptr = graph.add_pointer(id);

    let Some(class) = graph.class_mut(id) else {
        panic!("expected a class node");
    };
    class.members.push(Member::new("next", ptr, 0));

    let class = graph.as_class(id).unwrap_or_else(|| panic!("expected a class node"));
    assert_eq!(class.members.len(), 1);
    assert_eq!(class.members[0].ty, ptr);
    assert_eq!(graph.get(ptr), &Node::Pointer(Pointer { pointee: id }));
}

#[test]
fn class_mut_rejects_other_variants() {
    let mut graph = TypeGraph::new();
    let id = graph.add_primitive(PrimitiveKind::Int8);
    assert!(graph.class_mut(id).is_none());
    assert!(graph.as_class(id).is_none());
    assert_eq!(graph.as_primitive(id), Some(PrimitiveKind::Int8));
}

#[test]
fn rollback_discards_newer_nodes() {
    let mut graph = TypeGraph::new();
    let kept = graph.add_primitive(PrimitiveKind::Int32);
    graph.add_root(kept);
    let checkpoint = graph.checkpoint();

    let dropped = graph.add_primitive(PrimitiveKind::Float64);
    graph.add_array(dropped, 4);
    graph.add_root(dropped);
    assert!(checkpoint.is_newer(dropped));
    assert!(!checkpoint.is_newer(kept));

    graph.rollback(checkpoint);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.roots(), &[kept]);

    // The primitive slot was freed and is reallocated on demand.
    let again = graph.add_primitive(PrimitiveKind::Float64);
    assert_eq!(again.raw(), 1);
    assert_eq!(graph.add_primitive(PrimitiveKind::Int32), kept);
}

#[test]
fn iter_yields_ids_and_kinds() {
    let mut graph = TypeGraph::new();
    let elem = graph.add_primitive(PrimitiveKind::UInt8);
    graph.add_array(elem, 16);
    graph.add_typedef("u8", elem);

    let kinds: Vec<_> = graph.iter().map(|(id, node)| (id.raw(), node.kind())).collect();
    assert_eq!(
        kinds,
        vec![
            (0, NodeKind::Primitive),
            (1, NodeKind::Array),
            (2, NodeKind::Typedef)
        ]
    );
}

#[test]
fn first_dangling_checks_every_child() {
    let mut graph = TypeGraph::new();
    let int = graph.add_primitive(PrimitiveKind::Int32);
    let node = graph.add_class(Class::new(ClassKind::Struct, "Node", "Node", 8));
    let next = graph.add_pointer(node);
    if let Some(class) = graph.class_mut(node) {
        class.members = vec![Member::new("value", int, 0), Member::new("next", next, 32)];
    }
    graph.add_root(node);
    assert_eq!(graph.first_dangling(), None);

    let missing = NodeId::from_raw(40);
    if let Some(class) = graph.class_mut(node) {
        class.template_params.push(TemplateParam::Value {
            ty: missing,
            value: "3".to_string(),
        });
    }
    assert_eq!(graph.first_dangling(), Some(missing));
}
