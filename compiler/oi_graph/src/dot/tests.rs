use pretty_assertions::assert_eq;

use super::*;
use crate::{ClassKind, Function, Member, Parent};

#[test]
fn self_referential_class() {
    let mut graph = TypeGraph::new();
    let node = graph.add_class(Class::new(ClassKind::Struct, "Node", "Node", 16).with_align(8));
    let int = graph.add_primitive(PrimitiveKind::Int32);
    let next = graph.add_pointer(node);
    if let Some(class) = graph.class_mut(node) {
        class.members = vec![
            Member::new("value", int, 0).with_bit_size(3),
            Member::new("next", next, 64),
        ];
    }
    graph.add_root(node);

    assert_eq!(
        DotPrinter::render(&graph),
        "digraph {
  n0 [label=\"Struct: Node (size: 16, align: 8)\"]
  n0 -> n0_m0
  n0_m0 [label=\"Member: value (offset: 0, bitsize: 3)\"]
  n0_m0 -> n1
  n1 [label=\"Primitive: int32_t\"]
  n0 -> n0_m1
  n0_m1 [label=\"Member: next (offset: 8)\"]
  n0_m1 -> n2
  n2 [label=\"Pointer\"]
  n2 -> n0
}
"
    );
}

#[test]
fn params_parents_and_functions() {
    let mut graph = TypeGraph::new();
    let base = graph.add_class(Class::new(ClassKind::Class, "Base", "Base", 8).with_dynamic(true));
    let int = graph.add_primitive(PrimitiveKind::Int32);
    let derived = graph.add_class(Class::new(
        ClassKind::Class,
        "Derived<int, 3>",
        "Derived<int, 3>",
        8,
    ));
    if let Some(class) = graph.class_mut(derived) {
        class.template_params = vec![
            TemplateParam::Type {
                ty: int,
                qualifiers: Qualifiers::CONST,
            },
            TemplateParam::Value {
                ty: int,
                value: "3".to_string(),
            },
        ];
        class.parents = vec![Parent {
            ty: base,
            bit_offset: 0,
        }];
        class.functions = vec![Function {
            name: "size".to_string(),
            is_virtual: true,
        }];
    }
    graph.add_root(derived);

    assert_eq!(
        DotPrinter::render(&graph),
        "digraph {
  n2 [label=\"Class: Derived<int, 3> (size: 8)\"]
  n2 -> n2_t0
  n2_t0 [label=\"Param Qualifiers: const\"]
  n2_t0 -> n1
  n1 [label=\"Primitive: int32_t\"]
  n2 -> n2_t1
  n2_t1 [label=\"Param Value: 3\"]
  n2 -> n2_p0
  n2_p0 [label=\"Parent (offset: 0)\"]
  n2_p0 -> n0
  n0 [label=\"Class: Base (size: 8, dynamic)\"]
  n2 -> n2_f0
  n2_f0 [label=\"Function: size (virtual)\"]
}
"
    );
}

#[test]
fn shared_nodes_print_once() {
    let mut graph = TypeGraph::new();
    let byte = graph.add_primitive(PrimitiveKind::UInt8);
    let array = graph.add_array(byte, 4);
    let td = graph.add_typedef("bytes4", array);
    graph.add_root(td);
    graph.add_root(array);

    assert_eq!(
        DotPrinter::render(&graph),
        "digraph {
  n2 [label=\"Typedef: bytes4\"]
  n2 -> n1
  n1 [label=\"Array: (length: 4)\"]
  n1 -> n0
  n0 [label=\"Primitive: uint8_t\"]
}
"
    );
}

#[test]
fn labels_are_escaped() {
    let mut graph = TypeGraph::new();
    let inc = graph.add_incomplete("incomplete type `\"odd\"`");
    graph.add_root(inc);
    assert_eq!(
        DotPrinter::render(&graph),
        "digraph {\n  n0 [label=\"Incomplete: incomplete type `\\\"odd\\\"`\"]\n}\n"
    );
}
