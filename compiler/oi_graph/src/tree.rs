//! Indented text dump of a type graph.

use std::fmt::Write;

use rustc_hash::FxHashMap;

use crate::dot::{bytes, push_align};
use crate::{
    walk_node, Array, Class, Container, DummyAllocator, Enum, Incomplete, NodeId, Pointer,
    PrimitiveKind, Reference, TemplateParam, TypeGraph, Typedef, Visitor,
};

/// Prints a type graph as an indented tree.
///
/// Each non-primitive node is numbered the first time it is printed
/// (`[0] Struct: Node (size: 16)`); later occurrences print only the number
/// (`[0]`), which is how cycles show up. Primitives are printed in full every
/// time. Children are indented by two spaces per level.
#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
    depth: usize,
    numbers: FxHashMap<NodeId, usize>,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print every root of `graph`.
    pub fn render(graph: &TypeGraph) -> String {
        let mut printer = Self::new();
        for &root in graph.roots() {
            printer.print(graph, root);
        }
        printer.finish()
    }

    /// Print `id` at the top level.
    pub fn print(&mut self, graph: &TypeGraph, id: NodeId) {
        self.depth = 0;
        self.visit_node(graph, id);
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Number `id` and print its header line.
    fn header(&mut self, id: NodeId, text: &str) {
        let number = self.numbers.len();
        self.numbers.insert(id, number);
        self.line(&format!("[{number}] {text}"));
    }

    fn child(&mut self, graph: &TypeGraph, id: NodeId) {
        self.depth += 1;
        self.visit_node(graph, id);
        self.depth -= 1;
    }

    fn params(&mut self, graph: &TypeGraph, params: &[TemplateParam]) {
        self.depth += 1;
        for param in params {
            self.visit_template_param(graph, param);
        }
        self.depth -= 1;
    }
}

impl Visitor for TreePrinter {
    fn visit_node(&mut self, graph: &TypeGraph, id: NodeId) {
        if let Some(&number) = self.numbers.get(&id) {
            self.line(&format!("[{number}]"));
            return;
        }
        walk_node(self, graph, id);
    }

    fn visit_primitive(&mut self, _graph: &TypeGraph, _id: NodeId, kind: PrimitiveKind) {
        self.line(&format!("Primitive: {kind}"));
    }

    fn visit_class(&mut self, graph: &TypeGraph, id: NodeId, class: &Class) {
        let mut text = format!("{}: {} (size: {}", class.kind.name(), class.name, class.size);
        push_align(&mut text, class.align);
        if class.is_dynamic {
            text.push_str(", dynamic");
        }
        text.push(')');
        self.header(id, &text);

        self.params(graph, &class.template_params);
        self.depth += 1;
        for parent in &class.parents {
            self.line(&format!("Parent (offset: {})", bytes(parent.bit_offset)));
            self.child(graph, parent.ty);
        }
        for member in &class.members {
            let mut text = format!("Member: {} (offset: {}", member.name, bytes(member.bit_offset));
            if member.is_bitfield() {
                let _ = write!(text, ", bitsize: {}", member.bit_size);
            }
            text.push(')');
            self.line(&text);
            self.child(graph, member.ty);
        }
        for function in &class.functions {
            if function.is_virtual {
                self.line(&format!("Function: {} (virtual)", function.name));
            } else {
                self.line(&format!("Function: {}", function.name));
            }
        }
        self.depth -= 1;
    }

    fn visit_container(&mut self, graph: &TypeGraph, id: NodeId, container: &Container) {
        self.header(
            id,
            &format!("Container: {} (size: {})", container.name, container.size),
        );
        self.params(graph, &container.template_params);
    }

    fn visit_enum(&mut self, _graph: &TypeGraph, id: NodeId, e: &Enum) {
        self.header(id, &format!("Enum: {} (size: {})", e.name, e.size));
        self.depth += 1;
        for (value, name) in &e.enumerators {
            self.line(&format!("Enumerator: {name} = {value}"));
        }
        self.depth -= 1;
    }

    fn visit_array(&mut self, graph: &TypeGraph, id: NodeId, array: &Array) {
        self.header(id, &format!("Array: (length: {})", array.len));
        self.child(graph, array.element);
    }

    fn visit_typedef(&mut self, graph: &TypeGraph, id: NodeId, td: &Typedef) {
        self.header(id, &format!("Typedef: {}", td.name));
        self.child(graph, td.underlying);
    }

    fn visit_pointer(&mut self, graph: &TypeGraph, id: NodeId, pointer: &Pointer) {
        self.header(id, "Pointer");
        self.child(graph, pointer.pointee);
    }

    fn visit_reference(&mut self, graph: &TypeGraph, id: NodeId, reference: &Reference) {
        self.header(id, "Reference");
        self.child(graph, reference.pointee);
    }

    fn visit_incomplete(&mut self, _graph: &TypeGraph, id: NodeId, incomplete: &Incomplete) {
        self.header(id, &format!("Incomplete: {}", incomplete.label));
    }

    fn visit_dummy(&mut self, _graph: &TypeGraph, id: NodeId, size: u64, align: u64) {
        let mut text = format!("Dummy (size: {size}");
        push_align(&mut text, align);
        text.push(')');
        self.header(id, &text);
    }

    fn visit_dummy_allocator(&mut self, graph: &TypeGraph, id: NodeId, d: &DummyAllocator) {
        let mut text = format!("DummyAllocator (size: {}", d.size);
        push_align(&mut text, d.align);
        text.push(')');
        self.header(id, &text);
        self.child(graph, d.alloc_type);
    }

    fn visit_template_param(&mut self, graph: &TypeGraph, param: &TemplateParam) {
        self.line("Param");
        self.depth += 1;
        match param {
            TemplateParam::Type { ty, qualifiers } => {
                if qualifiers.is_const() {
                    self.line("Qualifiers: const");
                }
                self.visit_node(graph, *ty);
            }
            TemplateParam::Value { ty, value } => {
                self.line(&format!("Value: {value}"));
                self.visit_node(graph, *ty);
            }
            TemplateParam::Template { name } => {
                self.line(&format!("Template: {name}"));
            }
        }
        self.depth -= 1;
    }
}
