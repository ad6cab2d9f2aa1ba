//! Graphviz rendering of a type graph.

use std::fmt::Write;

use rustc_hash::FxHashSet;

use crate::{
    walk_node, Array, Class, Container, DummyAllocator, Enum, Incomplete, NodeId, Pointer,
    PrimitiveKind, Qualifiers, Reference, TemplateParam, TypeGraph, Typedef, Visitor,
};

/// Renders nodes as a Graphviz `digraph`.
///
/// Every node is emitted once as `n<id>`. Members, template params, parents
/// and functions get their own vertices (`n<id>_m<i>`, `n<id>_t<i>`,
/// `n<id>_p<i>`, `n<id>_f<i>`) with an edge from their owner.
#[derive(Debug, Default)]
pub struct DotPrinter {
    out: String,
    printed: FxHashSet<NodeId>,
    /// Owner vertex for the template params being visited.
    param_owner: Option<(NodeId, usize)>,
}

impl DotPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every root of `graph` and everything reachable from it.
    pub fn render(graph: &TypeGraph) -> String {
        let mut printer = Self::new();
        for &root in graph.roots() {
            printer.print(graph, root);
        }
        printer.finish()
    }

    /// Print `id` and everything reachable from it that has not been printed.
    pub fn print(&mut self, graph: &TypeGraph, id: NodeId) {
        self.visit_node(graph, id);
    }

    /// Close the digraph and return the text.
    pub fn finish(self) -> String {
        let mut text = String::with_capacity(self.out.len() + 16);
        text.push_str("digraph {\n");
        text.push_str(&self.out);
        text.push_str("}\n");
        text
    }

    fn vertex(&mut self, name: &str, label: &str) {
        let _ = writeln!(self.out, "  {name} [label=\"{}\"]", escape(label));
    }

    fn edge(&mut self, from: &str, to: &str) {
        let _ = writeln!(self.out, "  {from} -> {to}");
    }

    fn edge_to_node(&mut self, from: &str, graph: &TypeGraph, to: NodeId) {
        self.edge(from, &node_name(to));
        self.visit_node(graph, to);
    }

    fn print_params(&mut self, graph: &TypeGraph, owner: NodeId, params: &[TemplateParam]) {
        for (i, param) in params.iter().enumerate() {
            self.param_owner = Some((owner, i));
            self.visit_template_param(graph, param);
        }
        self.param_owner = None;
    }
}

impl Visitor for DotPrinter {
    fn visit_node(&mut self, graph: &TypeGraph, id: NodeId) {
        if self.printed.insert(id) {
            walk_node(self, graph, id);
        }
    }

    fn visit_primitive(&mut self, _graph: &TypeGraph, id: NodeId, kind: PrimitiveKind) {
        self.vertex(&node_name(id), &format!("Primitive: {kind}"));
    }

    fn visit_class(&mut self, graph: &TypeGraph, id: NodeId, class: &Class) {
        let name = node_name(id);
        let mut label = format!("{}: {} (size: {}", class.kind.name(), class.name, class.size);
        push_align(&mut label, class.align);
        if class.is_dynamic {
            label.push_str(", dynamic");
        }
        label.push(')');
        self.vertex(&name, &label);

        self.print_params(graph, id, &class.template_params);
        for (i, parent) in class.parents.iter().enumerate() {
            let vertex = format!("{name}_p{i}");
            self.edge(&name, &vertex);
            self.vertex(&vertex, &format!("Parent (offset: {})", bytes(parent.bit_offset)));
            self.edge_to_node(&vertex, graph, parent.ty);
        }
        for (i, member) in class.members.iter().enumerate() {
            let vertex = format!("{name}_m{i}");
            self.edge(&name, &vertex);
            let mut label = format!(
                "Member: {} (offset: {}",
                member.name,
                bytes(member.bit_offset)
            );
            if member.is_bitfield() {
                let _ = write!(label, ", bitsize: {}", member.bit_size);
            }
            label.push(')');
            self.vertex(&vertex, &label);
            self.edge_to_node(&vertex, graph, member.ty);
        }
        for (i, function) in class.functions.iter().enumerate() {
            let vertex = format!("{name}_f{i}");
            self.edge(&name, &vertex);
            let mut label = format!("Function: {}", function.name);
            if function.is_virtual {
                label.push_str(" (virtual)");
            }
            self.vertex(&vertex, &label);
        }
    }

    fn visit_container(&mut self, graph: &TypeGraph, id: NodeId, container: &Container) {
        self.vertex(
            &node_name(id),
            &format!("Container: {} (size: {})", container.name, container.size),
        );
        self.print_params(graph, id, &container.template_params);
    }

    fn visit_enum(&mut self, _graph: &TypeGraph, id: NodeId, e: &Enum) {
        self.vertex(&node_name(id), &format!("Enum: {} (size: {})", e.name, e.size));
    }

    fn visit_array(&mut self, graph: &TypeGraph, id: NodeId, array: &Array) {
        let name = node_name(id);
        self.vertex(&name, &format!("Array: (length: {})", array.len));
        self.edge_to_node(&name, graph, array.element);
    }

    fn visit_typedef(&mut self, graph: &TypeGraph, id: NodeId, td: &Typedef) {
        let name = node_name(id);
        self.vertex(&name, &format!("Typedef: {}", td.name));
        self.edge_to_node(&name, graph, td.underlying);
    }

    fn visit_pointer(&mut self, graph: &TypeGraph, id: NodeId, pointer: &Pointer) {
        let name = node_name(id);
        self.vertex(&name, "Pointer");
        self.edge_to_node(&name, graph, pointer.pointee);
    }

    fn visit_reference(&mut self, graph: &TypeGraph, id: NodeId, reference: &Reference) {
        let name = node_name(id);
        self.vertex(&name, "Reference");
        self.edge_to_node(&name, graph, reference.pointee);
    }

    fn visit_incomplete(&mut self, _graph: &TypeGraph, id: NodeId, incomplete: &Incomplete) {
        self.vertex(&node_name(id), &format!("Incomplete: {}", incomplete.label));
    }

    fn visit_dummy(&mut self, _graph: &TypeGraph, id: NodeId, size: u64, align: u64) {
        let mut label = format!("Dummy (size: {size}");
        push_align(&mut label, align);
        label.push(')');
        self.vertex(&node_name(id), &label);
    }

    fn visit_dummy_allocator(&mut self, graph: &TypeGraph, id: NodeId, d: &DummyAllocator) {
        let name = node_name(id);
        let mut label = format!("DummyAllocator (size: {}", d.size);
        push_align(&mut label, d.align);
        label.push(')');
        self.vertex(&name, &label);
        self.edge_to_node(&name, graph, d.alloc_type);
    }

    fn visit_template_param(&mut self, graph: &TypeGraph, param: &TemplateParam) {
        let Some((owner, i)) = self.param_owner else {
            return;
        };
        let owner = node_name(owner);
        let vertex = format!("{owner}_t{i}");
        self.edge(&owner, &vertex);

        let mut label = String::from("Param");
        match param {
            TemplateParam::Value { value, .. } => {
                let _ = write!(label, " Value: {value}");
            }
            TemplateParam::Template { name } => {
                let _ = write!(label, " Template: {name}");
            }
            TemplateParam::Type { .. } => {}
        }
        push_qualifiers(&mut label, param.qualifiers());
        self.vertex(&vertex, &label);

        if let TemplateParam::Type { ty, .. } = param {
            self.edge_to_node(&vertex, graph, *ty);
        }
    }
}

fn node_name(id: NodeId) -> String {
    format!("n{}", id.raw())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "offsets are far below 2^52 bits"
)]
pub(crate) fn bytes(bits: u64) -> f64 {
    bits as f64 / 8.0
}

pub(crate) fn push_align(label: &mut String, align: u64) {
    if align != 0 {
        let _ = write!(label, ", align: {align}");
    }
}

fn push_qualifiers(label: &mut String, qualifiers: Qualifiers) {
    if qualifiers.is_const() {
        label.push_str(" Qualifiers: const");
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests;
