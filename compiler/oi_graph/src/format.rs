//! C++-like spelling of graph nodes for logs and printers.

use std::fmt::Write;

use crate::{Node, NodeId, TemplateParam, TypeGraph};

impl TypeGraph {
    /// Format a node as a human-readable type name.
    ///
    /// Classes use their qualified name, arrays and pointers spell out their
    /// element or pointee (`uint8_t[4]`, `ns::Foo*`).
    pub fn display_name(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.display_name_into(id, &mut buf);
        buf
    }

    /// Format a node name into an existing string buffer.
    pub fn display_name_into(&self, id: NodeId, buf: &mut String) {
        match self.get(id) {
            Node::Primitive(kind) => buf.push_str(kind.c_name()),
            Node::Class(class) => {
                if class.qualified_name.is_empty() {
                    buf.push_str(&class.name);
                } else {
                    buf.push_str(&class.qualified_name);
                }
            }
            Node::Container(container) => {
                buf.push_str(&container.name);
                self.template_args_into(&container.template_params, buf);
            }
            Node::Enum(e) => buf.push_str(&e.name),
            Node::Typedef(td) => buf.push_str(&td.name),
            Node::Array(array) => {
                self.display_name_into(array.element, buf);
                let _ = write!(buf, "[{}]", array.len);
            }
            Node::Pointer(p) => {
                self.display_name_into(p.pointee, buf);
                buf.push('*');
            }
            Node::Reference(r) => {
                self.display_name_into(r.pointee, buf);
                buf.push('&');
            }
            Node::Incomplete(inc) => buf.push_str(&inc.label),
            Node::Dummy(d) => {
                let _ = write!(buf, "DummySizedOperator<{}, {}>", d.size, d.align);
            }
            Node::DummyAllocator(d) => {
                buf.push_str("DummyAllocator<");
                self.display_name_into(d.alloc_type, buf);
                let _ = write!(buf, ", {}, {}>", d.size, d.align);
            }
        }
    }

    fn template_args_into(&self, params: &[TemplateParam], buf: &mut String) {
        if params.is_empty() {
            return;
        }
        buf.push('<');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            match param {
                TemplateParam::Type { ty, qualifiers } => {
                    if qualifiers.is_const() {
                        buf.push_str("const ");
                    }
                    self.display_name_into(*ty, buf);
                }
                TemplateParam::Value { value, .. } => buf.push_str(value),
                TemplateParam::Template { name } => buf.push_str(name),
            }
        }
        buf.push('>');
    }
}
