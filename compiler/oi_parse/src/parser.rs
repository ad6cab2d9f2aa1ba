//! The type enumeration engine.

use std::collections::BTreeMap;

use oi_frontend::{Frontend, RecordKind, TemplateArgument, TemplateName, TypeClass};
use oi_graph::{
    Class, ClassKind, Enum, Function, Member, Node, NodeId, Parent, PrimitiveKind, Qualifiers,
    TemplateParam, TypeGraph,
};
use rustc_hash::FxHashMap;

use crate::stack::ensure_sufficient_stack;
use crate::{map_builtin, should_chase, ParseError, ParserOptions};

/// Builds type graph nodes for the types of one frontend session.
///
/// The parser owns the handle to node memo table for the session, so
/// parsing several roots with one parser shares every node they have in
/// common. It writes into a graph it borrows; the graph outlives the parser
/// and is handed on once every root is parsed.
///
/// ```text
/// let mut graph = TypeGraph::new();
/// let mut parser = TypeParser::new(&table, &mut graph, ParserOptions::default());
/// let root = parser.parse_root(node_ty)?;
/// ```
pub struct TypeParser<'a, F: Frontend> {
    frontend: &'a F,
    graph: &'a mut TypeGraph,
    options: ParserOptions,
    memo: FxHashMap<F::Handle, NodeId>,
    /// Nesting level of node-producing types in the current parse.
    depth: u32,
}

impl<'a, F: Frontend> TypeParser<'a, F> {
    pub fn new(frontend: &'a F, graph: &'a mut TypeGraph, options: ParserOptions) -> Self {
        Self {
            frontend,
            graph,
            options,
            memo: FxHashMap::default(),
            depth: 0,
        }
    }

    #[inline]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[inline]
    pub fn graph(&self) -> &TypeGraph {
        &*self.graph
    }

    /// The node already built for `ty`, if any.
    pub fn lookup(&self, ty: F::Handle) -> Option<NodeId> {
        self.memo.get(&ty).copied()
    }

    /// Build the node for `ty` and everything reachable from it.
    ///
    /// On error the graph and memo table are restored to their state
    /// before the call.
    #[tracing::instrument(level = "debug", skip_all, fields(root = ?ty))]
    pub fn parse(&mut self, ty: F::Handle) -> Result<NodeId, ParseError> {
        self.depth = 0;
        let checkpoint = self.graph.checkpoint();
        match self.enumerate(ty) {
            Ok(id) => {
                tracing::debug!(
                    node = %id,
                    name = %self.graph.display_name(id),
                    nodes = self.graph.len(),
                    "parsed"
                );
                Ok(id)
            }
            Err(err) => {
                tracing::debug!(error = %err, "parse failed, rolling back");
                self.graph.rollback(checkpoint);
                self.memo.retain(|_, id| !checkpoint.is_newer(*id));
                Err(err)
            }
        }
    }

    /// [`parse`](Self::parse) `ty` and record the result as a graph root.
    pub fn parse_root(&mut self, ty: F::Handle) -> Result<NodeId, ParseError> {
        let id = self.parse(ty)?;
        self.graph.add_root(id);
        Ok(id)
    }

    fn enumerate(&mut self, ty: F::Handle) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.enumerate_inner(ty))
    }

    fn enumerate_inner(&mut self, ty: F::Handle) -> Result<NodeId, ParseError> {
        if let Some(&id) = self.memo.get(&ty) {
            return Ok(id);
        }

        let class = self.frontend.classify(ty);
        if let Some(inner) = class.sugar_target() {
            return self.enumerate(inner);
        }

        self.depth += 1;
        tracing::trace!(ty = ?ty, depth = self.depth, class = class.name(), "enumerate");
        let result = self.enumerate_type(ty, class);
        self.depth -= 1;
        result
    }

    fn enumerate_type(
        &mut self,
        ty: F::Handle,
        class: TypeClass<F::Handle, F::Decl>,
    ) -> Result<NodeId, ParseError> {
        if !self.frontend.is_complete(ty) {
            let name = self.frontend.display_name(ty);
            tracing::debug!(ty = ?ty, name = %name, "incomplete type");
            let id = self.graph.add_incomplete(format!("incomplete type `{name}`"));
            return Ok(self.register(ty, id));
        }

        match class {
            TypeClass::Builtin(kind) => {
                let primitive = map_builtin(kind, self.options.data_model)?;
                let id = self.graph.add_primitive(primitive);
                Ok(self.register(ty, id))
            }
            TypeClass::Record(decl) => self.enumerate_class(ty, decl),
            TypeClass::Enum(decl) => Ok(self.enumerate_enum(ty, decl)),
            TypeClass::Pointer { pointee } => self.enumerate_pointer(ty, pointee),
            TypeClass::LValueReference { pointee } => self.enumerate_reference(ty, pointee),
            TypeClass::ConstantArray { element, len } => {
                let element = self.enumerate(element)?;
                Ok(self.register_new(ty, |graph| graph.add_array(element, len)))
            }
            TypeClass::Typedef { name, underlying } | TypeClass::Using { name, underlying } => {
                let underlying = self.enumerate(underlying)?;
                Ok(self.register_new(ty, |graph| graph.add_typedef(name, underlying)))
            }
            TypeClass::Elaborated { named: inner }
            | TypeClass::SubstTemplateTypeParm { replacement: inner }
            | TypeClass::TemplateSpecialization {
                desugared: Some(inner),
            } => self.enumerate(inner),
            TypeClass::TemplateSpecialization { desugared: None }
            | TypeClass::RValueReference
            | TypeClass::MemberPointer
            | TypeClass::FunctionProto
            | TypeClass::IncompleteArray
            | TypeClass::VariableArray
            | TypeClass::DependentSizedArray
            | TypeClass::Vector
            | TypeClass::Atomic
            | TypeClass::Decltype
            | TypeClass::TemplateTypeParm
            | TypeClass::Other(_) => Err(ParseError::UnsupportedTypeClass {
                class: class.name().to_string(),
            }),
        }
    }

    fn register(&mut self, ty: F::Handle, id: NodeId) -> NodeId {
        self.memo.insert(ty, id);
        id
    }

    /// Register a node for a wrapper type whose children are built.
    ///
    /// Building the children may already have registered `ty` (a member of
    /// a record reached through `ty` refers to `ty` again); that node is
    /// reused so a handle never has two nodes.
    fn register_new(
        &mut self,
        ty: F::Handle,
        make: impl FnOnce(&mut TypeGraph) -> NodeId,
    ) -> NodeId {
        if let Some(&id) = self.memo.get(&ty) {
            return id;
        }
        let id = make(&mut *self.graph);
        self.register(ty, id)
    }

    fn stub_pointer(&mut self, ty: F::Handle) -> NodeId {
        tracing::debug!(ty = ?ty, depth = self.depth, "stubbing pointer");
        self.graph.add_primitive(PrimitiveKind::StubbedPointer)
    }

    fn enumerate_pointer(
        &mut self,
        ty: F::Handle,
        pointee: F::Handle,
    ) -> Result<NodeId, ParseError> {
        if !should_chase(self.depth, &self.options) {
            return Ok(self.stub_pointer(ty));
        }
        let pointee = self.enumerate(pointee)?;
        Ok(self.register_new(ty, |graph| graph.add_pointer(pointee)))
    }

    fn enumerate_reference(
        &mut self,
        ty: F::Handle,
        pointee: F::Handle,
    ) -> Result<NodeId, ParseError> {
        if !should_chase(self.depth, &self.options) {
            return Ok(self.stub_pointer(ty));
        }
        let pointee = self.enumerate(pointee)?;
        // A reference to an incomplete type cannot be followed structurally.
        let incomplete = matches!(self.graph.get(pointee), Node::Incomplete(_));
        Ok(self.register_new(ty, |graph| {
            if incomplete {
                graph.add_pointer(pointee)
            } else {
                graph.add_reference(pointee)
            }
        }))
    }

    fn enumerate_enum(&mut self, ty: F::Handle, decl: F::Decl) -> NodeId {
        let mut enumerators = BTreeMap::new();
        if self.options.read_enum_values {
            for enumerator in self.frontend.enumerators(decl) {
                enumerators.entry(enumerator.value).or_insert(enumerator.name);
            }
        }
        let id = self.graph.add_enum(Enum {
            name: self.frontend.enum_name(decl),
            size: self.frontend.size_in_bits(ty) / 8,
            enumerators,
        });
        self.register(ty, id)
    }

    fn enumerate_class(&mut self, ty: F::Handle, decl: F::Decl) -> Result<NodeId, ParseError> {
        let info = self.frontend.record_info(decl);
        let kind = match info.kind {
            RecordKind::Struct => ClassKind::Struct,
            RecordKind::Class => ClassKind::Class,
            RecordKind::Union => ClassKind::Union,
        };
        let class = Class::new(
            kind,
            info.name,
            info.qualified_name,
            self.frontend.size_in_bits(ty) / 8,
        )
        .with_align(self.frontend.align_in_bits(ty) / 8)
        .with_dynamic(info.is_dynamic);

        // Registered before any child is visited, so children that refer
        // back to this record find this node.
        let id = self.graph.add_class(class);
        self.register(ty, id);

        let mut template_params = Vec::new();
        if let Some(args) = self.frontend.template_arguments(decl) {
            template_params.reserve(args.len());
            for arg in args {
                template_params.push(self.enumerate_template_param(arg)?);
            }
        }

        let mut parents = Vec::new();
        for base in self.frontend.record_bases(decl) {
            parents.push(Parent {
                ty: self.enumerate(base.ty)?,
                bit_offset: base.bit_offset,
            });
        }

        let mut members = Vec::new();
        for field in self.frontend.record_fields(decl) {
            let member_ty = self.enumerate(field.ty)?;
            members.push(
                Member::new(field.name, member_ty, field.bit_offset)
                    .with_bit_size(field.bit_width.unwrap_or(0)),
            );
        }
        // Stable, so union members sharing an offset keep declaration order.
        members.sort_by_key(|member| member.bit_offset);

        let functions = self
            .frontend
            .record_methods(decl)
            .into_iter()
            .map(|method| Function {
                name: method.name,
                is_virtual: method.is_virtual,
            })
            .collect();

        if let Some(class) = self.graph.class_mut(id) {
            class.template_params = template_params;
            class.parents = parents;
            class.members = members;
            class.functions = functions;
        }
        Ok(id)
    }

    fn enumerate_template_param(
        &mut self,
        arg: TemplateArgument<F::Handle>,
    ) -> Result<TemplateParam, ParseError> {
        match arg {
            TemplateArgument::Type { ty, is_const } => Ok(TemplateParam::Type {
                ty: self.enumerate(ty)?,
                qualifiers: Qualifiers::from_const(is_const),
            }),
            TemplateArgument::Integral { ty, value } => Ok(TemplateParam::Value {
                ty: self.enumerate(ty)?,
                value,
            }),
            TemplateArgument::Template(name) => template_name_param(name),
            TemplateArgument::Declaration
            | TemplateArgument::NullPtr
            | TemplateArgument::TemplateExpansion
            | TemplateArgument::Expression
            | TemplateArgument::Pack => Err(ParseError::UnsupportedTemplateArgKind {
                kind: arg.kind_name(),
            }),
        }
    }
}

fn template_name_param(name: TemplateName) -> Result<TemplateParam, ParseError> {
    match name {
        TemplateName::Template { qualified_name } => Ok(TemplateParam::Template {
            name: qualified_name,
        }),
        TemplateName::OverloadedTemplate
        | TemplateName::AssumedTemplate
        | TemplateName::QualifiedTemplate
        | TemplateName::DependentTemplate
        | TemplateName::SubstTemplateTemplateParm
        | TemplateName::SubstTemplateTemplateParmPack
        | TemplateName::UsingTemplate => Err(ParseError::UnsupportedTemplateNameKind {
            kind: name.kind_name(),
        }),
    }
}
