//! In-memory reference frontend.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Base, BuiltinKind, Enumerator, Field, Frontend, Method, RecordInfo, RecordKind,
    TemplateArgument, TypeClass,
};

/// Handle of a type in a [`TypeTable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(u32);

impl TypeRef {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Handle of a record or enum declaration in a [`TypeTable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclRef(u32);

impl DeclRef {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclRef({})", self.0)
    }
}

impl fmt::Display for DeclRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Layout and contents of a defined record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordDef {
    pub size_bits: u64,
    pub align_bits: u64,
    #[serde(default)]
    pub fields: Vec<Field<TypeRef>>,
    #[serde(default)]
    pub bases: Vec<Base<TypeRef>>,
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Present for class template specializations.
    #[serde(default)]
    pub template_args: Option<Vec<TemplateArgument<TypeRef>>>,
}

impl RecordDef {
    pub fn new(size_bits: u64, align_bits: u64) -> Self {
        Self {
            size_bits,
            align_bits,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef, bit_offset: u64) -> Self {
        self.fields.push(Field {
            name: name.into(),
            ty,
            bit_offset,
            bit_width: None,
        });
        self
    }

    #[must_use]
    pub fn bitfield(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        bit_offset: u64,
        bit_width: u64,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            ty,
            bit_offset,
            bit_width: Some(bit_width),
        });
        self
    }

    #[must_use]
    pub fn base(mut self, ty: TypeRef, bit_offset: u64) -> Self {
        self.bases.push(Base { ty, bit_offset });
        self
    }

    #[must_use]
    pub fn method(mut self, name: impl Into<String>, is_virtual: bool) -> Self {
        self.methods.push(Method {
            name: name.into(),
            is_virtual,
        });
        self
    }

    #[must_use]
    pub fn template_args(mut self, args: Vec<TemplateArgument<TypeRef>>) -> Self {
        self.template_args = Some(args);
        self
    }
}

/// Size and enumerators of a defined enum.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub size_bits: u64,
    #[serde(default)]
    pub enumerators: Vec<Enumerator>,
}

impl EnumDef {
    pub fn new(size_bits: u64) -> Self {
        Self {
            size_bits,
            enumerators: Vec::new(),
        }
    }

    #[must_use]
    pub fn enumerator(mut self, name: impl Into<String>, value: i64) -> Self {
        self.enumerators.push(Enumerator {
            name: name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum TableError {
    #[error("unknown type {0}")]
    UnknownType(TypeRef),
    #[error("unknown declaration {0}")]
    UnknownDecl(DeclRef),
    #[error("{0} is not a record")]
    NotARecord(TypeRef),
    #[error("{0} is not an enum")]
    NotAnEnum(TypeRef),
    #[error("{ty} wraps {target}, which is not declared before it")]
    ForwardReference { ty: TypeRef, target: TypeRef },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TypeEntry {
    class: TypeClass<TypeRef, DeclRef>,
    /// Overrides the derived display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spelling: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
enum Decl {
    Record {
        info: RecordInfo,
        def: Option<RecordDef>,
    },
    Enum {
        name: String,
        def: Option<EnumDef>,
    },
}

/// A type exported under a name, e.g. the types a driver may ask for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub ty: TypeRef,
}

/// An in-memory translation unit.
///
/// Wrapper types (pointers, aliases, arrays, ...) may only refer to types
/// created before them. Records and enums are declared first and defined
/// later, so a record's fields can refer back to the record itself.
///
/// ```text
/// let mut table = TypeTable::new();
/// let node = table.declare_record(RecordInfo::new(RecordKind::Struct, "Node"));
/// let next = table.pointer(node);
/// let int = table.builtin(BuiltinKind::Int);
/// table.define_record(
///     node,
///     RecordDef::new(128, 64).field("value", int, 0).field("next", next, 64),
/// )?;
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TypeTable {
    types: Vec<TypeEntry>,
    decls: Vec<Decl>,
    #[serde(default)]
    roots: Vec<NamedType>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, class: TypeClass<TypeRef, DeclRef>) -> TypeRef {
        let Ok(raw) = u32::try_from(self.types.len()) else {
            panic!("type table exceeded u32::MAX types");
        };
        self.types.push(TypeEntry {
            class,
            spelling: None,
        });
        TypeRef(raw)
    }

    fn push_decl(&mut self, decl: Decl) -> DeclRef {
        let Ok(raw) = u32::try_from(self.decls.len()) else {
            panic!("type table exceeded u32::MAX declarations");
        };
        self.decls.push(decl);
        DeclRef(raw)
    }

    /// The builtin type of `kind`. Each kind has a single handle.
    pub fn builtin(&mut self, kind: BuiltinKind) -> TypeRef {
        let existing = self
            .types
            .iter()
            .position(|entry| entry.class == TypeClass::Builtin(kind));
        match existing.and_then(|i| u32::try_from(i).ok()) {
            Some(raw) => TypeRef(raw),
            None => self.push(TypeClass::Builtin(kind)),
        }
    }

    pub fn pointer(&mut self, pointee: TypeRef) -> TypeRef {
        self.push(TypeClass::Pointer { pointee })
    }

    pub fn lvalue_reference(&mut self, pointee: TypeRef) -> TypeRef {
        self.push(TypeClass::LValueReference { pointee })
    }

    pub fn constant_array(&mut self, element: TypeRef, len: u64) -> TypeRef {
        self.push(TypeClass::ConstantArray { element, len })
    }

    pub fn typedef(&mut self, name: impl Into<String>, underlying: TypeRef) -> TypeRef {
        self.push(TypeClass::Typedef {
            name: name.into(),
            underlying,
        })
    }

    pub fn using(&mut self, name: impl Into<String>, underlying: TypeRef) -> TypeRef {
        self.push(TypeClass::Using {
            name: name.into(),
            underlying,
        })
    }

    /// A name-qualified spelling of `named`.
    pub fn elaborated(&mut self, named: TypeRef) -> TypeRef {
        self.push(TypeClass::Elaborated { named })
    }

    /// A substituted template parameter standing for `replacement`.
    pub fn subst(&mut self, replacement: TypeRef) -> TypeRef {
        self.push(TypeClass::SubstTemplateTypeParm { replacement })
    }

    /// A written template specialization; `None` makes it dependent.
    pub fn specialization(&mut self, desugared: Option<TypeRef>) -> TypeRef {
        self.push(TypeClass::TemplateSpecialization { desugared })
    }

    /// A type of any category, spelled as `spelling`.
    pub fn unsupported(
        &mut self,
        class: TypeClass<TypeRef, DeclRef>,
        spelling: impl Into<String>,
    ) -> TypeRef {
        let ty = self.push(class);
        self.types[ty.index()].spelling = Some(spelling.into());
        ty
    }

    /// Declare a record without defining it.
    pub fn declare_record(&mut self, info: RecordInfo) -> TypeRef {
        let decl = self.push_decl(Decl::Record { info, def: None });
        self.push(TypeClass::Record(decl))
    }

    /// Give the record `ty` its definition, replacing any previous one.
    pub fn define_record(&mut self, ty: TypeRef, def: RecordDef) -> Result<(), TableError> {
        let decl = match self.entry(ty)?.class {
            TypeClass::Record(decl) => decl,
            _ => return Err(TableError::NotARecord(ty)),
        };
        match self.decls.get_mut(decl.index()) {
            Some(Decl::Record { def: slot, .. }) => {
                *slot = Some(def);
                Ok(())
            }
            Some(Decl::Enum { .. }) => Err(TableError::NotARecord(ty)),
            None => Err(TableError::UnknownDecl(decl)),
        }
    }

    pub fn declare_enum(&mut self, name: impl Into<String>) -> TypeRef {
        let decl = self.push_decl(Decl::Enum {
            name: name.into(),
            def: None,
        });
        self.push(TypeClass::Enum(decl))
    }

    pub fn define_enum(&mut self, ty: TypeRef, def: EnumDef) -> Result<(), TableError> {
        let decl = match self.entry(ty)?.class {
            TypeClass::Enum(decl) => decl,
            _ => return Err(TableError::NotAnEnum(ty)),
        };
        match self.decls.get_mut(decl.index()) {
            Some(Decl::Enum { def: slot, .. }) => {
                *slot = Some(def);
                Ok(())
            }
            Some(Decl::Record { .. }) => Err(TableError::NotAnEnum(ty)),
            None => Err(TableError::UnknownDecl(decl)),
        }
    }

    /// Export `ty` under `name`.
    pub fn add_root(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.roots.push(NamedType {
            name: name.into(),
            ty,
        });
    }

    /// Exported types in the order they were added.
    pub fn roots(&self) -> &[NamedType] {
        &self.roots
    }

    /// Find an exported type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeRef> {
        self.roots.iter().find(|root| root.name == name).map(|root| root.ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn entry(&self, ty: TypeRef) -> Result<&TypeEntry, TableError> {
        self.types.get(ty.index()).ok_or(TableError::UnknownType(ty))
    }

    /// Check that every handle in the table resolves.
    ///
    /// Builder-made tables always pass. Tables read from JSON must be
    /// validated before use: the [`Frontend`] queries index directly and
    /// follow wrapper chains, which only terminate when wrappers refer to
    /// earlier types.
    pub fn validate(&self) -> Result<(), TableError> {
        for (i, entry) in self.types.iter().enumerate() {
            let Ok(raw) = u32::try_from(i) else {
                break;
            };
            let ty = TypeRef(raw);
            match &entry.class {
                TypeClass::Record(decl) => match self.decls.get(decl.index()) {
                    Some(Decl::Record { def, .. }) => {
                        if let Some(def) = def {
                            self.validate_record(def)?;
                        }
                    }
                    Some(Decl::Enum { .. }) => return Err(TableError::NotARecord(ty)),
                    None => return Err(TableError::UnknownDecl(*decl)),
                },
                TypeClass::Enum(decl) => match self.decls.get(decl.index()) {
                    Some(Decl::Enum { .. }) => {}
                    Some(Decl::Record { .. }) => return Err(TableError::NotAnEnum(ty)),
                    None => return Err(TableError::UnknownDecl(*decl)),
                },
                TypeClass::Pointer { pointee: target }
                | TypeClass::LValueReference { pointee: target }
                | TypeClass::ConstantArray {
                    element: target, ..
                }
                | TypeClass::Typedef {
                    underlying: target, ..
                }
                | TypeClass::Using {
                    underlying: target, ..
                }
                | TypeClass::Elaborated { named: target }
                | TypeClass::SubstTemplateTypeParm {
                    replacement: target,
                }
                | TypeClass::TemplateSpecialization {
                    desugared: Some(target),
                } => {
                    if *target >= ty {
                        return Err(TableError::ForwardReference {
                            ty,
                            target: *target,
                        });
                    }
                }
                _ => {}
            }
        }
        for root in &self.roots {
            self.entry(root.ty)?;
        }
        Ok(())
    }

    fn validate_record(&self, def: &RecordDef) -> Result<(), TableError> {
        for field in &def.fields {
            self.entry(field.ty)?;
        }
        for base in &def.bases {
            self.entry(base.ty)?;
        }
        for arg in def.template_args.iter().flatten() {
            if let TemplateArgument::Type { ty, .. } | TemplateArgument::Integral { ty, .. } = arg
            {
                self.entry(*ty)?;
            }
        }
        Ok(())
    }

    fn record(&self, decl: DeclRef) -> Option<(&RecordInfo, Option<&RecordDef>)> {
        match &self.decls[decl.index()] {
            Decl::Record { info, def } => Some((info, def.as_ref())),
            Decl::Enum { .. } => None,
        }
    }

    fn record_def(&self, decl: DeclRef) -> Option<&RecordDef> {
        self.record(decl).and_then(|(_, def)| def)
    }

    fn enum_def(&self, decl: DeclRef) -> Option<&EnumDef> {
        match &self.decls[decl.index()] {
            Decl::Enum { def, .. } => def.as_ref(),
            Decl::Record { .. } => None,
        }
    }

    fn decl_is_defined(&self, decl: DeclRef) -> bool {
        match &self.decls[decl.index()] {
            Decl::Record { def, .. } => def.is_some(),
            Decl::Enum { def, .. } => def.is_some(),
        }
    }
}

impl Frontend for TypeTable {
    type Handle = TypeRef;
    type Decl = DeclRef;

    fn classify(&self, ty: TypeRef) -> TypeClass<TypeRef, DeclRef> {
        self.types[ty.index()].class.clone()
    }

    fn is_complete(&self, mut ty: TypeRef) -> bool {
        loop {
            match &self.types[ty.index()].class {
                TypeClass::Record(decl) | TypeClass::Enum(decl) => {
                    return self.decl_is_defined(*decl);
                }
                TypeClass::ConstantArray { element: inner, .. }
                | TypeClass::Typedef {
                    underlying: inner, ..
                }
                | TypeClass::Using {
                    underlying: inner, ..
                }
                | TypeClass::Elaborated { named: inner }
                | TypeClass::SubstTemplateTypeParm { replacement: inner }
                | TypeClass::TemplateSpecialization {
                    desugared: Some(inner),
                } => ty = *inner,
                // `T[]` has no size; a flexible array member lands here.
                TypeClass::IncompleteArray => return false,
                _ => return true,
            }
        }
    }

    fn display_name(&self, ty: TypeRef) -> String {
        let entry = &self.types[ty.index()];
        if let Some(spelling) = &entry.spelling {
            return spelling.clone();
        }
        match &entry.class {
            TypeClass::Builtin(kind) => kind.spelling().to_string(),
            TypeClass::Record(decl) => match &self.decls[decl.index()] {
                Decl::Record { info, .. } => info.qualified_name.clone(),
                Decl::Enum { name, .. } => name.clone(),
            },
            TypeClass::Enum(decl) => self.enum_name(*decl),
            TypeClass::Pointer { pointee } => format!("{}*", self.display_name(*pointee)),
            TypeClass::LValueReference { pointee } => format!("{}&", self.display_name(*pointee)),
            TypeClass::ConstantArray { element, len } => {
                format!("{}[{len}]", self.display_name(*element))
            }
            TypeClass::Typedef { name, .. } | TypeClass::Using { name, .. } => name.clone(),
            TypeClass::Elaborated { named: inner }
            | TypeClass::SubstTemplateTypeParm { replacement: inner }
            | TypeClass::TemplateSpecialization {
                desugared: Some(inner),
            } => self.display_name(*inner),
            other => other.name().to_string(),
        }
    }

    fn size_in_bits(&self, ty: TypeRef) -> u64 {
        match &self.types[ty.index()].class {
            TypeClass::Builtin(kind) => kind.lp64_bits(),
            TypeClass::Record(decl) => self.record_def(*decl).map_or(0, |def| def.size_bits),
            TypeClass::Enum(decl) => self.enum_def(*decl).map_or(0, |def| def.size_bits),
            TypeClass::Pointer { .. } | TypeClass::LValueReference { .. } => 64,
            TypeClass::ConstantArray { element, len } => {
                self.size_in_bits(*element).saturating_mul(*len)
            }
            TypeClass::Typedef {
                underlying: inner, ..
            }
            | TypeClass::Using {
                underlying: inner, ..
            }
            | TypeClass::Elaborated { named: inner }
            | TypeClass::SubstTemplateTypeParm { replacement: inner }
            | TypeClass::TemplateSpecialization {
                desugared: Some(inner),
            } => self.size_in_bits(*inner),
            _ => 0,
        }
    }

    fn align_in_bits(&self, ty: TypeRef) -> u64 {
        match &self.types[ty.index()].class {
            TypeClass::Builtin(kind) => kind.lp64_bits().max(8),
            TypeClass::Record(decl) => self.record_def(*decl).map_or(0, |def| def.align_bits),
            TypeClass::Enum(decl) => self.enum_def(*decl).map_or(0, |def| def.size_bits),
            TypeClass::Pointer { .. } | TypeClass::LValueReference { .. } => 64,
            TypeClass::ConstantArray { element: inner, .. }
            | TypeClass::Typedef {
                underlying: inner, ..
            }
            | TypeClass::Using {
                underlying: inner, ..
            }
            | TypeClass::Elaborated { named: inner }
            | TypeClass::SubstTemplateTypeParm { replacement: inner }
            | TypeClass::TemplateSpecialization {
                desugared: Some(inner),
            } => self.align_in_bits(*inner),
            _ => 0,
        }
    }

    fn record_info(&self, decl: DeclRef) -> RecordInfo {
        match self.record(decl) {
            Some((info, _)) => info.clone(),
            None => RecordInfo::new(RecordKind::Struct, self.enum_name(decl)),
        }
    }

    fn record_fields(&self, decl: DeclRef) -> Vec<Field<TypeRef>> {
        self.record_def(decl)
            .map(|def| def.fields.clone())
            .unwrap_or_default()
    }

    fn record_bases(&self, decl: DeclRef) -> Vec<Base<TypeRef>> {
        self.record_def(decl)
            .map(|def| def.bases.clone())
            .unwrap_or_default()
    }

    fn record_methods(&self, decl: DeclRef) -> Vec<Method> {
        self.record_def(decl)
            .map(|def| def.methods.clone())
            .unwrap_or_default()
    }

    fn template_arguments(&self, decl: DeclRef) -> Option<Vec<TemplateArgument<TypeRef>>> {
        self.record_def(decl).and_then(|def| def.template_args.clone())
    }

    fn enum_name(&self, decl: DeclRef) -> String {
        match &self.decls[decl.index()] {
            Decl::Enum { name, .. } => name.clone(),
            Decl::Record { info, .. } => info.name.clone(),
        }
    }

    fn enumerators(&self, decl: DeclRef) -> Vec<Enumerator> {
        self.enum_def(decl)
            .map(|def| def.enumerators.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
