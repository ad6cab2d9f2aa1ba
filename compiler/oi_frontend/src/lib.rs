//! Compiler frontend type-query interface.
//!
//! The graph builder never touches a compiler's own AST. It asks a
//! [`Frontend`] a fixed set of questions about opaque type and declaration
//! handles: what category a type is, whether it is complete, its layout,
//! and the fields, bases and template arguments of a record.
//!
//! [`TypeTable`] is an in-memory frontend. Types are declared through a
//! builder API, and the whole table is `serde`-serializable so a translation
//! unit can be described in JSON.

mod builtin;
mod class;
mod decl;
mod table;
mod template;

use std::fmt::Debug;
use std::hash::Hash;

pub use builtin::BuiltinKind;
pub use class::TypeClass;
pub use decl::{Base, Enumerator, Field, Method, RecordInfo, RecordKind};
pub use table::{DeclRef, EnumDef, NamedType, RecordDef, TableError, TypeRef, TypeTable};
pub use template::{TemplateArgument, TemplateName};

/// Read-only type queries against one translation unit.
///
/// Answers must be stable for the lifetime of the session: asking the same
/// question about the same handle twice gives the same answer.
pub trait Frontend {
    /// Identity of a type. Two handles are equal exactly when they denote
    /// the same (possibly sugared) type.
    type Handle: Copy + Eq + Hash + Debug;
    /// Identity of a record or enum declaration.
    type Decl: Copy + Debug;

    fn classify(&self, ty: Self::Handle) -> TypeClass<Self::Handle, Self::Decl>;

    /// Returns `false` for types without a definition at this point.
    /// `void` counts as complete.
    fn is_complete(&self, ty: Self::Handle) -> bool;

    /// Human-readable spelling, for labels and logs.
    fn display_name(&self, ty: Self::Handle) -> String;

    fn size_in_bits(&self, ty: Self::Handle) -> u64;

    fn align_in_bits(&self, ty: Self::Handle) -> u64;

    fn record_info(&self, decl: Self::Decl) -> RecordInfo;

    /// Data members in declaration order.
    fn record_fields(&self, decl: Self::Decl) -> Vec<Field<Self::Handle>>;

    fn record_bases(&self, decl: Self::Decl) -> Vec<Base<Self::Handle>>;

    fn record_methods(&self, decl: Self::Decl) -> Vec<Method>;

    /// Arguments of a class template specialization, `None` for records
    /// that are not specializations.
    fn template_arguments(&self, decl: Self::Decl) -> Option<Vec<TemplateArgument<Self::Handle>>>;

    fn enum_name(&self, decl: Self::Decl) -> String;

    /// Enumerators in declaration order.
    fn enumerators(&self, decl: Self::Decl) -> Vec<Enumerator>;
}
