//! Fatal conditions of a parse.
//!
//! Incomplete types are not errors; they become `Incomplete` nodes.

use oi_frontend::BuiltinKind;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A type category the graph has no node for.
    #[error("unsupported type class `{class}`")]
    UnsupportedTypeClass { class: String },

    /// A builtin kind with no fixed-width primitive.
    #[error("unsupported builtin type `{kind}`")]
    UnsupportedBuiltin { kind: BuiltinKind },

    #[error("unsupported template argument kind: {kind}")]
    UnsupportedTemplateArgKind { kind: &'static str },

    #[error("unsupported template name kind: {kind}")]
    UnsupportedTemplateNameKind { kind: &'static str },
}
