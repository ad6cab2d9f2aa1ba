//! Template arguments of a record specialization.

use serde::{Deserialize, Serialize};

/// One argument of a class template specialization.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TemplateArgument<H> {
    /// A type argument. `ty` is the unqualified type.
    Type { ty: H, is_const: bool },
    /// An integral constant with its declared type, rendered in decimal.
    Integral { ty: H, value: String },
    /// A template template argument.
    Template(TemplateName),
    Declaration,
    NullPtr,
    TemplateExpansion,
    Expression,
    Pack,
}

impl<H> TemplateArgument<H> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Type { .. } => "Type",
            Self::Integral { .. } => "Integral",
            Self::Template(_) => "Template",
            Self::Declaration => "Declaration",
            Self::NullPtr => "NullPtr",
            Self::TemplateExpansion => "TemplateExpansion",
            Self::Expression => "Expression",
            Self::Pack => "Pack",
        }
    }
}

/// How a template template argument names its template.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TemplateName {
    /// A plain reference to a template declaration.
    Template { qualified_name: String },
    OverloadedTemplate,
    AssumedTemplate,
    QualifiedTemplate,
    DependentTemplate,
    SubstTemplateTemplateParm,
    SubstTemplateTemplateParmPack,
    UsingTemplate,
}

impl TemplateName {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Template { .. } => "Template",
            Self::OverloadedTemplate => "OverloadedTemplate",
            Self::AssumedTemplate => "AssumedTemplate",
            Self::QualifiedTemplate => "QualifiedTemplate",
            Self::DependentTemplate => "DependentTemplate",
            Self::SubstTemplateTemplateParm => "SubstTemplateTemplateParm",
            Self::SubstTemplateTemplateParmPack => "SubstTemplateTemplateParmPack",
            Self::UsingTemplate => "UsingTemplate",
        }
    }
}
