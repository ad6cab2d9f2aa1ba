//! Type categories.

use serde::{Deserialize, Serialize};

use crate::BuiltinKind;

/// The category of a type, with the one-step desugaring of wrapper
/// categories already applied.
///
/// `H` is the frontend's type handle and `D` its declaration handle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TypeClass<H, D> {
    Builtin(BuiltinKind),
    /// A struct, class or union.
    Record(D),
    Enum(D),
    Pointer {
        pointee: H,
    },
    LValueReference {
        pointee: H,
    },
    ConstantArray {
        element: H,
        len: u64,
    },
    /// `typedef underlying name;`
    Typedef {
        name: String,
        underlying: H,
    },
    /// `using name = underlying;`
    Using {
        name: String,
        underlying: H,
    },
    /// A name-qualified spelling such as `ns::Foo` or `struct Foo`.
    Elaborated {
        named: H,
    },
    /// A template parameter after substitution.
    SubstTemplateTypeParm {
        replacement: H,
    },
    /// A template specialization as written. `desugared` is the record it
    /// names, or `None` if the specialization is dependent.
    TemplateSpecialization {
        desugared: Option<H>,
    },
    RValueReference,
    MemberPointer,
    FunctionProto,
    IncompleteArray,
    VariableArray,
    DependentSizedArray,
    Vector,
    Atomic,
    Decltype,
    TemplateTypeParm,
    /// Any other category, by the frontend's name for it.
    Other(String),
}

impl<H, D> TypeClass<H, D> {
    /// The frontend's name for the category.
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(_) => "Builtin",
            Self::Record(_) => "Record",
            Self::Enum(_) => "Enum",
            Self::Pointer { .. } => "Pointer",
            Self::LValueReference { .. } => "LValueReference",
            Self::ConstantArray { .. } => "ConstantArray",
            Self::Typedef { .. } => "Typedef",
            Self::Using { .. } => "Using",
            Self::Elaborated { .. } => "Elaborated",
            Self::SubstTemplateTypeParm { .. } => "SubstTemplateTypeParm",
            Self::TemplateSpecialization { .. } => "TemplateSpecialization",
            Self::RValueReference => "RValueReference",
            Self::MemberPointer => "MemberPointer",
            Self::FunctionProto => "FunctionProto",
            Self::IncompleteArray => "IncompleteArray",
            Self::VariableArray => "VariableArray",
            Self::DependentSizedArray => "DependentSizedArray",
            Self::Vector => "Vector",
            Self::Atomic => "Atomic",
            Self::Decltype => "Decltype",
            Self::TemplateTypeParm => "TemplateTypeParm",
            Self::Other(name) => name.as_str(),
        }
    }

    /// The type a sugar wrapper stands for. Sugar never becomes a graph
    /// node of its own.
    pub fn sugar_target(&self) -> Option<H>
    where
        H: Copy,
    {
        match self {
            Self::Elaborated { named: inner }
            | Self::SubstTemplateTypeParm { replacement: inner }
            | Self::TemplateSpecialization {
                desugared: Some(inner),
            } => Some(*inner),
            _ => None,
        }
    }
}
