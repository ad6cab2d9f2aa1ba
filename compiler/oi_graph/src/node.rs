//! Node taxonomy.
//!
//! The variant set is closed. Composite variants refer to their children by
//! [`NodeId`]; the graph owns every node.

use std::collections::BTreeMap;
use std::fmt;

use crate::{NodeId, PrimitiveKind, Qualifiers};

/// One node of a type graph.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Primitive(PrimitiveKind),
    Class(Class),
    Container(Container),
    Enum(Enum),
    Array(Array),
    Typedef(Typedef),
    Pointer(Pointer),
    Reference(Reference),
    Incomplete(Incomplete),
    Dummy(Dummy),
    DummyAllocator(DummyAllocator),
}

impl Node {
    /// The variant tag of this node.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Primitive(_) => NodeKind::Primitive,
            Node::Class(_) => NodeKind::Class,
            Node::Container(_) => NodeKind::Container,
            Node::Enum(_) => NodeKind::Enum,
            Node::Array(_) => NodeKind::Array,
            Node::Typedef(_) => NodeKind::Typedef,
            Node::Pointer(_) => NodeKind::Pointer,
            Node::Reference(_) => NodeKind::Reference,
            Node::Incomplete(_) => NodeKind::Incomplete,
            Node::Dummy(_) => NodeKind::Dummy,
            Node::DummyAllocator(_) => NodeKind::DummyAllocator,
        }
    }

    /// Size in bytes, where the variant records one.
    ///
    /// Pointers and references report the address size.
    pub fn size(&self) -> Option<u64> {
        match self {
            Node::Primitive(kind) => Some(kind.size()),
            Node::Class(c) => Some(c.size),
            Node::Container(c) => Some(c.size),
            Node::Enum(e) => Some(e.size),
            Node::Dummy(d) => Some(d.size),
            Node::DummyAllocator(d) => Some(d.size),
            Node::Pointer(_) | Node::Reference(_) => Some(PrimitiveKind::StubbedPointer.size()),
            Node::Array(_) | Node::Typedef(_) | Node::Incomplete(_) => None,
        }
    }

    /// Call `f` with every node id this node refers to.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        match self {
            Node::Class(class) => {
                class
                    .template_params
                    .iter()
                    .filter_map(TemplateParam::ty)
                    .for_each(&mut f);
                class.parents.iter().for_each(|parent| f(parent.ty));
                class.members.iter().for_each(|member| f(member.ty));
            }
            Node::Container(container) => container
                .template_params
                .iter()
                .filter_map(TemplateParam::ty)
                .for_each(f),
            Node::Array(array) => f(array.element),
            Node::Typedef(td) => f(td.underlying),
            Node::Pointer(p) => f(p.pointee),
            Node::Reference(r) => f(r.pointee),
            Node::DummyAllocator(d) => f(d.alloc_type),
            Node::Primitive(_) | Node::Enum(_) | Node::Incomplete(_) | Node::Dummy(_) => {}
        }
    }
}

/// Data-free tag for [`Node`] variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum NodeKind {
    Primitive = 0,
    Class = 1,
    Container = 2,
    Enum = 3,
    Array = 4,
    Typedef = 5,
    Pointer = 6,
    Reference = 7,
    Incomplete = 8,
    Dummy = 9,
    DummyAllocator = 10,
}

impl NodeKind {
    /// Number of node kinds.
    pub const COUNT: usize = 11;

    /// All kinds in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Primitive,
        Self::Class,
        Self::Container,
        Self::Enum,
        Self::Array,
        Self::Typedef,
        Self::Pointer,
        Self::Reference,
        Self::Incomplete,
        Self::Dummy,
        Self::DummyAllocator,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Primitive => "Primitive",
            Self::Class => "Class",
            Self::Container => "Container",
            Self::Enum => "Enum",
            Self::Array => "Array",
            Self::Typedef => "Typedef",
            Self::Pointer => "Pointer",
            Self::Reference => "Reference",
            Self::Incomplete => "Incomplete",
            Self::Dummy => "Dummy",
            Self::DummyAllocator => "DummyAllocator",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record tag keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Struct,
    Class,
    Union,
}

impl ClassKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "Struct",
            Self::Class => "Class",
            Self::Union => "Union",
        }
    }
}

/// A struct, class or union.
///
/// Created with empty member lists and filled in while its children are
/// enumerated, so a member can refer back to the class itself.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    pub kind: ClassKind,
    /// Unqualified declaration name.
    pub name: String,
    /// Fully qualified name, including template arguments.
    pub qualified_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Alignment in bytes, 0 when unknown.
    pub align: u64,
    /// Has a vtable pointer.
    pub is_dynamic: bool,
    pub template_params: Vec<TemplateParam>,
    pub parents: Vec<Parent>,
    /// Data members in ascending bit offset order.
    pub members: Vec<Member>,
    pub functions: Vec<Function>,
}

impl Class {
    /// Create a class with no children.
    pub fn new(
        kind: ClassKind,
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            qualified_name: qualified_name.into(),
            size,
            align: 0,
            is_dynamic: false,
            template_params: Vec::new(),
            parents: Vec::new(),
            members: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_align(mut self, align: u64) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_dynamic(mut self, is_dynamic: bool) -> Self {
        self.is_dynamic = is_dynamic;
        self
    }

    /// Returns `true` for unions, whose members may share offset 0.
    #[inline]
    pub fn is_union(&self) -> bool {
        self.kind == ClassKind::Union
    }
}

/// A data member of a class.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub name: String,
    pub ty: NodeId,
    /// Offset from the start of the enclosing class, in bits.
    pub bit_offset: u64,
    /// Width in bits for bitfields, 0 otherwise.
    pub bit_size: u64,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: NodeId, bit_offset: u64) -> Self {
        Self {
            name: name.into(),
            ty,
            bit_offset,
            bit_size: 0,
        }
    }

    #[must_use]
    pub fn with_bit_size(mut self, bit_size: u64) -> Self {
        self.bit_size = bit_size;
        self
    }

    #[inline]
    pub fn is_bitfield(&self) -> bool {
        self.bit_size != 0
    }
}

/// A base class subobject.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Parent {
    pub ty: NodeId,
    pub bit_offset: u64,
}

/// A member function. Only its name and virtuality are recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: String,
    pub is_virtual: bool,
}

/// A template argument of a class or container.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateParam {
    /// A type argument, e.g. the `const int` of `std::vector<const int>`.
    Type { ty: NodeId, qualifiers: Qualifiers },
    /// A value argument with its declared type, e.g. the `3` of `std::array<T, 3>`.
    Value { ty: NodeId, value: String },
    /// A template template argument, named by its qualified name.
    Template { name: String },
}

impl TemplateParam {
    /// The referenced type node, if any.
    pub fn ty(&self) -> Option<NodeId> {
        match self {
            Self::Type { ty, .. } | Self::Value { ty, .. } => Some(*ty),
            Self::Template { .. } => None,
        }
    }

    /// The textual value of a value argument.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value { value, .. } => Some(value),
            Self::Type { .. } | Self::Template { .. } => None,
        }
    }

    pub fn qualifiers(&self) -> Qualifiers {
        match self {
            Self::Type { qualifiers, .. } => *qualifiers,
            Self::Value { .. } | Self::Template { .. } => Qualifiers::empty(),
        }
    }
}

/// An enumeration.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub name: String,
    /// Size of the underlying integer type in bytes.
    pub size: u64,
    /// Value to enumerator name. Empty when values were not captured.
    pub enumerators: BTreeMap<i64, String>,
}

/// A fixed-length array.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Array {
    pub element: NodeId,
    pub len: u64,
}

/// A named alias. Always resolves to exactly one underlying node.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Typedef {
    pub name: String,
    pub underlying: NodeId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Pointer {
    pub pointee: NodeId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    pub pointee: NodeId,
}

/// Stand-in for a type the frontend could not complete.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Incomplete {
    pub label: String,
}

/// A registered generic container such as `std::vector`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    pub name: String,
    pub size: u64,
    pub align: u64,
    pub template_params: Vec<TemplateParam>,
}

/// Opaque storage of a known size and alignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Dummy {
    pub size: u64,
    pub align: u64,
}

/// Opaque allocator allocating `alloc_type`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DummyAllocator {
    pub alloc_type: NodeId,
    pub size: u64,
    pub align: u64,
}
