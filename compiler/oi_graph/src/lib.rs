//! Type graph for object introspection.
//!
//! A [`TypeGraph`] is an arena of [`Node`]s describing the layout of C++
//! types: classes, members, templates, arrays, enums, pointers, references
//! and typedefs. Nodes are addressed by [`NodeId`], a 32-bit index, and
//! refer to their children by id, never by ownership, so self-referential
//! types are plain cycles in the id space.
//!
//! The graph knows nothing about the frontend it was built from. Consumers
//! (code generators, printers, caches) dispatch on the [`Node`] variant
//! through the [`Visitor`] trait.
//!
//! # Cache
//!
//! With the `cache` feature enabled every graph type derives serde traits
//! and [`TypeGraphEntity`] can persist a finished graph with `bincode`.

#[cfg(feature = "cache")]
mod cache;
mod dot;
mod format;
mod graph;
mod id;
mod node;
mod primitive;
mod qualifiers;
mod stats;
mod tree;
mod visitor;

#[cfg(feature = "cache")]
pub use cache::{CacheError, RootInfo, TypeGraphEntity};
pub use dot::DotPrinter;
pub use graph::{Checkpoint, TypeGraph};
pub use id::NodeId;
pub use node::{
    Array, Class, ClassKind, Container, Dummy, DummyAllocator, Enum, Function, Incomplete,
    Member, Node, NodeKind, Parent, Pointer, Reference, TemplateParam, Typedef,
};
pub use primitive::PrimitiveKind;
pub use qualifiers::Qualifiers;
pub use stats::GraphStats;
pub use tree::TreePrinter;
pub use visitor::{
    walk_array, walk_class, walk_container, walk_dummy_allocator, walk_node, walk_pointer,
    walk_reference, walk_template_param, walk_typedef, Visitor,
};

// Size assertions to prevent accidental regressions.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, PrimitiveKind};

    const _: () = assert!(std::mem::size_of::<NodeId>() == 4);
    const _: () = assert!(std::mem::size_of::<PrimitiveKind>() == 1);
}
