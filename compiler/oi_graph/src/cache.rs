//! Persisted form of a finished type graph.
//!
//! The persistence layer stores a graph together with the names of the
//! types it was built for, and hands it back verbatim on a cache hit.

use std::io::{Read, Write};

use crate::{NodeId, TypeGraph};

/// Bumped whenever the encoded layout of [`TypeGraphEntity`] changes.
const FORMAT_VERSION: u32 = 1;

/// A named entry point into a cached graph.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootInfo {
    pub name: String,
    pub node: NodeId,
}

/// A type graph paired with the root types it was built for.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeGraphEntity {
    pub roots: Vec<RootInfo>,
    pub graph: TypeGraph,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to encode type graph: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode type graph: {0}")]
    Decode(#[source] bincode::Error),
    #[error("type graph cache version {found} does not match {expected}")]
    Version { found: u32, expected: u32 },
    #[error("type graph cache refers to missing {id}")]
    DanglingNode { id: NodeId },
}

impl TypeGraphEntity {
    pub fn new(roots: Vec<RootInfo>, graph: TypeGraph) -> Self {
        Self { roots, graph }
    }

    /// Look up a root by the name it was stored under.
    pub fn root(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .find(|root| root.name == name)
            .map(|root| root.node)
    }

    /// Encode the entity, prefixed with the format version.
    pub fn store<W: Write>(&self, mut writer: W) -> Result<(), CacheError> {
        bincode::serialize_into(&mut writer, &FORMAT_VERSION).map_err(CacheError::Encode)?;
        bincode::serialize_into(&mut writer, self).map_err(CacheError::Encode)
    }

    /// Decode an entity written by [`TypeGraphEntity::store`].
    ///
    /// Every id in the decoded entity is checked against its graph, so a
    /// loaded entity is safe to walk.
    pub fn load<R: Read>(mut reader: R) -> Result<Self, CacheError> {
        let found: u32 = bincode::deserialize_from(&mut reader).map_err(CacheError::Decode)?;
        if found != FORMAT_VERSION {
            return Err(CacheError::Version {
                found,
                expected: FORMAT_VERSION,
            });
        }
        let entity: Self = bincode::deserialize_from(reader).map_err(CacheError::Decode)?;
        let len = entity.graph.len();
        let dangling_root = entity
            .roots
            .iter()
            .map(|root| root.node)
            .find(|id| id.index() >= len);
        match dangling_root.or_else(|| entity.graph.first_dangling()) {
            Some(id) => Err(CacheError::DanglingNode { id }),
            None => Ok(entity),
        }
    }
}
