//! Declaration-level query results.

use serde::{Deserialize, Serialize};

/// Record tag keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum RecordKind {
    Struct,
    Class,
    Union,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordInfo {
    pub kind: RecordKind,
    pub name: String,
    /// Fully qualified name including template arguments.
    pub qualified_name: String,
    /// Has a vtable pointer.
    pub is_dynamic: bool,
}

impl RecordInfo {
    pub fn new(kind: RecordKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            qualified_name: name.clone(),
            name,
            is_dynamic: false,
        }
    }

    #[must_use]
    pub fn qualified(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    #[must_use]
    pub fn dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }
}

/// A data member in declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Field<H> {
    pub name: String,
    pub ty: H,
    pub bit_offset: u64,
    /// Declared width for bitfields.
    pub bit_width: Option<u64>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Base<H> {
    pub ty: H,
    pub bit_offset: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub is_virtual: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i64,
}
