//! Canonical fixed-width primitive kinds.

use std::fmt;

/// Fixed-width tag for a builtin type.
///
/// Every frontend builtin maps onto exactly one of these. `StubbedPointer`
/// stands in for a pointer or reference whose target was not followed: the
/// address is still measured, the pointee is not described.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PrimitiveKind {
    Int8 = 0,
    Int16 = 1,
    Int32 = 2,
    Int64 = 3,
    UInt8 = 4,
    UInt16 = 5,
    UInt32 = 6,
    UInt64 = 7,
    Float32 = 8,
    Float64 = 9,
    Bool = 10,
    StubbedPointer = 11,
    Void = 12,
}

impl PrimitiveKind {
    /// Number of primitive kinds.
    pub const COUNT: usize = 13;

    /// All kinds in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::Bool,
        Self::StubbedPointer,
        Self::Void,
    ];

    /// The C spelling used in generated code and printers.
    pub const fn c_name(self) -> &'static str {
        match self {
            Self::Int8 => "int8_t",
            Self::Int16 => "int16_t",
            Self::Int32 => "int32_t",
            Self::Int64 => "int64_t",
            Self::UInt8 => "uint8_t",
            Self::UInt16 => "uint16_t",
            Self::UInt32 => "uint32_t",
            Self::UInt64 => "uint64_t",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Bool => "bool",
            Self::StubbedPointer => "uintptr_t",
            Self::Void => "void",
        }
    }

    /// Size in bytes. `Void` has no storage.
    pub const fn size(self) -> u64 {
        match self {
            Self::Int8 | Self::UInt8 | Self::Bool => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::StubbedPointer => 8,
            Self::Void => 0,
        }
    }

    /// Index into per-kind tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}
