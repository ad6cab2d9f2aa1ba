//! Builtin type kinds reported by the frontend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A frontend builtin type kind.
///
/// Platform-variable kinds (`Long`, `WCharS`, ...) are reported as such; it
/// is up to the consumer to fix their width for a data model.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum BuiltinKind {
    Void,
    Bool,
    CharU,
    UChar,
    WCharU,
    Char8,
    Char16,
    Char32,
    UShort,
    UInt,
    ULong,
    ULongLong,
    UInt128,
    CharS,
    SChar,
    WCharS,
    Short,
    Int,
    Long,
    LongLong,
    Int128,
    Half,
    Float,
    Double,
    LongDouble,
    Float128,
    NullPtr,
}

impl BuiltinKind {
    pub const COUNT: usize = 27;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Void,
        Self::Bool,
        Self::CharU,
        Self::UChar,
        Self::WCharU,
        Self::Char8,
        Self::Char16,
        Self::Char32,
        Self::UShort,
        Self::UInt,
        Self::ULong,
        Self::ULongLong,
        Self::UInt128,
        Self::CharS,
        Self::SChar,
        Self::WCharS,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::LongLong,
        Self::Int128,
        Self::Half,
        Self::Float,
        Self::Double,
        Self::LongDouble,
        Self::Float128,
        Self::NullPtr,
    ];

    /// The frontend's name for this kind, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Bool => "Bool",
            Self::CharU => "Char_U",
            Self::UChar => "UChar",
            Self::WCharU => "WChar_U",
            Self::Char8 => "Char8",
            Self::Char16 => "Char16",
            Self::Char32 => "Char32",
            Self::UShort => "UShort",
            Self::UInt => "UInt",
            Self::ULong => "ULong",
            Self::ULongLong => "ULongLong",
            Self::UInt128 => "UInt128",
            Self::CharS => "Char_S",
            Self::SChar => "SChar",
            Self::WCharS => "WChar_S",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::LongLong => "LongLong",
            Self::Int128 => "Int128",
            Self::Half => "Half",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::LongDouble => "LongDouble",
            Self::Float128 => "Float128",
            Self::NullPtr => "NullPtr",
        }
    }

    /// C++ spelling of the type.
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::CharU | Self::CharS => "char",
            Self::UChar => "unsigned char",
            Self::WCharU | Self::WCharS => "wchar_t",
            Self::Char8 => "char8_t",
            Self::Char16 => "char16_t",
            Self::Char32 => "char32_t",
            Self::UShort => "unsigned short",
            Self::UInt => "unsigned int",
            Self::ULong => "unsigned long",
            Self::ULongLong => "unsigned long long",
            Self::UInt128 => "unsigned __int128",
            Self::SChar => "signed char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::LongLong => "long long",
            Self::Int128 => "__int128",
            Self::Half => "__fp16",
            Self::Float => "float",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::Float128 => "__float128",
            Self::NullPtr => "std::nullptr_t",
        }
    }

    /// Width in bits on an LP64 target. `Void` has no width.
    pub const fn lp64_bits(self) -> u64 {
        match self {
            Self::Void => 0,
            Self::Bool | Self::CharU | Self::UChar | Self::Char8 | Self::CharS | Self::SChar => 8,
            Self::Char16 | Self::UShort | Self::Short | Self::Half => 16,
            Self::WCharU | Self::WCharS | Self::Char32 | Self::UInt | Self::Int | Self::Float => 32,
            Self::ULong
            | Self::ULongLong
            | Self::Long
            | Self::LongLong
            | Self::Double
            | Self::NullPtr => 64,
            Self::UInt128 | Self::Int128 | Self::LongDouble | Self::Float128 => 128,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, kind) in BuiltinKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{kind} out of order");
        }
    }

    #[test]
    fn frontend_names() {
        assert_eq!(BuiltinKind::CharU.to_string(), "Char_U");
        assert_eq!(BuiltinKind::WCharS.to_string(), "WChar_S");
        assert_eq!(BuiltinKind::Int128.to_string(), "Int128");
    }

    #[test]
    fn widths() {
        assert_eq!(BuiltinKind::Void.lp64_bits(), 0);
        assert_eq!(BuiltinKind::Long.lp64_bits(), 64);
        assert_eq!(BuiltinKind::WCharU.lp64_bits(), 32);
        assert_eq!(BuiltinKind::UInt128.lp64_bits(), 128);
    }
}
