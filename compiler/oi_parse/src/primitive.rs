//! Builtin kind to primitive mapping.

use oi_frontend::BuiltinKind;
use oi_graph::PrimitiveKind;

use crate::{DataModel, ParseError};

/// Map a frontend builtin onto a fixed-width primitive for `data_model`.
///
/// `ULongLong` maps to the signed `Int64`. This matches the widths existing
/// measurement output was produced with; do not change it without checking
/// against that output.
pub fn map_builtin(kind: BuiltinKind, data_model: DataModel) -> Result<PrimitiveKind, ParseError> {
    use BuiltinKind as B;
    use PrimitiveKind as P;

    let llp64 = data_model == DataModel::Llp64;
    let primitive = match kind {
        B::Void => P::Void,
        B::Bool => P::Bool,

        B::CharU | B::UChar | B::Char8 => P::UInt8,
        B::WCharU if llp64 => P::UInt16,
        B::WCharU => P::UInt32,

        B::CharS | B::SChar => P::Int8,
        B::WCharS if llp64 => P::Int16,
        B::WCharS => P::Int32,
        B::Char16 => P::Int16,
        B::Char32 => P::Int32,

        B::UShort => P::UInt16,
        B::UInt => P::UInt32,
        B::ULong if llp64 => P::UInt32,
        B::ULong => P::UInt64,
        B::ULongLong => P::Int64,

        B::Short => P::Int16,
        B::Int => P::Int32,
        B::Long if llp64 => P::Int32,
        B::Long | B::LongLong => P::Int64,

        B::Float => P::Float32,
        B::Double | B::LongDouble => P::Float64,

        B::UInt128 | B::Int128 | B::Half | B::Float128 | B::NullPtr => {
            return Err(ParseError::UnsupportedBuiltin { kind });
        }
    };
    Ok(primitive)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LP64: &[(BuiltinKind, PrimitiveKind)] = &[
        (BuiltinKind::Void, PrimitiveKind::Void),
        (BuiltinKind::Bool, PrimitiveKind::Bool),
        (BuiltinKind::CharU, PrimitiveKind::UInt8),
        (BuiltinKind::UChar, PrimitiveKind::UInt8),
        (BuiltinKind::WCharU, PrimitiveKind::UInt32),
        (BuiltinKind::Char8, PrimitiveKind::UInt8),
        (BuiltinKind::Char16, PrimitiveKind::Int16),
        (BuiltinKind::Char32, PrimitiveKind::Int32),
        (BuiltinKind::UShort, PrimitiveKind::UInt16),
        (BuiltinKind::UInt, PrimitiveKind::UInt32),
        (BuiltinKind::ULong, PrimitiveKind::UInt64),
        (BuiltinKind::ULongLong, PrimitiveKind::Int64),
        (BuiltinKind::CharS, PrimitiveKind::Int8),
        (BuiltinKind::SChar, PrimitiveKind::Int8),
        (BuiltinKind::WCharS, PrimitiveKind::Int32),
        (BuiltinKind::Short, PrimitiveKind::Int16),
        (BuiltinKind::Int, PrimitiveKind::Int32),
        (BuiltinKind::Long, PrimitiveKind::Int64),
        (BuiltinKind::LongLong, PrimitiveKind::Int64),
        (BuiltinKind::Float, PrimitiveKind::Float32),
        (BuiltinKind::Double, PrimitiveKind::Float64),
        (BuiltinKind::LongDouble, PrimitiveKind::Float64),
    ];

    const UNSUPPORTED: &[BuiltinKind] = &[
        BuiltinKind::UInt128,
        BuiltinKind::Int128,
        BuiltinKind::Half,
        BuiltinKind::Float128,
        BuiltinKind::NullPtr,
    ];

    #[test]
    fn lp64_table() {
        for &(kind, expected) in LP64 {
            assert_eq!(map_builtin(kind, DataModel::Lp64), Ok(expected), "{kind}");
        }
    }

    #[test]
    fn table_covers_every_kind() {
        for kind in BuiltinKind::ALL {
            let mapped = LP64.iter().any(|&(k, _)| k == kind);
            let rejected = UNSUPPORTED.contains(&kind);
            assert!(mapped != rejected, "{kind} must be mapped or rejected, not both");
        }
    }

    #[test]
    fn wide_kinds_are_rejected() {
        for &kind in UNSUPPORTED {
            for model in [DataModel::Lp64, DataModel::Llp64] {
                assert_eq!(
                    map_builtin(kind, model),
                    Err(ParseError::UnsupportedBuiltin { kind })
                );
            }
        }
    }

    #[test]
    fn llp64_narrows_long_and_wchar() {
        let narrowed = [
            (BuiltinKind::Long, PrimitiveKind::Int32),
            (BuiltinKind::ULong, PrimitiveKind::UInt32),
            (BuiltinKind::WCharU, PrimitiveKind::UInt16),
            (BuiltinKind::WCharS, PrimitiveKind::Int16),
        ];
        for &(kind, lp64) in LP64 {
            let expected = narrowed
                .iter()
                .find(|&&(k, _)| k == kind)
                .map_or(lp64, |&(_, p)| p);
            assert_eq!(map_builtin(kind, DataModel::Llp64), Ok(expected), "{kind}");
        }
    }

    #[test]
    fn error_names_the_kind() {
        let Err(err) = map_builtin(BuiltinKind::Int128, DataModel::Lp64) else {
            panic!("Int128 must be rejected");
        };
        assert_eq!(err.to_string(), "unsupported builtin type `Int128`");
    }
}
