//! Type qualifier set carried by type-valued template parameters.

use bitflags::bitflags;

bitflags! {
    /// Qualifiers on a template type argument.
    ///
    /// `std::vector<const int>` and `std::vector<int>` share an element node
    /// but differ in this set.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct Qualifiers: u8 {
        /// `const`-qualified.
        const CONST = 1 << 0;
    }
}

impl Qualifiers {
    /// Qualifier set from a frontend const flag.
    #[inline]
    pub fn from_const(is_const: bool) -> Self {
        if is_const {
            Self::CONST
        } else {
            Self::empty()
        }
    }

    /// Returns `true` if `const` is set.
    #[inline]
    pub fn is_const(self) -> bool {
        self.contains(Self::CONST)
    }
}
