//! Parser configuration.

use std::fmt;

/// Integer widths of the target platform.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DataModel {
    /// 64-bit `long` and 32-bit `wchar_t` (Linux, macOS).
    #[default]
    Lp64,
    /// 32-bit `long` and 16-bit `wchar_t` (Windows).
    Llp64,
}

impl DataModel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lp64 => "lp64",
            Self::Llp64 => "llp64",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lp64" => Some(Self::Lp64),
            "llp64" => Some(Self::Llp64),
            _ => None,
        }
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for one parse session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ParserOptions {
    /// Follow pointers and references below the outermost level.
    pub chase_raw_pointers: bool,
    /// Record enumerator names and values on enum nodes.
    pub read_enum_values: bool,
    pub data_model: DataModel,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chase_raw_pointers(mut self, chase: bool) -> Self {
        self.chase_raw_pointers = chase;
        self
    }

    #[must_use]
    pub fn with_read_enum_values(mut self, read: bool) -> Self {
        self.read_enum_values = read;
        self
    }

    #[must_use]
    pub fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ParserOptions::default();
        assert!(!options.chase_raw_pointers);
        assert!(!options.read_enum_values);
        assert_eq!(options.data_model, DataModel::Lp64);
    }

    #[test]
    fn data_model_names() {
        for model in [DataModel::Lp64, DataModel::Llp64] {
            assert_eq!(DataModel::from_name(model.name()), Some(model));
        }
        assert_eq!(DataModel::from_name("ilp32"), None);
    }
}
