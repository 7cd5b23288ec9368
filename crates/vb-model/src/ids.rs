use std::borrow::Borrow;
use std::fmt;

use crate::ModelError;

/// Stable identifier of a module ("counter", "quickNote", ...).
///
/// Any non-empty string is a well-formed id. Whether it is *registered* is a
/// question for the [`Registry`](crate::Registry), so ids read back from an
/// older or newer snapshot can still be represented.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Id from the exact string. Only the empty string is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ModelError::EmptyModuleId);
        }
        Ok(Self(value))
    }

    /// Id from typed user input, with surrounding whitespace removed.
    pub fn from_input(value: &str) -> Result<Self, ModelError> {
        Self::new(value.trim())
    }

    /// Id for a compile-time literal from the built-in catalog.
    pub(crate) fn known(value: &'static str) -> Self {
        debug_assert!(!value.is_empty());
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModuleId {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
