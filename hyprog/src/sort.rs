//! Sorts of the Hyperion transition-system language.
//!
//! Besides the builtin boolean sort, every sort is uninterpreted and refers
//! by name to a [`crate::decls::SortDecl`] of the enclosing program.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sort {
    /// The builtin sort of formulas.
    Bool,

    /// A sort declared by the program, referenced by name.
    Uninterpreted(String),
}

impl Sort {
    /// Shorthand for [`Sort::Uninterpreted`].
    pub fn uninterpreted(name: impl Into<String>) -> Self {
        Sort::Uninterpreted(name.into())
    }

    /// Name of the referenced sort declaration, `None` for [`Sort::Bool`].
    pub fn name(&self) -> Option<&str> {
        match self {
            Sort::Bool => None,
            Sort::Uninterpreted(name) => Some(name),
        }
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Bool => write!(f, "bool"),
            Sort::Uninterpreted(name) => write!(f, "{}", name),
        }
    }
}
