use strum::EnumIs;
use thiserror::Error;

use crate::sort::Sort;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// Two declarations of the same category share a name.
    #[error(
        "The name `{name}` is declared more than once. Sorts, symbols (constants, relations and functions) and definitions must have unique names within their category."
    )]
    DuplicateDeclaration { name: String },

    /// A sort is referenced but never declared.
    #[error("The sort `{sort}` referenced by {context} is not declared by the program.")]
    UnknownSort { sort: String, context: String },

    /// A modifies-clause names something that is not a constant, relation or function.
    #[error(
        "The modifies-clause of definition `{definition}` names `{name}`, which is not a declared constant, relation or function."
    )]
    UnknownModifiedSymbol { definition: String, name: String },

    /// An identifier resolves to neither a bound variable nor a declaration.
    #[error("The identifier `{name}` is neither bound nor declared.")]
    UnknownSymbol { name: String },

    /// Application of something that is not a relation or a function.
    #[error("`{name}` is applied to arguments but it is not a relation or a function.")]
    NotCallable { name: String },

    /// Wrong number of arguments given to a relation or function.
    #[error("`{name}` expects {expected} argument(s) but {found} were given.")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// An expression does not have the sort its context requires.
    #[error("Expected an expression of sort `{expected}` but `{expr}` has sort `{found}`.")]
    TypeMismatch {
        expected: Sort,
        found: Sort,
        expr: String,
    },

    /// `old(..)` is only meaningful when a pre-state exists.
    #[error("`old({expr})` appears outside of a two-state context.")]
    OldOutsideTwoState { expr: String },

    /// A time index that the trace does not have.
    #[error("State index {index} is out of range for a trace of {len} state(s).")]
    StateIndexOutOfRange { index: usize, len: usize },

    /// An interpretation references an element outside the universe of its sort.
    #[error("Element `{element}` does not belong to the universe of sort `{sort}`.")]
    ElementNotInUniverse { element: String, sort: String },

    /// A symbol has no value where one is required.
    #[error("`{name}` has no interpretation for arguments ({args}).")]
    MissingInterpretation { name: String, args: String },
}
