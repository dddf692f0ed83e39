use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// A constant, relation or function is registered twice.
    #[error("The symbol `{name}` is already part of the signature.")]
    DuplicateSymbol { name: String },

    /// A sort is registered after the sort set was finalized.
    #[error("Cannot register sort `{sort}`: the sort set of the signature is finalized.")]
    SortsFinalized { sort: String },

    /// A sort is referenced but was never registered.
    #[error("The sort `{sort}` is not registered in the signature.")]
    UnknownSort { sort: String },

    /// Models can only be built on a signature whose sort set is finalized.
    #[error("A model requires a signature whose sort set is finalized.")]
    SignatureNotFinalized,

    /// Two elements of a model share a name.
    #[error("The element `{name}` is already part of the universe of sort `{sort}`.")]
    DuplicateElement { name: String, sort: String },

    /// An element name that the model does not know.
    #[error("The element `{name}` does not belong to the universe of sort `{sort}`.")]
    UnknownElement { name: String, sort: String },

    /// A symbol that is not part of the signature, or not of the expected kind.
    #[error("The {kind} `{name}` is not part of the signature.")]
    UnknownSymbol { kind: &'static str, name: String },

    /// An element used where the signature expects an element of another sort.
    #[error("`{name}` expects a value of sort `{expected}` but got one of sort `{found}`.")]
    SortMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// Wrong number of arguments given to a relation or function.
    #[error("`{name}` expects {expected} argument(s) but {found} were given.")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A constant is interpreted twice.
    #[error("The constant `{name}` is already interpreted.")]
    ConstantAlreadyAssigned { name: String },

    /// A constant without an interpretation is evaluated.
    #[error("The constant `{name}` has no interpretation in the model.")]
    UninterpretedConstant { name: String },

    /// A free variable is evaluated.
    #[error("The variable `{name}` is not bound.")]
    UnboundVariable { name: String },

    /// A function is evaluated on a tuple it has no value for.
    #[error("The function `{name}` has no value for arguments ({args}).")]
    UndefinedFunctionValue { name: String, args: String },
}
