use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, Error, EnumIs)]
pub enum TransError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The program side rejected its input.
    #[error(transparent)]
    Program(#[from] hyprog::Error),

    /// The logic side rejected its input.
    #[error(transparent)]
    Logic(#[from] hyfol::Error),

    #[error("The sort `{0}` has no counterpart in first-order logic")]
    UnsupportedSort(String),

    #[error("The sort `{0}` is not declared by the program")]
    UnknownSort(String),

    #[error("`{0}` is not a constant, relation or function of the program")]
    UnknownSymbol(String),

    #[error("`{0}` is used as a formula but is not a relation")]
    NotARelation(String),

    #[error("`{0}` is used as a term but is not a constant or a function")]
    NotAFunction(String),

    #[error("`{0}` refers to a definition; definitions cannot be translated")]
    DefinitionNotSupported(String),

    #[error("`{0}` cannot be translated to a first-order term")]
    UnsupportedTerm(String),

    #[error("`{0}` cannot be translated to a first-order formula")]
    UnsupportedFormula(String),

    #[error("The name `{name}` already contains the prime suffix `{suffix}`")]
    PrimedName { name: String, suffix: String },

    #[error("The formula translates back to `{expr}`, which does not typecheck: {source}")]
    IllTypedLift {
        expr: String,
        source: hyprog::Error,
    },

    #[error("The constant `{0}` has no interpretation in the model")]
    UninterpretedConstant(String),

    #[error("The definition `{0}` does not exist or is not a transition")]
    UnknownTransition(String),
}

pub type TransResult<T> = Result<T, TransError>;
