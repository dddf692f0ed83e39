//! Hytrans: two-state translation between Hyperion programs and first-order
//! logic.
//!
//! The crate turns program declarations, traces and expressions into
//! signatures, models and formulas of [`hyfol`], and lifts formulas and models
//! produced by an inference engine back into [`hyprog`] expressions and
//! states.
//!
//! In a two-state context, each mutable symbol `X` exists twice: `X` for the
//! pre-state and `X'` for the post-state. Immutable symbols exist once. The
//! suffix and the trace indices used for the two states come from a
//! [`config::TranslationConfig`].
//!
//! Every operation is a method of [`translator::Translator`], which borrows
//! the program. The free functions below use the default configuration.
//!
//! Example
//! ```
//! use hyprog::decls::{DefinitionDecl, ModifiesClause, RelationDecl, SortDecl};
//! use hyprog::expr::{Binder, Expr, SortedVar};
//! use hyprog::program::Program;
//! use hyprog::sort::Sort;
//!
//! let node = Sort::uninterpreted("node");
//! let n = || Expr::app("r", [Expr::id("n")]);
//! let program = Program::new(vec![
//!     SortDecl::new("node").into(),
//!     RelationDecl::new("r", [node.clone()], true).into(),
//!     DefinitionDecl::transition(
//!         "toggle",
//!         Binder::default(),
//!         [ModifiesClause::new("r")],
//!         Expr::forall([SortedVar::new("n", node)], Expr::iff(n(), !Expr::old(n()))),
//!     )
//!     .into(),
//! ])
//! .unwrap();
//!
//! let toggle = program.definition("toggle").unwrap();
//! let f = hytrans::transition_to_formula(&program, toggle).unwrap();
//! assert_eq!(f.to_string(), "forall n:node. r'(n) <-> !r(n)");
//! ```
use hyfol::{formula::Formula, model::Model, signature::Signature};
use hyprog::{
    decls::{DefinitionDecl, ModifiesClause},
    expr::Expr,
    program::Program,
    trace::{State, Trace},
};

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod lift;
pub mod lower;
pub mod signature;
pub mod symbol;
pub mod translator;

pub use config::TranslationConfig;
pub use error::{TransError, TransResult};
pub use lift::formula_to_predicate;
pub use translator::Translator;

pub fn program_to_signature(program: &Program, two_state: bool) -> TransResult<Signature> {
    Translator::new(program).program_to_signature(two_state)
}

pub fn state_to_model(program: &Program, state: &State) -> TransResult<Model> {
    Translator::new(program).state_to_model(state)
}

/// Encode indices 0 and 1 of `trace` as a two-state model.
pub fn two_state_trace_to_model(program: &Program, trace: &Trace) -> TransResult<Model> {
    Translator::new(program).two_state_trace_to_model(trace)
}

pub fn predicate_to_formula(
    program: &Program,
    expr: &Expr,
    two_state: bool,
) -> TransResult<Formula> {
    Translator::new(program).predicate_to_formula(expr, two_state)
}

pub fn frame_to_formula(program: &Program, mods: &[ModifiesClause]) -> TransResult<Formula> {
    Translator::new(program).frame_to_formula(mods)
}

pub fn transition_to_formula(
    program: &Program,
    definition: &DefinitionDecl,
) -> TransResult<Formula> {
    Translator::new(program).transition_to_formula(definition)
}

pub fn model_to_state(program: &Program, model: &Model) -> TransResult<State> {
    Translator::new(program).model_to_state(model)
}

pub fn two_state_model_to_trace(program: &Program, model: &Model) -> TransResult<Trace> {
    Translator::new(program).two_state_model_to_trace(model)
}
