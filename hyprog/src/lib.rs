//! Program model of Hyperion transition systems.
//!
//! A [`program::Program`] declares sorts, symbols and transition definitions;
//! [`expr::Expr`] is the typed expression language used for predicates and
//! transition bodies; [`trace::Trace`] holds concrete executions. The
//! typechecker and evaluator operate on these against an explicit program.
pub mod decls;
pub mod eval;
pub mod expr;
pub mod fmt;
pub mod program;
pub mod sort;
pub mod trace;
pub mod typecheck;
pub mod utils;

pub use utils::Error;
