//! Hyfol: many-sorted first-order logic exchanged with the inference engine.
//!
//! A [`signature::Signature`] declares sorts and symbols, a [`model::Model`]
//! interprets them over finite universes, and [`formula::Formula`] /
//! [`formula::Term`] form the formula language evaluated in models.
//!
//! Example
//! ```
//! use hyfol::formula::{Formula, Term};
//! use hyfol::model::Model;
//! use hyfol::signature::Signature;
//!
//! let mut sig = Signature::new();
//! sig.add_sort("Node").unwrap();
//! sig.add_relation("R", ["Node"]).unwrap();
//! sig.finalize_sorts();
//!
//! let mut m = Model::new(sig).unwrap();
//! m.add_elem("a", "Node").unwrap();
//! m.add_relation("R", ["a"], true).unwrap();
//!
//! let f = Formula::forall("n", "Node", Formula::relation("R", [Term::var("n")]));
//! assert_eq!(f.to_string(), "forall n:Node. R(n)");
//! assert!(m.eval(&f).unwrap());
//! ```

/// Evaluation of formulas in models.
pub mod eval;
/// Terms and formulas.
pub mod formula;
/// Finite models over finalized signatures.
pub mod model;
/// Colored, width-aware printing of formulas.
pub mod pretty;
/// Sorts and symbols.
pub mod signature;
pub mod utils;

pub use utils::Error;
