//! Finite traces of a transition system.
//!
//! A [`Trace`] is a sequence of states sharing one universe per sort and one
//! interpretation of every immutable symbol. Mutable symbols are interpreted
//! separately at every time index. Interpretations are keyed by symbol name.
//!
//! Domain elements are opaque identifiers. Their identity is preserved by
//! every translation, so elements of two traces over the same program can be
//! compared directly.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    decls::{ConstantDecl, FunctionDecl, RelationDecl, SymbolDecl},
    program::Program,
    sort::Sort,
    utils::Error,
};

/// Opaque identifier of a domain element.
pub type Element = String;

/// Truth value of a relation for each recorded argument tuple.
pub type RelationInterp = BTreeMap<Vec<Element>, bool>;

/// Result of a function for each recorded argument tuple.
pub type FunctionInterp = BTreeMap<Vec<Element>, Element>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace {
    pub num_states: usize,

    /// Universe of every sort, keyed by sort name.
    pub univs: BTreeMap<String, Vec<Element>>,

    pub immut_const_interps: BTreeMap<String, Element>,
    pub immut_rel_interps: BTreeMap<String, RelationInterp>,
    pub immut_func_interps: BTreeMap<String, FunctionInterp>,

    /// Interpretations of mutable symbols, one map per time index.
    pub const_interps: Vec<BTreeMap<String, Element>>,
    pub rel_interps: Vec<BTreeMap<String, RelationInterp>>,
    pub func_interps: Vec<BTreeMap<String, FunctionInterp>>,
}

impl Trace {
    /// Create an empty trace with `num_states` time indices.
    pub fn new(num_states: usize) -> Self {
        Self {
            num_states,
            univs: BTreeMap::new(),
            immut_const_interps: BTreeMap::new(),
            immut_rel_interps: BTreeMap::new(),
            immut_func_interps: BTreeMap::new(),
            const_interps: vec![BTreeMap::new(); num_states],
            rel_interps: vec![BTreeMap::new(); num_states],
            func_interps: vec![BTreeMap::new(); num_states],
        }
    }

    pub fn check_index(&self, index: usize) -> Result<(), Error> {
        if index < self.num_states {
            Ok(())
        } else {
            Err(Error::StateIndexOutOfRange {
                index,
                len: self.num_states,
            })
        }
    }

    /// Distinguish the state at `index`.
    pub fn as_state(self, index: usize) -> Result<State, Error> {
        State::new(self, index)
    }

    pub fn universe(&self, sort: &str) -> &[Element] {
        self.univs.get(sort).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_universe(
        &mut self,
        sort: impl Into<String>,
        elements: impl IntoIterator<Item = impl Into<Element>>,
    ) {
        self.univs
            .insert(sort.into(), elements.into_iter().map(Into::into).collect());
    }

    /// Assign `decl` at `index`. Immutable constants are assigned once for
    /// the whole trace and `index` is only range-checked.
    pub fn set_constant(
        &mut self,
        decl: &ConstantDecl,
        index: usize,
        value: impl Into<Element>,
    ) -> Result<(), Error> {
        self.check_index(index)?;
        let map = if decl.mutable {
            &mut self.const_interps[index]
        } else {
            &mut self.immut_const_interps
        };
        map.insert(decl.name.clone(), value.into());
        Ok(())
    }

    /// Record the truth value of `decl` on `args` at `index`.
    pub fn set_relation(
        &mut self,
        decl: &RelationDecl,
        index: usize,
        args: impl IntoIterator<Item = impl Into<Element>>,
        value: bool,
    ) -> Result<(), Error> {
        self.check_index(index)?;
        let map = if decl.mutable {
            &mut self.rel_interps[index]
        } else {
            &mut self.immut_rel_interps
        };
        map.entry(decl.name.clone())
            .or_default()
            .insert(args.into_iter().map(Into::into).collect(), value);
        Ok(())
    }

    /// Record the value of `decl` on `args` at `index`.
    pub fn set_function(
        &mut self,
        decl: &FunctionDecl,
        index: usize,
        args: impl IntoIterator<Item = impl Into<Element>>,
        value: impl Into<Element>,
    ) -> Result<(), Error> {
        self.check_index(index)?;
        let map = if decl.mutable {
            &mut self.func_interps[index]
        } else {
            &mut self.immut_func_interps
        };
        map.entry(decl.name.clone())
            .or_default()
            .insert(args.into_iter().map(Into::into).collect(), value.into());
        Ok(())
    }

    pub fn constant(&self, decl: &ConstantDecl, index: usize) -> Option<&Element> {
        if decl.mutable {
            self.const_interps.get(index)?.get(&decl.name)
        } else {
            self.immut_const_interps.get(&decl.name)
        }
    }

    pub fn relation(&self, decl: &RelationDecl, index: usize) -> Option<&RelationInterp> {
        if decl.mutable {
            self.rel_interps.get(index)?.get(&decl.name)
        } else {
            self.immut_rel_interps.get(&decl.name)
        }
    }

    pub fn function(&self, decl: &FunctionDecl, index: usize) -> Option<&FunctionInterp> {
        if decl.mutable {
            self.func_interps.get(index)?.get(&decl.name)
        } else {
            self.immut_func_interps.get(&decl.name)
        }
    }

    /// Check that every recorded element belongs to the universe of its sort
    /// and that tuples match the arity of their symbol.
    pub fn validate(&self, program: &Program) -> Result<(), Error> {
        for sort in self.univs.keys() {
            if !program.has_sort(sort) {
                return Err(Error::UnknownSort {
                    sort: sort.clone(),
                    context: "the universes of a trace".to_string(),
                });
            }
        }

        let in_universe = |element: &Element, sort: &Sort| -> Result<(), Error> {
            let Some(name) = sort.name() else {
                return Ok(());
            };
            if self.universe(name).contains(element) {
                Ok(())
            } else {
                Err(Error::ElementNotInUniverse {
                    element: element.clone(),
                    sort: name.to_string(),
                })
            }
        };

        let check_tuple = |symbol: SymbolDecl<'_>, args: &[Element]| -> Result<(), Error> {
            if args.len() != symbol.arity().len() {
                return Err(Error::ArityMismatch {
                    name: symbol.name().to_string(),
                    expected: symbol.arity().len(),
                    found: args.len(),
                });
            }
            for (arg, sort) in args.iter().zip(symbol.arity()) {
                in_universe(arg, sort)?;
            }
            Ok(())
        };

        for index in 0..self.num_states {
            for symbol in program.relations_constants_and_functions() {
                match symbol {
                    SymbolDecl::Constant(c) => {
                        if let Some(value) = self.constant(c, index) {
                            in_universe(value, &c.sort)?;
                        }
                    }
                    SymbolDecl::Relation(r) => {
                        for args in self.relation(r, index).into_iter().flat_map(|i| i.keys()) {
                            check_tuple(symbol, args)?;
                        }
                    }
                    SymbolDecl::Function(f) => {
                        for (args, value) in self.function(f, index).into_iter().flatten() {
                            check_tuple(symbol, args)?;
                            in_universe(value, &f.sort)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// A trace together with a distinguished time index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    trace: Trace,
    index: usize,
}

impl State {
    pub fn new(trace: Trace, index: usize) -> Result<Self, Error> {
        trace.check_index(index)?;
        Ok(Self { trace, index })
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::SortDecl;

    fn node() -> Sort {
        Sort::uninterpreted("node")
    }

    fn program() -> Program {
        Program::new(vec![
            SortDecl::new("node").into(),
            ConstantDecl::new("zero", node(), false).into(),
            RelationDecl::new("r", [node()], true).into(),
            FunctionDecl::new("succ", [node()], node(), true).into(),
        ])
        .unwrap()
    }

    #[test]
    fn interpretations_are_routed_by_mutability() {
        let program = program();
        let zero = program.constant("zero").unwrap();
        let r = program.relation("r").unwrap();

        let mut trace = Trace::new(2);
        trace.set_universe("node", ["a", "b"]);
        trace.set_constant(zero, 1, "a").unwrap();
        trace.set_relation(r, 1, ["b"], true).unwrap();

        assert_eq!(trace.immut_const_interps.get("zero"), Some(&"a".to_string()));
        assert_eq!(trace.constant(zero, 0), Some(&"a".to_string()));
        assert!(trace.relation(r, 0).is_none());
        assert_eq!(
            trace.relation(r, 1).and_then(|i| i.get(&vec!["b".to_string()])),
            Some(&true)
        );
        trace.validate(&program).unwrap();
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let program = program();
        let r = program.relation("r").unwrap();
        let mut trace = Trace::new(1);
        let err = trace.set_relation(r, 1, ["a"], true).unwrap_err();
        assert_eq!(err, Error::StateIndexOutOfRange { index: 1, len: 1 });
        assert!(trace.as_state(3).is_err());
    }

    #[test]
    fn validation_catches_foreign_elements() {
        let program = program();
        let succ = program.function("succ").unwrap();
        let mut trace = Trace::new(1);
        trace.set_universe("node", ["a"]);
        trace.set_function(succ, 0, ["a"], "z").unwrap();
        assert_eq!(
            trace.validate(&program).unwrap_err(),
            Error::ElementNotInUniverse {
                element: "z".to_string(),
                sort: "node".to_string(),
            }
        );
    }
}
