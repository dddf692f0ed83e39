//! Terms and formulas of many-sorted first-order logic.
//!
//! Terms are variables or function applications. A [`Term::Var`] names either
//! a quantified variable or a constant of the signature; the innermost
//! binding wins. Quantifiers bind a single variable; `true` and `false` are
//! the empty conjunction and the empty disjunction.
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIs};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    Var(String),
    Func { name: String, args: Vec<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Term::Func {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(FormulaKind))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Formula {
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Equal(Term, Term),
    Relation {
        name: String,
        args: Vec<Term>,
    },
    Forall {
        var: String,
        sort: String,
        body: Box<Formula>,
    },
    Exists {
        var: String,
        sort: String,
        body: Box<Formula>,
    },
}

impl Formula {
    /// The empty conjunction.
    pub fn top() -> Self {
        Formula::And(Vec::new())
    }

    /// The empty disjunction.
    pub fn bottom() -> Self {
        Formula::Or(Vec::new())
    }

    pub fn and(args: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(args.into_iter().collect())
    }

    pub fn or(args: impl IntoIterator<Item = Formula>) -> Self {
        Formula::Or(args.into_iter().collect())
    }

    pub fn not(f: Formula) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn implies(lhs: Formula, rhs: Formula) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Formula, rhs: Formula) -> Self {
        Formula::Iff(Box::new(lhs), Box::new(rhs))
    }

    pub fn equal(lhs: Term, rhs: Term) -> Self {
        Formula::Equal(lhs, rhs)
    }

    pub fn relation(name: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Formula::Relation {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn forall(var: impl Into<String>, sort: impl Into<String>, body: Formula) -> Self {
        Formula::Forall {
            var: var.into(),
            sort: sort.into(),
            body: Box::new(body),
        }
    }

    pub fn exists(var: impl Into<String>, sort: impl Into<String>, body: Formula) -> Self {
        Formula::Exists {
            var: var.into(),
            sort: sort.into(),
            body: Box::new(body),
        }
    }

    /// Wrap `body` in one quantifier per `(var, sort)` pair. The first pair
    /// becomes the outermost quantifier.
    pub fn forall_many<V, S>(vars: impl IntoIterator<Item = (V, S)>, body: Formula) -> Self
    where
        V: Into<String>,
        S: Into<String>,
    {
        let vars: Vec<_> = vars.into_iter().collect();
        vars.into_iter()
            .rev()
            .fold(body, |body, (v, s)| Formula::forall(v, s, body))
    }

    /// Existential counterpart of [`Formula::forall_many`].
    pub fn exists_many<V, S>(vars: impl IntoIterator<Item = (V, S)>, body: Formula) -> Self
    where
        V: Into<String>,
        S: Into<String>,
    {
        let vars: Vec<_> = vars.into_iter().collect();
        vars.into_iter()
            .rev()
            .fold(body, |body, (v, s)| Formula::exists(v, s, body))
    }

    /// Names of the relations, functions and free-or-constant variables
    /// occurring in this formula. Quantified variables are excluded.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut bound = Vec::new();
        collect_formula(self, &mut bound, &mut out);
        out
    }
}

fn collect_term(t: &Term, bound: &[String], out: &mut BTreeSet<String>) {
    match t {
        Term::Var(v) => {
            if !bound.contains(v) {
                out.insert(v.clone());
            }
        }
        Term::Func { name, args } => {
            out.insert(name.clone());
            for a in args {
                collect_term(a, bound, out);
            }
        }
    }
}

fn collect_formula(f: &Formula, bound: &mut Vec<String>, out: &mut BTreeSet<String>) {
    match f {
        Formula::And(args) | Formula::Or(args) => {
            for a in args {
                collect_formula(a, bound, out);
            }
        }
        Formula::Not(inner) => collect_formula(inner, bound, out),
        Formula::Implies(a, b) | Formula::Iff(a, b) => {
            collect_formula(a, bound, out);
            collect_formula(b, bound, out);
        }
        Formula::Equal(a, b) => {
            collect_term(a, bound, out);
            collect_term(b, bound, out);
        }
        Formula::Relation { name, args } => {
            out.insert(name.clone());
            for a in args {
                collect_term(a, bound, out);
            }
        }
        Formula::Forall { var, body, .. } | Formula::Exists { var, body, .. } => {
            bound.push(var.clone());
            collect_formula(body, bound, out);
            bound.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_quantifiers_keep_binder_order() {
        let body = Formula::relation("le", [Term::var("x"), Term::var("y")]);
        let f = Formula::forall_many([("x", "Node"), ("y", "Node")], body.clone());
        assert_eq!(
            f,
            Formula::forall("x", "Node", Formula::forall("y", "Node", body))
        );
    }

    #[test]
    fn symbols_exclude_bound_variables() {
        let f = Formula::exists(
            "n",
            "Node",
            Formula::and([
                Formula::relation("R'", [Term::var("n")]),
                Formula::equal(Term::func("succ", [Term::var("n")]), Term::var("zero")),
            ]),
        );
        let symbols: Vec<_> = f.symbols().into_iter().collect();
        assert_eq!(symbols, vec!["R'", "succ", "zero"]);
        assert!(Formula::top().symbols().is_empty());
    }
}
