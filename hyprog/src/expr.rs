//! Typed expressions of the transition-system language.
//!
//! [`Expr`] is a closed sum type: identifiers, applications, unary, binary and
//! n-ary operators, quantifiers, conditionals and boolean literals. The same
//! grammar is used for state predicates (invariants, derived relations) and for
//! two-state transition bodies, where `old(e)` refers to the pre-state.
//!
//! Builders are provided as associated functions, together with `!`, `&` and
//! `|` operator overloads:
//!
//! ```
//! use hyprog::expr::{Expr, SortedVar};
//! use hyprog::sort::Sort;
//!
//! let n = SortedVar::new("n", Sort::uninterpreted("node"));
//! let toggle = Expr::forall(
//!     [n],
//!     Expr::iff(
//!         Expr::app("r", [Expr::id("n")]),
//!         !Expr::old(Expr::app("r", [Expr::id("n")])),
//!     ),
//! );
//! assert_eq!(toggle.to_string(), "forall n:node. r(n) <-> !old(r(n))");
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, IntoStaticStr};

use crate::sort::Sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    #[strum(serialize = "!")]
    Not,
    /// Evaluate the operand in the pre-state of a transition.
    #[strum(serialize = "old")]
    Old,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    #[strum(serialize = "->")]
    Implies,
    #[strum(serialize = "<->")]
    Iff,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "!=")]
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NaryOp {
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "|")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quantifier {
    #[strum(serialize = "forall")]
    Forall,
    #[strum(serialize = "exists")]
    Exists,
}

/// A variable introduced by a binder, together with its sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortedVar {
    pub name: String,
    pub sort: Sort,
}

impl SortedVar {
    pub fn new(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
        }
    }
}

/// Ordered list of variables bound together by a quantifier or a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binder {
    pub vs: Vec<SortedVar>,
}

impl Binder {
    pub fn new(vs: impl IntoIterator<Item = SortedVar>) -> Self {
        Self {
            vs: vs.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vs.is_empty()
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// `true` or `false`.
    Bool(bool),

    /// Reference to a bound variable, a constant, or a nullary relation.
    Id(String),

    /// Application of a relation or a function to arguments.
    App { callee: String, args: Vec<Expr> },

    Unary { op: UnaryOp, arg: Box<Expr> },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Conjunction or disjunction of any number of operands. The empty
    /// conjunction is `true` and the empty disjunction is `false`.
    Nary { op: NaryOp, args: Vec<Expr> },

    Quantifier {
        quant: Quantifier,
        binder: Binder,
        body: Box<Expr>,
    },

    IfThenElse {
        branch: Box<Expr>,
        then: Box<Expr>,
        els: Box<Expr>,
    },
}

impl Expr {
    pub fn id(name: impl Into<String>) -> Self {
        Expr::Id(name.into())
    }

    pub fn app(callee: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::App {
            callee: callee.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn old(arg: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Old,
            arg: Box::new(arg),
        }
    }

    pub fn and(args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Nary {
            op: NaryOp::And,
            args: args.into_iter().collect(),
        }
    }

    pub fn or(args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Nary {
            op: NaryOp::Or,
            args: args.into_iter().collect(),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn implies(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Implies, lhs, rhs)
    }

    pub fn iff(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Iff, lhs, rhs)
    }

    pub fn equal(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Equal, lhs, rhs)
    }

    pub fn neq(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::NotEq, lhs, rhs)
    }

    pub fn quantifier(
        quant: Quantifier,
        vs: impl IntoIterator<Item = SortedVar>,
        body: Expr,
    ) -> Self {
        Expr::Quantifier {
            quant,
            binder: Binder::new(vs),
            body: Box::new(body),
        }
    }

    pub fn forall(vs: impl IntoIterator<Item = SortedVar>, body: Expr) -> Self {
        Self::quantifier(Quantifier::Forall, vs, body)
    }

    pub fn exists(vs: impl IntoIterator<Item = SortedVar>, body: Expr) -> Self {
        Self::quantifier(Quantifier::Exists, vs, body)
    }

    pub fn ite(branch: Expr, then: Expr, els: Expr) -> Self {
        Expr::IfThenElse {
            branch: Box::new(branch),
            then: Box::new(then),
            els: Box::new(els),
        }
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Unary {
            op: UnaryOp::Not,
            arg: Box::new(self),
        }
    }
}

/// `a & b` builds a conjunction, extending `a` when it already is one.
impl std::ops::BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        match self {
            Expr::Nary {
                op: NaryOp::And,
                mut args,
            } => {
                args.push(rhs);
                Expr::and(args)
            }
            lhs => Expr::and([lhs, rhs]),
        }
    }
}

/// `a | b` builds a disjunction, extending `a` when it already is one.
impl std::ops::BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        match self {
            Expr::Nary {
                op: NaryOp::Or,
                mut args,
            } => {
                args.push(rhs);
                Expr::or(args)
            }
            lhs => Expr::or([lhs, rhs]),
        }
    }
}
