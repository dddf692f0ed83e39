//! Direct evaluation of expressions on traces.
//!
//! Evaluation is defined on well-typed expressions only (see
//! [`crate::typecheck`]). Relations are false on every tuple a trace does not
//! record; constants and functions must be interpreted wherever they are
//! evaluated.
use log::trace;

use crate::{
    decls::{DefinitionDecl, SymbolDecl},
    expr::{BinaryOp, Expr, NaryOp, Quantifier, SortedVar, UnaryOp},
    program::Program,
    sort::Sort,
    trace::{Element, State, Trace},
    utils::Error,
};

/// Value of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Bool(bool),
    Elem(Element),
}

impl Value {
    fn as_bool(&self, expr: &Expr) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Elem(_) => Err(Error::TypeMismatch {
                expected: Sort::Bool,
                found: Sort::uninterpreted("<element>"),
                expr: expr.to_string(),
            }),
        }
    }

    fn into_elem(self, expr: &Expr) -> Result<Element, Error> {
        match self {
            Value::Elem(e) => Ok(e),
            Value::Bool(_) => Err(Error::TypeMismatch {
                expected: Sort::uninterpreted("<element>"),
                found: Sort::Bool,
                expr: expr.to_string(),
            }),
        }
    }
}

struct Evaluator<'a> {
    program: &'a Program,
    trace: &'a Trace,
    /// Index read under `old(..)`.
    pre: usize,
    /// Index read outside of `old(..)`.
    post: usize,
    env: Vec<(String, Value)>,
}

impl<'a> Evaluator<'a> {
    fn lookup_bound(&self, name: &str) -> Option<&Value> {
        self.env
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn domain(&self, sort: &Sort) -> Vec<Value> {
        match sort {
            Sort::Bool => vec![Value::Bool(false), Value::Bool(true)],
            Sort::Uninterpreted(name) => self
                .trace
                .universe(name)
                .iter()
                .cloned()
                .map(Value::Elem)
                .collect(),
        }
    }

    fn symbol(
        &mut self,
        name: &str,
        args: &[Expr],
        old: bool,
        expr: &Expr,
    ) -> Result<Value, Error> {
        let symbol = self
            .program
            .symbol(name)
            .ok_or_else(|| Error::UnknownSymbol {
                name: name.to_string(),
            })?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, old)?.into_elem(arg)?);
        }

        let index = if old { self.pre } else { self.post };
        let missing = || Error::MissingInterpretation {
            name: name.to_string(),
            args: values.join(", "),
        };

        match symbol {
            SymbolDecl::Constant(c) => self
                .trace
                .constant(c, index)
                .cloned()
                .map(Value::Elem)
                .ok_or_else(missing),
            SymbolDecl::Relation(r) => Ok(Value::Bool(
                self.trace
                    .relation(r, index)
                    .and_then(|interp| interp.get(&values))
                    .copied()
                    .unwrap_or(false),
            )),
            SymbolDecl::Function(f) => {
                let value = self
                    .trace
                    .function(f, index)
                    .and_then(|interp| interp.get(&values))
                    .cloned();
                match value {
                    Some(value) => Ok(Value::Elem(value)),
                    None => {
                        trace!("function `{}` undefined while evaluating `{}`", name, expr);
                        Err(missing())
                    }
                }
            }
        }
    }

    fn quantify(
        &mut self,
        quant: Quantifier,
        vs: &[SortedVar],
        body: &Expr,
        old: bool,
    ) -> Result<bool, Error> {
        let Some((first, rest)) = vs.split_first() else {
            return self.eval(body, old)?.as_bool(body);
        };

        for value in self.domain(&first.sort) {
            self.env.push((first.name.clone(), value));
            let result = self.quantify(quant, rest, body, old);
            self.env.pop();
            match (quant, result?) {
                (Quantifier::Forall, false) => return Ok(false),
                (Quantifier::Exists, true) => return Ok(true),
                _ => {}
            }
        }
        Ok(quant.is_forall())
    }

    fn eval(&mut self, expr: &Expr, old: bool) -> Result<Value, Error> {
        match expr {
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Id(name) => match self.lookup_bound(name) {
                Some(value) => Ok(value.clone()),
                None => self.symbol(name, &[], old, expr),
            },
            Expr::App { callee, args } => self.symbol(callee, args, old, expr),
            Expr::Unary {
                op: UnaryOp::Not,
                arg,
            } => Ok(Value::Bool(!self.eval(arg, old)?.as_bool(arg)?)),
            Expr::Unary {
                op: UnaryOp::Old,
                arg,
            } => self.eval(arg, true),
            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs, old)?;
                let r = self.eval(rhs, old)?;
                let b = match op {
                    BinaryOp::Equal => l == r,
                    BinaryOp::NotEq => l != r,
                    BinaryOp::Implies => !l.as_bool(lhs)? || r.as_bool(rhs)?,
                    BinaryOp::Iff => l.as_bool(lhs)? == r.as_bool(rhs)?,
                };
                Ok(Value::Bool(b))
            }
            Expr::Nary { op, args } => {
                let short = op.is_or();
                for arg in args {
                    if self.eval(arg, old)?.as_bool(arg)? == short {
                        return Ok(Value::Bool(short));
                    }
                }
                Ok(Value::Bool(!short))
            }
            Expr::Quantifier {
                quant,
                binder,
                body,
            } => Ok(Value::Bool(self.quantify(*quant, &binder.vs, body, old)?)),
            Expr::IfThenElse { branch, then, els } => {
                if self.eval(branch, old)?.as_bool(branch)? {
                    self.eval(then, old)
                } else {
                    self.eval(els, old)
                }
            }
        }
    }
}

/// Evaluate the state predicate `expr` on `state`.
pub fn eval_predicate(program: &Program, state: &State, expr: &Expr) -> Result<bool, Error> {
    let index = state.index();
    let mut evaluator = Evaluator {
        program,
        trace: state.trace(),
        pre: index,
        post: index,
        env: Vec::new(),
    };
    evaluator.eval(expr, true)?.as_bool(expr)
}

/// Decide whether the step from index `pre` to index `post` of `trace` is
/// allowed by `definition`.
///
/// The step is allowed when some assignment of the definition's parameters
/// satisfies its body and every mutable, non-derived symbol outside the
/// modifies-clause has the same interpretation at both indices.
pub fn eval_transition(
    program: &Program,
    trace: &Trace,
    pre: usize,
    post: usize,
    definition: &DefinitionDecl,
) -> Result<bool, Error> {
    trace.check_index(pre)?;
    trace.check_index(post)?;

    for symbol in program.relations_constants_and_functions() {
        if !symbol.is_mutable()
            || symbol.is_derived()
            || definition.mods.iter().any(|m| m.name == symbol.name())
        {
            continue;
        }
        let unchanged = match symbol {
            SymbolDecl::Constant(c) => trace.constant(c, pre) == trace.constant(c, post),
            SymbolDecl::Relation(r) => {
                let holds = |index| {
                    trace
                        .relation(r, index)
                        .into_iter()
                        .flatten()
                        .filter(|(_, b)| **b)
                        .map(|(args, _)| args)
                        .collect::<Vec<_>>()
                };
                holds(pre) == holds(post)
            }
            SymbolDecl::Function(f) => trace.function(f, pre) == trace.function(f, post),
        };
        if !unchanged {
            trace!(
                "`{}` changes outside the modifies-clause of `{}`",
                symbol.name(),
                definition.name
            );
            return Ok(false);
        }
    }

    let mut evaluator = Evaluator {
        program,
        trace,
        pre,
        post,
        env: Vec::new(),
    };
    evaluator.quantify(
        Quantifier::Exists,
        &definition.binder.vs,
        &definition.body,
        !definition.two_state,
    )
}
