//! Typechecking of expressions against a scope.
//!
//! A [`Scope`] is the set of names visible to an expression: the symbols of a
//! program plus a stack of bound variables. Two-state scopes additionally
//! allow `old(..)`.
use crate::{
    decls::SymbolDecl,
    expr::{Binder, Expr, UnaryOp},
    program::Program,
    sort::Sort,
    utils::Error,
};

#[derive(Debug, Clone)]
pub struct Scope<'p> {
    program: &'p Program,
    bound: Vec<(String, Sort)>,
    two_state: bool,
}

impl<'p> Scope<'p> {
    /// Scope of a state predicate over `program`.
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            bound: Vec::new(),
            two_state: false,
        }
    }

    /// Scope of a transition body over `program`, where `old(..)` is allowed.
    pub fn two_state(program: &'p Program) -> Self {
        Self {
            two_state: true,
            ..Self::new(program)
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn is_two_state(&self) -> bool {
        self.two_state
    }

    /// Bind `name` with sort `sort`, shadowing previous bindings.
    pub fn push(&mut self, name: impl Into<String>, sort: Sort) {
        self.bound.push((name.into(), sort));
    }

    /// Bind every variable of `binder`, in order.
    pub fn push_binder(&mut self, binder: &Binder) {
        for v in &binder.vs {
            self.push(v.name.clone(), v.sort.clone());
        }
    }

    /// Remove the `count` innermost bindings.
    pub fn pop(&mut self, count: usize) {
        let len = self.bound.len().saturating_sub(count);
        self.bound.truncate(len);
    }

    /// Sort of the innermost bound variable called `name`.
    pub fn bound_sort(&self, name: &str) -> Option<&Sort> {
        self.bound
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }
}

/// Check that `expr` is well-formed in `scope` and has sort `expected`.
pub fn typecheck_expr(scope: &Scope<'_>, expr: &Expr, expected: &Sort) -> Result<(), Error> {
    let mut scope = scope.clone();
    let found = infer(&mut scope, expr)?;
    expect(expr, expected, found)
}

fn expect(expr: &Expr, expected: &Sort, found: Sort) -> Result<(), Error> {
    if &found == expected {
        Ok(())
    } else {
        Err(Error::TypeMismatch {
            expected: expected.clone(),
            found,
            expr: expr.to_string(),
        })
    }
}

fn check(scope: &mut Scope<'_>, expr: &Expr, expected: &Sort) -> Result<(), Error> {
    let found = infer(scope, expr)?;
    expect(expr, expected, found)
}

fn check_sort_declared(scope: &Scope<'_>, sort: &Sort, var: &str) -> Result<(), Error> {
    match sort {
        Sort::Uninterpreted(name) if !scope.program.has_sort(name) => Err(Error::UnknownSort {
            sort: name.clone(),
            context: format!("bound variable `{}`", var),
        }),
        _ => Ok(()),
    }
}

fn infer(scope: &mut Scope<'_>, expr: &Expr) -> Result<Sort, Error> {
    let program = scope.program;
    match expr {
        Expr::Bool(_) => Ok(Sort::Bool),
        Expr::Id(name) => {
            if let Some(sort) = scope.bound_sort(name) {
                return Ok(sort.clone());
            }
            match program.symbol(name) {
                Some(symbol) if symbol.arity().is_empty() => Ok(symbol.result_sort().clone()),
                Some(symbol) => Err(Error::ArityMismatch {
                    name: name.clone(),
                    expected: symbol.arity().len(),
                    found: 0,
                }),
                None => Err(Error::UnknownSymbol { name: name.clone() }),
            }
        }
        Expr::App { callee, args } => {
            if scope.bound_sort(callee).is_some() {
                return Err(Error::NotCallable {
                    name: callee.clone(),
                });
            }
            let symbol = match program.symbol(callee) {
                Some(SymbolDecl::Constant(_)) => {
                    return Err(Error::NotCallable {
                        name: callee.clone(),
                    });
                }
                Some(symbol) => symbol,
                None => {
                    return Err(Error::UnknownSymbol {
                        name: callee.clone(),
                    });
                }
            };

            if symbol.arity().len() != args.len() {
                return Err(Error::ArityMismatch {
                    name: callee.clone(),
                    expected: symbol.arity().len(),
                    found: args.len(),
                });
            }
            for (arg, sort) in args.iter().zip(symbol.arity()) {
                check(scope, arg, sort)?;
            }
            Ok(symbol.result_sort().clone())
        }
        Expr::Unary {
            op: UnaryOp::Not,
            arg,
        } => {
            check(scope, arg, &Sort::Bool)?;
            Ok(Sort::Bool)
        }
        Expr::Unary {
            op: UnaryOp::Old,
            arg,
        } => {
            if !scope.two_state {
                return Err(Error::OldOutsideTwoState {
                    expr: arg.to_string(),
                });
            }
            infer(scope, arg)
        }
        Expr::Binary { op, lhs, rhs } => {
            if op.is_equal() || op.is_not_eq() {
                let sort = infer(scope, lhs)?;
                check(scope, rhs, &sort)?;
            } else {
                check(scope, lhs, &Sort::Bool)?;
                check(scope, rhs, &Sort::Bool)?;
            }
            Ok(Sort::Bool)
        }
        Expr::Nary { args, .. } => {
            for arg in args {
                check(scope, arg, &Sort::Bool)?;
            }
            Ok(Sort::Bool)
        }
        Expr::Quantifier { binder, body, .. } => {
            for v in &binder.vs {
                check_sort_declared(scope, &v.sort, &v.name)?;
            }
            scope.push_binder(binder);
            let result = check(scope, body, &Sort::Bool);
            scope.pop(binder.vs.len());
            result.map(|()| Sort::Bool)
        }
        Expr::IfThenElse { branch, then, els } => {
            check(scope, branch, &Sort::Bool)?;
            let sort = infer(scope, then)?;
            check(scope, els, &sort)?;
            Ok(sort)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decls::{ConstantDecl, FunctionDecl, RelationDecl, SortDecl},
        expr::SortedVar,
    };

    fn node() -> Sort {
        Sort::uninterpreted("node")
    }

    fn program() -> Program {
        Program::new(vec![
            SortDecl::new("node").into(),
            ConstantDecl::new("zero", node(), false).into(),
            ConstantDecl::new("leader", node(), true).into(),
            RelationDecl::new("r", [node()], true).into(),
            RelationDecl::new("flag", [], true).into(),
            FunctionDecl::new("succ", [node()], node(), false).into(),
        ])
        .unwrap()
    }

    fn n() -> SortedVar {
        SortedVar::new("n", node())
    }

    #[test]
    fn well_typed_predicates() {
        let program = program();
        let scope = Scope::new(&program);

        let e = Expr::forall(
            [n()],
            Expr::implies(
                Expr::app("r", [Expr::id("n")]),
                Expr::neq(Expr::app("succ", [Expr::id("n")]), Expr::id("zero")),
            ),
        );
        typecheck_expr(&scope, &e, &Sort::Bool).unwrap();
        typecheck_expr(&scope, &Expr::id("flag"), &Sort::Bool).unwrap();
        typecheck_expr(
            &scope,
            &Expr::ite(Expr::id("flag"), Expr::id("zero"), Expr::id("leader")),
            &node(),
        )
        .unwrap();
    }

    #[test]
    fn sort_mismatch_is_reported() {
        let program = program();
        let scope = Scope::new(&program);
        let err = typecheck_expr(&scope, &Expr::id("zero"), &Sort::Bool).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: Sort::Bool,
                found: node(),
                expr: "zero".to_string(),
            }
        );

        let err = typecheck_expr(
            &scope,
            &Expr::app("r", [Expr::id("flag")]),
            &Sort::Bool,
        )
        .unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn bound_variables_go_out_of_scope() {
        let program = program();
        let scope = Scope::new(&program);
        let e = Expr::and([
            Expr::exists([n()], Expr::app("r", [Expr::id("n")])),
            Expr::app("r", [Expr::id("n")]),
        ]);
        let err = typecheck_expr(&scope, &e, &Sort::Bool).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSymbol {
                name: "n".to_string()
            }
        );
    }

    #[test]
    fn arity_and_callability() {
        let program = program();
        let scope = Scope::new(&program);
        let err = typecheck_expr(&scope, &Expr::id("r"), &Sort::Bool).unwrap_err();
        assert!(err.is_arity_mismatch());

        let err = typecheck_expr(&scope, &Expr::app("zero", [Expr::id("zero")]), &Sort::Bool)
            .unwrap_err();
        assert!(err.is_not_callable());

        let err = typecheck_expr(
            &scope,
            &Expr::exists([n()], Expr::app("n", [])),
            &Sort::Bool,
        )
        .unwrap_err();
        assert!(err.is_not_callable());
    }

    #[test]
    fn old_requires_two_state_scope() {
        let program = program();
        let e = Expr::iff(Expr::id("flag"), !Expr::old(Expr::id("flag")));

        let err = typecheck_expr(&Scope::new(&program), &e, &Sort::Bool).unwrap_err();
        assert!(err.is_old_outside_two_state());
        typecheck_expr(&Scope::two_state(&program), &e, &Sort::Bool).unwrap();
    }

    #[test]
    fn quantified_sort_must_be_declared() {
        let program = program();
        let e = Expr::forall(
            [SortedVar::new("q", Sort::uninterpreted("quorum"))],
            Expr::Bool(true),
        );
        let err = typecheck_expr(&Scope::new(&program), &e, &Sort::Bool).unwrap_err();
        assert!(err.is_unknown_sort());
    }
}
