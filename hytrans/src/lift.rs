//! Lifting of external formulas back into program expressions.
use hyfol::formula::{Formula, Term};
use hyprog::{
    expr::{Binder, Expr, Quantifier, SortedVar},
    sort::Sort,
    typecheck::{Scope, typecheck_expr},
};
use log::trace;

use crate::{
    error::{TransError, TransResult},
    translator::Translator,
};

fn term_to_expr(t: &Term) -> Expr {
    match t {
        Term::Var(v) => Expr::id(v.as_str()),
        Term::Func { name, args } => Expr::app(name.as_str(), args.iter().map(term_to_expr)),
    }
}

/// Prepend `var` to `body` when `body` is a quantifier of the same kind.
fn fold_quantifier(quant: Quantifier, var: &str, sort: &str, body: Expr) -> Expr {
    let var = SortedVar::new(var, Sort::uninterpreted(sort));
    match body {
        Expr::Quantifier {
            quant: inner,
            binder,
            body,
        } if inner == quant => {
            let vs = std::iter::once(var).chain(binder.vs);
            Expr::Quantifier {
                quant,
                binder: Binder::new(vs),
                body,
            }
        }
        body => Expr::quantifier(quant, [var], body),
    }
}

fn formula_to_expr(f: &Formula) -> Expr {
    match f {
        Formula::And(args) => Expr::and(args.iter().map(formula_to_expr)),
        Formula::Or(args) => Expr::or(args.iter().map(formula_to_expr)),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Equal(a, b) => Expr::neq(term_to_expr(a), term_to_expr(b)),
            inner => !formula_to_expr(inner),
        },
        Formula::Implies(a, b) => Expr::implies(formula_to_expr(a), formula_to_expr(b)),
        Formula::Iff(a, b) => Expr::iff(formula_to_expr(a), formula_to_expr(b)),
        Formula::Equal(a, b) => Expr::equal(term_to_expr(a), term_to_expr(b)),
        Formula::Relation { name, args } if args.is_empty() => Expr::id(name.as_str()),
        Formula::Relation { name, args } => {
            Expr::app(name.as_str(), args.iter().map(term_to_expr))
        }
        Formula::Forall { var, sort, body } => {
            fold_quantifier(Quantifier::Forall, var, sort, formula_to_expr(body))
        }
        Formula::Exists { var, sort, body } => {
            fold_quantifier(Quantifier::Exists, var, sort, formula_to_expr(body))
        }
    }
}

/// Lift `formula` into a boolean expression that typechecks in `scope`.
///
/// Nested quantifiers of the same kind are folded into one binder and
/// `!(a = b)` becomes `a != b`. Quantifiers of different kinds never merge.
pub fn formula_to_predicate(formula: &Formula, scope: &Scope<'_>) -> TransResult<Expr> {
    let expr = formula_to_expr(formula);
    typecheck_expr(scope, &expr, &Sort::Bool).map_err(|source| TransError::IllTypedLift {
        expr: expr.to_string(),
        source,
    })?;
    trace!("Lifted `{}` to `{}`", formula, expr);
    Ok(expr)
}

impl Translator<'_> {
    /// [`formula_to_predicate`] in the single-state scope of the program.
    pub fn formula_to_predicate(&self, formula: &Formula) -> TransResult<Expr> {
        formula_to_predicate(formula, &Scope::new(self.program()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: &str) -> Formula {
        Formula::relation("r", [Term::var(v)])
    }

    #[test]
    fn same_kind_quantifiers_fold() {
        let f = Formula::exists("x", "node", Formula::exists("y", "node", r("y")));
        let e = formula_to_expr(&f);
        assert_eq!(e.to_string(), "exists x:node, y:node. r(y)");
    }

    #[test]
    fn mixed_quantifiers_do_not_fold() {
        let f = Formula::exists("x", "node", Formula::forall("y", "node", r("y")));
        let e = formula_to_expr(&f);
        assert_eq!(e.to_string(), "exists x:node. forall y:node. r(y)");
    }

    #[test]
    fn disequality_and_nullary_relations() {
        let f = Formula::and([
            Formula::not(Formula::equal(Term::var("x"), Term::var("y"))),
            Formula::not(Formula::relation("flag", [])),
            Formula::implies(r("x"), Formula::bottom()),
        ]);
        let e = formula_to_expr(&f);
        assert_eq!(e.to_string(), "x != y & !flag & (r(x) -> false)");
    }
}
