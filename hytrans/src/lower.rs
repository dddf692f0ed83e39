//! Lowering of program expressions to external formulas.
//!
//! Lowering walks the expression carrying an "old scope" flag. In an old
//! scope every symbol refers to the pre-state; outside of one, mutable
//! symbols refer to the post-state and receive the prime suffix. A
//! single-state predicate is lowered entirely in an old scope, so none of its
//! symbols are primed. A transition body starts outside of one and `old(e)`
//! moves `e` back to the pre-state.
use hyfol::formula::{Formula, Term};
use hyprog::{
    decls::{DefinitionDecl, SymbolDecl},
    expr::{Binder, BinaryOp, Expr, NaryOp, Quantifier, UnaryOp},
};
use log::{debug, trace};

use crate::{
    error::{TransError, TransResult},
    symbol::Timing,
    translator::Translator,
};

struct Lowering<'t, 'p> {
    translator: &'t Translator<'p>,
    /// Names of the enclosing quantified variables, innermost last.
    bound: Vec<String>,
}

impl<'p> Lowering<'_, 'p> {
    fn is_bound(&self, name: &str) -> bool {
        self.bound.iter().any(|b| b == name)
    }

    /// The symbol called `name`, or the error explaining why there is none.
    fn symbol(&self, name: &str) -> TransResult<SymbolDecl<'p>> {
        let program = self.translator.program();
        match program.symbol(name) {
            Some(symbol) => Ok(symbol),
            None if program.definition(name).is_some() => {
                Err(TransError::DefinitionNotSupported(name.to_string()))
            }
            None => Err(TransError::UnknownSymbol(name.to_string())),
        }
    }

    fn external_name(&self, symbol: SymbolDecl<'_>, old: bool) -> TransResult<String> {
        let timing = Timing::resolve(symbol.is_mutable(), old);
        self.translator.external_name(symbol.name(), timing)
    }

    fn terms(&mut self, args: &[Expr], old: bool) -> TransResult<Vec<Term>> {
        args.iter().map(|a| self.term(a, old)).collect()
    }

    fn term(&mut self, expr: &Expr, old: bool) -> TransResult<Term> {
        match expr {
            Expr::Id(name) if self.is_bound(name) => Ok(Term::Var(name.clone())),
            Expr::Id(name) => match self.symbol(name)? {
                symbol @ SymbolDecl::Constant(_) => Ok(Term::Var(self.external_name(symbol, old)?)),
                symbol @ SymbolDecl::Function(f) if f.arity.is_empty() => {
                    Ok(Term::func(self.external_name(symbol, old)?, []))
                }
                _ => Err(TransError::NotAFunction(name.clone())),
            },
            Expr::App { callee, args } => match self.symbol(callee)? {
                symbol @ SymbolDecl::Function(_) => {
                    let name = self.external_name(symbol, old)?;
                    Ok(Term::func(name, self.terms(args, old)?))
                }
                _ => Err(TransError::NotAFunction(callee.clone())),
            },
            Expr::Unary {
                op: UnaryOp::Old,
                arg,
            } => self.term(arg, true),
            _ => Err(TransError::UnsupportedTerm(expr.to_string())),
        }
    }

    fn quantifier(
        &mut self,
        quant: Quantifier,
        binder: &Binder,
        body: &Expr,
        old: bool,
    ) -> TransResult<Formula> {
        let mut vars = Vec::with_capacity(binder.vs.len());
        for v in &binder.vs {
            vars.push((v.name.clone(), self.translator.sort_name(&v.sort)?));
        }

        self.bound.extend(binder.vs.iter().map(|v| v.name.clone()));
        let body = self.formula(body, old);
        self.bound.truncate(self.bound.len() - binder.vs.len());
        let body = body?;

        Ok(match quant {
            Quantifier::Forall => Formula::forall_many(vars, body),
            Quantifier::Exists => Formula::exists_many(vars, body),
        })
    }

    fn formula(&mut self, expr: &Expr, old: bool) -> TransResult<Formula> {
        match expr {
            Expr::Bool(true) => Ok(Formula::top()),
            Expr::Bool(false) => Ok(Formula::bottom()),
            Expr::Id(name) if self.is_bound(name) => {
                Err(TransError::UnsupportedFormula(expr.to_string()))
            }
            Expr::Id(name) => match self.symbol(name)? {
                symbol @ SymbolDecl::Relation(_) => {
                    Ok(Formula::relation(self.external_name(symbol, old)?, []))
                }
                _ => Err(TransError::NotARelation(name.clone())),
            },
            Expr::App { callee, args } => match self.symbol(callee)? {
                symbol @ SymbolDecl::Relation(_) => {
                    let name = self.external_name(symbol, old)?;
                    Ok(Formula::relation(name, self.terms(args, old)?))
                }
                _ => Err(TransError::NotARelation(callee.clone())),
            },
            Expr::Unary {
                op: UnaryOp::Not,
                arg,
            } => Ok(Formula::not(self.formula(arg, old)?)),
            Expr::Unary {
                op: UnaryOp::Old,
                arg,
            } => self.formula(arg, true),
            Expr::Binary { op, lhs, rhs } => Ok(match op {
                BinaryOp::Equal => Formula::equal(self.term(lhs, old)?, self.term(rhs, old)?),
                BinaryOp::NotEq => Formula::not(Formula::equal(
                    self.term(lhs, old)?,
                    self.term(rhs, old)?,
                )),
                BinaryOp::Implies => {
                    Formula::implies(self.formula(lhs, old)?, self.formula(rhs, old)?)
                }
                BinaryOp::Iff => Formula::iff(self.formula(lhs, old)?, self.formula(rhs, old)?),
            }),
            Expr::Nary { op, args } => {
                let args = args
                    .iter()
                    .map(|a| self.formula(a, old))
                    .collect::<TransResult<Vec<_>>>()?;
                Ok(match op {
                    NaryOp::And => Formula::And(args),
                    NaryOp::Or => Formula::Or(args),
                })
            }
            Expr::Quantifier {
                quant,
                binder,
                body,
            } => self.quantifier(*quant, binder, body, old),
            Expr::IfThenElse { branch, then, els } => {
                let branch = self.formula(branch, old)?;
                let then = self.formula(then, old)?;
                let els = self.formula(els, old)?;
                Ok(Formula::and([
                    Formula::implies(branch.clone(), then),
                    Formula::implies(Formula::not(branch), els),
                ]))
            }
        }
    }
}

impl Translator<'_> {
    /// Lower the boolean expression `expr`.
    ///
    /// In two-state mode, mutable symbols outside of `old(..)` refer to the
    /// post-state and are primed. In single-state mode nothing is primed.
    pub fn predicate_to_formula(&self, expr: &Expr, two_state: bool) -> TransResult<Formula> {
        let mut lowering = Lowering {
            translator: self,
            bound: Vec::new(),
        };
        let formula = lowering.formula(expr, !two_state)?;
        trace!("Lowered `{}` to `{}`", expr, formula);
        Ok(formula)
    }

    /// Encode the transition `definition` as a two-state formula: its body,
    /// existentially closed over the transition parameters, conjoined with
    /// the frame axioms of its modifies-clause.
    pub fn transition_to_formula(&self, definition: &DefinitionDecl) -> TransResult<Formula> {
        let mut lowering = Lowering {
            translator: self,
            bound: Vec::new(),
        };
        let body = lowering.quantifier(
            Quantifier::Exists,
            &definition.binder,
            &definition.body,
            false,
        )?;

        let frame = self.frame_axioms(&definition.mods)?;
        debug!(
            "Transition `{}` encoded with {} frame axiom(s)",
            definition.name,
            frame.len()
        );

        if frame.is_empty() {
            Ok(body)
        } else {
            Ok(Formula::and(std::iter::once(body).chain(frame)))
        }
    }

    /// [`Translator::transition_to_formula`] of the two-state definition
    /// called `name`.
    pub fn transition_by_name(&self, name: &str) -> TransResult<Formula> {
        match self.program().definition(name) {
            Some(definition) if definition.two_state => self.transition_to_formula(definition),
            _ => Err(TransError::UnknownTransition(name.to_string())),
        }
    }
}
