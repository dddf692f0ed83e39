//! Frame axioms: mutable state a transition leaves untouched.
use hyfol::formula::{Formula, Term};
use hyprog::decls::{ModifiesClause, SymbolDecl};
use log::trace;

use crate::{
    error::{TransError, TransResult},
    symbol::Timing,
    translator::Translator,
};

impl Translator<'_> {
    /// One axiom per mutable, non-derived symbol not named by `mods`, stating
    /// that its pre- and post-state copies agree:
    /// - constants: `c = c'`,
    /// - functions: `forall __arg_0 .. __arg_n. f(args) = f'(args)`,
    /// - relations: `forall __arg_0 .. __arg_n. R(args) <-> R'(args)`.
    ///
    /// Axioms follow declaration order.
    pub fn frame_axioms(&self, mods: &[ModifiesClause]) -> TransResult<Vec<Formula>> {
        for m in mods {
            if self.program().symbol(&m.name).is_none() {
                return Err(TransError::UnknownSymbol(m.name.clone()));
            }
        }

        let mut axioms = Vec::new();
        for symbol in self.program().relations_constants_and_functions() {
            if !symbol.is_mutable()
                || symbol.is_derived()
                || mods.iter().any(|m| m.name == symbol.name())
            {
                continue;
            }

            let pre = self.external_name(symbol.name(), Timing::Pre)?;
            let post = self.external_name(symbol.name(), Timing::Post)?;
            let vars = symbol
                .arity()
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let var = format!("{}{}", self.config().frame_var_prefix, i);
                    self.sort_name(s).map(|s| (var, s))
                })
                .collect::<TransResult<Vec<_>>>()?;
            let args = || vars.iter().map(|(v, _)| Term::var(v.as_str()));

            let axiom = match symbol {
                SymbolDecl::Constant(_) => Formula::equal(Term::var(pre), Term::var(post)),
                SymbolDecl::Function(_) => Formula::equal(
                    Term::func(pre, args()),
                    Term::func(post, args()),
                ),
                SymbolDecl::Relation(_) => Formula::iff(
                    Formula::relation(pre, args()),
                    Formula::relation(post, args()),
                ),
            };
            trace!("Framing `{}`", symbol.name());
            axioms.push(Formula::forall_many(vars, axiom));
        }
        Ok(axioms)
    }

    /// Conjunction of [`Translator::frame_axioms`]; the empty conjunction
    /// when nothing is framed.
    pub fn frame_to_formula(&self, mods: &[ModifiesClause]) -> TransResult<Formula> {
        Ok(Formula::And(self.frame_axioms(mods)?))
    }
}
