//! Evaluation of formulas in a [`Model`].
use crate::{
    formula::{Formula, Term},
    model::{ElemId, Model},
    utils::Error,
};

impl Model {
    /// Evaluate the closed formula `formula`.
    ///
    /// Variables not bound by a quantifier resolve to constants of the
    /// signature.
    pub fn eval(&self, formula: &Formula) -> Result<bool, Error> {
        let mut env = Vec::new();
        self.eval_in(formula, &mut env)
    }

    /// Evaluate `term` with no bound variable.
    pub fn eval_term(&self, term: &Term) -> Result<ElemId, Error> {
        self.term_in(term, &[])
    }

    fn term_in(&self, term: &Term, env: &[(&str, ElemId)]) -> Result<ElemId, Error> {
        match term {
            Term::Var(name) => {
                if let Some(&(_, id)) = env.iter().rev().find(|(n, _)| n == name) {
                    return Ok(id);
                }
                if self.signature().constant(name).is_none() {
                    return Err(Error::UnboundVariable { name: name.clone() });
                }
                self.constant(name)
                    .ok_or_else(|| Error::UninterpretedConstant { name: name.clone() })
            }
            Term::Func { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for a in args {
                    values.push(self.term_in(a, env)?);
                }
                self.function(name)
                    .and_then(|interp| interp.get(&values))
                    .copied()
                    .ok_or_else(|| Error::UndefinedFunctionValue {
                        name: name.clone(),
                        args: values
                            .iter()
                            .map(|&id| self.name(id))
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    }

    fn eval_in<'f>(
        &self,
        formula: &'f Formula,
        env: &mut Vec<(&'f str, ElemId)>,
    ) -> Result<bool, Error> {
        match formula {
            Formula::And(args) => {
                for a in args {
                    if !self.eval_in(a, env)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Formula::Or(args) => {
                for a in args {
                    if self.eval_in(a, env)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Formula::Not(f) => Ok(!self.eval_in(f, env)?),
            Formula::Implies(a, b) => Ok(!self.eval_in(a, env)? || self.eval_in(b, env)?),
            Formula::Iff(a, b) => Ok(self.eval_in(a, env)? == self.eval_in(b, env)?),
            Formula::Equal(a, b) => Ok(self.term_in(a, env)? == self.term_in(b, env)?),
            Formula::Relation { name, args } => {
                if self.signature().relation(name).is_none() {
                    return Err(Error::UnknownSymbol {
                        kind: "relation",
                        name: name.clone(),
                    });
                }
                let mut values = Vec::with_capacity(args.len());
                for a in args {
                    values.push(self.term_in(a, env)?);
                }
                Ok(self.holds(name, &values))
            }
            Formula::Forall { var, sort, body } | Formula::Exists { var, sort, body } => {
                if !self.signature().has_sort(sort) {
                    return Err(Error::UnknownSort { sort: sort.clone() });
                }
                let universal = formula.is_forall();
                for &id in self.elems(sort) {
                    env.push((var.as_str(), id));
                    let value = self.eval_in(body, env);
                    env.pop();
                    if value? != universal {
                        return Ok(!universal);
                    }
                }
                Ok(universal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;

    fn model() -> Model {
        let mut sig = Signature::new();
        sig.add_sort("Node").unwrap();
        sig.add_constant("zero", "Node").unwrap();
        sig.add_relation("R", ["Node"]).unwrap();
        sig.add_function("succ", ["Node"], "Node").unwrap();
        sig.finalize_sorts();

        let mut m = Model::new(sig).unwrap();
        for e in ["a", "b", "c"] {
            m.add_elem(e, "Node").unwrap();
        }
        m.add_constant("zero", "a").unwrap();
        m.add_relation("R", ["b"], true).unwrap();
        m.add_relation("R", ["c"], false).unwrap();
        m.add_function("succ", ["a"], "b").unwrap();
        m.add_function("succ", ["b"], "c").unwrap();
        m.add_function("succ", ["c"], "a").unwrap();
        m
    }

    fn r(t: Term) -> Formula {
        Formula::relation("R", [t])
    }

    #[test]
    fn quantifiers_range_over_the_universe() {
        let m = model();
        let n = || Term::var("n");
        assert!(m.eval(&Formula::exists("n", "Node", r(n()))).unwrap());
        assert!(!m.eval(&Formula::forall("n", "Node", r(n()))).unwrap());
        assert!(m
            .eval(&Formula::forall(
                "n",
                "Node",
                Formula::not(Formula::equal(Term::func("succ", [n()]), n())),
            ))
            .unwrap());
    }

    #[test]
    fn constants_and_functions() {
        let m = model();
        let succ_zero = Term::func("succ", [Term::var("zero")]);
        assert_eq!(m.name(m.eval_term(&succ_zero).unwrap()), "b");
        assert!(m.eval(&r(succ_zero)).unwrap());
        assert!(!m.eval(&r(Term::var("zero"))).unwrap());
        assert!(m.eval(&Formula::top()).unwrap());
        assert!(!m.eval(&Formula::bottom()).unwrap());
    }

    #[test]
    fn free_variables_are_errors() {
        let m = model();
        assert_eq!(
            m.eval(&r(Term::var("x"))).unwrap_err(),
            Error::UnboundVariable {
                name: "x".to_string()
            }
        );
    }
}
