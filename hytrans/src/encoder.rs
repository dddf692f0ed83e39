//! Encoding of states and state pairs as external models.
use hyfol::model::Model;
use hyprog::{
    decls::SymbolDecl,
    trace::{State, Trace},
};
use log::debug;

use crate::{error::TransResult, symbol::Timing, translator::Translator};

impl Translator<'_> {
    /// Encode the state at `state.index()` as a single-state model.
    pub fn state_to_model(&self, state: &State) -> TransResult<Model> {
        self.encode(state.trace(), state.index(), None)
    }

    /// Encode the configured pre- and post-state indices of `trace` as a
    /// two-state model.
    pub fn two_state_trace_to_model(&self, trace: &Trace) -> TransResult<Model> {
        self.two_state_trace_to_model_at(trace, self.config().old_index, self.config().new_index)
    }

    /// Encode indices `old_index` and `new_index` of `trace` as a two-state
    /// model. Mutable interpretations at `new_index` land on primed symbols.
    pub fn two_state_trace_to_model_at(
        &self,
        trace: &Trace,
        old_index: usize,
        new_index: usize,
    ) -> TransResult<Model> {
        self.encode(trace, old_index, Some(new_index))
    }

    fn encode(&self, trace: &Trace, old_index: usize, new_index: Option<usize>) -> TransResult<Model> {
        trace.check_index(old_index)?;
        if let Some(new_index) = new_index {
            trace.check_index(new_index)?;
        }

        let two_state = new_index.is_some();
        let mut model = Model::new(self.program_to_signature(two_state)?)?;

        // `univs` is ordered by sort name
        for (sort, elems) in &trace.univs {
            for e in elems {
                model.add_elem(e.as_str(), sort.as_str())?;
            }
        }

        for symbol in self.program().relations_constants_and_functions() {
            for &timing in Self::timings(symbol.is_mutable(), two_state) {
                let index = match (timing, new_index) {
                    (Timing::Post, Some(new_index)) => new_index,
                    _ => old_index,
                };
                let name = self.external_name(symbol.name(), timing)?;

                match symbol {
                    SymbolDecl::Constant(c) => {
                        if let Some(value) = trace.constant(c, index) {
                            model.add_constant(&name, value)?;
                        }
                    }
                    SymbolDecl::Relation(r) => {
                        for (args, &value) in trace.relation(r, index).into_iter().flatten() {
                            model.add_relation(&name, args, value)?;
                        }
                    }
                    SymbolDecl::Function(f) => {
                        for (args, value) in trace.function(f, index).into_iter().flatten() {
                            model.add_function(&name, args, value)?;
                        }
                    }
                }
            }
        }

        debug!(
            "Encoded {} model with {} element(s)",
            if two_state { "two-state" } else { "single-state" },
            model.num_elems()
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use hyfol::formula::{Formula, Term};
    use hyprog::{
        decls::{ConstantDecl, RelationDecl, SortDecl},
        program::Program,
        sort::Sort,
        trace::Trace,
    };

    use crate::translator::Translator;

    fn node() -> Sort {
        Sort::uninterpreted("node")
    }

    fn program() -> Program {
        Program::new(vec![
            SortDecl::new("node").into(),
            ConstantDecl::new("zero", node(), false).into(),
            RelationDecl::new("r", [node()], true).into(),
        ])
        .unwrap()
    }

    fn trace(program: &Program) -> Trace {
        let r = program.relation("r").unwrap();
        let mut trace = Trace::new(3);
        trace.set_universe("node", ["a", "b"]);
        trace
            .set_constant(program.constant("zero").unwrap(), 0, "a")
            .unwrap();
        trace.set_relation(r, 0, ["a"], true).unwrap();
        trace.set_relation(r, 2, ["b"], true).unwrap();
        trace
    }

    #[test]
    fn post_state_lands_on_primed_symbols() {
        let program = program();
        let trace = trace(&program);
        let t = Translator::new(&program);

        let m = t.two_state_trace_to_model_at(&trace, 0, 2).unwrap();
        let holds = |rel: &str, elem: &str| m.holds(rel, &[m.elem("node", elem).unwrap()]);
        assert!(holds("r", "a"));
        assert!(!holds("r'", "a"));
        assert!(holds("r'", "b"));

        let toggled = Formula::exists(
            "x",
            "node",
            Formula::and([
                Formula::relation("r'", [Term::var("x")]),
                Formula::not(Formula::relation("r", [Term::var("x")])),
            ]),
        );
        assert!(m.eval(&toggled).unwrap());
        assert_eq!(m.constant("zero").map(|e| m.name(e)), Some("a"));
    }

    #[test]
    fn single_state_uses_the_state_index() {
        let program = program();
        let state = trace(&program).as_state(2).unwrap();
        let m = Translator::new(&program).state_to_model(&state).unwrap();
        assert!(!m.signature().has_symbol("r'"));
        assert_eq!(m.relation("r").map(|i| i.len()), Some(1));
        assert!(m.holds("r", &[m.elem("node", "b").unwrap()]));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let program = program();
        let trace = trace(&program);
        let err = Translator::new(&program)
            .two_state_trace_to_model_at(&trace, 0, 3)
            .unwrap_err();
        assert!(err.is_program());
    }
}
