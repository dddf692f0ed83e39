//! Decoding of external models into traces.
//!
//! Universes are copied verbatim, so decoded elements keep their names.
//! Relations only record the tuples present in the model.
use hyfol::model::Model;
use hyprog::{
    decls::SymbolDecl,
    trace::{State, Trace},
};
use log::debug;

use crate::{
    error::{TransError, TransResult},
    symbol::Timing,
    translator::Translator,
};

impl Translator<'_> {
    /// Decode a single-state model as the state at index 0 of a fresh trace.
    pub fn model_to_state(&self, model: &Model) -> TransResult<State> {
        let mut trace = Trace::new(1);
        self.decode_into(model, &mut trace, false)?;
        Ok(trace.as_state(0)?)
    }

    /// Decode a two-state model as a fresh two-index trace: unprimed
    /// symbols at index 0, primed symbols at index 1.
    pub fn two_state_model_to_trace(&self, model: &Model) -> TransResult<Trace> {
        let mut trace = Trace::new(2);
        self.decode_into(model, &mut trace, true)?;
        Ok(trace)
    }

    fn decode_into(&self, model: &Model, trace: &mut Trace, two_state: bool) -> TransResult<()> {
        for sort in self.program().sorts() {
            if !model.signature().has_sort(&sort.name) {
                return Err(hyfol::Error::UnknownSort {
                    sort: sort.name.clone(),
                }
                .into());
            }
            trace.set_universe(sort.name.as_str(), model.universe(&sort.name));
        }

        for symbol in self.program().relations_constants_and_functions() {
            for &timing in Self::timings(symbol.is_mutable(), two_state) {
                let index = if timing.is_post() { 1 } else { 0 };
                let name = self.external_name(symbol.name(), timing)?;
                if !model.signature().has_symbol(&name) {
                    return Err(TransError::UnknownSymbol(name));
                }

                match symbol {
                    SymbolDecl::Constant(c) => {
                        let value = model
                            .constant(&name)
                            .ok_or_else(|| TransError::UninterpretedConstant(name.clone()))?;
                        trace.set_constant(c, index, model.name(value))?;
                    }
                    SymbolDecl::Relation(r) => {
                        for (args, &value) in model.relation(&name).into_iter().flatten() {
                            let args = args.iter().map(|&e| model.name(e));
                            trace.set_relation(r, index, args, value)?;
                        }
                    }
                    SymbolDecl::Function(f) => {
                        for (args, &value) in model.function(&name).into_iter().flatten() {
                            let args = args.iter().map(|&e| model.name(e));
                            trace.set_function(f, index, args, model.name(value))?;
                        }
                    }
                }
            }
        }

        debug!(
            "Decoded {} trace over {} element(s)",
            if two_state { "two-state" } else { "single-state" },
            trace.univs.values().map(Vec::len).sum::<usize>()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hyfol::model::Model;
    use hyprog::{
        decls::{ConstantDecl, RelationDecl, SortDecl},
        program::Program,
        sort::Sort,
    };

    use crate::translator::Translator;

    fn program() -> Program {
        let node = Sort::uninterpreted("node");
        Program::new(vec![
            SortDecl::new("node").into(),
            ConstantDecl::new("zero", node.clone(), false).into(),
            RelationDecl::new("r", [node], true).into(),
        ])
        .unwrap()
    }

    #[test]
    fn unrecorded_tuples_stay_absent() {
        let program = program();
        let t = Translator::new(&program);
        let mut m = Model::new(t.program_to_signature(false).unwrap()).unwrap();
        m.add_elem("a", "node").unwrap();
        m.add_elem("b", "node").unwrap();
        m.add_constant("zero", "a").unwrap();
        m.add_relation("r", ["b"], true).unwrap();

        let state = t.model_to_state(&m).unwrap();
        let r = program.relation("r").unwrap();
        let interp = state.trace().relation(r, 0).unwrap();
        assert_eq!(interp.len(), 1);
        assert_eq!(interp.get(&vec!["b".to_string()]), Some(&true));
        assert_eq!(state.trace().universe("node"), ["a", "b"]);
    }

    #[test]
    fn missing_constants_are_errors() {
        let program = program();
        let t = Translator::new(&program);
        let mut m = Model::new(t.program_to_signature(false).unwrap()).unwrap();
        m.add_elem("a", "node").unwrap();
        assert!(
            t.model_to_state(&m)
                .unwrap_err()
                .is_uninterpreted_constant()
        );
    }

    #[test]
    fn single_state_models_lack_post_state_symbols() {
        let program = program();
        let t = Translator::new(&program);
        let mut m = Model::new(t.program_to_signature(false).unwrap()).unwrap();
        m.add_elem("a", "node").unwrap();
        m.add_constant("zero", "a").unwrap();
        assert!(t.two_state_model_to_trace(&m).unwrap_err().is_unknown_symbol());
    }
}
