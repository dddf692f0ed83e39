//! Signature construction from program declarations.
use hyfol::signature::Signature;
use hyprog::decls::SymbolDecl;
use log::debug;

use crate::{error::TransResult, translator::Translator};

impl Translator<'_> {
    /// Build the external signature of the program.
    ///
    /// Every sort and symbol is registered under its own name. In two-state
    /// mode each mutable symbol is registered a second time under its primed
    /// name, with the same shape. The sort set is finalized.
    pub fn program_to_signature(&self, two_state: bool) -> TransResult<Signature> {
        let mut sig = Signature::new();
        for sort in self.program().sorts() {
            sig.add_sort(sort.name.as_str())?;
        }

        for symbol in self.program().relations_constants_and_functions() {
            let arity = symbol
                .arity()
                .iter()
                .map(|s| self.sort_name(s))
                .collect::<TransResult<Vec<_>>>()?;

            for &timing in Self::timings(symbol.is_mutable(), two_state) {
                let name = self.external_name(symbol.name(), timing)?;
                match symbol {
                    SymbolDecl::Constant(c) => sig.add_constant(name, self.sort_name(&c.sort)?)?,
                    SymbolDecl::Relation(_) => sig.add_relation(name, arity.iter().copied())?,
                    SymbolDecl::Function(f) => {
                        sig.add_function(name, arity.iter().copied(), self.sort_name(&f.sort)?)?
                    }
                }
            }
        }

        sig.finalize_sorts();
        debug!(
            "Built {} signature with {} sort(s) and {} symbol(s)",
            if two_state { "two-state" } else { "single-state" },
            sig.sorts().count(),
            sig.num_symbols()
        );
        Ok(sig)
    }
}
