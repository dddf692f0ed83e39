use hyprog::{program::Program, sort::Sort};
use log::trace;

use crate::{
    config::TranslationConfig,
    error::{TransError, TransResult},
    symbol::{Symbol, Timing},
};

/// Translation context: the program every operation refers to, together with
/// the naming and indexing settings.
///
/// A translator only reads the program, so any number of translators may
/// share one program, on one thread or several.
#[derive(Debug, Clone)]
pub struct Translator<'p> {
    program: &'p Program,
    config: TranslationConfig,
}

impl<'p> Translator<'p> {
    /// Translator with the default configuration.
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            config: TranslationConfig::default(),
        }
    }

    pub fn with_config(program: &'p Program, config: TranslationConfig) -> TransResult<Self> {
        config.validate()?;
        trace!("Translator configured with {:?}", config);
        Ok(Self { program, config })
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// External name of `name` at `timing`.
    pub(crate) fn external_name(&self, name: &str, timing: Timing) -> TransResult<String> {
        Symbol { name, timing }.external_name(&self.config)
    }

    /// External sort name of `sort`. Only declared uninterpreted sorts have one.
    pub(crate) fn sort_name<'s>(&self, sort: &'s Sort) -> TransResult<&'s str> {
        match sort {
            Sort::Bool => Err(TransError::UnsupportedSort(sort.to_string())),
            Sort::Uninterpreted(name) if self.program.has_sort(name) => Ok(name),
            Sort::Uninterpreted(name) => Err(TransError::UnknownSort(name.clone())),
        }
    }

    /// Timings under which a symbol appears in a model: the pre-state copy,
    /// plus the post-state copy for mutable symbols of two-state models.
    pub(crate) fn timings(mutable: bool, two_state: bool) -> &'static [Timing] {
        if mutable && two_state {
            &[Timing::Pre, Timing::Post]
        } else {
            &[Timing::Pre]
        }
    }
}
