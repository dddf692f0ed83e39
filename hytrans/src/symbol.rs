//! External names of program symbols.
//!
//! In a two-state context every mutable symbol has two identities: its
//! pre-state copy, named like the symbol, and its post-state copy, named with
//! the configured prime suffix appended. Immutable symbols only have the
//! pre-state identity.
use strum::EnumIs;

use crate::{
    config::TranslationConfig,
    error::{TransError, TransResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIs)]
pub enum Timing {
    Pre,
    Post,
}

impl Timing {
    /// Timing of an occurrence of a symbol. Immutable symbols and occurrences
    /// in an old scope refer to the pre-state.
    pub fn resolve(mutable: bool, old: bool) -> Self {
        if mutable && !old {
            Timing::Post
        } else {
            Timing::Pre
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub timing: Timing,
}

impl<'a> Symbol<'a> {
    pub fn pre(name: &'a str) -> Self {
        Self {
            name,
            timing: Timing::Pre,
        }
    }

    pub fn post(name: &'a str) -> Self {
        Self {
            name,
            timing: Timing::Post,
        }
    }

    /// Name of this symbol in the external signature.
    pub fn external_name(&self, config: &TranslationConfig) -> TransResult<String> {
        if self.name.contains(config.prime_suffix.as_str()) {
            return Err(TransError::PrimedName {
                name: self.name.to_string(),
                suffix: config.prime_suffix.clone(),
            });
        }
        Ok(match self.timing {
            Timing::Pre => self.name.to_string(),
            Timing::Post => format!("{}{}", self.name, config.prime_suffix),
        })
    }

    /// Recover the symbol behind an external name.
    pub fn parse(external: &'a str, config: &TranslationConfig) -> Self {
        match external.strip_suffix(config.prime_suffix.as_str()) {
            Some(name) => Self::post(name),
            None => Self::pre(external),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_resolution() {
        assert_eq!(Timing::resolve(true, false), Timing::Post);
        assert_eq!(Timing::resolve(true, true), Timing::Pre);
        assert_eq!(Timing::resolve(false, false), Timing::Pre);
        assert_eq!(Timing::resolve(false, true), Timing::Pre);
    }

    #[test]
    fn external_names() {
        let config = TranslationConfig::default();
        assert_eq!(Symbol::post("R").external_name(&config).unwrap(), "R'");
        assert_eq!(Symbol::pre("R").external_name(&config).unwrap(), "R");
        assert!(
            Symbol::pre("R'")
                .external_name(&config)
                .unwrap_err()
                .is_primed_name()
        );

        assert_eq!(Symbol::parse("R'", &config), Symbol::post("R"));
        assert_eq!(Symbol::parse("zero", &config), Symbol::pre("zero"));
    }
}
