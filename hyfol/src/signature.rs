//! Many-sorted first-order signatures.
//!
//! A signature is built incrementally: register the sorts, then the symbols
//! over them, then call [`Signature::finalize_sorts`]. Models are only
//! constructed over finalized signatures, and no sort may be added after
//! finalization. Constants, relations and functions share one namespace.
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    sorts: BTreeSet<String>,
    constants: BTreeMap<String, String>,
    relations: BTreeMap<String, Vec<String>>,
    functions: BTreeMap<String, (Vec<String>, String)>,
    finalized: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sort`. Registering a sort twice is harmless.
    pub fn add_sort(&mut self, sort: impl Into<String>) -> Result<(), Error> {
        let sort = sort.into();
        if self.finalized && !self.sorts.contains(&sort) {
            return Err(Error::SortsFinalized { sort });
        }
        self.sorts.insert(sort);
        Ok(())
    }

    fn check_sort(&self, sort: &str) -> Result<(), Error> {
        if self.sorts.contains(sort) {
            Ok(())
        } else {
            Err(Error::UnknownSort {
                sort: sort.to_string(),
            })
        }
    }

    fn check_fresh(&self, name: &str) -> Result<(), Error> {
        if self.has_symbol(name) {
            Err(Error::DuplicateSymbol {
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn collect_sorts(
        &self,
        sorts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Vec<String>, Error> {
        sorts
            .into_iter()
            .map(|s| {
                let s = s.into();
                self.check_sort(&s).map(|()| s)
            })
            .collect()
    }

    pub fn add_constant(
        &mut self,
        name: impl Into<String>,
        sort: impl Into<String>,
    ) -> Result<(), Error> {
        let (name, sort) = (name.into(), sort.into());
        self.check_fresh(&name)?;
        self.check_sort(&sort)?;
        self.constants.insert(name, sort);
        Ok(())
    }

    pub fn add_relation(
        &mut self,
        name: impl Into<String>,
        arity: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), Error> {
        let name = name.into();
        self.check_fresh(&name)?;
        let arity = self.collect_sorts(arity)?;
        self.relations.insert(name, arity);
        Ok(())
    }

    pub fn add_function(
        &mut self,
        name: impl Into<String>,
        arity: impl IntoIterator<Item = impl Into<String>>,
        sort: impl Into<String>,
    ) -> Result<(), Error> {
        let (name, sort) = (name.into(), sort.into());
        self.check_fresh(&name)?;
        let arity = self.collect_sorts(arity)?;
        self.check_sort(&sort)?;
        self.functions.insert(name, (arity, sort));
        Ok(())
    }

    /// Close the sort set. Idempotent.
    pub fn finalize_sorts(&mut self) {
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn sorts(&self) -> impl Iterator<Item = &str> {
        self.sorts.iter().map(String::as_str)
    }

    pub fn has_sort(&self, sort: &str) -> bool {
        self.sorts.contains(sort)
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.constants.contains_key(name)
            || self.relations.contains_key(name)
            || self.functions.contains_key(name)
    }

    /// Sort of the constant `name`.
    pub fn constant(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(String::as_str)
    }

    /// Argument sorts of the relation `name`.
    pub fn relation(&self, name: &str) -> Option<&[String]> {
        self.relations.get(name).map(Vec::as_slice)
    }

    /// Argument sorts and result sort of the function `name`.
    pub fn function(&self, name: &str) -> Option<(&[String], &str)> {
        self.functions
            .get(name)
            .map(|(arity, sort)| (arity.as_slice(), sort.as_str()))
    }

    pub fn constants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constants.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }

    pub fn relations(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.relations
            .iter()
            .map(|(n, a)| (n.as_str(), a.as_slice()))
    }

    pub fn functions(&self) -> impl Iterator<Item = (&str, &[String], &str)> {
        self.functions
            .iter()
            .map(|(n, (a, s))| (n.as_str(), a.as_slice(), s.as_str()))
    }

    /// Number of constants, relations and functions.
    pub fn num_symbols(&self) -> usize {
        self.constants.len() + self.relations.len() + self.functions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_share_one_namespace() {
        let mut sig = Signature::new();
        sig.add_sort("Node").unwrap();
        sig.add_constant("x", "Node").unwrap();
        assert_eq!(
            sig.add_relation("x", ["Node"]).unwrap_err(),
            Error::DuplicateSymbol {
                name: "x".to_string()
            }
        );
        sig.add_function("f", ["Node", "Node"], "Node").unwrap();
        assert_eq!(sig.function("f").map(|(a, _)| a.len()), Some(2));
        assert_eq!(sig.num_symbols(), 2);
    }

    #[test]
    fn unknown_sorts_are_rejected() {
        let mut sig = Signature::new();
        sig.add_sort("Node").unwrap();
        let err = sig.add_relation("r", ["Node", "Quorum"]).unwrap_err();
        assert!(err.is_unknown_sort());
        assert!(!sig.has_symbol("r"));
    }

    #[test]
    fn finalized_sort_set_is_closed() {
        let mut sig = Signature::new();
        sig.add_sort("Node").unwrap();
        sig.finalize_sorts();
        sig.add_sort("Node").unwrap();
        assert!(sig.add_sort("Quorum").unwrap_err().is_sorts_finalized());
        assert_eq!(sig.sorts().collect::<Vec<_>>(), vec!["Node"]);
    }
}
