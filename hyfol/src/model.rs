//! Finite models over a finalized [`Signature`].
//!
//! Elements are named and belong to exactly one sort; names are unique within
//! a sort. Interpretations are partial: a relation is false on every tuple it
//! does not record, while a constant or function without a value cannot be
//! evaluated.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{signature::Signature, utils::Error};

/// Index of an element in its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElemId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Element {
    name: String,
    sort: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    signature: Signature,
    elems: Vec<Element>,
    universes: BTreeMap<String, Vec<ElemId>>,
    by_name: BTreeMap<(String, String), ElemId>,
    constants: BTreeMap<String, ElemId>,
    relations: BTreeMap<String, BTreeMap<Vec<ElemId>, bool>>,
    functions: BTreeMap<String, BTreeMap<Vec<ElemId>, ElemId>>,
}

impl Model {
    /// Create an empty model. The signature must be finalized.
    pub fn new(signature: Signature) -> Result<Self, Error> {
        if !signature.is_finalized() {
            return Err(Error::SignatureNotFinalized);
        }
        let universes = signature
            .sorts()
            .map(|s| (s.to_string(), Vec::new()))
            .collect();
        Ok(Self {
            signature,
            elems: Vec::new(),
            universes,
            by_name: BTreeMap::new(),
            constants: BTreeMap::new(),
            relations: BTreeMap::new(),
            functions: BTreeMap::new(),
        })
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Add the element `name` to the universe of `sort`.
    pub fn add_elem(
        &mut self,
        name: impl Into<String>,
        sort: impl Into<String>,
    ) -> Result<ElemId, Error> {
        let (name, sort) = (name.into(), sort.into());
        let Some(universe) = self.universes.get_mut(&sort) else {
            return Err(Error::UnknownSort { sort });
        };
        let key = (sort, name);
        if self.by_name.contains_key(&key) {
            let (sort, name) = key;
            return Err(Error::DuplicateElement { name, sort });
        }

        let id = ElemId(self.elems.len() as u32);
        universe.push(id);
        self.elems.push(Element {
            name: key.1.clone(),
            sort: key.0.clone(),
        });
        self.by_name.insert(key, id);
        Ok(id)
    }

    /// Find the element called `name` in the universe of `sort`.
    pub fn elem(&self, sort: &str, name: &str) -> Option<ElemId> {
        self.by_name
            .get(&(sort.to_string(), name.to_string()))
            .copied()
    }

    /// The element `name` of `sort`. An element of that name in another
    /// universe is a sort mismatch rather than an unknown element.
    fn resolve(&self, sort: &str, name: &str) -> Result<ElemId, Error> {
        if let Some(id) = self.elem(sort, name) {
            return Ok(id);
        }
        match self.elems.iter().find(|e| e.name == name) {
            Some(other) => Err(Error::SortMismatch {
                name: name.to_string(),
                expected: sort.to_string(),
                found: other.sort.clone(),
            }),
            None => Err(Error::UnknownElement {
                name: name.to_string(),
                sort: sort.to_string(),
            }),
        }
    }

    fn resolve_args<S: AsRef<str>>(
        &self,
        symbol: &str,
        arity: &[String],
        args: impl IntoIterator<Item = S>,
    ) -> Result<Vec<ElemId>, Error> {
        let args: Vec<S> = args.into_iter().collect();
        if args.len() != arity.len() {
            return Err(Error::ArityMismatch {
                name: symbol.to_string(),
                expected: arity.len(),
                found: args.len(),
            });
        }
        arity
            .iter()
            .zip(&args)
            .map(|(sort, arg)| self.resolve(sort, arg.as_ref()))
            .collect()
    }

    /// Interpret the constant `name` as the element called `value`.
    pub fn add_constant(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let Some(sort) = self.signature.constant(name) else {
            return Err(Error::UnknownSymbol {
                kind: "constant",
                name: name.to_string(),
            });
        };
        if self.constants.contains_key(name) {
            return Err(Error::ConstantAlreadyAssigned {
                name: name.to_string(),
            });
        }
        let id = self.resolve(sort, value)?;
        self.constants.insert(name.to_string(), id);
        Ok(())
    }

    /// Record that the relation `name` has truth value `value` on `args`.
    pub fn add_relation<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: impl IntoIterator<Item = S>,
        value: bool,
    ) -> Result<(), Error> {
        let Some(arity) = self.signature.relation(name) else {
            return Err(Error::UnknownSymbol {
                kind: "relation",
                name: name.to_string(),
            });
        };
        let args = self.resolve_args(name, arity, args)?;
        self.relations
            .entry(name.to_string())
            .or_default()
            .insert(args, value);
        Ok(())
    }

    /// Record that the function `name` maps `args` to the element `value`.
    pub fn add_function<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: impl IntoIterator<Item = S>,
        value: &str,
    ) -> Result<(), Error> {
        let Some((arity, sort)) = self.signature.function(name) else {
            return Err(Error::UnknownSymbol {
                kind: "function",
                name: name.to_string(),
            });
        };
        let args = self.resolve_args(name, arity, args)?;
        let value = self.resolve(sort, value)?;
        self.functions
            .entry(name.to_string())
            .or_default()
            .insert(args, value);
        Ok(())
    }

    /// Elements of `sort`, in insertion order.
    pub fn elems(&self, sort: &str) -> &[ElemId] {
        self.universes.get(sort).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the elements of `sort`, in insertion order.
    pub fn universe(&self, sort: &str) -> impl Iterator<Item = &str> {
        self.elems(sort).iter().map(|&id| self.name(id))
    }

    pub fn num_elems(&self) -> usize {
        self.elems.len()
    }

    pub fn name(&self, id: ElemId) -> &str {
        &self.elems[id.0 as usize].name
    }

    pub fn sort_of(&self, id: ElemId) -> &str {
        &self.elems[id.0 as usize].sort
    }

    pub fn constant(&self, name: &str) -> Option<ElemId> {
        self.constants.get(name).copied()
    }

    /// Recorded tuples of the relation `name`.
    pub fn relation(&self, name: &str) -> Option<&BTreeMap<Vec<ElemId>, bool>> {
        self.relations.get(name)
    }

    /// Recorded values of the function `name`.
    pub fn function(&self, name: &str) -> Option<&BTreeMap<Vec<ElemId>, ElemId>> {
        self.functions.get(name)
    }

    /// Truth value of the relation `name` on `args`; false when unrecorded.
    pub fn holds(&self, name: &str, args: &[ElemId]) -> bool {
        self.relations
            .get(name)
            .and_then(|interp| interp.get(args))
            .copied()
            .unwrap_or(false)
    }
}
