//! Declarations of a transition-system program.
//!
//! A program is an ordered list of [`Decl`]: sorts, symbols (constants,
//! relations, functions) carrying a `mutable` flag, and named definitions
//! describing transitions. Symbols are the only declarations that have an
//! interpretation in a state; [`SymbolDecl`] gives uniform, borrowed access to
//! the three symbol kinds.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIs, EnumTryAs};

use crate::{
    expr::{Binder, Expr},
    sort::Sort,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortDecl {
    pub name: String,
}

impl SortDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstantDecl {
    pub name: String,
    pub sort: Sort,
    pub mutable: bool,
}

impl ConstantDecl {
    pub fn new(name: impl Into<String>, sort: Sort, mutable: bool) -> Self {
        Self {
            name: name.into(),
            sort,
            mutable,
        }
    }
}

/// A relation over uninterpreted sorts.
///
/// A derived relation carries the formula defining it in terms of other
/// symbols. Its value in a state is a consequence of that definition: it is
/// never framed on its own and its interpretation is not re-derived by the
/// translation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationDecl {
    pub name: String,
    pub arity: Vec<Sort>,
    pub mutable: bool,
    pub derived: Option<Expr>,
}

impl RelationDecl {
    pub fn new(name: impl Into<String>, arity: impl IntoIterator<Item = Sort>, mutable: bool) -> Self {
        Self {
            name: name.into(),
            arity: arity.into_iter().collect(),
            mutable,
            derived: None,
        }
    }

    /// Turn this relation into a derived relation defined by `axiom`.
    pub fn derived_by(mut self, axiom: Expr) -> Self {
        self.derived = Some(axiom);
        self
    }

    pub fn is_derived(&self) -> bool {
        self.derived.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDecl {
    pub name: String,
    pub arity: Vec<Sort>,
    pub sort: Sort,
    pub mutable: bool,
}

impl FunctionDecl {
    pub fn new(
        name: impl Into<String>,
        arity: impl IntoIterator<Item = Sort>,
        sort: Sort,
        mutable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            arity: arity.into_iter().collect(),
            sort,
            mutable,
        }
    }
}

/// One entry of the modifies-clause of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModifiesClause {
    pub name: String,
}

impl ModifiesClause {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named, formula-valued definition.
///
/// Two-state definitions describe transitions: the `binder` lists the
/// transition parameters (existentially closed when the transition is
/// encoded), `body` relates the pre-state (through `old(..)`) to the
/// post-state, and `mods` lists the symbols the transition may change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefinitionDecl {
    pub name: String,
    pub binder: Binder,
    pub body: Expr,
    pub mods: Vec<ModifiesClause>,
    pub two_state: bool,
}

impl DefinitionDecl {
    /// Build a two-state transition definition.
    pub fn transition(
        name: impl Into<String>,
        binder: Binder,
        mods: impl IntoIterator<Item = ModifiesClause>,
        body: Expr,
    ) -> Self {
        Self {
            name: name.into(),
            binder,
            body,
            mods: mods.into_iter().collect(),
            two_state: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs, EnumDiscriminants)]
#[strum_discriminants(name(DeclKind))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Decl {
    Sort(SortDecl),
    Constant(ConstantDecl),
    Relation(RelationDecl),
    Function(FunctionDecl),
    Definition(DefinitionDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Sort(d) => &d.name,
            Decl::Constant(d) => &d.name,
            Decl::Relation(d) => &d.name,
            Decl::Function(d) => &d.name,
            Decl::Definition(d) => &d.name,
        }
    }

    /// View this declaration as a symbol, if it is one.
    pub fn as_symbol(&self) -> Option<SymbolDecl<'_>> {
        match self {
            Decl::Constant(d) => Some(SymbolDecl::Constant(d)),
            Decl::Relation(d) => Some(SymbolDecl::Relation(d)),
            Decl::Function(d) => Some(SymbolDecl::Function(d)),
            Decl::Sort(_) | Decl::Definition(_) => None,
        }
    }
}

impl From<SortDecl> for Decl {
    fn from(value: SortDecl) -> Self {
        Decl::Sort(value)
    }
}

impl From<ConstantDecl> for Decl {
    fn from(value: ConstantDecl) -> Self {
        Decl::Constant(value)
    }
}

impl From<RelationDecl> for Decl {
    fn from(value: RelationDecl) -> Self {
        Decl::Relation(value)
    }
}

impl From<FunctionDecl> for Decl {
    fn from(value: FunctionDecl) -> Self {
        Decl::Function(value)
    }
}

impl From<DefinitionDecl> for Decl {
    fn from(value: DefinitionDecl) -> Self {
        Decl::Definition(value)
    }
}

static BOOL_SORT: Sort = Sort::Bool;

/// Borrowed view over a declaration that has an interpretation in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum SymbolDecl<'a> {
    Constant(&'a ConstantDecl),
    Relation(&'a RelationDecl),
    Function(&'a FunctionDecl),
}

impl<'a> SymbolDecl<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            SymbolDecl::Constant(d) => &d.name,
            SymbolDecl::Relation(d) => &d.name,
            SymbolDecl::Function(d) => &d.name,
        }
    }

    pub fn is_mutable(&self) -> bool {
        match self {
            SymbolDecl::Constant(d) => d.mutable,
            SymbolDecl::Relation(d) => d.mutable,
            SymbolDecl::Function(d) => d.mutable,
        }
    }

    /// Only relations can be derived.
    pub fn is_derived(&self) -> bool {
        matches!(self, SymbolDecl::Relation(d) if d.is_derived())
    }

    /// Argument sorts; empty for constants.
    pub fn arity(&self) -> &'a [Sort] {
        match self {
            SymbolDecl::Constant(_) => &[],
            SymbolDecl::Relation(d) => &d.arity,
            SymbolDecl::Function(d) => &d.arity,
        }
    }

    /// Sort of the symbol's value: [`Sort::Bool`] for relations.
    pub fn result_sort(&self) -> &'a Sort {
        match self {
            SymbolDecl::Constant(d) => &d.sort,
            SymbolDecl::Relation(_) => &BOOL_SORT,
            SymbolDecl::Function(d) => &d.sort,
        }
    }
}
