//! The program: an ordered, validated list of declarations.
//!
//! A [`Program`] is immutable once built. Every consumer receives it
//! explicitly (usually as `&Program`), so several programs can coexist in the
//! same process and be used concurrently.
use std::collections::BTreeMap;

use log::debug;

use crate::{
    decls::{
        ConstantDecl, Decl, DeclKind, DefinitionDecl, FunctionDecl, RelationDecl, SortDecl,
        SymbolDecl,
    },
    expr::Binder,
    sort::Sort,
    utils::Error,
};

/// Namespace a declaration name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Category {
    Sort,
    Symbol,
    Definition,
}

impl From<DeclKind> for Category {
    fn from(value: DeclKind) -> Self {
        match value {
            DeclKind::Sort => Category::Sort,
            DeclKind::Constant | DeclKind::Relation | DeclKind::Function => Category::Symbol,
            DeclKind::Definition => Category::Definition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    decls: Vec<Decl>,
    index: BTreeMap<(Category, String), usize>,
}

impl Program {
    /// Build a program, checking that
    /// 1) names are unique within sorts, symbols and definitions,
    /// 2) every sort referenced by a symbol or binder is declared,
    /// 3) every modifies-clause entry names a declared symbol.
    pub fn new(decls: Vec<Decl>) -> Result<Self, Error> {
        let mut index = BTreeMap::new();

        for (i, decl) in decls.iter().enumerate() {
            let category = Category::from(DeclKind::from(decl));
            if index.insert((category, decl.name().to_string()), i).is_some() {
                return Err(Error::DuplicateDeclaration {
                    name: decl.name().to_string(),
                });
            }
        }

        let program = Self { decls, index };
        program.check_sorts()?;
        program.check_modifies_clauses()?;

        debug!(
            "Program loaded with {} sort(s), {} symbol(s) and {} definition(s).",
            program.sorts().count(),
            program.relations_constants_and_functions().count(),
            program.definitions().count()
        );
        Ok(program)
    }

    fn check_sort(&self, sort: &Sort, context: impl FnOnce() -> String) -> Result<(), Error> {
        match sort {
            Sort::Bool => Ok(()),
            Sort::Uninterpreted(name) if self.has_sort(name) => Ok(()),
            Sort::Uninterpreted(name) => Err(Error::UnknownSort {
                sort: name.clone(),
                context: context(),
            }),
        }
    }

    fn check_binder(&self, binder: &Binder, owner: &str) -> Result<(), Error> {
        for v in &binder.vs {
            self.check_sort(&v.sort, || format!("variable `{}` of `{}`", v.name, owner))?;
        }
        Ok(())
    }

    fn check_sorts(&self) -> Result<(), Error> {
        for decl in &self.decls {
            match decl {
                Decl::Sort(_) => {}
                Decl::Constant(c) => {
                    self.check_sort(&c.sort, || format!("constant `{}`", c.name))?;
                }
                Decl::Relation(r) => {
                    for s in &r.arity {
                        self.check_sort(s, || format!("the arity of relation `{}`", r.name))?;
                    }
                }
                Decl::Function(f) => {
                    for s in &f.arity {
                        self.check_sort(s, || format!("the arity of function `{}`", f.name))?;
                    }
                    self.check_sort(&f.sort, || format!("the result of function `{}`", f.name))?;
                }
                Decl::Definition(d) => self.check_binder(&d.binder, &d.name)?,
            }
        }
        Ok(())
    }

    fn check_modifies_clauses(&self) -> Result<(), Error> {
        for d in self.definitions() {
            for m in &d.mods {
                if self.symbol(&m.name).is_none() {
                    return Err(Error::UnknownModifiedSymbol {
                        definition: d.name.clone(),
                        name: m.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// All declarations, in declaration order.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn sorts(&self) -> impl Iterator<Item = &SortDecl> {
        self.decls.iter().filter_map(|d| d.try_as_sort_ref())
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantDecl> {
        self.decls.iter().filter_map(|d| d.try_as_constant_ref())
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationDecl> {
        self.decls.iter().filter_map(|d| d.try_as_relation_ref())
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.decls.iter().filter_map(|d| d.try_as_function_ref())
    }

    pub fn definitions(&self) -> impl Iterator<Item = &DefinitionDecl> {
        self.decls.iter().filter_map(|d| d.try_as_definition_ref())
    }

    /// Constants, relations and functions, in declaration order.
    pub fn relations_constants_and_functions(&self) -> impl Iterator<Item = SymbolDecl<'_>> {
        self.decls.iter().filter_map(Decl::as_symbol)
    }

    fn lookup(&self, category: Category, name: &str) -> Option<&Decl> {
        self.index
            .get(&(category, name.to_string()))
            .map(|&i| &self.decls[i])
    }

    pub fn has_sort(&self, name: &str) -> bool {
        self.lookup(Category::Sort, name).is_some()
    }

    /// Find the constant, relation or function called `name`.
    pub fn symbol(&self, name: &str) -> Option<SymbolDecl<'_>> {
        self.lookup(Category::Symbol, name).and_then(Decl::as_symbol)
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantDecl> {
        self.symbol(name).and_then(|s| match s {
            SymbolDecl::Constant(c) => Some(c),
            _ => None,
        })
    }

    pub fn relation(&self, name: &str) -> Option<&RelationDecl> {
        self.symbol(name).and_then(|s| match s {
            SymbolDecl::Relation(r) => Some(r),
            _ => None,
        })
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.symbol(name).and_then(|s| match s {
            SymbolDecl::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn definition(&self, name: &str) -> Option<&DefinitionDecl> {
        self.lookup(Category::Definition, name)
            .and_then(|d| d.try_as_definition_ref())
    }
}
