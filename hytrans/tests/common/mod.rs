#![allow(dead_code)]

use hyfol::formula::{Formula, Term};
use hyprog::{
    decls::{
        ConstantDecl, DefinitionDecl, FunctionDecl, ModifiesClause, RelationDecl, SortDecl,
    },
    expr::{Binder, Expr, SortedVar},
    program::Program,
    sort::Sort,
    trace::Trace,
};
use rand::Rng;

pub fn sort(name: &str) -> Sort {
    Sort::uninterpreted(name)
}

pub fn var(name: &str, s: &str) -> SortedVar {
    SortedVar::new(name, sort(s))
}

/// Mutable `R(Node)`, immutable `zero: Node` and the transition `T`, which
/// toggles every `R(n)`.
pub fn toggle_program() -> Program {
    let r = |n: &str| Expr::app("R", [Expr::id(n)]);
    Program::new(vec![
        SortDecl::new("Node").into(),
        RelationDecl::new("R", [sort("Node")], true).into(),
        ConstantDecl::new("zero", sort("Node"), false).into(),
        DefinitionDecl::transition(
            "T",
            Binder::default(),
            [ModifiesClause::new("R")],
            Expr::forall([var("n", "Node")], Expr::iff(r("n"), !Expr::old(r("n")))),
        )
        .into(),
    ])
    .unwrap()
}

/// A lock service over two sorts, with every kind of symbol.
pub fn lock_program() -> Program {
    let locked = |n: Expr| Expr::app("locked", [n]);
    Program::new(vec![
        SortDecl::new("node").into(),
        SortDecl::new("quorum").into(),
        ConstantDecl::new("zero", sort("node"), false).into(),
        ConstantDecl::new("q0", sort("quorum"), false).into(),
        ConstantDecl::new("leader", sort("node"), true).into(),
        RelationDecl::new("le", [sort("node"), sort("node")], false).into(),
        RelationDecl::new("member", [sort("node"), sort("quorum")], false).into(),
        RelationDecl::new("locked", [sort("node")], true).into(),
        RelationDecl::new("flag", [], true).into(),
        RelationDecl::new("has_lock", [sort("node")], true)
            .derived_by(Expr::exists(
                [var("n", "node")],
                locked(Expr::id("n")),
            ))
            .into(),
        FunctionDecl::new("next", [sort("node")], sort("node"), true).into(),
        FunctionDecl::new("owner", [sort("quorum")], sort("node"), false).into(),
        // lock(n): n takes the lock and raises the flag
        DefinitionDecl::transition(
            "lock",
            Binder::new([var("n", "node")]),
            [ModifiesClause::new("locked"), ModifiesClause::new("flag")],
            Expr::and([
                !Expr::old(locked(Expr::id("n"))),
                Expr::forall(
                    [var("x", "node")],
                    Expr::iff(
                        locked(Expr::id("x")),
                        Expr::old(locked(Expr::id("x"))) | Expr::equal(Expr::id("x"), Expr::id("n")),
                    ),
                ),
                Expr::id("flag"),
            ]),
        )
        .into(),
        // elect(n, q): the owner of a quorum containing n becomes leader
        DefinitionDecl::transition(
            "elect",
            Binder::new([var("n", "node"), var("q", "quorum")]),
            [ModifiesClause::new("leader"), ModifiesClause::new("next")],
            Expr::and([
                Expr::app("member", [Expr::id("n"), Expr::id("q")]),
                Expr::equal(Expr::id("leader"), Expr::app("owner", [Expr::id("q")])),
                Expr::forall(
                    [var("x", "node")],
                    Expr::equal(
                        Expr::app("next", [Expr::id("x")]),
                        Expr::old(Expr::app("next", [Expr::app("next", [Expr::id("x")])])),
                    ),
                ),
            ]),
        )
        .into(),
    ])
    .unwrap()
}

/// Every tuple over the given universes, in lexicographic order.
pub fn tuples(universes: &[&[String]]) -> Vec<Vec<String>> {
    universes.iter().fold(vec![Vec::new()], |acc, universe| {
        acc.iter()
            .flat_map(|prefix| {
                universe.iter().map(move |e| {
                    let mut t = prefix.clone();
                    t.push(e.clone());
                    t
                })
            })
            .collect()
    })
}

fn pick(rng: &mut impl Rng, elems: &[String]) -> String {
    elems[rng.random_range(0..elems.len())].clone()
}

fn universe<'t>(trace: &'t Trace, s: &Sort) -> &'t [String] {
    trace.universe(s.name().unwrap_or_default())
}

/// A trace of `num_states` states with `size` elements per sort and total
/// interpretations: every relation records every tuple, every function has a
/// value on every tuple and every constant is assigned.
pub fn random_trace(program: &Program, num_states: usize, size: usize, rng: &mut impl Rng) -> Trace {
    let mut trace = Trace::new(num_states);
    for s in program.sorts() {
        let elems: Vec<String> = (0..size).map(|i| format!("{}{}", s.name, i)).collect();
        trace.set_universe(s.name.as_str(), elems);
    }

    let indices = |mutable: bool| if mutable { 0..num_states } else { 0..1 };

    for c in program.constants() {
        for index in indices(c.mutable) {
            let value = pick(rng, universe(&trace, &c.sort));
            trace.set_constant(c, index, value).unwrap();
        }
    }
    for r in program.relations() {
        let universes: Vec<&[String]> = r.arity.iter().map(|s| universe(&trace, s)).collect();
        let all = tuples(&universes);
        for index in indices(r.mutable) {
            for args in &all {
                let value = rng.random_bool(0.5);
                trace.set_relation(r, index, args.iter().cloned(), value).unwrap();
            }
        }
    }
    for f in program.functions() {
        let universes: Vec<&[String]> = f.arity.iter().map(|s| universe(&trace, s)).collect();
        let all = tuples(&universes);
        let range = universe(&trace, &f.sort).to_vec();
        for index in indices(f.mutable) {
            for args in &all {
                let value = pick(rng, &range);
                trace.set_function(f, index, args.iter().cloned(), value).unwrap();
            }
        }
    }
    trace
}

/// A random closed formula over the single-state signature of `program`,
/// well sorted by construction.
pub fn random_formula(program: &Program, depth: usize, rng: &mut impl Rng) -> Formula {
    let mut bound = Vec::new();
    let mut fresh = 0;
    gen_formula(program, depth, &mut bound, &mut fresh, rng)
}

fn gen_term(
    program: &Program,
    s: &str,
    fuel: usize,
    bound: &[(String, String)],
    rng: &mut impl Rng,
) -> Term {
    let mut leaves: Vec<String> = bound
        .iter()
        .filter(|(_, vs)| vs == s)
        .map(|(v, _)| v.clone())
        .collect();
    leaves.extend(
        program
            .constants()
            .filter(|c| c.sort.name() == Some(s))
            .map(|c| c.name.clone()),
    );
    let funcs: Vec<&FunctionDecl> = program
        .functions()
        .filter(|f| f.sort.name() == Some(s))
        .collect();

    if fuel > 0 && !funcs.is_empty() && rng.random_bool(0.3) {
        let f = funcs[rng.random_range(0..funcs.len())];
        let args: Vec<Term> = f
            .arity
            .iter()
            .map(|a| gen_term(program, a.name().unwrap_or_default(), fuel - 1, bound, rng))
            .collect();
        return Term::func(f.name.as_str(), args);
    }
    Term::var(leaves[rng.random_range(0..leaves.len())].as_str())
}

fn gen_atom(program: &Program, bound: &[(String, String)], rng: &mut impl Rng) -> Formula {
    let relations: Vec<&RelationDecl> = program.relations().collect();
    if rng.random_bool(0.25) {
        let sorts: Vec<&str> = program.sorts().map(|s| s.name.as_str()).collect();
        let s = sorts[rng.random_range(0..sorts.len())];
        return Formula::equal(
            gen_term(program, s, 1, bound, rng),
            gen_term(program, s, 1, bound, rng),
        );
    }
    let r = relations[rng.random_range(0..relations.len())];
    let args: Vec<Term> = r
        .arity
        .iter()
        .map(|a| gen_term(program, a.name().unwrap_or_default(), 1, bound, rng))
        .collect();
    Formula::relation(r.name.as_str(), args)
}

fn gen_formula(
    program: &Program,
    depth: usize,
    bound: &mut Vec<(String, String)>,
    fresh: &mut usize,
    rng: &mut impl Rng,
) -> Formula {
    if depth == 0 || rng.random_bool(0.15) {
        return gen_atom(program, bound, rng);
    }
    match rng.random_range(0..=6) {
        0 | 1 => {
            let n = rng.random_range(2..=3);
            let args = (0..n)
                .map(|_| gen_formula(program, depth - 1, bound, fresh, rng))
                .collect::<Vec<_>>();
            if rng.random_bool(0.5) {
                Formula::And(args)
            } else {
                Formula::Or(args)
            }
        }
        2 => Formula::not(gen_formula(program, depth - 1, bound, fresh, rng)),
        3 => Formula::implies(
            gen_formula(program, depth - 1, bound, fresh, rng),
            gen_formula(program, depth - 1, bound, fresh, rng),
        ),
        4 => Formula::iff(
            gen_formula(program, depth - 1, bound, fresh, rng),
            gen_formula(program, depth - 1, bound, fresh, rng),
        ),
        _ => {
            let sorts: Vec<String> = program.sorts().map(|s| s.name.clone()).collect();
            let s = sorts[rng.random_range(0..sorts.len())].clone();
            let v = format!("v{}", *fresh);
            *fresh += 1;
            bound.push((v.clone(), s.clone()));
            let body = gen_formula(program, depth - 1, bound, fresh, rng);
            bound.pop();
            if rng.random_bool(0.5) {
                Formula::forall(v, s, body)
            } else {
                Formula::exists(v, s, body)
            }
        }
    }
}
