mod common;

use hyfol::formula::Formula;
use hyprog::decls::ModifiesClause;
use hytrans::Translator;

use common::{lock_program, toggle_program};

fn mods(names: &[&str]) -> Vec<ModifiesClause> {
    names.iter().map(|n| ModifiesClause::new(*n)).collect()
}

#[test]
fn one_axiom_per_framed_symbol() {
    let program = lock_program();
    let t = Translator::new(&program);

    // mutable, non-derived: leader, locked, flag, next
    let axioms = t.frame_axioms(&[]).unwrap();
    let rendered: Vec<String> = axioms.iter().map(|a| a.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "leader = leader'",
            "forall __arg_0:node. locked(__arg_0) <-> locked'(__arg_0)",
            "flag <-> flag'",
            "forall __arg_0:node. next(__arg_0) = next'(__arg_0)",
        ]
    );
}

#[test]
fn modified_symbols_are_not_framed() {
    let program = lock_program();
    let t = Translator::new(&program);

    let f = t.frame_to_formula(&mods(&["locked", "flag"])).unwrap();
    let Formula::And(axioms) = &f else {
        panic!("expected a conjunction, got {}", f);
    };
    assert_eq!(axioms.len(), 2);
    let symbols = f.symbols();
    assert!(!symbols.contains("locked") && !symbols.contains("flag'"));
    assert!(symbols.contains("leader'") && symbols.contains("next'"));
    assert!(!symbols.contains("has_lock"));
}

#[test]
fn nothing_to_frame_gives_the_empty_conjunction() {
    let program = toggle_program();
    let f = hytrans::frame_to_formula(&program, &mods(&["R"])).unwrap();
    assert_eq!(f, Formula::top());
    assert_eq!(f.to_string(), "true");
}

#[test]
fn unknown_modified_symbols_are_rejected() {
    let program = toggle_program();
    let err = hytrans::frame_to_formula(&program, &mods(&["S"])).unwrap_err();
    assert!(err.is_unknown_symbol());
}

#[test]
fn frame_variables_follow_the_configured_prefix() {
    let program = lock_program();
    let config = hytrans::TranslationConfig {
        frame_var_prefix: "a".to_string(),
        ..Default::default()
    };
    let t = Translator::with_config(&program, config).unwrap();
    let axioms = t.frame_axioms(&mods(&["leader", "flag", "next"])).unwrap();
    assert_eq!(axioms.len(), 1);
    assert_eq!(axioms[0].to_string(), "forall a0:node. locked(a0) <-> locked'(a0)");
}
