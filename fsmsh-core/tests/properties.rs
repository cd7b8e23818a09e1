//! Property tests for the automaton model and execution engine.

use fsmsh_core::{Automaton, State, Transition};
use proptest::prelude::*;
use std::collections::HashSet;

fn state_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,6}"
}

fn symbol() -> impl Strategy<Value = char> {
    prop_oneof![proptest::char::range('a', 'z'), proptest::char::range('0', '9')]
}

proptest! {
    /// Re-running the same input against the same model yields an
    /// identical trace string.
    #[test]
    fn execution_deterministic(
        names in proptest::collection::vec(state_name(), 1..5),
        symbols in proptest::collection::vec(symbol(), 1..4),
        input in "[a-z0-9]{0,12}",
    ) {
        let mut a = Automaton::new();
        a.add_symbols(symbols.iter().copied());
        a.add_states(&names);
        // Self-loop every declared symbol on every state so runs never abort.
        let mut edges = Vec::new();
        for s in a.states() {
            for &c in a.symbols() {
                edges.push(Transition::new(c, s.as_str(), s.as_str()));
            }
        }
        a.add_transitions(edges);

        let first = a.execute(&input).map(|e| e.to_string());
        let second = a.execute(&input).map(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    /// After any sequence of inserts, at most one transition exists per
    /// (symbol, source) pair, and the last insert for a pair wins.
    #[test]
    fn single_transition_per_pair(
        names in proptest::collection::vec(state_name(), 2..5),
        edges in proptest::collection::vec(
            (symbol(), 0usize..4, 0usize..4),
            1..20
        ),
    ) {
        let mut a = Automaton::new();
        a.add_symbols(edges.iter().map(|(c, _, _)| *c));
        a.add_states(&names);

        let states: Vec<State> = a.states().to_vec();
        for (c, from, to) in &edges {
            let from = &states[from % states.len()];
            let to = &states[to % states.len()];
            a.add_transitions([Transition::new(*c, from.as_str(), to.as_str())]);
        }

        let table = a.transitions();
        let keys: HashSet<(char, &str)> =
            table.iter().map(|t| (t.symbol, t.from.as_str())).collect();
        prop_assert_eq!(keys.len(), table.len());

        // Last write wins for every pair.
        for (c, from, to) in edges.iter().rev() {
            let from = &states[from % states.len()];
            let to = &states[to % states.len()];
            prop_assert_eq!(a.transition(*c, from), Some(to));
            break;
        }
    }

    /// Redeclaring states and symbols never changes the model.
    #[test]
    fn redeclaration_idempotent(
        names in proptest::collection::vec(state_name(), 1..6),
        symbols in proptest::collection::vec(symbol(), 1..6),
    ) {
        let mut a = Automaton::new();
        a.add_symbols(symbols.iter().copied());
        a.add_states(&names);

        let before_states = a.states().to_vec();
        let before_symbols = a.symbols().to_vec();
        let before_initial = a.initial_state().cloned();

        a.add_symbols(symbols.iter().copied());
        a.add_states(&names);

        prop_assert_eq!(a.states(), &before_states[..]);
        prop_assert_eq!(a.symbols(), &before_symbols[..]);
        prop_assert_eq!(a.initial_state().cloned(), before_initial);
    }

    /// Snapshot round-trips reproduce an observably identical model.
    #[test]
    fn snapshot_roundtrip(
        names in proptest::collection::vec(state_name(), 1..5),
        symbols in proptest::collection::vec(symbol(), 1..4),
    ) {
        let mut a = Automaton::new();
        a.add_symbols(symbols.iter().copied());
        a.add_states(&names);
        a.add_final_states([names[0].as_str()]);
        if let Some(c) = a.symbols().first().copied() {
            let s = a.states()[0].as_str().to_string();
            a.add_transitions([Transition::new(c, s.as_str(), s.as_str())]);
        }

        let restored = Automaton::from_snapshot(a.to_snapshot());

        prop_assert_eq!(restored.symbols(), a.symbols());
        prop_assert_eq!(restored.states(), a.states());
        prop_assert_eq!(restored.initial_state(), a.initial_state());
        prop_assert_eq!(restored.final_states(), a.final_states());
        prop_assert_eq!(restored.transitions(), a.transitions());
    }
}
