//! The automaton model.
//!
//! Identities are canonicalized at construction time: state names are stored
//! uppercased and symbols are single uppercase alphanumeric characters, so
//! equality and hashing stay the standard derived ones. Declaration order is
//! preserved for symbols and states; the transition table is keyed by
//! (symbol, source state), which makes determinism a structural property
//! rather than a checked one.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A state, identified by its canonical (uppercase) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A deterministic edge: (symbol, source) -> destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub symbol: char,
    pub from: State,
    pub to: State,
}

impl Transition {
    pub fn new(symbol: char, from: impl AsRef<str>, to: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.to_ascii_uppercase(),
            from: State::new(from),
            to: State::new(to),
        }
    }
}

/// Serializable image of the full automaton, used by persistence.
///
/// States are listed in declaration order; transitions are sorted by
/// (symbol, source) so the artifact is stable and inspectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonSnapshot {
    pub symbols: Vec<char>,
    pub states: Vec<String>,
    pub initial: Option<String>,
    pub finals: Vec<String>,
    pub transitions: Vec<Transition>,
}

/// The deterministic finite automaton.
///
/// Mutators enforce the model invariants at insertion time: canonical
/// identities, unique states, at most one transition per (symbol, source)
/// pair. Accessors hand out read-only views only.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    /// Declared symbols in declaration order, deduplicated.
    symbols: Vec<char>,
    /// Declared states in declaration order, deduplicated.
    states: Vec<State>,
    initial: Option<State>,
    finals: HashSet<State>,
    /// (symbol, source) -> destination.
    transitions: HashMap<(char, State), State>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// Adds symbols, uppercasing each and silently discarding anything that
    /// is not a single alphanumeric character. Idempotent for duplicates;
    /// duplicate reporting is the interpreter's concern.
    pub fn add_symbols(&mut self, chars: impl IntoIterator<Item = char>) {
        for c in chars {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_alphanumeric() && !self.symbols.contains(&c) {
                self.symbols.push(c);
            }
        }
    }

    pub fn has_symbol(&self, c: char) -> bool {
        self.symbols.contains(&c.to_ascii_uppercase())
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    // =========================================================================
    // States
    // =========================================================================

    /// Adds states by name, skipping names already declared. The very first
    /// state ever added becomes the initial state.
    pub fn add_states<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        for name in names {
            self.ensure_state(name.as_ref());
        }
    }

    /// Resolves a state by name, appending it if missing, and returns it.
    fn ensure_state(&mut self, name: &str) -> State {
        let state = State::new(name);
        if !self.states.contains(&state) {
            self.states.push(state.clone());
            if self.initial.is_none() {
                self.initial = Some(state.clone());
            }
        }
        state
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains(&State::new(name))
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    // =========================================================================
    // Initial and final states
    // =========================================================================

    /// Sets the initial state, creating it if it was never declared.
    /// Last write wins.
    pub fn set_initial_state(&mut self, name: &str) {
        let state = self.ensure_state(name);
        self.initial = Some(state);
    }

    pub fn initial_state(&self) -> Option<&State> {
        self.initial.as_ref()
    }

    /// Marks states as final, creating any that were never declared.
    pub fn add_final_states<S: AsRef<str>>(&mut self, names: impl IntoIterator<Item = S>) {
        for name in names {
            let state = self.ensure_state(name.as_ref());
            self.finals.insert(state);
        }
    }

    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    pub fn final_states(&self) -> &HashSet<State> {
        &self.finals
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Inserts transitions. An incoming transition replaces any existing one
    /// with the same (symbol, source) key; the table never holds two entries
    /// for one key.
    pub fn add_transitions(&mut self, transitions: impl IntoIterator<Item = Transition>) {
        for t in transitions {
            self.transitions
                .insert((t.symbol.to_ascii_uppercase(), t.from), t.to);
        }
    }

    /// Looks up the unique destination for (symbol, source), if any.
    pub fn transition(&self, symbol: char, from: &State) -> Option<&State> {
        self.transitions.get(&(symbol.to_ascii_uppercase(), from.clone()))
    }

    /// All transitions, sorted by (symbol, source) for deterministic output.
    pub fn transitions(&self) -> Vec<Transition> {
        let mut list: Vec<Transition> = self
            .transitions
            .iter()
            .map(|((symbol, from), to)| Transition {
                symbol: *symbol,
                from: from.clone(),
                to: to.clone(),
            })
            .collect();
        list.sort_by(|a, b| (a.symbol, &a.from).cmp(&(b.symbol, &b.from)));
        list
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Empties every collection and unsets the initial state.
    pub fn clear(&mut self) {
        self.symbols.clear();
        self.states.clear();
        self.initial = None;
        self.finals.clear();
        self.transitions.clear();
    }

    /// Captures the full model for persistence.
    pub fn to_snapshot(&self) -> AutomatonSnapshot {
        AutomatonSnapshot {
            symbols: self.symbols.clone(),
            states: self.states.iter().map(|s| s.as_str().to_string()).collect(),
            initial: self.initial.as_ref().map(|s| s.as_str().to_string()),
            finals: {
                let mut finals: Vec<String> =
                    self.finals.iter().map(|s| s.as_str().to_string()).collect();
                finals.sort();
                finals
            },
            transitions: self.transitions(),
        }
    }

    /// Rebuilds an automaton from a snapshot, replaying the image through the
    /// regular mutators so every insertion-time invariant is re-enforced.
    pub fn from_snapshot(snapshot: AutomatonSnapshot) -> Self {
        let mut automaton = Self::new();
        automaton.add_symbols(snapshot.symbols);
        automaton.add_states(&snapshot.states);
        automaton.add_final_states(&snapshot.finals);
        automaton.add_transitions(snapshot.transitions);
        if let Some(initial) = &snapshot.initial {
            automaton.set_initial_state(initial);
        }
        tracing::debug!(
            "snapshot rebuild complete: {} states, {} transitions",
            automaton.states.len(),
            automaton.transitions.len()
        );
        automaton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_canonicalized_and_deduplicated() {
        let mut a = Automaton::new();
        a.add_symbols("ab1A!?".chars());

        assert_eq!(a.symbols(), &['A', 'B', '1']);
        assert!(a.has_symbol('a'));
        assert!(a.has_symbol('B'));
        assert!(!a.has_symbol('!'));
    }

    #[test]
    fn test_first_state_becomes_initial() {
        let mut a = Automaton::new();
        a.add_states(["s0", "s1"]);

        assert_eq!(a.initial_state().unwrap().as_str(), "S0");
        assert_eq!(a.states().len(), 2);
    }

    #[test]
    fn test_states_unique_case_insensitive() {
        let mut a = Automaton::new();
        a.add_states(["q0", "Q0", "q1"]);

        assert_eq!(a.states().len(), 2);
        assert!(a.has_state("q0"));
        assert!(a.has_state("Q1"));
    }

    #[test]
    fn test_set_initial_creates_missing_state() {
        let mut a = Automaton::new();
        a.add_states(["s0"]);
        a.set_initial_state("s9");

        assert_eq!(a.initial_state().unwrap().as_str(), "S9");
        assert!(a.has_state("s9"));
    }

    #[test]
    fn test_initial_last_write_wins() {
        let mut a = Automaton::new();
        a.add_states(["s0", "s1"]);
        a.set_initial_state("s1");
        a.set_initial_state("s0");

        assert_eq!(a.initial_state().unwrap().as_str(), "S0");
    }

    #[test]
    fn test_final_states_auto_declare() {
        let mut a = Automaton::new();
        a.add_final_states(["s9"]);

        assert!(a.has_state("s9"));
        assert!(a.is_final(&State::new("S9")));
        // Auto-declared state was the first ever, so it is also initial.
        assert_eq!(a.initial_state().unwrap().as_str(), "S9");
    }

    #[test]
    fn test_transition_replace_on_conflict() {
        let mut a = Automaton::new();
        a.add_symbols(['a']);
        a.add_states(["s0", "s1", "s2"]);

        a.add_transitions([Transition::new('a', "s0", "s1")]);
        a.add_transitions([Transition::new('A', "S0", "s2")]);

        assert_eq!(a.transitions().len(), 1);
        assert_eq!(
            a.transition('a', &State::new("s0")).unwrap().as_str(),
            "S2"
        );
    }

    #[test]
    fn test_transitions_sorted() {
        let mut a = Automaton::new();
        a.add_symbols(['a', 'b']);
        a.add_states(["s1", "s0"]);
        a.add_transitions([
            Transition::new('b', "s1", "s0"),
            Transition::new('a', "s1", "s1"),
            Transition::new('a', "s0", "s1"),
        ]);

        let list = a.transitions();
        let keys: Vec<(char, &str)> = list.iter().map(|t| (t.symbol, t.from.as_str())).collect();
        assert_eq!(keys, vec![('A', "S0"), ('A', "S1"), ('B', "S1")]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut a = Automaton::new();
        a.add_symbols(['a']);
        a.add_states(["s0"]);
        a.add_final_states(["s0"]);
        a.add_transitions([Transition::new('a', "s0", "s0")]);

        a.clear();

        assert!(a.symbols().is_empty());
        assert!(a.states().is_empty());
        assert!(a.initial_state().is_none());
        assert!(a.final_states().is_empty());
        assert!(a.transitions().is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut a = Automaton::new();
        a.add_symbols(['a', 'b']);
        a.add_states(["s0", "s1"]);
        a.set_initial_state("s0");
        a.add_final_states(["s1"]);
        a.add_transitions([
            Transition::new('a', "s0", "s1"),
            Transition::new('b', "s1", "s1"),
        ]);

        let restored = Automaton::from_snapshot(a.to_snapshot());

        assert_eq!(restored.symbols(), a.symbols());
        assert_eq!(restored.states(), a.states());
        assert_eq!(restored.initial_state(), a.initial_state());
        assert_eq!(restored.final_states(), a.final_states());
        assert_eq!(restored.transitions(), a.transitions());
    }
}
