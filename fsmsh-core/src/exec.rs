//! Deterministic execution of input strings.

use crate::automaton::{Automaton, State};
use crate::error::CoreError;
use std::fmt;

/// Result of a completed run: every visited state (initial first) and the
/// acceptance verdict. Formats as `<state> <state> ... YES|NO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    trace: Vec<State>,
    accepted: bool,
}

impl Execution {
    pub fn trace(&self) -> &[State] {
        &self.trace
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.trace {
            write!(f, "{} ", state)?;
        }
        f.write_str(if self.accepted { "YES" } else { "NO" })
    }
}

impl Automaton {
    /// Runs `input` through the transition table from the initial state.
    ///
    /// Consumes the input left to right, uppercasing each character. An
    /// undeclared symbol or a missing transition aborts the run with an
    /// error naming the offending character (and state). Pure read; the
    /// model is never mutated.
    pub fn execute(&self, input: &str) -> Result<Execution, CoreError> {
        let mut current = self.initial_state().ok_or(CoreError::NoInitialState)?;
        let mut trace = vec![current.clone()];

        for c in input.chars() {
            let symbol = c.to_ascii_uppercase();
            if !self.has_symbol(symbol) {
                return Err(CoreError::InvalidSymbol { symbol: c });
            }
            current = self
                .transition(symbol, current)
                .ok_or_else(|| CoreError::MissingTransition {
                    symbol: c,
                    state: current.as_str().to_string(),
                })?;
            trace.push(current.clone());
        }

        Ok(Execution {
            accepted: self.is_final(current),
            trace,
        })
    }
}
