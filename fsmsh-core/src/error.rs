//! Core error types.

use thiserror::Error;

/// Errors from the DFA engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The input contained a character that is not a declared symbol.
    /// Carries the character as it appeared in the input.
    #[error("invalid symbol {symbol}")]
    InvalidSymbol { symbol: char },

    /// No transition is defined for the given symbol in the current state.
    #[error("no transition for {symbol} in state {state}")]
    MissingTransition { symbol: char, state: String },

    /// Execution was requested before any state was declared.
    #[error("no initial state is set")]
    NoInitialState,
}
