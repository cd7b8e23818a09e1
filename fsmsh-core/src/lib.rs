//! # fsmsh-core
//!
//! DFA engine for fsmsh.
//!
//! This crate provides:
//! - The automaton model: symbols, states, initial/final states, transitions
//! - Incremental mutation with canonicalized (case-insensitive) identities
//! - Deterministic execution of input strings against the transition table

pub mod automaton;
pub mod error;
pub mod exec;

pub use automaton::{Automaton, AutomatonSnapshot, State, Transition};
pub use error::CoreError;
pub use exec::Execution;
