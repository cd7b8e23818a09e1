//! # fsmsh-shell
//!
//! Command interpreter for fsmsh.
//!
//! This crate provides:
//! - The logical-command source: `;`-terminated, possibly multi-line
//! - The interpreter: keyword dispatch, validation against the model,
//!   warning/error diagnostics, and model mutation
//! - The append-only command/output log sink behind the `LOG` command

pub mod interpreter;
pub mod log;
pub mod source;

pub use interpreter::{Interpreter, Outcome};
pub use log::CommandLog;
pub use source::CommandSource;
