//! The command interpreter.
//!
//! One logical command at a time: tokenize, dispatch on the (case
//! insensitive) leading keyword, validate arguments against the model,
//! mutate it, and report. Malformed input never aborts the session; every
//! diagnostic is a line in the returned [`Outcome`], and one bad unit inside
//! a multi-unit command (a transition group, a state token) only skips that
//! unit. All produced lines, and the command itself, are mirrored to the
//! log sink when one is active.

use crate::log::CommandLog;
use crate::source::CommandSource;
use fsmsh_core::{Automaton, State, Transition};
use fsmsh_storage as storage;

/// Result of processing one logical command.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Response and diagnostic lines, in emission order.
    pub lines: Vec<String>,
    /// True after `EXIT` (possibly replayed from a file): the host loop
    /// should terminate with a success status.
    pub quit: bool,
}

/// The interpreter owns the automaton and the log sink for one session.
#[derive(Debug, Default)]
pub struct Interpreter {
    automaton: Automaton,
    log: CommandLog,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Processes one logical command. `line_no` is used only in diagnostics.
    pub fn process(&mut self, command: &str, line_no: usize) -> Outcome {
        self.log.append(command);
        let outcome = self.dispatch(command, line_no);
        for line in &outcome.lines {
            self.log.append(line);
        }
        if outcome.quit {
            self.log.stop();
        }
        outcome
    }

    fn dispatch(&mut self, command: &str, line_no: usize) -> Outcome {
        let mut lines = Vec::new();
        let mut quit = false;

        let tokens: Vec<&str> = command.split_whitespace().collect();
        let Some(&keyword) = tokens.first() else {
            return Outcome { lines, quit };
        };
        let args = &tokens[1..];

        match keyword.to_ascii_uppercase().as_str() {
            "SYMBOLS" => self.cmd_symbols(args, &mut lines),
            "STATES" => self.cmd_states(args, &mut lines),
            "INITIAL-STATE" => self.cmd_initial_state(args, &mut lines),
            "FINAL-STATES" => self.cmd_final_states(args, &mut lines),
            "TRANSITIONS" => {
                // Groups are comma-separated, so the raw body is needed
                // rather than the whitespace tokens.
                let body = command.trim_start()[keyword.len()..]
                    .trim()
                    .trim_end_matches(';')
                    .trim_end()
                    .to_string();
                self.cmd_transitions(&body, line_no, &mut lines);
            }
            "PRINT" => self.cmd_print(args, &mut lines),
            "EXECUTE" => self.cmd_execute(args, &mut lines),
            "COMPILE" => self.cmd_compile(args, &mut lines),
            "LOAD" => quit = self.cmd_load(args, &mut lines),
            "CLEAR" => self.cmd_clear(args, &mut lines),
            "LOG" => self.cmd_log(args, &mut lines),
            "EXIT" => {
                lines.push("TERMINATED BY USER".to_string());
                quit = true;
            }
            _ => lines.push(format!("Line {line_no}: Error: invalid command {keyword}")),
        }

        Outcome { lines, quit }
    }

    fn cmd_symbols(&mut self, args: &[&str], out: &mut Vec<String>) {
        if args.is_empty() {
            out.push(list_line(
                "SYMBOLS",
                self.automaton.symbols().iter().map(char::to_string),
            ));
            return;
        }

        let mut invalid = Vec::new();
        let mut additions = Vec::new();
        for &tok in args {
            let mut chars = tok.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => {
                    let canonical = c.to_ascii_uppercase();
                    if self.automaton.has_symbol(canonical) || additions.contains(&canonical) {
                        out.push(format!("Warning: symbol {canonical} was already declared"));
                    } else {
                        additions.push(canonical);
                    }
                }
                _ => invalid.push(tok),
            }
        }
        if !invalid.is_empty() {
            out.push(format!("Warning: invalid symbols: {}", invalid.join(" ")));
        }
        self.automaton.add_symbols(additions);
    }

    fn cmd_states(&mut self, args: &[&str], out: &mut Vec<String>) {
        if args.is_empty() {
            out.push(list_line(
                "STATES",
                self.automaton.states().iter().map(|s| s.as_str().to_string()),
            ));
            return;
        }

        for &tok in args {
            let name = tok.trim_end_matches(';');
            if !is_valid_name(name) {
                out.push(format!("Error: invalid state name {tok}"));
            } else if self.automaton.has_state(name) {
                out.push(format!(
                    "Warning: state {} was already declared",
                    name.to_ascii_uppercase()
                ));
            } else {
                self.automaton.add_states([name]);
            }
        }
    }

    fn cmd_initial_state(&mut self, args: &[&str], out: &mut Vec<String>) {
        let Some(&tok) = args.first() else {
            out.push("Error: INITIAL-STATE requires a state name".to_string());
            return;
        };
        let name = tok.trim_end_matches(';');
        if !is_valid_name(name) {
            out.push(format!("Error: invalid state name {tok}"));
            return;
        }
        if !self.automaton.has_state(name) {
            out.push(format!(
                "Warning: state {} was not previously declared",
                name.to_ascii_uppercase()
            ));
        }
        self.automaton.set_initial_state(name);
    }

    fn cmd_final_states(&mut self, args: &[&str], out: &mut Vec<String>) {
        if args.is_empty() {
            out.push("Error: FINAL-STATES requires at least one state".to_string());
            return;
        }

        for &tok in args {
            let name = tok.trim_end_matches(';');
            if !is_valid_name(name) {
                out.push(format!("Error: invalid state name {tok}"));
                continue;
            }
            let canonical = name.to_ascii_uppercase();
            if !self.automaton.has_state(name) {
                out.push(format!(
                    "Warning: state {canonical} was not previously declared"
                ));
                self.automaton.add_final_states([name]);
            } else if self.automaton.is_final(&State::new(name)) {
                out.push(format!(
                    "Warning: state {canonical} was already declared as a final state"
                ));
            } else {
                self.automaton.add_final_states([name]);
            }
        }
    }

    fn cmd_transitions(&mut self, body: &str, line_no: usize, out: &mut Vec<String>) {
        if body.is_empty() {
            return;
        }

        let mut batch = Vec::new();
        for group in body.split(',') {
            let group = group.trim();
            if group.is_empty() {
                continue;
            }
            let elems: Vec<&str> = group.split_whitespace().collect();
            if elems.len() != 3 {
                out.push(format!("Line {line_no}: Error: invalid transition \"{group}\""));
                continue;
            }

            let (sym_tok, from_tok, to_tok) = (elems[0], elems[1], elems[2]);
            let mut chars = sym_tok.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) if self.automaton.has_symbol(c) => c.to_ascii_uppercase(),
                _ => {
                    out.push(format!(
                        "Line {line_no}: Error: {sym_tok} is not a declared symbol"
                    ));
                    continue;
                }
            };
            if !self.automaton.has_state(from_tok) {
                out.push(format!(
                    "Line {line_no}: Error: {} is not a declared state",
                    from_tok.to_ascii_uppercase()
                ));
                continue;
            }
            if !self.automaton.has_state(to_tok) {
                out.push(format!(
                    "Line {line_no}: Error: {} is not a declared state",
                    to_tok.to_ascii_uppercase()
                ));
                continue;
            }

            let from = State::new(from_tok);
            let to = State::new(to_tok);
            // Earlier groups in the same command count as existing too.
            let existing = batch
                .iter()
                .rev()
                .find(|t: &&Transition| t.symbol == symbol && t.from == from)
                .map(|t| &t.to)
                .or_else(|| self.automaton.transition(symbol, &from));
            match existing {
                Some(existing) if *existing == to => out.push(format!(
                    "Warning: transition {symbol} {from} {to} already exists with the same target"
                )),
                Some(_) => out.push(format!(
                    "Warning: transition for {symbol} in state {from} overridden"
                )),
                None => {}
            }
            batch.push(Transition { symbol, from, to });
        }
        self.automaton.add_transitions(batch);
    }

    fn cmd_print(&mut self, args: &[&str], out: &mut Vec<String>) {
        match args.first() {
            None => out.extend(
                storage::render_configuration(&self.automaton)
                    .lines()
                    .map(String::from),
            ),
            Some(&path) => match storage::write_configuration(&self.automaton, path) {
                Ok(()) => out.push(format!("Configuration written to {path}")),
                Err(e) => {
                    tracing::debug!("PRINT to {path} failed: {e}");
                    out.push(format!("Error: cannot write file {path}"));
                }
            },
        }
    }

    fn cmd_execute(&mut self, args: &[&str], out: &mut Vec<String>) {
        let Some(&input) = args.first() else {
            out.push("Error: EXECUTE requires an input string".to_string());
            return;
        };
        match self.automaton.execute(input.trim_end_matches(';')) {
            Ok(execution) => out.push(execution.to_string()),
            Err(e) => out.push(format!("Error: {e}")),
        }
    }

    fn cmd_compile(&mut self, args: &[&str], out: &mut Vec<String>) {
        let Some(&name) = args.first() else {
            out.push("Error: COMPILE requires a filename".to_string());
            return;
        };
        if !storage::is_valid_snapshot_name(name) {
            out.push(format!("Error: invalid snapshot filename {name}"));
            return;
        }
        match storage::save_snapshot(&self.automaton, name) {
            Ok(()) => out.push(format!("Compiled into {name}")),
            Err(e) => {
                tracing::debug!("COMPILE to {name} failed: {e}");
                out.push(format!("Error: cannot create file {name}"));
            }
        }
    }

    /// Returns true if the replayed file contained `EXIT`.
    fn cmd_load(&mut self, args: &[&str], out: &mut Vec<String>) -> bool {
        let Some(&path) = args.first() else {
            out.push("Error: LOAD requires a filename".to_string());
            return false;
        };

        if storage::is_snapshot_path(path) {
            // Whole-model swap: either the new automaton fully loads, or
            // the current one stays in place.
            match storage::load_snapshot(path) {
                Ok(automaton) => {
                    self.automaton = automaton;
                    out.push(format!("Loaded {path}"));
                }
                Err(e) => {
                    tracing::debug!("snapshot load from {path} failed: {e}");
                    out.push(format!("Error: cannot deserialize from {path}"));
                }
            }
            return false;
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                out.push(format!("Error: cannot open file {path}"));
                return false;
            }
        };
        for (command, command_line) in CommandSource::split_script(&text) {
            let outcome = self.dispatch(&command, command_line);
            let quit = outcome.quit;
            out.extend(outcome.lines);
            if quit {
                return true;
            }
        }
        false
    }

    fn cmd_clear(&mut self, args: &[&str], out: &mut Vec<String>) {
        if !args.is_empty() {
            out.push("Error: CLEAR does not take any arguments".to_string());
            return;
        }
        self.automaton.clear();
    }

    fn cmd_log(&mut self, args: &[&str], out: &mut Vec<String>) {
        match args.first() {
            Some(&path) => {
                if let Err(e) = self.log.start(path) {
                    tracing::debug!("LOG to {path} failed: {e}");
                    out.push(format!("Error: cannot create log file {path}"));
                }
            }
            None => {
                if self.log.is_enabled() {
                    // The stop notice is the last line the sink receives
                    // before it closes.
                    self.log.append("STOPPED LOGGING");
                    self.log.stop();
                    out.push("STOPPED LOGGING".to_string());
                } else {
                    out.push("LOGGING was not enabled".to_string());
                }
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

fn list_line(label: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut line = String::from(label);
    for item in items {
        line.push(' ');
        line.push_str(&item);
    }
    line
}
