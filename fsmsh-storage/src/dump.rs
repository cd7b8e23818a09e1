//! Human-readable configuration dump.
//!
//! One fixed layout serves both `PRINT` on the console and `PRINT <file>`:
//! symbols in declaration order, states and final states sorted by name,
//! transitions sorted by (symbol, source).

use crate::error::StorageError;
use fsmsh_core::Automaton;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Renders the full configuration as a multi-line string.
pub fn render_configuration(automaton: &Automaton) -> String {
    let mut out = String::new();

    let mut line = String::from("SYMBOLS");
    for c in automaton.symbols() {
        let _ = write!(line, " {c}");
    }
    out.push_str(&line);
    out.push('\n');

    let mut states: Vec<&str> = automaton.states().iter().map(|s| s.as_str()).collect();
    states.sort_unstable();
    let mut line = String::from("STATES");
    for s in states {
        let _ = write!(line, " {s}");
    }
    out.push_str(&line);
    out.push('\n');

    let mut line = String::from("INITIAL STATE");
    if let Some(initial) = automaton.initial_state() {
        let _ = write!(line, " {initial}");
    }
    out.push_str(&line);
    out.push('\n');

    let mut finals: Vec<&str> = automaton
        .final_states()
        .iter()
        .map(|s| s.as_str())
        .collect();
    finals.sort_unstable();
    let mut line = String::from("FINAL STATES");
    for s in finals {
        let _ = write!(line, " {s}");
    }
    out.push_str(&line);
    out.push('\n');

    out.push_str("TRANSITIONS");
    for t in automaton.transitions() {
        let _ = write!(out, "\n{} {} {}", t.symbol, t.from, t.to);
    }
    out.push('\n');

    out
}

/// Writes the configuration to `path` in the same layout as
/// [`render_configuration`].
pub fn write_configuration(
    automaton: &Automaton,
    path: impl AsRef<Path>,
) -> Result<(), StorageError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_configuration(automaton).as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsmsh_core::Transition;
    use tempfile::TempDir;

    fn sample() -> Automaton {
        let mut a = Automaton::new();
        a.add_symbols(['b', 'a']);
        a.add_states(["s1", "s0"]);
        a.set_initial_state("s0");
        a.add_final_states(["s1"]);
        a.add_transitions([
            Transition::new('b', "s1", "s1"),
            Transition::new('a', "s0", "s1"),
        ]);
        a
    }

    #[test]
    fn test_render_layout() {
        let text = render_configuration(&sample());
        let expected = "\
SYMBOLS B A
STATES S0 S1
INITIAL STATE S0
FINAL STATES S1
TRANSITIONS
A S0 S1
B S1 S1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_model() {
        let text = render_configuration(&Automaton::new());
        assert_eq!(
            text,
            "SYMBOLS\nSTATES\nINITIAL STATE\nFINAL STATES\nTRANSITIONS\n"
        );
    }

    #[test]
    fn test_write_configuration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");

        write_configuration(&sample(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, render_configuration(&sample()));
    }
}
