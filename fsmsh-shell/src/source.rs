//! Logical command assembly.
//!
//! Raw definition text is split on the statement separator `;`. A command
//! may span several physical lines; continuation segments are joined with a
//! single space. Blank segments (including bare terminators) are dropped
//! rather than handed to the interpreter as empty commands.

/// Stateful splitter turning raw lines into `(command, line_number)` pairs.
///
/// The reported line number is the line the terminator appeared on, which is
/// what diagnostics reference.
#[derive(Debug, Default)]
pub struct CommandSource {
    pending: String,
    line: usize,
}

impl CommandSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line and returns every command completed by it.
    /// Unterminated trailing text is carried over to the next call.
    pub fn push_line(&mut self, raw: &str) -> Vec<(String, usize)> {
        self.line += 1;
        let mut completed = Vec::new();

        let mut rest = raw;
        while let Some(idx) = rest.find(';') {
            self.append_segment(&rest[..idx]);
            rest = &rest[idx + 1..];

            let command = std::mem::take(&mut self.pending);
            if !command.is_empty() {
                completed.push((command, self.line));
            }
        }
        self.append_segment(rest);

        completed
    }

    fn append_segment(&mut self, segment: &str) {
        let segment = segment.trim();
        if segment.is_empty() {
            return;
        }
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(segment);
    }

    /// True if an unterminated command is being accumulated.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drops any accumulated partial command (interrupt handling).
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Splits a whole script in one pass.
    pub fn split_script(text: &str) -> Vec<(String, usize)> {
        let mut source = Self::new();
        text.lines()
            .flat_map(|line| source.push_line(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_command() {
        let mut s = CommandSource::new();
        assert_eq!(
            s.push_line("SYMBOLS a b;"),
            vec![("SYMBOLS a b".to_string(), 1)]
        );
        assert!(!s.has_pending());
    }

    #[test]
    fn test_multi_line_command() {
        let mut s = CommandSource::new();
        assert!(s.push_line("TRANSITIONS a s0 s1,").is_empty());
        assert!(s.has_pending());
        assert_eq!(
            s.push_line("  b s1 s1;"),
            vec![("TRANSITIONS a s0 s1, b s1 s1".to_string(), 2)]
        );
    }

    #[test]
    fn test_multiple_commands_on_one_line() {
        let mut s = CommandSource::new();
        assert_eq!(
            s.push_line("STATES s0; SYMBOLS a;"),
            vec![
                ("STATES s0".to_string(), 1),
                ("SYMBOLS a".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_blank_segments_skipped() {
        let mut s = CommandSource::new();
        assert!(s.push_line(";").is_empty());
        assert!(s.push_line("   ; ;").is_empty());
        assert!(s.push_line("").is_empty());
        assert!(!s.has_pending());
    }

    #[test]
    fn test_line_numbers_reference_terminator() {
        let mut s = CommandSource::new();
        s.push_line("STATES");
        s.push_line("  s0");
        let out = s.push_line("  s1;");
        assert_eq!(out, vec![("STATES s0 s1".to_string(), 3)]);
    }

    #[test]
    fn test_split_script() {
        let script = "SYMBOLS a b;\nSTATES s0\n  s1;\n;\nEXECUTE ab;";
        let out = CommandSource::split_script(script);
        assert_eq!(
            out,
            vec![
                ("SYMBOLS a b".to_string(), 1),
                ("STATES s0 s1".to_string(), 3),
                ("EXECUTE ab".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_reset_drops_partial() {
        let mut s = CommandSource::new();
        s.push_line("TRANSITIONS a s0");
        s.reset();
        assert!(!s.has_pending());
        assert_eq!(s.push_line("CLEAR;"), vec![("CLEAR".to_string(), 2)]);
    }
}
