//! Append-only command/output log (`LOG` command).
//!
//! One sink at a time: starting a new log closes the previous file first,
//! and every appended line is flushed immediately so the log stays visible
//! even on abrupt termination.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct CommandLog {
    writer: Option<BufWriter<File>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts logging to `path`, truncating it. Any open sink is closed
    /// first; on failure logging ends up disabled.
    pub fn start(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.stop();
        let file = File::create(path.as_ref())?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    /// Closes the sink if one is open. Returns whether logging was enabled.
    pub fn stop(&mut self) -> bool {
        match self.writer.take() {
            Some(mut writer) => {
                let _ = writer.flush();
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Appends one line and flushes. A failing sink is dropped rather than
    /// surfaced to the command that happened to trigger the write.
    pub fn append(&mut self, line: &str) {
        if let Some(writer) = self.writer.as_mut() {
            let result = writeln!(writer, "{line}").and_then(|_| writer.flush());
            if let Err(e) = result {
                tracing::warn!("log sink write failed, disabling logging: {e}");
                self.writer = None;
            }
        }
    }
}

impl Drop for CommandLog {
    fn drop(&mut self) {
        self.stop();
    }
}
