//! Interactive REPL.

use colored::Colorize;
use fsmsh_shell::{CommandSource, Interpreter};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::Path;

pub fn run(script: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} v{}",
        "fsmsh".bold().cyan(),
        env!("CARGO_PKG_VERSION")
    );

    let mut interpreter = Interpreter::new();
    let mut source = CommandSource::new();

    // Replay the startup script, if any, before handing over the prompt.
    if let Some(path) = script {
        let text = std::fs::read_to_string(path)?;
        for (command, line_no) in CommandSource::split_script(&text) {
            let outcome = interpreter.process(&command, line_no);
            for line in outcome.lines {
                println!("{line}");
            }
            if outcome.quit {
                return Ok(());
            }
        }
    }

    // Create readline editor
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    // Load history
    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".fsmsh_history"))
        .unwrap_or_else(|_| ".fsmsh_history".into());
    let _ = rl.load_history(&history_path);

    println!("Commands end with ';' and may span lines.\n");

    loop {
        // Continuation prompt while a command is still unterminated.
        let prompt = if source.has_pending() {
            format!("{} ", "....>".dimmed())
        } else {
            format!("{} ", "fsmsh>".cyan())
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                for (command, line_no) in source.push_line(&line) {
                    let outcome = interpreter.process(&command, line_no);
                    for line in outcome.lines {
                        println!("{line}");
                    }
                    if outcome.quit {
                        let _ = rl.save_history(&history_path);
                        return Ok(());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                source.reset();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);

    Ok(())
}
