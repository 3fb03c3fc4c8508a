//! Terminal input and prompt handling.

use std::io::Write;
use std::thread::JoinHandle;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

pub const PROMPT: &str = "liar-auction> ";

/// Redisplay the prompt after printing a server event
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Read lines on a dedicated thread, since rustyline blocks.
///
/// Blank lines are dropped. The thread stops on Ctrl+C, Ctrl+D, or once the
/// receiving side is gone, which closes `lines`.
pub fn spawn_line_reader(lines: mpsc::UnboundedSender<String>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let line = match editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    return;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            editor.add_history_entry(line).ok();
            if lines.send(line.to_string()).is_err() {
                return;
            }
        }
    })
}
