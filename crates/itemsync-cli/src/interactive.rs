//! The apply confirmation prompt
//!
//! Uses dialoguer when stdin is a terminal. Otherwise one line is read from
//! stdin, so answers can be piped in.

use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};

use itemsync_core::{Confirmation, RunReport};

use crate::output;

pub const APPLY_PROMPT: &str = "Apply changes? (y/N)";

/// Prints the preview, then asks whether to apply it
pub struct ConsolePrompt {
    excerpt: usize,
}

impl ConsolePrompt {
    pub fn new(excerpt: usize) -> Self {
        Self { excerpt }
    }
}

impl Confirmation for ConsolePrompt {
    fn ask(&mut self, preview: &RunReport) -> itemsync_core::Result<String> {
        output::print_preview(preview, self.excerpt);
        println!();
        Ok(read_answer(APPLY_PROMPT)?)
    }
}

/// Read a single answer. End of input counts as an empty answer.
pub fn read_answer(prompt: &str) -> io::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other);
    }

    print!("{prompt}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    println!();
    Ok(line)
}
