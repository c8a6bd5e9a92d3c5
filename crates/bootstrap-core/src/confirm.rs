//! Confirmation before setting up a non-empty directory

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Source of yes/no answers
pub trait Prompt {
    /// Ask `question` and return the raw answer, or `None` once input is exhausted
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Interpret an answer: `Some(true)` for y/yes, `Some(false)` for n/no
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask until the answer is yes or no. Exhausted input counts as no.
pub fn confirm<P: Prompt + ?Sized>(prompt: &mut P, question: &str) -> io::Result<bool> {
    loop {
        let Some(answer) = prompt.ask(question)? else {
            return Ok(false);
        };
        match parse_answer(&answer) {
            Some(decision) => return Ok(decision),
            None => tracing::debug!(answer = %answer, "unrecognized confirmation answer"),
        }
    }
}

/// Whether `dir` has no entries; a directory that does not exist yet counts as empty
pub fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_none()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}

/// Decide whether the pipeline may run in `destination`
///
/// Empty destinations and `use_defaults` proceed without asking.
pub fn confirm_destination<P: Prompt + ?Sized>(
    destination: &Path,
    use_defaults: bool,
    prompt: &mut P,
) -> io::Result<bool> {
    if use_defaults || is_empty_dir(destination)? {
        return Ok(true);
    }

    let question = format!(
        "Directory {} is not empty. Continue anyway? (y/n)",
        destination.display()
    );
    confirm(prompt, &question)
}

/// Prompt over plain line-based streams (stdin/stdout when no terminal is attached)
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
