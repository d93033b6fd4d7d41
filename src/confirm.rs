use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Source of yes/no answers for destructive steps.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// `y` or `yes` in any case; everything else, including an empty line, is a no.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Asks on a writer and reads one line back.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{prompt} (y/N): ").context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read confirmation")?;

        // EOF counts as a decline
        if read == 0 {
            writeln!(self.output).ok();
            return Ok(false);
        }

        Ok(is_affirmative(&line))
    }
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        println!("{prompt} (y/N): yes (--yes)");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> bool {
        let mut out = Vec::new();
        let mut c = PromptConfirm::new(Cursor::new(input.as_bytes()), &mut out);
        c.confirm("Delete?").unwrap()
    }

    #[test]
    fn accepts_y_and_yes_in_any_case() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  Yes  \r\n"));
    }

    #[test]
    fn everything_else_declines() {
        assert!(!answer("n\n"));
        assert!(!answer("\n"));
        assert!(!answer("yep\n"));
        assert!(!answer(""));
    }

    #[test]
    fn prompt_is_written() {
        let mut out = Vec::new();
        PromptConfirm::new(Cursor::new(&b"y\n"[..]), &mut out)
            .confirm("Delete 2 folders?")
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Delete 2 folders? (y/N): ");
    }
}
