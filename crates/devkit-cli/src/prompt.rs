use std::io::{BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Ask a question; returns the trimmed answer, or `default` when the
    /// answer is empty. `None` means the input was closed.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> anyhow::Result<Option<String>> {
        match default {
            Some(d) => write!(self.output, "{question} [{d}]: ")?,
            None => write!(self.output, "{question}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            Ok(Some(default.unwrap_or_default().to_string()))
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    /// Yes/no question defaulting to yes. Closed input counts as no.
    pub fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        write!(self.output, "{question} [Y/n] ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_affirmative(&line))
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
