use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use super::CodeFormatter;

/// Pipes source through an external program (stdin to stdout)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn goimports() -> Self {
        Self::new("goimports", Vec::new())
    }

    pub fn gofmt() -> Self {
        Self::new("gofmt", Vec::new())
    }

    /// Split a command line on whitespace; the first word is the program.
    pub fn from_command_line(line: &str) -> Self {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_default();
        Self::new(program, words.collect())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl CodeFormatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn format(&self, source: &str) -> Result<String> {
        debug!("Running formatter: {} {}", self.program, self.args.join(" "));
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("formatter stdin unavailable"))?;
        let input = source.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| std::io::Error::other("formatter stdin writer panicked"))?;

        // A program that exits early closes its stdin; report the exit status instead.
        if !output.status.success() {
            return Err(Error::FormatError {
                reason: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
                source_code: source.to_string(),
            });
        }
        written?;

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Other(format!("{} produced invalid UTF-8: {e}", self.program)))
    }
}
