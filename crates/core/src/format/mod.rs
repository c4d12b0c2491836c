//! Formatting of the assembled interface source
//!
//! The emitter produces syntactically valid but untidy Go. A [`CodeFormatter`] turns it into
//! the final file: either the built-in printer or an external tool such as `goimports`.

pub mod builtin;
pub mod command;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use builtin::BuiltinFormatter;
pub use command::CommandFormatter;

/// Canonicalises generated Go source
pub trait CodeFormatter {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Format `source`, failing when it is not valid Go.
    fn format(&self, source: &str) -> Result<String>;
}

/// Formatter selection as it appears in configuration and on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatterKind {
    #[default]
    Builtin,
    Goimports,
    Gofmt,
    /// Any other command line, run with the source on stdin
    Command(String),
}

impl FormatterKind {
    pub fn build(&self) -> Box<dyn CodeFormatter> {
        match self {
            FormatterKind::Builtin => Box::new(BuiltinFormatter::new()),
            FormatterKind::Goimports => Box::new(CommandFormatter::goimports()),
            FormatterKind::Gofmt => Box::new(CommandFormatter::gofmt()),
            FormatterKind::Command(line) => Box::new(CommandFormatter::from_command_line(line)),
        }
    }
}

impl From<String> for FormatterKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "builtin" => FormatterKind::Builtin,
            "goimports" => FormatterKind::Goimports,
            "gofmt" => FormatterKind::Gofmt,
            _ => FormatterKind::Command(value.trim().to_string()),
        }
    }
}

impl From<&str> for FormatterKind {
    fn from(value: &str) -> Self {
        FormatterKind::from(value.to_string())
    }
}

impl From<FormatterKind> for String {
    fn from(value: FormatterKind) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Builtin => f.write_str("builtin"),
            FormatterKind::Goimports => f.write_str("goimports"),
            FormatterKind::Gofmt => f.write_str("gofmt"),
            FormatterKind::Command(line) => f.write_str(line),
        }
    }
}
