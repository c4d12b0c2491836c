use std::{fmt, io, path::PathBuf};

/// Errors that can occur while synthesizing an interface
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parsing file {file} failed: {message}")]
    ParseError { file: String, message: String },

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("failed printing {part} of method {method}: {reason}")]
    SignatureError {
        method: String,
        part: SignaturePart,
        reason: String,
    },

    #[error(transparent)]
    ImportError(#[from] ImportConflict),

    #[error("parsing import `{0}` failed")]
    InvalidImport(String),

    #[error(
        "Failed to format generated code. This could be a bug in ifacegen. The generated code was:\n{source_code}\nError: {reason}"
    )]
    FormatError { reason: String, source_code: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("{}: {source}", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Which half of a method signature failed to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePart {
    Parameters,
    Results,
}

impl fmt::Display for SignaturePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignaturePart::Parameters => f.write_str("parameters"),
            SignaturePart::Results => f.write_str("return values"),
        }
    }
}

/// Inconsistent aliasing detected while merging imports across files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportConflict {
    #[error("package {path:?} imported multiple times with different aliases: {}, {}", display_alias(.existing), display_alias(.requested))]
    AliasMismatch {
        path: String,
        existing: String,
        requested: String,
    },

    #[error("import alias {alias} already in use")]
    AliasInUse { alias: String, path: String },
}

/// Renders an absent alias as `<none>` so it never shows up as blank text.
pub fn display_alias(alias: &str) -> &str {
    if alias.is_empty() { "<none>" } else { alias }
}

/// Result type alias for ifacegen operations
pub type Result<T> = std::result::Result<T, Error>;
