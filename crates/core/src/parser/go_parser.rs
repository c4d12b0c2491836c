use crate::{
    error::{Error, Result},
    parser::{printer::find_error, unit::CompilationUnit},
};
use tree_sitter::{Parser, Tree};

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse without checking for syntax errors.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser.parse(source, None).ok_or_else(|| Error::ParseError {
            file: String::new(),
            message: "Failed to parse source code".to_string(),
        })
    }

    /// Parse a source file into a compilation unit, rejecting files with syntax errors.
    /// `file` is used for error messages only.
    pub fn parse_unit(&mut self, source: impl Into<String>, file: &str) -> Result<CompilationUnit> {
        let source = source.into();
        let tree = self.parse(&source).map_err(|_| Error::ParseError {
            file: file.to_string(),
            message: "Failed to parse source code".to_string(),
        })?;

        if let Some(bad) = find_error(tree.root_node()) {
            let point = bad.start_position();
            let message = if bad.is_missing() {
                format!("{}:{}: missing {}", point.row + 1, point.column + 1, bad.kind())
            } else {
                format!("{}:{}: syntax error", point.row + 1, point.column + 1)
            };
            return Err(Error::ParseError {
                file: file.to_string(),
                message,
            });
        }

        Ok(CompilationUnit::new(file.to_string(), source, tree))
    }
}
