//! Go source parsing using tree-sitter

pub mod go_parser;
pub mod literal;
pub mod printer;
pub mod unit;

// Re-export commonly used items
pub use go_parser::GoParser;
pub use literal::unquote;
pub use printer::{
    RenderError, node_text, render_fields, render_interface_elem, render_result, render_type,
};
pub use unit::{CompilationUnit, Declaration, Field, FunctionDecl, ImportSpec};
