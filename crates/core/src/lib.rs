//! ifacegen - Generate Go interfaces from the method sets of concrete types
//!
//! This crate provides functionality to:
//! - Parse Go source files and collect the exported methods of a named type
//! - Qualify unqualified exported types with the package of the source type
//! - Merge the imports of contributing files and detect alias conflicts
//! - Emit a formatted Go file declaring the interface
pub mod collector;
pub mod config;
pub mod emitter;
pub mod error;
pub mod format;
pub mod imports;
pub mod maker;
pub mod parser;
pub mod qualifier;
pub mod sources;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, ImportConflict, Result};
pub use types::*;

// Re-export main API components
pub use collector::MethodCollector;
pub use config::Options;
pub use format::{BuiltinFormatter, CodeFormatter, CommandFormatter, FormatterKind};
pub use imports::ImportRegistry;
pub use maker::{InterfaceMaker, generate};
pub use qualifier::TypeQualifier;
pub use sources::collect_go_files;
