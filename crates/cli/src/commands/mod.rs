pub mod generate;
pub mod types;

pub use generate::{GenerateArgs, generate_command};
pub use types::types_command;
