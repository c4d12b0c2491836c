use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{GenerateArgs, generate_command, types_command};

#[derive(Parser, Debug)]
#[command(name = "ifacegen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an interface from the exported methods of a type
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// List receiver types and how many methods each declares
    #[command(visible_alias = "t")]
    Types {
        /// Go source file or directory to scan (repeatable)
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Print the counts as a JSON object
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate(args) => generate_command(args),
            Commands::Types { files, json } => types_command(&files, json),
        }
    }
}
