use anyhow::{Context, Result};
use clap::Args;
use ifacegen_core::{FormatterKind, InterfaceMaker, Options, collect_go_files};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Go source file or directory to scan (repeatable)
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,

    /// Type whose exported methods make up the interface
    #[arg(short, long = "struct")]
    pub struct_name: Option<String>,

    /// Name of the generated interface
    #[arg(short, long = "iface")]
    pub iface: Option<String>,

    /// Package name of the generated file
    #[arg(short, long = "pkg")]
    pub pkg: Option<String>,

    /// Copy method doc comments [default: true]
    #[arg(short, long, value_name = "BOOL")]
    pub doc: Option<bool>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Import path to always include (repeatable)
    #[arg(short, long = "add-import", value_name = "PATH")]
    pub add_imports: Vec<String>,

    /// Qualify unqualified exported types with this package
    #[arg(short, long, value_name = "PKG")]
    pub rewrite: Option<String>,

    /// Leave out the "Code generated" header
    #[arg(long)]
    pub omit_generated_comment: bool,

    /// builtin, goimports, gofmt or a command line reading stdin
    #[arg(long)]
    pub formatter: Option<String>,

    /// JSON file with default options; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the collected interface as JSON instead of Go source
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Options from `--config` (or defaults) with every given flag layered on top.
    pub fn to_options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => {
                debug!("Loading options from {}", path.display());
                Options::load_from_file(path)?
            }
            None => Options::default(),
        };

        if !self.files.is_empty() {
            options.files = self.files.clone();
        }
        if let Some(name) = &self.struct_name {
            options.struct_name = name.clone();
        }
        if let Some(name) = &self.iface {
            options.interface_name = name.clone();
        }
        if let Some(name) = &self.pkg {
            options.package_name = name.clone();
        }
        if let Some(doc) = self.doc {
            options.copy_docs = doc;
        }
        if let Some(output) = &self.output {
            options.output = Some(output.clone());
        }
        if !self.add_imports.is_empty() {
            options.imports = self.add_imports.clone();
        }
        if let Some(package) = &self.rewrite {
            options.qualifier = Some(package.clone());
        }
        if self.omit_generated_comment {
            options.omit_generated_comment = true;
        }
        if let Some(formatter) = &self.formatter {
            options.formatter = FormatterKind::from(formatter.as_str());
        }
        Ok(options)
    }
}

pub fn generate_command(args: GenerateArgs) -> Result<()> {
    let options = args.to_options()?;
    options.validate()?;

    let text = if args.json {
        let files = collect_go_files(&options.files)?;
        let mut maker = InterfaceMaker::from_options(&options)?;
        maker.parse_files(&files)?;
        let spec = maker.spec(&options.package_name, &options.interface_name);
        let mut json = serde_json::to_string_pretty(&spec)?;
        json.push('\n');
        json
    } else {
        ifacegen_core::generate(&options)?
    };

    match &options.output {
        Some(path) => write_output(path, &text),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
