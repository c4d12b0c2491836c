//! Orchestration of one interface synthesis run

use crate::{
    collector::MethodCollector,
    config::Options,
    emitter,
    error::{Error, Result},
    format::{CodeFormatter, builtin::assumed_package_name},
    imports::ImportRegistry,
    parser::{Declaration, GoParser},
    qualifier::TypeQualifier,
    sources::collect_go_files,
    types::{InterfaceSpec, MethodSignature},
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Generates an interface from the exported methods of one type.
///
/// All state is owned by the maker and lives for one run: methods and imports accumulate
/// across the files fed to it, in the order they are fed.
pub struct InterfaceMaker {
    parser: GoParser,
    collector: MethodCollector,
    imports: ImportRegistry,
    qualifier: Option<String>,
    omit_generated_comment: bool,
}

impl InterfaceMaker {
    pub fn new(struct_name: impl Into<String>, copy_docs: bool) -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            collector: MethodCollector::new(struct_name, copy_docs),
            imports: ImportRegistry::new(),
            qualifier: None,
            omit_generated_comment: false,
        })
    }

    /// A maker configured from `options`: manual imports, qualifier and header flag applied.
    pub fn from_options(options: &Options) -> Result<Self> {
        let mut maker = Self::new(options.struct_name.clone(), options.copy_docs)?;
        for path in &options.imports {
            maker.add_import("", path.clone());
        }
        if let Some(qualifier) = options.qualifier() {
            maker.set_qualifier(qualifier);
        }
        if options.omit_generated_comment {
            maker.omit_generated_comment();
        }
        Ok(maker)
    }

    /// Add an import that is always emitted.
    pub fn add_import(&mut self, alias: impl Into<String>, path: impl Into<String>) {
        self.imports.add_manual(alias, path);
    }

    /// Qualify unqualified exported types with `package` and assert that `*package.Type`
    /// implements the generated interface.
    pub fn set_qualifier(&mut self, package: impl Into<String>) {
        let package = package.into();
        self.collector.set_qualifier(TypeQualifier::new(package.clone()));
        self.qualifier = Some(package).filter(|p| !p.is_empty());
    }

    pub fn omit_generated_comment(&mut self) {
        self.omit_generated_comment = true;
    }

    /// Parse one source file. `file_name` is used in error messages only.
    pub fn parse_source(&mut self, source: &str, file_name: &str) -> Result<()> {
        let unit = self.parser.parse_unit(source, file_name)?;
        let has_methods = self.collector.collect(&unit)?;

        // Files without relevant methods cannot contribute imports, nor conflict over them.
        if !has_methods {
            debug!("No methods of {} in {file_name}", self.collector.type_name());
            return Ok(());
        }
        self.imports.register_unit(&unit)
    }

    /// Read and parse each file, in order.
    pub fn parse_files<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<()> {
        for file in files {
            let file = file.as_ref();
            debug!("Parsing {}", file.display());
            let source = std::fs::read_to_string(file).map_err(|source| Error::FileError {
                path: file.to_path_buf(),
                source,
            })?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            self.parse_source(&source, &name)?;
        }
        Ok(())
    }

    pub fn methods(&self) -> &[MethodSignature] {
        self.collector.methods()
    }

    /// Snapshot of everything collected so far.
    pub fn spec(&self, package_name: &str, interface_name: &str) -> InterfaceSpec {
        InterfaceSpec {
            type_name: self.collector.type_name().to_string(),
            package_name: package_name.to_string(),
            interface_name: interface_name.to_string(),
            qualifier: self.qualifier.clone(),
            methods: self.collector.methods().to_vec(),
            imports: self.imports.entries(),
            omit_generated_comment: self.omit_generated_comment,
        }
    }

    /// Assemble the interface file and run it through `formatter`.
    pub fn make_interface(
        &self,
        package_name: &str,
        interface_name: &str,
        formatter: &dyn CodeFormatter,
    ) -> Result<String> {
        let spec = self.spec(package_name, interface_name);
        if let Some(package) = spec.qualifier.as_deref() {
            if !imports_package(&spec, package) {
                warn!(
                    "No import provides package {package}; add one (-a) unless the formatter resolves it"
                );
            }
        }
        let code = emitter::emit(&spec, formatter)?;
        info!(
            "Generated interface {} with {} method(s) from {}",
            interface_name,
            spec.methods.len(),
            spec.type_name
        );
        Ok(code)
    }

    /// Count method declarations per receiver type across `files` (directories expanded).
    pub fn receiver_counts<P: AsRef<Path>>(paths: &[P]) -> Result<BTreeMap<String, usize>> {
        let mut parser = GoParser::new()?;
        let mut counts = BTreeMap::new();
        for file in collect_go_files(paths)? {
            let source = std::fs::read_to_string(&file).map_err(|source| Error::FileError {
                path: file.clone(),
                source,
            })?;
            let name = file.display().to_string();
            let unit = parser.parse_unit(source, &name)?;
            for declaration in unit.declarations() {
                if let Declaration::Function(func) = declaration {
                    if let Some(receiver) = func.receiver_type_name(unit.source()) {
                        *counts.entry(receiver.to_string()).or_insert(0) += 1;
                    }
                }
            }
        }
        Ok(counts)
    }
}

/// Whether an import of `spec` is referred to as `package`.
fn imports_package(spec: &InterfaceSpec, package: &str) -> bool {
    spec.imports.iter().any(|entry| match entry.alias.as_str() {
        "" => assumed_package_name(&entry.path) == package,
        alias => alias == package,
    })
}

/// Run the whole pipeline described by `options` and return the generated source.
pub fn generate(options: &Options) -> Result<String> {
    options.validate()?;
    let files = collect_go_files(&options.files)?;
    debug!("Scanning {} file(s) for {}", files.len(), options.struct_name);

    let mut maker = InterfaceMaker::from_options(options)?;
    maker.parse_files(&files)?;
    let formatter = options.formatter.build();
    maker.make_interface(
        &options.package_name,
        &options.interface_name,
        formatter.as_ref(),
    )
}
