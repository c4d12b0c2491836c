//! Extraction of exported method signatures bound to a target type

use crate::{
    error::{Error, Result, SignaturePart},
    parser::{CompilationUnit, Declaration, FunctionDecl, render_fields, render_type},
    qualifier::TypeQualifier,
    types::MethodSignature,
};
use std::collections::HashSet;
use tracing::debug;

/// Collects the exported method set of one type across many compilation units.
///
/// The first declaration of a method name wins; later declarations with the same name are
/// ignored.
#[derive(Debug)]
pub struct MethodCollector {
    type_name: String,
    copy_docs: bool,
    qualifier: TypeQualifier,
    methods: Vec<MethodSignature>,
    seen: HashSet<String>,
}

impl MethodCollector {
    pub fn new(type_name: impl Into<String>, copy_docs: bool) -> Self {
        Self {
            type_name: type_name.into(),
            copy_docs,
            qualifier: TypeQualifier::default(),
            methods: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: TypeQualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn set_qualifier(&mut self, qualifier: TypeQualifier) {
        self.qualifier = qualifier;
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn qualifier(&self) -> &TypeQualifier {
        &self.qualifier
    }

    /// Scan `unit` for exported methods of the target type.
    ///
    /// Returns whether the unit declares at least one exported method of the type, counting
    /// methods skipped as duplicates. Only such units take part in import collection.
    pub fn collect(&mut self, unit: &CompilationUnit) -> Result<bool> {
        let mut has_methods = false;
        for declaration in unit.declarations() {
            let Declaration::Function(func) = declaration else {
                continue;
            };
            if func.receiver_type_name(unit.source()) != Some(self.type_name.as_str()) {
                continue;
            }
            if !func.is_exported() {
                continue;
            }

            has_methods = true;
            if self.seen.contains(func.name) {
                debug!("Skipping duplicate method {} in {}", func.name, unit.file());
                continue;
            }

            let method = self.signature(&func, unit.source())?;
            debug!("Collected {}.{} from {}", self.type_name, method.name, unit.file());
            self.seen.insert(method.name.clone());
            self.methods.push(method);
        }
        Ok(has_methods)
    }

    fn signature(&self, func: &FunctionDecl<'_>, source: &str) -> Result<MethodSignature> {
        let fail = |part: SignaturePart| {
            move |e: crate::parser::RenderError| Error::SignatureError {
                method: func.name.to_string(),
                part,
                reason: e.to_string(),
            }
        };

        let params = match func.parameters {
            Some(list) => render_fields(list, source, &self.qualifier)
                .map_err(fail(SignaturePart::Parameters))?,
            None => String::new(),
        };
        let results = match func.result {
            Some(list) if list.kind() == "parameter_list" => {
                render_fields(list, source, &self.qualifier).map_err(fail(SignaturePart::Results))?
            }
            Some(ty) => render_type(ty, source)
                .map(|t| self.qualifier.qualify(&t))
                .map_err(fail(SignaturePart::Results))?,
            None => String::new(),
        };

        let docs = if self.copy_docs {
            func.docs.iter().map(|d| d.to_string()).collect()
        } else {
            Vec::new()
        };

        Ok(MethodSignature::new(
            func.name,
            format!("{}({params}) ({results})", func.name),
        )
        .with_docs(docs))
    }

    /// Collected methods in first-seen order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    pub fn into_methods(self) -> Vec<MethodSignature> {
        self.methods
    }
}
