//! Assembly of the generated interface file

use crate::{
    error::{Error, Result},
    format::CodeFormatter,
    types::InterfaceSpec,
};
use tracing::debug;

pub const GENERATED_COMMENT: &str = "// Code generated by ifacegen. DO NOT EDIT.";

/// Assemble the unformatted source for `spec`.
///
/// The output is valid Go but deliberately untidy: import lines keep an empty alias token
/// and result lists are always parenthesized. The formatter cleans both up.
pub fn render(spec: &InterfaceSpec) -> String {
    let mut output: Vec<String> = Vec::new();
    if !spec.omit_generated_comment {
        output.push(GENERATED_COMMENT.to_string());
    }
    output.push(String::new());
    output.push(format!("package {}", spec.package_name));

    output.push("import (".to_string());
    output.extend(spec.imports.iter().map(ToString::to_string));
    output.push(")".to_string());

    if let Some(qualifier) = spec.qualifier.as_deref().filter(|q| !q.is_empty()) {
        output.push(format!(
            "var _ {} = (*{}.{})(nil)",
            spec.interface_name, qualifier, spec.type_name
        ));
    }

    output.push(format!("type {} interface {{", spec.interface_name));
    for method in &spec.methods {
        output.extend(method.lines().map(str::to_string));
    }
    output.push("}".to_string());

    output.join("\n")
}

/// Assemble and format. Formatter failures carry the unformatted text.
pub fn emit(spec: &InterfaceSpec, formatter: &dyn CodeFormatter) -> Result<String> {
    let unformatted = render(spec);
    debug!(
        "Formatting {} bytes with {} formatter",
        unformatted.len(),
        formatter.name()
    );
    formatter.format(&unformatted).map_err(|e| match e {
        Error::FormatError { reason, .. } => Error::FormatError {
            reason,
            source_code: unformatted.clone(),
        },
        other => Error::FormatError {
            reason: other.to_string(),
            source_code: unformatted.clone(),
        },
    })
}
