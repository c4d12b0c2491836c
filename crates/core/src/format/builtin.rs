use crate::{
    error::{Error, Result},
    parser::{CompilationUnit, GoParser, node_text, render_interface_elem, render_type, unquote},
    qualifier::is_ident_char,
};
use std::collections::HashSet;
use tracing::debug;
use tree_sitter::Node;

use super::CodeFormatter;

/// In-process formatter for generated interface files.
///
/// Prints each top-level declaration on canonical lines, tab-indents interface bodies,
/// simplifies result lists the way gofmt does and drops imports that nothing in the file
/// refers to. Imports keep their input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinFormatter;

impl BuiltinFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl CodeFormatter for BuiltinFormatter {
    fn name(&self) -> &str {
        "builtin"
    }

    fn format(&self, source: &str) -> Result<String> {
        let mut parser = GoParser::new()?;
        let unit = parser.parse_unit(source, "<generated>")?;
        Printer::new(&unit).print()
    }
}

/// Name a package is referred to by when imported without an alias: the last path element,
/// skipping a `vN` major-version element, without a `go-` prefix and cut at the first
/// character that cannot appear in an identifier (`yaml.v3` is `yaml`, `go-redis` is
/// `redis`).
pub fn assumed_package_name(path: &str) -> String {
    let mut elements = path.rsplit('/');
    let mut base = elements.next().unwrap_or(path);
    if let Some(version) = base.strip_prefix('v') {
        if !version.is_empty() && version.chars().all(|c| c.is_ascii_digit()) {
            if let Some(parent) = elements.next() {
                base = parent;
            }
        }
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    base.chars().take_while(|&c| is_ident_char(c)).collect()
}

struct Printer<'a> {
    unit: &'a CompilationUnit,
    source: &'a str,
    used: HashSet<&'a str>,
}

impl<'a> Printer<'a> {
    fn new(unit: &'a CompilationUnit) -> Self {
        let source = unit.source();
        let mut used = HashSet::new();
        collect_package_refs(unit.root(), source, &mut used);
        Self { unit, source, used }
    }

    fn print(&self) -> Result<String> {
        let mut blocks: Vec<String> = Vec::new();
        let mut comments: Vec<Node<'a>> = Vec::new();
        let mut imports_printed = false;

        for node in named_children(self.unit.root()) {
            if node.kind() == "comment" {
                let detached = comments
                    .last()
                    .is_some_and(|last| node.start_position().row > last.end_position().row + 1);
                if detached {
                    blocks.push(self.comment_block(&comments));
                    comments.clear();
                }
                comments.push(node);
                continue;
            }

            let body = match node.kind() {
                "import_declaration" if imports_printed => None,
                "import_declaration" => {
                    imports_printed = true;
                    self.imports()?
                }
                _ => Some(self.declaration(node)?),
            };
            let attached = comments
                .last()
                .is_some_and(|last| last.end_position().row + 1 == node.start_position().row);

            match body {
                Some(body) if attached => {
                    blocks.push(format!("{}\n{body}", self.comment_block(&comments)));
                }
                Some(body) => {
                    if !comments.is_empty() {
                        blocks.push(self.comment_block(&comments));
                    }
                    blocks.push(body);
                }
                None if !comments.is_empty() => blocks.push(self.comment_block(&comments)),
                None => {}
            }
            comments.clear();
        }
        if !comments.is_empty() {
            blocks.push(self.comment_block(&comments));
        }

        let mut out = blocks.join("\n\n");
        out.push('\n');
        Ok(out)
    }

    fn comment_block(&self, comments: &[Node<'a>]) -> String {
        comments
            .iter()
            .map(|c| node_text(*c, self.source))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All import specs of the file merged into one declaration, unused ones dropped.
    fn imports(&self) -> Result<Option<String>> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for spec in self.unit.imports() {
            let path = unquote(spec.path_literal)
                .ok_or_else(|| Error::InvalidImport(spec.path_literal.to_string()))?;
            let keep = match spec.alias {
                "_" | "." => true,
                "" => self.used.contains(assumed_package_name(&path).as_str()),
                alias => self.used.contains(alias),
            };
            if !keep {
                debug!("Dropping unused import {path:?}");
                continue;
            }
            if !seen.insert((spec.alias, path)) {
                continue;
            }
            lines.push(if spec.alias.is_empty() {
                spec.path_literal.to_string()
            } else {
                format!("{} {}", spec.alias, spec.path_literal)
            });
        }

        Ok(match lines.as_slice() {
            [] => None,
            [only] => Some(format!("import {only}")),
            _ => {
                let body: Vec<String> = lines.iter().map(|l| format!("\t{l}")).collect();
                Some(format!("import (\n{}\n)", body.join("\n")))
            }
        })
    }

    fn declaration(&self, node: Node<'a>) -> Result<String> {
        match node.kind() {
            "package_clause" => {
                let name = node
                    .named_child(0)
                    .map(|n| node_text(n, self.source))
                    .unwrap_or_default();
                Ok(format!("package {name}"))
            }
            "type_declaration" => {
                let specs = named_children(node)
                    .into_iter()
                    .filter(|n| n.kind() != "comment")
                    .map(|spec| self.type_spec(spec))
                    .collect::<Result<Vec<_>>>()?;
                Ok(specs.join("\n"))
            }
            _ => Ok(collapse(node_text(node, self.source))),
        }
    }

    fn type_spec(&self, spec: Node<'a>) -> Result<String> {
        let (Some(name), Some(ty)) = (
            spec.child_by_field_name("name"),
            spec.child_by_field_name("type"),
        ) else {
            return Ok(format!("type {}", collapse(node_text(spec, self.source))));
        };
        let name = node_text(name, self.source);
        if spec.kind() != "type_spec" || ty.kind() != "interface_type" {
            let ty = render_type(ty, self.source).map_err(|e| Error::Other(e.to_string()))?;
            let assign = if spec.kind() == "type_alias" { " =" } else { "" };
            return Ok(format!("type {name}{assign} {ty}"));
        }

        let mut out = format!("type {name} interface {{\n");
        for elem in named_children(ty) {
            let line = if elem.kind() == "comment" {
                node_text(elem, self.source).to_string()
            } else {
                render_interface_elem(elem, self.source).map_err(|e| Error::Other(e.to_string()))?
            };
            out.push('\t');
            out.push_str(&line);
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }
}

/// Package names referenced as `pkg.Name` anywhere outside import declarations.
fn collect_package_refs<'a>(node: Node<'a>, source: &'a str, used: &mut HashSet<&'a str>) {
    match node.kind() {
        "import_declaration" | "comment" => return,
        "qualified_type" => {
            if let Some(package) = node.child_by_field_name("package") {
                used.insert(node_text(package, source));
            }
        }
        "selector_expression" => {
            if let Some(operand) = node
                .child_by_field_name("operand")
                .filter(|n| n.kind() == "identifier")
            {
                used.insert(node_text(operand, source));
            }
        }
        _ => {}
    }
    for child in named_children(node) {
        collect_package_refs(child, source, used);
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
