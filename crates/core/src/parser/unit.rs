//! Parsed Go source files and the declarations they contain

use super::printer::node_text;
use crate::qualifier::is_upper;
use tree_sitter::{Node, Tree};

/// A parsed source file. Owns the syntax tree and the text it was built from.
pub struct CompilationUnit {
    file: String,
    source: String,
    tree: Tree,
}

/// A top-level declaration of a compilation unit
#[derive(Debug, Clone)]
pub enum Declaration<'a> {
    Function(FunctionDecl<'a>),
    Import(Vec<ImportSpec<'a>>),
    Other,
}

/// A `func` declaration, with or without a receiver
#[derive(Debug, Clone)]
pub struct FunctionDecl<'a> {
    pub name: &'a str,
    /// Receiver fields; `None` for plain functions
    pub receiver: Option<Vec<Field<'a>>>,
    /// The `parameter_list` node holding the parameters
    pub parameters: Option<Node<'a>>,
    /// Either a bare type node or a `parameter_list`
    pub result: Option<Node<'a>>,
    /// Raw text of each comment in the doc block directly above the declaration
    pub docs: Vec<&'a str>,
}

/// One entry of a parameter or receiver list: `a, b int`, `*T` or `args ...string`
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub names: Vec<&'a str>,
    pub ty: Node<'a>,
    pub variadic: bool,
}

/// A single `import alias "path"` spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec<'a> {
    /// Alias as written (`""` when absent, `"."` for dot imports, `"_"` for blank imports)
    pub alias: &'a str,
    /// The path literal including its quotes
    pub path_literal: &'a str,
}

impl CompilationUnit {
    pub(crate) fn new(file: String, source: String, tree: Tree) -> Self {
        Self { file, source, tree }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn package_name(&self) -> Option<&str> {
        let root = self.root();
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;
        let name = clause.named_child(0)?;
        Some(node_text(name, &self.source))
    }

    /// Top-level declarations in source order. Comments are not declarations.
    pub fn declarations(&self) -> Vec<Declaration<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        root.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.lower(n))
            .collect()
    }

    /// Every import spec of the file, in source order.
    pub fn imports(&self) -> Vec<ImportSpec<'_>> {
        self.declarations()
            .into_iter()
            .filter_map(|d| match d {
                Declaration::Import(specs) => Some(specs),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn lower<'a>(&'a self, node: Node<'a>) -> Declaration<'a> {
        let source = self.source.as_str();
        match node.kind() {
            "function_declaration" | "method_declaration" => {
                let Some(name) = node.child_by_field_name("name") else {
                    return Declaration::Other;
                };
                Declaration::Function(FunctionDecl {
                    name: node_text(name, source),
                    receiver: node
                        .child_by_field_name("receiver")
                        .map(|list| fields(list, source)),
                    parameters: node.child_by_field_name("parameters"),
                    result: node.child_by_field_name("result"),
                    docs: doc_comments(node, source),
                })
            }
            "import_declaration" => {
                let mut specs = Vec::new();
                collect_import_specs(node, source, &mut specs);
                Declaration::Import(specs)
            }
            _ => Declaration::Other,
        }
    }
}

impl std::fmt::Debug for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationUnit")
            .field("file", &self.file)
            .field("len", &self.source.len())
            .finish()
    }
}

impl<'a> FunctionDecl<'a> {
    /// Exported names start with an uppercase letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(is_upper)
    }

    /// Name of the receiver's base type when the declaration is a method with exactly one
    /// receiver whose type is `T` or `*T`.
    pub fn receiver_type_name(&self, source: &'a str) -> Option<&'a str> {
        let receiver = self.receiver.as_ref()?;
        let count: usize = receiver.iter().map(|f| f.names.len().max(1)).sum();
        if count != 1 {
            return None;
        }
        let mut ty = unparen(receiver[0].ty);
        if ty.kind() == "pointer_type" {
            ty = unparen(ty.named_child(0)?);
        }
        (ty.kind() == "type_identifier").then(|| node_text(ty, source))
    }
}

fn unparen(mut node: Node) -> Node {
    while node.kind() == "parenthesized_type" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn fields<'a>(list: Node<'a>, source: &'a str) -> Vec<Field<'a>> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|decl| {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => return None,
            };
            let ty = decl.child_by_field_name("type")?;
            let mut names_cursor = decl.walk();
            let names = decl
                .children_by_field_name("name", &mut names_cursor)
                .map(|n| node_text(n, source))
                .collect();
            Some(Field {
                names,
                ty,
                variadic,
            })
        })
        .collect()
}

fn collect_import_specs<'a>(node: Node<'a>, source: &'a str, specs: &mut Vec<ImportSpec<'a>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                let Some(path) = child.child_by_field_name("path") else {
                    continue;
                };
                specs.push(ImportSpec {
                    alias: child
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source))
                        .unwrap_or(""),
                    path_literal: node_text(path, source),
                });
            }
            "import_spec_list" => collect_import_specs(child, source, specs),
            _ => {}
        }
    }
}

/// The comment group directly above `node`: adjacent comments with no blank line between
/// them and the declaration, excluding a comment that trails code on its own line.
fn doc_comments<'a>(node: Node<'a>, source: &'a str) -> Vec<&'a str> {
    let mut docs = Vec::new();
    let mut expected_row = node.start_position().row;
    let mut current = node.prev_named_sibling();
    while let Some(comment) = current {
        if comment.kind() != "comment" || comment.end_position().row + 1 != expected_row {
            break;
        }
        let previous = comment.prev_named_sibling();
        if previous.is_some_and(|p| {
            p.kind() != "comment" && p.end_position().row == comment.start_position().row
        }) {
            break;
        }
        docs.push(node_text(comment, source));
        expected_row = comment.start_position().row;
        current = previous;
    }
    docs.reverse();
    docs
}

#[cfg(test)]
mod tests {
    use crate::parser::GoParser;

    use super::*;

    fn unit(source: &str) -> CompilationUnit {
        GoParser::new().unwrap().parse_unit(source, "test.go").unwrap()
    }

    fn functions(unit: &CompilationUnit) -> Vec<FunctionDecl<'_>> {
        unit.declarations()
            .into_iter()
            .filter_map(|d| match d {
                Declaration::Function(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_package_name() {
        let unit = unit("package store\n");
        assert_eq!(unit.package_name(), Some("store"));
    }

    #[test]
    fn test_receiver_type_names() {
        let unit = unit(
            r#"package p

func (s *Store) Get() {}
func (s Store) Put() {}
func (Store) Anon() {}
func (s (*Store)) Paren() {}
func (a, b Store) Two() {}
func (s *Store[K]) Generic() {}
func Free() {}
"#,
        );
        let names: Vec<_> = functions(&unit)
            .iter()
            .map(|f| (f.name, f.receiver_type_name(unit.source())))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Get", Some("Store")),
                ("Put", Some("Store")),
                ("Anon", Some("Store")),
                ("Paren", Some("Store")),
                ("Two", None),
                ("Generic", None),
                ("Free", None),
            ]
        );
    }

    #[test]
    fn test_exported_names() {
        let unit = unit("package p\n\nfunc (s *S) Open() {}\nfunc (s *S) close() {}\n");
        let exported: Vec<_> = functions(&unit).iter().map(|f| f.is_exported()).collect();
        assert_eq!(exported, vec![true, false]);
    }

    #[test]
    fn test_doc_comments() {
        let unit = unit(
            r#"package p

var x = 1 // trailing
// Get returns the value.
// It never fails.
func (s *S) Get() {}

// Detached comment.

func (s *S) Put() {}

/* Block doc. */
func (s *S) Del() {}
"#,
        );
        let docs: Vec<_> = functions(&unit).into_iter().map(|f| f.docs).collect();
        assert_eq!(
            docs,
            vec![
                vec!["// Get returns the value.", "// It never fails."],
                vec![],
                vec!["/* Block doc. */"],
            ]
        );
    }

    #[test]
    fn test_trailing_comment_is_not_doc() {
        let unit = unit("package p\n\nvar x = 1 // note\nfunc (s *S) Get() {}\n");
        let docs: Vec<_> = functions(&unit).into_iter().map(|f| f.docs).collect();
        assert_eq!(docs, vec![Vec::<&str>::new()]);
    }

    #[test]
    fn test_import_specs() {
        let unit = unit(
            r#"package p

import "fmt"

import (
	x "example.com/x"
	. "example.com/dot"
	_ "embed"
	`example.com/raw`
)
"#,
        );
        let imports = unit.imports();
        let pairs: Vec<_> = imports.iter().map(|i| (i.alias, i.path_literal)).collect();
        assert_eq!(
            pairs,
            vec![
                ("", "\"fmt\""),
                ("x", "\"example.com/x\""),
                (".", "\"example.com/dot\""),
                ("_", "\"embed\""),
                ("", "`example.com/raw`"),
            ]
        );
    }

    #[test]
    fn test_variadic_fields() {
        let unit = unit("package p\n\nfunc (s *S) Log(format string, args ...any) {}\n");
        let func = functions(&unit).remove(0);
        let params = fields(func.parameters.unwrap(), unit.source());
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].names, vec!["format"]);
        assert!(!params[0].variadic);
        assert_eq!(params[1].names, vec!["args"]);
        assert!(params[1].variadic);
    }
}
