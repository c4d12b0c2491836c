//! Canonical single-line rendering of Go type syntax
//!
//! Types are rebuilt from the syntax tree rather than sliced out of the source so that
//! comments, line breaks and odd spacing inside a signature never leak into the generated
//! interface.

use crate::qualifier::{TypeQualifier, is_ident_char};
use tree_sitter::Node;

/// A type node that cannot be printed, usually because it contains a syntax error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct RenderError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl RenderError {
    fn at(node: Node, message: impl Into<String>) -> Self {
        let point = node.start_position();
        Self {
            message: message.into(),
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Text of a node, or an empty string when the range is not valid UTF-8.
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Locate the first ERROR or MISSING node at or below `node`.
pub fn find_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(find_error)
}

fn check(node: Node, source: &str) -> RenderResult<()> {
    match find_error(node) {
        Some(bad) if bad.is_missing() => Err(RenderError::at(
            bad,
            format!("missing {}", bad.kind()),
        )),
        Some(bad) => Err(RenderError::at(
            bad,
            format!("unexpected `{}`", node_text(bad, source).trim()),
        )),
        None => Ok(()),
    }
}

/// Render a type expression node on a single line with gofmt spacing.
pub fn render_type(node: Node, source: &str) -> RenderResult<String> {
    check(node, source)?;
    render(node, source)
}

/// Render the contents of a `parameter_list` (without the surrounding parentheses),
/// passing every type through `qualifier`.
pub fn render_fields(
    list: Node,
    source: &str,
    qualifier: &TypeQualifier,
) -> RenderResult<String> {
    check(list, source)?;
    let mut fields = Vec::new();
    for child in named_children(list) {
        match child.kind() {
            "parameter_declaration" | "variadic_parameter_declaration" => {
                fields.push(render_field(child, source, qualifier)?);
            }
            "comment" => {}
            other => return Err(RenderError::at(child, format!("unexpected {other}"))),
        }
    }
    Ok(fields.join(", "))
}

/// Render a function result: a bare type, or a parameter list printed without
/// parentheses when it holds a single unnamed type.
pub fn render_result(node: Node, source: &str, qualifier: &TypeQualifier) -> RenderResult<String> {
    if node.kind() != "parameter_list" {
        return Ok(qualifier.qualify(&render_type(node, source)?));
    }
    let fields: Vec<Node> = named_children(node)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect();
    match fields.as_slice() {
        [] => Ok(String::new()),
        [only]
            if only.kind() == "parameter_declaration"
                && only.child_by_field_name("name").is_none() =>
        {
            render_field(*only, source, qualifier)
        }
        _ => Ok(format!("({})", render_fields(node, source, qualifier)?)),
    }
}

fn render_field(field: Node, source: &str, qualifier: &TypeQualifier) -> RenderResult<String> {
    let mut cursor = field.walk();
    let names: Vec<&str> = field
        .children_by_field_name("name", &mut cursor)
        .map(|n| node_text(n, source))
        .collect();
    let ty = field
        .child_by_field_name("type")
        .ok_or_else(|| RenderError::at(field, "parameter without type"))?;
    let mut rendered = qualifier.qualify(&render_type(ty, source)?);
    // Qualify the element type first: a leading `...` would read as an existing qualifier.
    if field.kind() == "variadic_parameter_declaration" {
        rendered.insert_str(0, "...");
    }
    if names.is_empty() {
        Ok(rendered)
    } else {
        Ok(format!("{} {}", names.join(", "), rendered))
    }
}

fn render(node: Node, source: &str) -> RenderResult<String> {
    let plain = TypeQualifier::default();
    let text = match node.kind() {
        "parenthesized_type" => format!("({})", render(first_type(node)?, source)?),
        "pointer_type" => format!("*{}", render(first_type(node)?, source)?),
        "negated_type" => format!("~{}", render(first_type(node)?, source)?),
        "slice_type" => format!("[]{}", render(field(node, "element")?, source)?),
        "implicit_length_array_type" => {
            format!("[...]{}", render(field(node, "element")?, source)?)
        }
        "array_type" => format!(
            "[{}]{}",
            render_tokens(field(node, "length")?, source),
            render(field(node, "element")?, source)?
        ),
        "map_type" => format!(
            "map[{}]{}",
            render(field(node, "key")?, source)?,
            render(field(node, "value")?, source)?
        ),
        "channel_type" => {
            let value = render(field(node, "value")?, source)?;
            let tokens: Vec<&str> = children(node)
                .into_iter()
                .filter(|n| !n.is_named())
                .map(|n| n.kind())
                .collect();
            match tokens.as_slice() {
                ["<-", "chan", ..] => format!("<-chan {value}"),
                ["chan", "<-", ..] => format!("chan<- {value}"),
                _ => format!("chan {value}"),
            }
        }
        "function_type" => {
            let params = render_fields(field(node, "parameters")?, source, &plain)?;
            match node.child_by_field_name("result") {
                Some(result) => match render_result(result, source, &plain)? {
                    r if r.is_empty() => format!("func({params})"),
                    r => format!("func({params}) {r}"),
                },
                None => format!("func({params})"),
            }
        }
        "qualified_type" => format!(
            "{}.{}",
            node_text(field(node, "package")?, source),
            node_text(field(node, "name")?, source)
        ),
        "generic_type" => {
            let base = render(field(node, "type")?, source)?;
            let args = field(node, "type_arguments")?;
            let rendered = named_children(args)
                .into_iter()
                .filter(|n| n.kind() != "comment")
                .map(|n| render(n, source))
                .collect::<RenderResult<Vec<_>>>()?;
            format!("{base}[{}]", rendered.join(", "))
        }
        "type_elem" => named_children(node)
            .into_iter()
            .filter(|n| n.kind() != "comment")
            .map(|n| render(n, source))
            .collect::<RenderResult<Vec<_>>>()?
            .join(" | "),
        "struct_type" => {
            let body = node
                .named_child(0)
                .filter(|n| n.kind() == "field_declaration_list");
            let fields = match body {
                Some(list) => named_children(list)
                    .into_iter()
                    .filter(|n| n.kind() == "field_declaration")
                    .map(|n| render_struct_field(n, source))
                    .collect::<RenderResult<Vec<_>>>()?,
                None => Vec::new(),
            };
            braced("struct", &fields)
        }
        "interface_type" => {
            let elems = named_children(node)
                .into_iter()
                .filter(|n| n.kind() != "comment")
                .map(|n| render_interface_elem(n, source))
                .collect::<RenderResult<Vec<_>>>()?;
            braced("interface", &elems)
        }
        "type_identifier" | "identifier" | "field_identifier" | "package_identifier" => {
            node_text(node, source).to_string()
        }
        _ => render_tokens(node, source),
    };
    Ok(text)
}

fn render_struct_field(node: Node, source: &str) -> RenderResult<String> {
    let mut cursor = node.walk();
    let names: Vec<&str> = node
        .children_by_field_name("name", &mut cursor)
        .map(|n| node_text(n, source))
        .collect();
    let ty = render(field(node, "type")?, source)?;
    let embedded_pointer = node.child(0).is_some_and(|c| c.kind() == "*");
    let mut out = if names.is_empty() && embedded_pointer {
        format!("*{ty}")
    } else if names.is_empty() {
        ty
    } else {
        format!("{} {ty}", names.join(", "))
    };
    if let Some(tag) = node.child_by_field_name("tag") {
        out.push(' ');
        out.push_str(node_text(tag, source));
    }
    Ok(out)
}

/// Render one element of an interface body: a method such as `Close() error`, or a type
/// element.
pub fn render_interface_elem(node: Node, source: &str) -> RenderResult<String> {
    check(node, source)?;
    if node.kind() != "method_elem" {
        return render(node, source);
    }
    let plain = TypeQualifier::default();
    let name = node_text(field(node, "name")?, source);
    let params = render_fields(field(node, "parameters")?, source, &plain)?;
    match node.child_by_field_name("result") {
        Some(result) => match render_result(result, source, &plain)? {
            r if r.is_empty() => Ok(format!("{name}({params})")),
            r => Ok(format!("{name}({params}) {r}")),
        },
        None => Ok(format!("{name}({params})")),
    }
}

fn braced(keyword: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("{keyword}{{}}")
    } else {
        format!("{keyword}{{ {} }}", items.join("; "))
    }
}

/// Fallback printer: re-join the leaf tokens of a node.
fn render_tokens(node: Node, source: &str) -> String {
    let mut tokens = Vec::new();
    collect_tokens(node, source, &mut tokens);
    let mut out = String::new();
    let mut previous: Option<&str> = None;
    for token in tokens {
        if let Some(prev) = previous {
            if needs_space(prev, token) {
                out.push(' ');
            }
        }
        out.push_str(token);
        previous = Some(token);
    }
    out
}

fn collect_tokens<'a>(node: Node, source: &'a str, tokens: &mut Vec<&'a str>) {
    if node.kind() == "comment" {
        return;
    }
    if node.child_count() == 0 || node.kind().ends_with("_literal") {
        let text = node_text(node, source).trim();
        if !text.is_empty() && text != ";" {
            tokens.push(text);
        }
        return;
    }
    for child in children(node) {
        collect_tokens(child, source, tokens);
    }
}

fn needs_space(previous: &str, current: &str) -> bool {
    if current == "," || current == ")" || current == "]" {
        return false;
    }
    if previous == "," {
        return true;
    }
    let word = |s: &str| s.chars().next().is_some_and(is_ident_char);
    let word_end = |s: &str| s.chars().last().is_some_and(is_ident_char);
    word_end(previous) && word(current)
}

fn first_type(node: Node) -> RenderResult<Node> {
    named_children(node)
        .into_iter()
        .find(|n| n.kind() != "comment")
        .ok_or_else(|| RenderError::at(node, format!("empty {}", node.kind())))
}

fn field<'t>(node: Node<'t>, name: &str) -> RenderResult<Node<'t>> {
    node.child_by_field_name(name)
        .ok_or_else(|| RenderError::at(node, format!("{} without {name}", node.kind())))
}

fn children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::GoParser;

    /// Render the type of the first parameter of `func f(x <ty>)`.
    fn render_param(ty: &str) -> String {
        let source = format!("package p\n\nfunc f(x {ty}) {{}}\n");
        let mut parser = GoParser::new().unwrap();
        let tree = parser.parse(&source).unwrap();
        let func = tree.root_node().named_child(1).unwrap();
        assert_eq!(func.kind(), "function_declaration");
        let params = func.child_by_field_name("parameters").unwrap();
        let decl = params.named_child(0).unwrap();
        let node = decl.child_by_field_name("type").unwrap();
        render_type(node, &source).unwrap()
    }

    #[test]
    fn test_simple_types() {
        assert_eq!(render_param("int"), "int");
        assert_eq!(render_param("*Foo"), "*Foo");
        assert_eq!(render_param("[]byte"), "[]byte");
        assert_eq!(render_param("[4]int"), "[4]int");
        assert_eq!(render_param("io.Reader"), "io.Reader");
    }

    #[test]
    fn test_spacing_is_normalised() {
        assert_eq!(render_param("map[ string ]  *Foo"), "map[string]*Foo");
        assert_eq!(render_param("[] /* bytes */ byte"), "[]byte");
    }

    #[test]
    fn test_channel_types() {
        assert_eq!(render_param("chan int"), "chan int");
        assert_eq!(render_param("<-chan Event"), "<-chan Event");
        assert_eq!(render_param("chan<- *Event"), "chan<- *Event");
    }

    #[test]
    fn test_function_types() {
        assert_eq!(render_param("func()"), "func()");
        assert_eq!(
            render_param("func(a, b int) (string, error)"),
            "func(a, b int) (string, error)"
        );
        assert_eq!(render_param("func(string) (error)"), "func(string) error");
        assert_eq!(render_param("func(...Option) *Client"), "func(...Option) *Client");
    }

    #[test]
    fn test_composite_literal_types() {
        assert_eq!(render_param("struct{}"), "struct{}");
        assert_eq!(
            render_param("struct {\n\tA int\n\tB, C string `json:\"c\"`\n}"),
            "struct{ A int; B, C string `json:\"c\"` }"
        );
        assert_eq!(render_param("interface{}"), "interface{}");
        assert_eq!(
            render_param("interface {\n\tClose() error\n}"),
            "interface{ Close() error }"
        );
    }

    #[test]
    fn test_generic_types() {
        assert_eq!(render_param("List[T]"), "List[T]");
        assert_eq!(render_param("Map[string, *V]"), "Map[string, *V]");
    }

    #[test]
    fn test_fields_with_qualifier() {
        let source = "package p\n\nfunc f(a, b Foo, opts ...Option) {}\n";
        let mut parser = GoParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        let func = tree.root_node().named_child(1).unwrap();
        let params = func.child_by_field_name("parameters").unwrap();
        let qualifier = TypeQualifier::new("pkg");
        assert_eq!(
            render_fields(params, source, &qualifier).unwrap(),
            "a, b pkg.Foo, opts ...pkg.Option"
        );
    }

    #[test]
    fn test_error_nodes_fail_to_render() {
        let source = "package p\n\nfunc f(x map[string) {}\n";
        let mut parser = GoParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        let err = render_type(tree.root_node(), source).unwrap_err();
        assert!(err.line >= 1);
        assert!(find_error(tree.root_node()).is_some());
    }

    #[test]
    fn test_embedded_struct_fields() {
        assert_eq!(
            render_param("struct {\n\t*Base\n\tio.Reader\n}"),
            "struct{ *Base; io.Reader }"
        );
    }
}
