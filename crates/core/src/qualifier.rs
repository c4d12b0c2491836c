//! Lexical qualification of rendered Go type expressions
//!
//! The qualifier prefixes every unqualified exported identifier in a type expression with a
//! package name so that the expression compiles outside the package it was written in.
//! It works purely on text: identifiers are recognised by shape and case, never resolved,
//! so a constant or variable inside an array length would be qualified the same way a type
//! name is.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Rewrites type expressions by prefixing unqualified exported identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeQualifier {
    package: String,
}

impl TypeQualifier {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn is_enabled(&self) -> bool {
        !self.package.is_empty()
    }

    /// Qualify a single rendered type expression, e.g. `map[string]*Foo` becomes
    /// `map[string]*pkg.Foo`.
    pub fn qualify(&self, expr: &str) -> String {
        qualify(expr, &self.package)
    }
}

/// Prefix every identifier run that starts with an uppercase letter, is not preceded by
/// `.`, and does not continue a previous identifier with `"<qualifier>."`.
///
/// An empty qualifier leaves the expression untouched.
pub fn qualify(expr: &str, qualifier: &str) -> String {
    if qualifier.is_empty() {
        return expr.to_string();
    }

    let mut out = String::with_capacity(expr.len() + qualifier.len() + 1);
    // NUL never counts as an identifier character, so the first rune starts a fresh boundary.
    let mut previous = '\0';
    for current in expr.chars() {
        if needs_prefix(previous, current) {
            out.push_str(qualifier);
            out.push('.');
        }
        out.push(current);
        previous = current;
    }
    out
}

/// Identifier runes: Unicode letters (L*), decimal digits (Nd) and underscore.
pub fn is_ident_char(c: char) -> bool {
    c == '_' || is_letter(c) || get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Exported names start with an uppercase letter (Lu).
pub fn is_upper(c: char) -> bool {
    get_general_category(c) == GeneralCategory::UppercaseLetter
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn needs_prefix(previous: char, current: char) -> bool {
    // already qualified
    if previous == '.' {
        return false;
    }
    // mid-identifier
    if is_ident_char(previous) {
        return false;
    }
    if !is_ident_char(current) {
        return false;
    }
    is_upper(current)
}
