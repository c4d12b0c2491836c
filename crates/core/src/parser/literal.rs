//! Decoding of Go string literals as they appear in import specs

/// Unquote an interpreted (`"..."`) or raw (`` `...` ``) Go string literal.
///
/// Returns `None` when the literal is not properly quoted or contains an invalid escape.
pub fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(unescape(&mut chars)?),
            '"' | '\n' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn unescape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let c = match chars.next()? {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        '\\' => '\\',
        '"' => '"',
        'x' => hex(chars, 2)?,
        'u' => hex(chars, 4)?,
        'U' => hex(chars, 8)?,
        d @ '0'..='7' => {
            let mut value = d.to_digit(8)?;
            for _ in 0..2 {
                value = value * 8 + chars.next()?.to_digit(8)?;
            }
            char::from_u32(value).filter(|_| value <= 0xFF)?
        }
        _ => return None,
    };
    Some(c)
}

fn hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value.checked_mul(16)? + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreted_literals() {
        assert_eq!(unquote(r#""fmt""#).as_deref(), Some("fmt"));
        assert_eq!(
            unquote(r#""github.com/pkg/errors""#).as_deref(),
            Some("github.com/pkg/errors")
        );
        assert_eq!(unquote(r#""a\x2fb""#).as_deref(), Some("a/b"));
        assert_eq!(unquote(r#""é""#).as_deref(), Some("é"));
    }

    #[test]
    fn test_raw_literals() {
        assert_eq!(unquote("`net/http`").as_deref(), Some("net/http"));
    }

    #[test]
    fn test_invalid_literals() {
        assert_eq!(unquote("fmt"), None);
        assert_eq!(unquote(r#""fmt"#), None);
        assert_eq!(unquote(r#""bad\q""#), None);
        assert_eq!(unquote(r#""a"b""#), None);
    }
}
