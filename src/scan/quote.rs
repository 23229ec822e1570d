use std::fmt::Write;

/// How scanned keys are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStyle {
    /// Always double-quoted with escapes.
    #[default]
    Quoted,
    /// Backquoted verbatim when that is unambiguous, double-quoted otherwise.
    Backquoted,
}

/// Render `key` as a single-line, escape-safe literal.
pub fn quote_key(key: &[u8], style: KeyStyle) -> String {
    if style == KeyStyle::Backquoted {
        if let Ok(text) = std::str::from_utf8(key) {
            if can_backquote(text) {
                return format!("`{}`", text);
            }
        }
    }
    double_quote(key)
}

fn can_backquote(text: &str) -> bool {
    text.chars().all(|c| c != '`' && (c == '\t' || is_printable(c)))
}

/// Whether `c` can be written raw. Controls, whitespace other than the ASCII
/// space, format characters, separators, private use and noncharacters are
/// all escaped so a printed key never hides or reorders text.
fn is_printable(c: char) -> bool {
    if c.is_control() || (c != ' ' && c.is_whitespace()) {
        return false;
    }
    !(is_invisible(c) || is_private_use(c) || is_unassigned(c))
}

fn is_invisible(c: char) -> bool {
    matches!(
        c as u32,
        0x00ad
            | 0x0600..=0x0605
            | 0x061c
            | 0x06dd
            | 0x070f
            | 0x0890..=0x0891
            | 0x08e2
            | 0x180e
            | 0x200b..=0x200f
            | 0x2028..=0x202e
            | 0x2060..=0x2064
            | 0x2066..=0x206f
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
    )
}

fn is_private_use(c: char) -> bool {
    matches!(c as u32, 0xe000..=0xf8ff | 0xf0000..=0xffffd | 0x100000..=0x10fffd)
}

/// Noncharacters plus the planes with no assignments at all.
fn is_unassigned(c: char) -> bool {
    let cp = c as u32;
    (0xfdd0..=0xfdef).contains(&cp)
        || (cp & 0xfffe) == 0xfffe
        || (0x40000..=0xdffff).contains(&cp)
        || (0xe0080..=0xe00ff).contains(&cp)
        || (0xe01f0..=0xeffff).contains(&cp)
}

fn double_quote(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    out.push('"');

    let mut rest = key;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                push_escaped_str(&mut out, text);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                if let Ok(text) = std::str::from_utf8(valid) {
                    push_escaped_str(&mut out, text);
                }
                let bad = err.error_len().unwrap_or(after.len());
                for byte in &after[..bad] {
                    let _ = write!(out, "\\x{:02x}", byte);
                }
                rest = &after[bad..];
            }
        }
    }

    out.push('"');
    out
}

fn push_escaped_str(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
}
