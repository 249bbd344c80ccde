//! Character-level scanning helpers shared by the preprocessor, the splitter
//! and the classifier.
//!
//! Every helper here is quote-aware: parentheses, brackets, braces and
//! operators inside `"..."` or `'...'` literals are never treated as
//! structure.

/// Tracks whether the scanner is inside a string or character literal.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    in_string: bool,
    in_char: bool,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns `true` if the character belongs to a
    /// literal (including its opening and closing quotes).
    pub(crate) fn feed(&mut self, c: char) -> bool {
        if self.in_string || self.in_char {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if self.in_string && c == '"' {
                self.in_string = false;
            } else if self.in_char && c == '\'' {
                self.in_char = false;
            }
            return true;
        }
        match c {
            '"' => {
                self.in_string = true;
                true
            }
            '\'' => {
                self.in_char = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn in_literal(&self) -> bool {
        self.in_string || self.in_char
    }
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `true` if `s` is a C identifier.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_char),
        _ => false,
    }
}

/// `true` if `s` starts with `keyword` followed by a non-identifier character
/// (or the end of input).
pub(crate) fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    s.strip_prefix(keyword)
        .is_some_and(|rest| !rest.starts_with(is_ident_char))
}

/// Given `s` starting with an opening delimiter, return the byte index of its
/// matching closing delimiter.
pub(crate) fn find_matching(s: &str, open: char, close: char) -> Option<usize> {
    if !s.starts_with(open) {
        return None;
    }
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();
    for (i, c) in s.char_indices() {
        if quotes.feed(c) {
            continue;
        }
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Walks `s` and calls `visit(index, char)` for every character outside
/// literals that sits at parenthesis/bracket/brace depth zero. Stops early
/// when `visit` returns `true`, yielding that index.
pub(crate) fn scan_top_level<F>(s: &str, mut visit: F) -> Option<usize>
where
    F: FnMut(usize, char) -> bool,
{
    let mut depth = 0i32;
    let mut quotes = QuoteState::default();
    for (i, c) in s.char_indices() {
        if quotes.feed(c) {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if depth == 0 => {
                if visit(i, c) {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte index of the first top-level occurrence of `needle`.
pub(crate) fn find_top_level(s: &str, needle: &str) -> Option<usize> {
    scan_top_level(s, |i, _| s[i..].starts_with(needle))
}

/// Splits on a top-level separator character, trimming each piece.
pub(crate) fn split_top_level(s: &str, separator: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut depth = 0i32;
    let mut quotes = QuoteState::default();
    for (i, c) in s.char_indices() {
        if quotes.feed(c) {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == separator && depth == 0 => {
                pieces.push(s[start..i].trim().to_string());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(s[start..].trim().to_string());
    pieces
}

/// If `s` is a `"..."` literal followed by nothing else, its raw contents.
pub(crate) fn string_literal_contents(s: &str) -> Option<&str> {
    let end = string_literal_end(s)?;
    if end == s.len() - 1 {
        Some(&s[1..end])
    } else {
        None
    }
}

/// Given `s` starting with `"`, the byte index of the closing quote.
pub(crate) fn string_literal_end(s: &str) -> Option<usize> {
    if !s.starts_with('"') {
        return None;
    }
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(i);
        }
    }
    None
}

/// Expands the escape sequences `\n \t \r \\ \" \'` (and `\0`).
/// Unknown escapes are kept verbatim.
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('0') => out.push('\0'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
