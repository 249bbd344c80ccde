//! Source pre-checks, comment stripping, `#define` expansion and entry body
//! extraction.
//!
//! The pre-checks run in a fixed order and the first failure wins:
//!
//! 1. no `#include` anywhere → [`SimError::MissingInclude`]
//! 2. no `main` marker → [`SimError::NoEntryRoutine`]
//! 3. `printf` used without `stdio.h` → [`SimError::UndeclaredFunction`]
//! 4. a line calling `printf`/`scanf` that has no `;`, no brace and no
//!    trailing `\` → [`SimError::MissingSemicolon`]

use super::scan::{find_matching, is_ident_char, is_ident_start, QuoteState};
use crate::interpreter::errors::SimError;

const INCLUDE_MARKER: &str = "#include";
const ENTRY_MARKER: &str = "main";
const STDIO_MARKER: &str = "stdio.h";
const OUTPUT_MARKER: &str = "printf";
const INPUT_MARKER: &str = "scanf";

/// Runs the four pre-checks against the submitted source.
pub fn check_source(source: &str) -> Result<(), SimError> {
    if !source.contains(INCLUDE_MARKER) {
        return Err(SimError::MissingInclude);
    }
    if !source.contains(ENTRY_MARKER) {
        return Err(SimError::NoEntryRoutine);
    }
    if source.contains(OUTPUT_MARKER) && !source.contains(STDIO_MARKER) {
        return Err(SimError::UndeclaredFunction {
            name: OUTPUT_MARKER.to_string(),
        });
    }

    // Line numbers survive comment stripping, so they still match the input
    let stripped = strip_comments(source);
    for (index, line) in stripped.lines().enumerate() {
        let calls_io = line.contains(OUTPUT_MARKER) || line.contains(INPUT_MARKER);
        let terminated = line.contains(';')
            || line.contains('{')
            || line.contains('}')
            || line.trim_end().ends_with('\\');
        if calls_io && !terminated {
            return Err(SimError::MissingSemicolon { line: index + 1 });
        }
    }

    Ok(())
}

/// Removes `//` line comments and `/* */` block comments (non-nesting).
///
/// Newlines inside block comments are kept so line numbers do not shift.
/// Comment markers inside string or character literals are left alone.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut quotes = QuoteState::default();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if quotes.in_literal() || c != '/' {
            quotes.feed(c);
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('/') => {
                // Line comment: drop up to (not including) the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            Some('*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Collects object-like `#define NAME value` constants, in source order.
pub fn collect_defines(source: &str) -> Vec<(String, String)> {
    source
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix('#')?.trim_start();
            let rest = rest.strip_prefix("define")?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let rest = rest.trim();
            let name_len = rest
                .find(|c: char| !is_ident_char(c))
                .unwrap_or(rest.len());
            let (name, value) = rest.split_at(name_len);
            // Function-like macros are not supported
            if name.is_empty() || value.starts_with('(') {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Replaces whole-word occurrences of each defined name outside literals.
pub fn expand_defines(text: &str, defines: &[(String, String)]) -> String {
    if defines.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut quotes = QuoteState::default();
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        match defines.iter().rev().find(|(name, _)| name == word) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(word),
        }
        word.clear();
    };

    for c in text.chars() {
        if quotes.in_literal() {
            quotes.feed(c);
            out.push(c);
            continue;
        }
        if is_ident_char(c) && (!word.is_empty() || is_ident_start(c)) {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut out);
        quotes.feed(c);
        out.push(c);
    }
    flush(&mut word, &mut out);

    out
}

/// Locates the body of `main`, i.e. the text between its outer braces.
pub fn entry_body(source: &str) -> Result<&str, SimError> {
    let mut search_from = 0;
    while let Some(offset) = source[search_from..].find(ENTRY_MARKER) {
        let start = search_from + offset;
        let end = start + ENTRY_MARKER.len();
        search_from = end;

        let preceded_by_ident = source[..start]
            .chars()
            .next_back()
            .is_some_and(is_ident_char);
        if preceded_by_ident {
            continue;
        }

        let after = source[end..].trim_start();
        let Some(close_paren) = find_matching(after, '(', ')') else {
            continue;
        };
        let after_params = after[close_paren + 1..].trim_start();
        let Some(close_brace) = find_matching(after_params, '{', '}') else {
            continue;
        };
        return Ok(&after_params[1..close_brace]);
    }

    Err(SimError::NoEntryRoutine)
}

/// Full preparation pipeline: pre-checks, comment stripping, `#define`
/// expansion and entry body extraction.
pub fn prepare(source: &str) -> Result<String, SimError> {
    check_source(source)?;
    let stripped = strip_comments(source);
    let defines = collect_defines(&stripped);
    let body = entry_body(&stripped)?;
    Ok(expand_defines(body, &defines))
}
