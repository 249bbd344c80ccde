//! Statement splitter
//!
//! Cuts a block of source into top-level statements. The scan tracks brace
//! depth, parenthesis depth and string/character literals, so separators
//! inside `for (...)` headers, nested blocks or quoted text never split.
//!
//! A statement ends at:
//! - a `;` at depth zero, unless the next word is `else`
//! - a `}` that closes a depth-zero block, unless it is followed by `else`,
//!   `;`, `,` or (for `do` blocks) `while`
//! - an unmatched `}`, which is dropped
//! - the end of input
//!
//! The splitter holds no state between calls, so control-flow handlers call it
//! again on their nested bodies.

use super::scan::{starts_with_keyword, QuoteState};

/// Splits `body` into trimmed, non-empty statement fragments.
pub fn split_statements(body: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut braces = 0i32;
    let mut parens = 0i32;
    let mut quotes = QuoteState::default();

    for (i, c) in body.char_indices() {
        if quotes.feed(c) {
            current.push(c);
            continue;
        }

        let rest = &body[i + c.len_utf8()..];
        match c {
            '(' => parens += 1,
            ')' => parens = (parens - 1).max(0),
            '{' => braces += 1,
            '}' => {
                braces -= 1;
                if braces < 0 {
                    braces = 0;
                    emit(&mut statements, &mut current);
                    continue;
                }
                if braces == 0 && parens == 0 {
                    current.push(c);
                    if !continues_after_block(&current, rest) {
                        emit(&mut statements, &mut current);
                    }
                    continue;
                }
            }
            ';' if braces == 0 && parens == 0 => {
                if starts_with_keyword(rest.trim_start(), "else") {
                    current.push(c);
                } else {
                    emit(&mut statements, &mut current);
                }
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    emit(&mut statements, &mut current);
    statements
}

fn continues_after_block(current: &str, rest: &str) -> bool {
    let next = rest.trim_start();
    starts_with_keyword(next, "else")
        || next.starts_with(';')
        || next.starts_with(',')
        || (starts_with_keyword(current.trim_start(), "do") && starts_with_keyword(next, "while"))
}

fn emit(statements: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_statements() {
        let stmts = split_statements("int x = 5; x = x + 1;\n return 0;");
        assert_eq!(stmts, vec!["int x = 5", "x = x + 1", "return 0"]);
    }

    #[test]
    fn test_separators_inside_string_literal() {
        let stmts = split_statements(r#"printf("a;b{c}");"#);
        assert_eq!(stmts, vec![r#"printf("a;b{c}")"#]);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let stmts = split_statements(r#"printf("say \"hi;\""); x = 1;"#);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], r#"printf("say \"hi;\"")"#);
    }

    #[test]
    fn test_for_header_and_block_stay_together() {
        let stmts = split_statements("for(int i=0;i<3;i++){ printf(\"%d \", i); } x = 2;");
        assert_eq!(
            stmts,
            vec!["for(int i=0;i<3;i++){ printf(\"%d \", i); }", "x = 2"]
        );
    }

    #[test]
    fn test_if_else_kept_as_one_statement() {
        let stmts = split_statements("if (a < b) { x = 1; } else { x = 2; } y = 3;");
        assert_eq!(stmts, vec!["if (a < b) { x = 1; } else { x = 2; }", "y = 3"]);

        let stmts = split_statements("if (a < b) x = 1; else x = 2; y = 3;");
        assert_eq!(stmts, vec!["if (a < b) x = 1; else x = 2", "y = 3"]);
    }

    #[test]
    fn test_array_initializer_and_do_while() {
        let stmts = split_statements("int a[3] = {1, 2}; do { a[0]++; } while (a[0] < 5); z = 1");
        assert_eq!(
            stmts,
            vec![
                "int a[3] = {1, 2}",
                "do { a[0]++; } while (a[0] < 5)",
                "z = 1"
            ]
        );
    }

    #[test]
    fn test_stray_closing_brace_terminates() {
        let stmts = split_statements("x = 1 } y = 2;");
        assert_eq!(stmts, vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn test_trailing_fragment_and_char_literal() {
        let stmts = split_statements("c = ';'; int a=4,");
        assert_eq!(stmts, vec!["c = ';'", "int a=4,"]);
    }
}
