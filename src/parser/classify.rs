//! Statement classifier
//!
//! Turns one trimmed statement fragment into a [`Statement`]. Shapes are
//! tried in a fixed order and the first match wins:
//!
//! scalar declaration → array declaration → `printf` → `scanf` → `for` →
//! `while` → `do`/`while` → `if` → block / `break` / `continue` →
//! assignment → `return`
//!
//! Anything else becomes [`Statement::NoOp`].

use super::ast::{Argument, AssignOp, Statement, Target};
use super::scan::{
    find_matching, find_top_level, is_identifier, scan_top_level, split_top_level,
    starts_with_keyword, string_literal_contents, string_literal_end, unescape,
};

/// Type words accepted in front of a declaration, in any combination.
const TYPE_WORDS: &[&str] = &[
    "const", "unsigned", "signed", "long", "short", "int", "float", "double", "char",
];

pub fn classify(stmt: &str) -> Statement {
    let stmt = stmt.trim();

    parse_declaration(stmt)
        .or_else(|| parse_array_declaration(stmt))
        .or_else(|| parse_output(stmt))
        .or_else(|| parse_input(stmt))
        .or_else(|| parse_for(stmt))
        .or_else(|| parse_while(stmt))
        .or_else(|| parse_do_while(stmt))
        .or_else(|| parse_if(stmt))
        .or_else(|| parse_block(stmt))
        .or_else(|| parse_jump(stmt))
        .or_else(|| parse_assignment(stmt))
        .or_else(|| parse_return(stmt))
        .unwrap_or_else(|| Statement::NoOp(stmt.to_string()))
}

/// Strips leading type words; `None` if there were none.
fn strip_type_prefix(stmt: &str) -> Option<&str> {
    let mut rest = stmt;
    let mut matched = false;
    while let Some(word) = TYPE_WORDS.iter().find(|w| starts_with_keyword(rest, w)) {
        rest = rest[word.len()..].trim_start();
        matched = true;
    }
    matched.then_some(rest)
}

fn parse_declaration(stmt: &str) -> Option<Statement> {
    let rest = strip_type_prefix(stmt)?;
    let (name, init) = match rest.split_once('=') {
        Some((name, init)) => (name.trim(), Some(init.trim().to_string())),
        None => (rest.trim(), None),
    };
    if !is_identifier(name) {
        return None;
    }
    Some(Statement::Declaration {
        name: name.to_string(),
        init,
    })
}

fn parse_array_declaration(stmt: &str) -> Option<Statement> {
    let rest = strip_type_prefix(stmt)?;
    let open = rest.find('[')?;
    let name = rest[..open].trim();
    if !is_identifier(name) {
        return None;
    }

    let close = open + find_matching(&rest[open..], '[', ']')?;
    let size_text = rest[open + 1..close].trim();
    if size_text.is_empty() || !size_text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let size = size_text.parse().ok()?;

    let after = rest[close + 1..].trim();
    let init = if after.is_empty() {
        Vec::new()
    } else {
        let list = after.strip_prefix('=')?.trim();
        let end = find_matching(list, '{', '}')?;
        if end != list.len() - 1 {
            return None;
        }
        split_top_level(&list[1..end], ',')
            .into_iter()
            .filter(|item| !item.is_empty())
            .collect()
    };

    Some(Statement::ArrayDeclaration {
        name: name.to_string(),
        size,
        init,
    })
}

/// Contents of `keyword( ... )` and whatever follows the closing paren.
fn call_parts<'a>(stmt: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    if !starts_with_keyword(stmt, keyword) {
        return None;
    }
    let rest = stmt[keyword.len()..].trim_start();
    let close = find_matching(rest, '(', ')')?;
    Some((&rest[1..close], rest[close + 1..].trim()))
}

fn parse_output(stmt: &str) -> Option<Statement> {
    let (inner, _) = call_parts(stmt, "printf")?;
    let inner = inner.trim();
    let end = string_literal_end(inner)?;
    let format = inner[1..end].to_string();

    let after = inner[end + 1..].trim();
    let args = match after.strip_prefix(',') {
        Some(list) => split_top_level(list, ',')
            .into_iter()
            .map(|arg| match string_literal_contents(&arg) {
                Some(text) => Argument::Text(unescape(text)),
                None => Argument::Expr(arg),
            })
            .collect(),
        None => Vec::new(),
    };

    Some(Statement::Output { format, args })
}

fn parse_input(stmt: &str) -> Option<Statement> {
    let (inner, _) = call_parts(stmt, "scanf")?;
    let targets = split_top_level(inner, ',')
        .iter()
        .skip(1)
        .filter_map(|arg| parse_target(arg.trim_start_matches('&')))
        .collect();
    Some(Statement::Input { targets })
}

pub(crate) fn parse_target(text: &str) -> Option<Target> {
    let text = text.trim();
    if is_identifier(text) {
        return Some(Target::Scalar(text.to_string()));
    }
    let open = text.find('[')?;
    let name = text[..open].trim();
    let close = open + find_matching(&text[open..], '[', ']')?;
    if !is_identifier(name) || close != text.len() - 1 {
        return None;
    }
    Some(Target::Element {
        name: name.to_string(),
        index: text[open + 1..close].trim().to_string(),
    })
}

/// For `{ ... }` returns the inner text, otherwise the text itself.
pub(crate) fn block_body(text: &str) -> String {
    let text = text.trim();
    match find_matching(text, '{', '}') {
        Some(end) if end == text.len() - 1 => text[1..end].trim().to_string(),
        _ => text.to_string(),
    }
}

fn parse_for(stmt: &str) -> Option<Statement> {
    let (header, body) = call_parts(stmt, "for")?;
    let mut clauses = split_top_level(header, ';').into_iter();
    let init = clauses.next()?;
    let condition = clauses.next()?;
    let rest: Vec<String> = clauses.collect();
    if rest.is_empty() {
        return None;
    }

    Some(Statement::For {
        init,
        condition,
        increment: rest.join("; "),
        body: block_body(body),
    })
}

fn parse_while(stmt: &str) -> Option<Statement> {
    let (condition, body) = call_parts(stmt, "while")?;
    Some(Statement::While {
        condition: condition.trim().to_string(),
        body: block_body(body),
    })
}

fn parse_do_while(stmt: &str) -> Option<Statement> {
    if !starts_with_keyword(stmt, "do") {
        return None;
    }
    let rest = stmt[2..].trim_start();
    let close = find_matching(rest, '{', '}')?;
    let (condition, _) = call_parts(rest[close + 1..].trim_start(), "while")?;
    Some(Statement::DoWhile {
        body: rest[1..close].trim().to_string(),
        condition: condition.trim().to_string(),
    })
}

fn parse_if(stmt: &str) -> Option<Statement> {
    let (condition, rest) = call_parts(stmt, "if")?;

    let (then_branch, remainder) = match find_matching(rest, '{', '}') {
        Some(close) => (rest[1..close].trim(), rest[close + 1..].trim()),
        None => match find_top_level(rest, ";") {
            Some(semi) => (rest[..semi].trim(), rest[semi + 1..].trim()),
            None => (rest, ""),
        },
    };

    let else_branch = starts_with_keyword(remainder, "else").then(|| block_body(&remainder[4..]));

    Some(Statement::If {
        condition: condition.trim().to_string(),
        then_branch: then_branch.to_string(),
        else_branch,
    })
}

fn parse_block(stmt: &str) -> Option<Statement> {
    let end = find_matching(stmt, '{', '}')?;
    (end == stmt.len() - 1).then(|| Statement::Block(stmt[1..end].trim().to_string()))
}

fn parse_jump(stmt: &str) -> Option<Statement> {
    match stmt {
        "break" => Some(Statement::Break),
        "continue" => Some(Statement::Continue),
        _ => None,
    }
}

fn parse_assignment(stmt: &str) -> Option<Statement> {
    if let Some(step) = parse_increment(stmt) {
        return Some(step);
    }

    // Comparisons are not assignments
    if find_top_level(stmt, "==").is_some() {
        return None;
    }

    let eq = scan_top_level(stmt, |i, c| {
        c == '=' && !matches!(stmt[..i].chars().next_back(), Some('!' | '<' | '>' | '='))
    })?;

    let (target_text, op) = match stmt[..eq].chars().next_back() {
        Some('+') => (&stmt[..eq - 1], AssignOp::Add),
        Some('-') => (&stmt[..eq - 1], AssignOp::Sub),
        Some('*') => (&stmt[..eq - 1], AssignOp::Mul),
        Some('/') => (&stmt[..eq - 1], AssignOp::Div),
        Some('%') => (&stmt[..eq - 1], AssignOp::Mod),
        _ => (&stmt[..eq], AssignOp::Set),
    };

    Some(Statement::Assignment {
        target: parse_target(target_text)?,
        op,
        value: stmt[eq + 1..].trim().to_string(),
    })
}

/// `i++`, `i--`, `++i`, `--i`
fn parse_increment(stmt: &str) -> Option<Statement> {
    let (target_text, op) = if let Some(t) = stmt.strip_suffix("++") {
        (t, AssignOp::Add)
    } else if let Some(t) = stmt.strip_suffix("--") {
        (t, AssignOp::Sub)
    } else if let Some(t) = stmt.strip_prefix("++") {
        (t, AssignOp::Add)
    } else if let Some(t) = stmt.strip_prefix("--") {
        (t, AssignOp::Sub)
    } else {
        return None;
    };

    Some(Statement::Assignment {
        target: parse_target(target_text)?,
        op,
        value: "1".to_string(),
    })
}

fn parse_return(stmt: &str) -> Option<Statement> {
    if !starts_with_keyword(stmt, "return") {
        return None;
    }
    let expr = stmt["return".len()..].trim();
    Some(Statement::Return(
        (!expr.is_empty()).then(|| expr.to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str) -> Target {
        Target::Scalar(name.to_string())
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            classify("int x = 5"),
            Statement::Declaration {
                name: "x".to_string(),
                init: Some("5".to_string())
            }
        );
        assert_eq!(
            classify("unsigned long total"),
            Statement::Declaration {
                name: "total".to_string(),
                init: None
            }
        );
        // Malformed initializer is kept as text
        assert_eq!(
            classify("int a=4,"),
            Statement::Declaration {
                name: "a".to_string(),
                init: Some("4,".to_string())
            }
        );
    }

    #[test]
    fn test_array_declarations() {
        assert_eq!(
            classify("int a[3] = {1, 2}"),
            Statement::ArrayDeclaration {
                name: "a".to_string(),
                size: 3,
                init: vec!["1".to_string(), "2".to_string()]
            }
        );
        assert!(matches!(
            classify("float v[10]"),
            Statement::ArrayDeclaration { size: 10, ref init, .. } if init.is_empty()
        ));
        // Size must be a literal
        assert!(matches!(classify("int a[n]"), Statement::NoOp(_)));
    }

    #[test]
    fn test_output_arguments() {
        let stmt = classify(r#"printf("%s=%d\n", "x, y", a[i] + 1)"#);
        assert_eq!(
            stmt,
            Statement::Output {
                format: r"%s=%d\n".to_string(),
                args: vec![
                    Argument::Text("x, y".to_string()),
                    Argument::Expr("a[i] + 1".to_string())
                ]
            }
        );
    }

    #[test]
    fn test_input_targets() {
        assert_eq!(
            classify(r#"scanf("%d %d", &n, &arr[2])"#),
            Statement::Input {
                targets: vec![
                    scalar("n"),
                    Target::Element {
                        name: "arr".to_string(),
                        index: "2".to_string()
                    }
                ]
            }
        );
    }

    #[test]
    fn test_for_loop() {
        assert_eq!(
            classify("for(int i=0;i<3;i++){ printf(\"%d \", i); }"),
            Statement::For {
                init: "int i=0".to_string(),
                condition: "i<3".to_string(),
                increment: "i++".to_string(),
                body: "printf(\"%d \", i);".to_string()
            }
        );
        assert!(matches!(
            classify("for (;;) x++"),
            Statement::For { ref condition, ref body, .. } if condition.is_empty() && body == "x++"
        ));
    }

    #[test]
    fn test_if_else_forms() {
        assert_eq!(
            classify("if (a < b) { x = 1; } else if (a > b) { x = 2; } else { x = 3; }"),
            Statement::If {
                condition: "a < b".to_string(),
                then_branch: "x = 1;".to_string(),
                else_branch: Some("if (a > b) { x = 2; } else { x = 3; }".to_string())
            }
        );
        assert_eq!(
            classify("if (a < b) x = 1; else x = 2"),
            Statement::If {
                condition: "a < b".to_string(),
                then_branch: "x = 1".to_string(),
                else_branch: Some("x = 2".to_string())
            }
        );
    }

    #[test]
    fn test_while_and_do_while() {
        assert_eq!(
            classify("while (n > 0) { n--; }"),
            Statement::While {
                condition: "n > 0".to_string(),
                body: "n--;".to_string()
            }
        );
        assert_eq!(
            classify("do { n++; } while (n < 5)"),
            Statement::DoWhile {
                body: "n++;".to_string(),
                condition: "n < 5".to_string()
            }
        );
    }

    #[test]
    fn test_assignments() {
        assert_eq!(
            classify("x = x + 1"),
            Statement::Assignment {
                target: scalar("x"),
                op: AssignOp::Set,
                value: "x + 1".to_string()
            }
        );
        assert_eq!(
            classify("total += a[i]"),
            Statement::Assignment {
                target: scalar("total"),
                op: AssignOp::Add,
                value: "a[i]".to_string()
            }
        );
        assert_eq!(
            classify("--count"),
            Statement::Assignment {
                target: scalar("count"),
                op: AssignOp::Sub,
                value: "1".to_string()
            }
        );
        assert!(matches!(
            classify("a[i + 1] = 7"),
            Statement::Assignment { target: Target::Element { ref index, .. }, .. } if index == "i + 1"
        ));
        assert!(matches!(classify("x == 3"), Statement::NoOp(_)));
        assert!(matches!(classify("x <= 3"), Statement::NoOp(_)));
    }

    #[test]
    fn test_return_jumps_and_noop() {
        assert_eq!(classify("return 0"), Statement::Return(Some("0".to_string())));
        assert_eq!(classify("return"), Statement::Return(None));
        assert_eq!(classify("break"), Statement::Break);
        assert_eq!(classify("continue"), Statement::Continue);
        assert_eq!(classify("{ x = 1; }"), Statement::Block("x = 1;".to_string()));
        assert_eq!(
            classify("puts(\"hi\")"),
            Statement::NoOp("puts(\"hi\")".to_string())
        );
    }
}
