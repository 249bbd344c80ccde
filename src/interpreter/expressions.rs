//! Expression and condition evaluation
//!
//! Expressions are resolved straight from their text, in this order:
//!
//! 1. numeric literal (optional sign, optional fraction)
//! 2. character literal (`'A'`, `'\n'`)
//! 3. parenthesised expression or cast
//! 4. variable name
//! 5. `name[index]`
//! 6. binary split: the operators `+ - * / %` are tried in that fixed order
//!    and the expression is cut at the first top-level occurrence of the
//!    first one present. The left half is evaluated on its own and the right
//!    half goes through the same steps again. There is no precedence
//!    climbing, so `10 - 4 - 3` is `10 - (4 - 3)`.
//! 7. unary minus
//! 8. anything else is 0 (an error in strict mode)
//!
//! Parentheses, casts and array indices may nest at most
//! [`MAX_EXPRESSION_DEPTH`] levels; deeper input fails with
//! [`SimError::ExpressionTooDeep`]. Operator chains of any length are fine.
//!
//! Conditions look for `<= >= == !=` before `< >` and compare the two sides.
//! `&&`, `||` and `!` are not supported and make a condition false.

use crate::interpreter::constants::MAX_EXPRESSION_DEPTH;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::SimError;
use crate::parser::ast::Target;
use crate::parser::classify::parse_target;
use crate::parser::scan::{
    find_matching, find_top_level, is_identifier, scan_top_level, starts_with_keyword, unescape,
};

/// Binary operators in the order they are searched for
const ARITHMETIC_OPERATORS: [char; 5] = ['+', '-', '*', '/', '%'];

/// Relational operators, two-character forms first
const RELATIONAL_OPERATORS: [&str; 6] = ["<=", ">=", "==", "!=", "<", ">"];

/// Cast types that truncate toward zero
const INTEGER_CASTS: [&str; 4] = ["int", "long", "short", "char"];
const FLOAT_CASTS: [&str; 2] = ["float", "double"];

impl Interpreter {
    /// Evaluate an expression fragment to a number
    pub(crate) fn evaluate_expr(&self, expr: &str) -> Result<f64, SimError> {
        self.evaluate_at(expr, 0)
    }

    /// Runs of binary operators and unary minus are walked in a loop; only
    /// parentheses, casts, indices and left operands recurse, and that
    /// recursion is bounded by [`MAX_EXPRESSION_DEPTH`].
    fn evaluate_at(&self, expr: &str, depth: usize) -> Result<f64, SimError> {
        if depth > MAX_EXPRESSION_DEPTH {
            return Err(SimError::ExpressionTooDeep {
                limit: MAX_EXPRESSION_DEPTH,
            });
        }

        // (operator, left operand value, text of the split sub-expression)
        let mut pending: Vec<(char, f64, &str)> = Vec::new();
        let mut negate = false;
        let mut rest = expr.trim();

        let value = loop {
            if let Some(value) = self.evaluate_operand(rest, depth)? {
                break value;
            }

            if let Some((pos, op)) = find_binary_operator(rest) {
                let left = self.evaluate_at(&rest[..pos], depth + 1)?;
                pending.push((op, left, rest));
                rest = rest[pos + 1..].trim();
                continue;
            }

            if let Some(operand) = rest.strip_prefix('-') {
                negate = !negate;
                rest = operand.trim();
                continue;
            }

            break self.fallback(rest, 0.0)?;
        };

        let mut value = if negate { -value } else { value };
        while let Some((op, left, text)) = pending.pop() {
            value = apply_operator(op, left, value, text)?;
        }
        Ok(value)
    }

    /// Shapes that are not a binary or unary operation: literals,
    /// parenthesised expressions, casts, variables and array elements.
    fn evaluate_operand(&self, expr: &str, depth: usize) -> Result<Option<f64>, SimError> {
        if let Some(value) = parse_number(expr) {
            return Ok(Some(value));
        }

        if let Some(value) = char_literal_value(expr) {
            return Ok(Some(value));
        }

        if let Some(inner) = strip_outer_parens(expr) {
            return self.evaluate_at(inner, depth + 1).map(Some);
        }

        if let Some((truncate, operand)) = split_cast(expr) {
            let value = self.evaluate_at(operand, depth + 1)?;
            return Ok(Some(if truncate { value.trunc() } else { value }));
        }

        if is_identifier(expr) {
            if let Some(value) = self.namespace.get(expr) {
                return Ok(Some(value));
            }
        }

        if let Some(Target::Element { name, index }) = parse_target(expr) {
            let index = self.evaluate_at(&index, depth + 1)?;
            return Ok(Some(self.namespace.element(&name, index.trunc() as i64)));
        }

        Ok(None)
    }

    /// Evaluate a relational condition
    pub(crate) fn evaluate_condition(&self, condition: &str) -> Result<bool, SimError> {
        let mut condition = condition.trim();
        while let Some(inner) = strip_outer_parens(condition) {
            condition = inner.trim();
        }

        let uses_logic = (condition.starts_with('!') && !condition.starts_with("!="))
            || find_top_level(condition, "&&").is_some()
            || find_top_level(condition, "||").is_some();
        if uses_logic {
            return self.fallback(condition, false);
        }

        for op in RELATIONAL_OPERATORS {
            if let Some(pos) = find_top_level(condition, op) {
                let left = self.evaluate_expr(&condition[..pos])?;
                let right = self.evaluate_expr(&condition[pos + op.len()..])?;
                return Ok(compare(op, left, right));
            }
        }

        self.fallback(condition, false)
    }
}

/// Applies one of `+ - * / %`; division and modulo by zero are errors.
pub(crate) fn apply_operator(op: char, left: f64, right: f64, expr: &str) -> Result<f64, SimError> {
    match op {
        '+' => Ok(left + right),
        '-' => Ok(left - right),
        '*' => Ok(left * right),
        '/' | '%' if right == 0.0 => Err(SimError::DivisionByZero {
            expr: expr.to_string(),
        }),
        '/' => Ok(left / right),
        '%' => Ok(left % right),
        _ => Ok(0.0),
    }
}

fn compare(op: &str, left: f64, right: f64) -> bool {
    match op {
        "<=" => left <= right,
        ">=" => left >= right,
        "==" => left == right,
        "!=" => left != right,
        "<" => left < right,
        ">" => left > right,
        _ => false,
    }
}

/// `[+-]?digits(.digits)?`
fn parse_number(s: &str) -> Option<f64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }
    s.parse().ok()
}

fn char_literal_value(s: &str) -> Option<f64> {
    let inner = s.strip_prefix('\'')?.strip_suffix('\'')?;
    let text = unescape(inner);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32 as f64),
        _ => None,
    }
}

/// `( inner )` where the parentheses wrap the whole expression
fn strip_outer_parens(s: &str) -> Option<&str> {
    let close = find_matching(s, '(', ')')?;
    (close == s.len() - 1).then(|| &s[1..close])
}

/// `(type) operand`; the flag says whether the cast truncates.
fn split_cast(s: &str) -> Option<(bool, &str)> {
    let close = find_matching(s, '(', ')')?;
    let type_name = s[1..close].trim();
    let operand = &s[close + 1..];
    let is_cast = |names: &[&str]| names.iter().any(|n| starts_with_keyword(type_name, n));
    if is_cast(&INTEGER_CASTS) {
        Some((true, operand))
    } else if is_cast(&FLOAT_CASTS) {
        Some((false, operand))
    } else {
        None
    }
}

/// First top-level occurrence of the first operator (in search order) that
/// appears in binary position.
fn find_binary_operator(expr: &str) -> Option<(usize, char)> {
    ARITHMETIC_OPERATORS.iter().find_map(|&op| {
        scan_top_level(expr, |i, c| c == op && is_binary_position(expr, i)).map(|pos| (pos, op))
    })
}

/// An operator is binary when something other than another operator or an
/// opening delimiter precedes it.
fn is_binary_position(expr: &str, pos: usize) -> bool {
    match expr[..pos].trim_end().chars().next_back() {
        None => false,
        Some(prev) => !matches!(
            prev,
            '+' | '-' | '*' | '/' | '%' | '(' | '[' | ',' | '=' | '<' | '>' | '!'
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn interpreter() -> Interpreter {
        let mut interp = Interpreter::new(SimConfig::default());
        interp.namespace.declare("x", 6.0);
        interp.namespace.declare("y", 4.0);
        interp.namespace.declare_array("a", 3, &[10.0, 20.0]);
        interp
    }

    #[test]
    fn test_literals() {
        let interp = interpreter();
        assert_eq!(interp.evaluate_expr("-3.5").unwrap(), -3.5);
        assert_eq!(interp.evaluate_expr("+7").unwrap(), 7.0);
        assert_eq!(interp.evaluate_expr("'A'").unwrap(), 65.0);
        assert_eq!(interp.evaluate_expr("'\\n'").unwrap(), 10.0);
    }

    #[test]
    fn test_variables_and_arrays() {
        let interp = interpreter();
        assert_eq!(interp.evaluate_expr("x").unwrap(), 6.0);
        assert_eq!(interp.evaluate_expr("a[1]").unwrap(), 20.0);
        assert_eq!(interp.evaluate_expr("a[2]").unwrap(), 0.0);
        assert_eq!(interp.evaluate_expr("a[7]").unwrap(), 0.0);
        assert_eq!(interp.evaluate_expr("missing[0]").unwrap(), 0.0);
        assert_eq!(interp.evaluate_expr("a[y - 3]").unwrap(), 20.0);
    }

    #[test]
    fn test_fixed_operator_order() {
        let interp = interpreter();
        // '+' is found before '*'
        assert_eq!(interp.evaluate_expr("x * 2 + 1").unwrap(), 13.0);
        // '-' splits at its first occurrence: 10 - (4 - 3)
        assert_eq!(interp.evaluate_expr("10 - 4 - 3").unwrap(), 9.0);
        // '*' is found before '/': (8 / 4) * 2
        assert_eq!(interp.evaluate_expr("8 / 4 * 2").unwrap(), 4.0);
        assert_eq!(interp.evaluate_expr("(x + y) * 2").unwrap(), 20.0);
        assert_eq!(interp.evaluate_expr("x * -2").unwrap(), -12.0);
        assert_eq!(interp.evaluate_expr("7 % 4").unwrap(), 3.0);
        assert_eq!(interp.evaluate_expr("7 / 2").unwrap(), 3.5);
        assert_eq!(interp.evaluate_expr("(int) 7.9").unwrap(), 7.0);
    }

    #[test]
    fn test_unknown_shapes_are_zero() {
        let interp = interpreter();
        assert_eq!(interp.evaluate_expr("4,").unwrap(), 0.0);
        assert_eq!(interp.evaluate_expr("undeclared").unwrap(), 0.0);
        assert_eq!(interp.evaluate_expr("strlen(s)").unwrap(), 0.0);
    }

    #[test]
    fn test_division_by_zero() {
        let interp = interpreter();
        assert!(matches!(
            interp.evaluate_expr("x / 0"),
            Err(SimError::DivisionByZero { .. })
        ));
        assert!(matches!(
            interp.evaluate_expr("x % (y - 4)"),
            Err(SimError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_conditions() {
        let interp = interpreter();
        assert!(interp.evaluate_condition("x <= 6").unwrap());
        assert!(!interp.evaluate_condition("x < 6").unwrap());
        assert!(interp.evaluate_condition("x != y").unwrap());
        assert!(interp.evaluate_condition("(a[0] == 10)").unwrap());
        assert!(interp.evaluate_condition("x + 1 > y * 1").unwrap());
        assert!(!interp.evaluate_condition("x > 1 && y > 1").unwrap());
        assert!(!interp.evaluate_condition("!x").unwrap());
        assert!(!interp.evaluate_condition("1").unwrap());
    }

    #[test]
    fn test_long_operator_chains() {
        let interp = interpreter();
        let sum = vec!["1"; 5000].join(" + ");
        assert_eq!(interp.evaluate_expr(&sum).unwrap(), 5000.0);
        // Right-nested like every other chain: 100 - (1 - (1 - ...))
        let difference = format!("100 - {}", vec!["1"; 4001].join(" - "));
        assert_eq!(interp.evaluate_expr(&difference).unwrap(), 99.0);
        let negations = format!("{}x", "- ".repeat(3001));
        assert_eq!(interp.evaluate_expr(&negations).unwrap(), -6.0);
    }

    #[test]
    fn test_nesting_limit_for_expressions() {
        let interp = interpreter();
        let shallow = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(interp.evaluate_expr(&shallow).unwrap(), 6.0);

        let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(
            interp.evaluate_expr(&deep),
            Err(SimError::ExpressionTooDeep {
                limit: MAX_EXPRESSION_DEPTH
            })
        );
        let casts = format!("{}1", "(int) ".repeat(5000));
        assert!(matches!(
            interp.evaluate_expr(&casts),
            Err(SimError::ExpressionTooDeep { .. })
        ));
        let condition = format!("{}x > 1{}", "(".repeat(5000), ")".repeat(5000));
        assert!(interp.evaluate_condition(&condition).unwrap());
    }

    #[test]
    fn test_strict_mode_rejects_fallbacks() {
        let interp = Interpreter::new(SimConfig::strict());
        assert!(matches!(
            interp.evaluate_expr("foo(1)"),
            Err(SimError::UnsupportedConstruct { .. })
        ));
        assert!(matches!(
            interp.evaluate_condition("a || b"),
            Err(SimError::UnsupportedConstruct { .. })
        ));
    }
}
