//! Built-in function implementations
//!
//! # Supported Built-ins
//!
//! - `printf(format, ...)`: formatted output into the output buffer
//! - `scanf(format, &target, ...)`: simulated input
//!
//! # Implementation Notes
//!
//! - Escapes (`\n \t \r \\ \"`) are expanded before conversions are
//!   processed.
//! - Conversions: `%d %i %u %x %f %g %c %s %%`, with optional `-`/`0` flags,
//!   width, precision and ignored `l`/`h` length modifiers.
//! - Integers are truncated toward zero; `%f`/`%g` default to two decimals.
//! - A conversion with no argument left stays in the output verbatim, and
//!   so does one whose width or precision exceeds [`MAX_FORMAT_FIELD`].
//! - `scanf` reads nothing. Each target receives the next value of
//!   [`SAMPLE_INPUTS`], chosen by how many variables exist so far, and an
//!   `Input: N` line is echoed.

use crate::interpreter::constants::{DEFAULT_FLOAT_PRECISION, MAX_FORMAT_FIELD, SAMPLE_INPUTS};
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::SimError;
use crate::parser::ast::{Argument, Target};
use crate::parser::scan::unescape;
use std::iter::Peekable;

/// 2^63: whole numbers below this print through `i64`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// An evaluated `printf` argument
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Number(f64),
    Text(String),
}

impl FormatArg {
    fn number(&self) -> f64 {
        match self {
            FormatArg::Number(n) => *n,
            FormatArg::Text(_) => 0.0,
        }
    }
}

impl Interpreter {
    pub(crate) fn builtin_printf(
        &mut self,
        format: &str,
        args: &[Argument],
    ) -> Result<(), SimError> {
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(match arg {
                Argument::Text(text) => FormatArg::Text(text.clone()),
                Argument::Expr(expr) => FormatArg::Number(self.evaluate_expr(expr)?),
            });
        }

        let output = format_printf(&unescape(format), &arg_values);
        self.output.print(output);
        Ok(())
    }

    pub(crate) fn builtin_scanf(&mut self, targets: &[Target]) -> Result<(), SimError> {
        for target in targets {
            let value = SAMPLE_INPUTS[self.namespace.scalar_count() % SAMPLE_INPUTS.len()];
            self.write_target(target, value as f64)?;
            self.output.echo_input(value);
        }
        Ok(())
    }
}

/// Expands the conversions of an already-unescaped format string.
pub fn format_printf(format: &str, args: &[FormatArg]) -> String {
    let mut output = String::new();
    let mut remaining_args = args.iter();
    let mut rest = format;

    while let Some(pos) = rest.find('%') {
        output.push_str(&rest[..pos]);
        let directive = &rest[pos..];

        let Some(conv) = Conversion::parse(directive) else {
            output.push('%');
            rest = &directive[1..];
            continue;
        };

        if conv.kind == '%' {
            output.push('%');
        } else {
            match remaining_args.next() {
                Some(arg) => output.push_str(&conv.render(arg)),
                None => output.push_str(&directive[..conv.len]),
            }
        }
        rest = &directive[conv.len..];
    }

    output.push_str(rest);
    output
}

/// Renders a number the way `%s` shows it: integral values without a
/// fractional part.
pub fn number_to_string(value: f64) -> String {
    // Beyond 2^63 the i64 cast would saturate
    if value.fract() == 0.0 && value.abs() < I64_LIMIT {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Reads a run of digits, saturating at `usize::MAX`.
fn take_number<I>(chars: &mut Peekable<I>) -> Option<usize>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|&(_, c)| c.to_digit(10)) {
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
        chars.next();
    }
    value
}

/// One parsed `%...` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conversion {
    left_align: bool,
    zero_pad: bool,
    width: Option<usize>,
    precision: Option<usize>,
    kind: char,
    /// Bytes of format text the directive spans, including the `%`
    len: usize,
}

impl Conversion {
    fn parse(directive: &str) -> Option<Conversion> {
        let mut chars = directive.char_indices().skip(1).peekable();
        let mut conv = Conversion {
            left_align: false,
            zero_pad: false,
            width: None,
            precision: None,
            kind: '%',
            len: 0,
        };

        while let Some(&(_, c)) = chars.peek() {
            match c {
                '-' => conv.left_align = true,
                '0' => conv.zero_pad = true,
                '+' | ' ' => {}
                _ => break,
            }
            chars.next();
        }

        conv.width = take_number(&mut chars);
        if chars.peek().is_some_and(|&(_, c)| c == '.') {
            chars.next();
            conv.precision = Some(take_number(&mut chars).unwrap_or(0));
        }

        while chars.peek().is_some_and(|&(_, c)| c == 'l' || c == 'h') {
            chars.next();
        }

        let too_wide = |field: Option<usize>| field.is_some_and(|n| n > MAX_FORMAT_FIELD);
        if too_wide(conv.width) || too_wide(conv.precision) {
            return None;
        }

        let (index, kind) = chars.next()?;
        if !matches!(kind, 'd' | 'i' | 'u' | 'x' | 'f' | 'g' | 'c' | 's' | '%') {
            return None;
        }
        conv.kind = kind;
        conv.len = index + kind.len_utf8();
        Some(conv)
    }

    fn render(&self, arg: &FormatArg) -> String {
        let body = match self.kind {
            'd' | 'i' | 'u' => format!("{}", arg.number().trunc() as i64),
            'x' => format!("{:x}", arg.number().trunc() as i64),
            'f' | 'g' => format!(
                "{:.*}",
                self.precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
                arg.number()
            ),
            'c' => match arg {
                FormatArg::Text(text) => text.chars().next().map(String::from).unwrap_or_default(),
                FormatArg::Number(n) => char::from_u32(n.trunc() as u32)
                    .map(String::from)
                    .unwrap_or_default(),
            },
            's' => match arg {
                FormatArg::Text(text) => match self.precision {
                    Some(max) => text.chars().take(max).collect(),
                    None => text.clone(),
                },
                FormatArg::Number(n) => number_to_string(*n),
            },
            _ => String::new(),
        };
        self.pad(body)
    }

    fn pad(&self, body: String) -> String {
        let width = self.width.unwrap_or(0);
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let fill = width - len;
        if self.left_align {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero_pad && matches!(self.kind, 'd' | 'i' | 'u' | 'x' | 'f' | 'g') {
            match body.strip_prefix('-') {
                Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
                None => format!("{}{}", "0".repeat(fill), body),
            }
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }
}
