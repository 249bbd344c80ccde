//! Error types for the simulated C runner
//!
//! [`SimError`] covers every way a run can fail, from the source pre-checks
//! to runtime faults. Its `Display` output is the complete text handed back
//! to the caller in place of program output; there is never partial output
//! followed by an error.

use std::fmt;

/// Broad category of a [`SimError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing `#include` or missing entry routine
    Structure,
    /// Output call without its header
    Declaration,
    /// Heuristic missing-semicolon detection
    SyntaxHeuristic,
    /// Fault while executing statements
    Runtime,
    /// Construct rejected in strict mode
    Unsupported,
}

/// Errors that end a simulated run
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// No `#include` directive anywhere in the source
    MissingInclude,

    /// No `main` marker, or no braced body after it
    NoEntryRoutine,

    /// A function used without the header that declares it
    UndeclaredFunction { name: String },

    /// A line calling `printf`/`scanf` that is not terminated (1-based line)
    MissingSemicolon { line: usize },

    /// Division or modulo by zero
    DivisionByZero { expr: String },

    /// Nested bodies deeper than the configured limit
    NestingTooDeep { limit: usize },

    /// An expression nested deeper than the evaluator allows
    ExpressionTooDeep { limit: usize },

    /// Strict mode only: a statement, expression or condition that would
    /// otherwise fall back silently
    UnsupportedConstruct { fragment: String },
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::MissingInclude | SimError::NoEntryRoutine => ErrorKind::Structure,
            SimError::UndeclaredFunction { .. } => ErrorKind::Declaration,
            SimError::MissingSemicolon { .. } => ErrorKind::SyntaxHeuristic,
            SimError::DivisionByZero { .. }
            | SimError::NestingTooDeep { .. }
            | SimError::ExpressionTooDeep { .. } => ErrorKind::Runtime,
            SimError::UnsupportedConstruct { .. } => ErrorKind::Unsupported,
        }
    }

    fn heading(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Structure | ErrorKind::Declaration | ErrorKind::SyntaxHeuristic => {
                "Compilation Error:"
            }
            ErrorKind::Runtime | ErrorKind::Unsupported => "Runtime Error:",
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        match self {
            SimError::MissingInclude => {
                write!(
                    f,
                    "Missing #include directive. Add #include <stdio.h> at the top of the program."
                )
            }
            SimError::NoEntryRoutine => {
                write!(f, "No main function found. Define int main() {{ ... }}.")
            }
            SimError::UndeclaredFunction { name } => {
                write!(
                    f,
                    "'{}' was not declared in this scope. Did you forget #include <stdio.h>?",
                    name
                )
            }
            SimError::MissingSemicolon { line } => {
                write!(f, "Line {}: expected ';' at end of statement.", line)
            }
            SimError::DivisionByZero { expr } => {
                write!(f, "Division by zero in '{}'.", expr)
            }
            SimError::NestingTooDeep { limit } => {
                write!(f, "Blocks nested deeper than {} levels.", limit)
            }
            SimError::ExpressionTooDeep { limit } => {
                write!(f, "Expression nested deeper than {} levels.", limit)
            }
            SimError::UnsupportedConstruct { fragment } => {
                write!(f, "Unsupported construct: '{}'.", fragment)
            }
        }
    }
}

impl std::error::Error for SimError {}
