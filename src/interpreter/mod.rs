//! Statement interpreter behind the "Run Code" action
//!
//! - [`engine`]: the [`Interpreter`] and statement dispatch
//! - [`errors`]: [`SimError`] and its user-facing messages
//! - [`builtins`]: `printf` formatting and simulated `scanf`
//! - [`constants`]: iteration cap, nesting limit, sample inputs
//!
//! # Execution Model
//!
//! Source text is pre-checked, the body of `main` is split into statements,
//! and each statement is classified and executed against one flat namespace.
//! Nested bodies are split again when reached. A run is synchronous and
//! bounded: every loop stops after `iteration_cap` iterations and body
//! nesting is limited to `max_depth`.
//!
//! [`simulate`] wraps a whole run and never fails; errors become the result
//! text.

pub mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod loops;
mod statements;

pub use engine::{ControlFlow, Interpreter};
pub use errors::{ErrorKind, SimError};

use crate::config::SimConfig;

/// Everything a caller may want to show after a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Program output, or the error message if the run failed
    pub text: String,

    /// The error that ended the run, if any
    pub error: Option<SimError>,

    /// Loops stopped by the iteration cap
    pub capped_loops: usize,

    /// Truncated value of the executed `return` expression
    pub exit_code: Option<i64>,

    /// Final scalar values, sorted by name (empty on error)
    pub variables: Vec<(String, f64)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs `source` with fresh state and collects the result.
pub fn simulate(source: &str, config: &SimConfig) -> RunReport {
    let mut interpreter = Interpreter::new(config.clone());
    match interpreter.run(source) {
        Ok(()) => RunReport {
            text: interpreter.output().text(),
            error: None,
            capped_loops: interpreter.capped_loops(),
            exit_code: interpreter.exit_code(),
            variables: interpreter
                .namespace()
                .scalars()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        },
        Err(e) => RunReport {
            text: e.to_string(),
            error: Some(e),
            capped_loops: interpreter.capped_loops(),
            exit_code: None,
            variables: Vec::new(),
        },
    }
}

/// Runs `source` with the default (permissive) configuration and returns the
/// text to display: the program's output or an error message.
pub fn run_simulated_program(source: &str) -> String {
    simulate(source, &SimConfig::default()).text
}
