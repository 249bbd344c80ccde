//! # Introduction
//!
//! labsim backs the "Run Code" button of a network-lab write-up site: a
//! visitor submits C-like source and gets back a simulated compile-and-run
//! result. Nothing is compiled. A small statement interpreter covers the
//! subset the lab snippets use and everything it does not understand quietly
//! becomes a no-op.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Pre-checks → main body → Splitter → Classifier → Interpreter → Output text
//! ```
//!
//! 1. [`parser`]: pre-checks, comment stripping, statement splitting and
//!    classification into [`parser::ast::Statement`] variants.
//! 2. [`interpreter`]: executes statements against a flat
//!    [`memory::Namespace`] and collects text in an [`output::OutputBuffer`].
//! 3. [`config`]: permissive/strict mode, iteration cap, nesting limit.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported subset
//!
//! Declarations of scalars and fixed-size arrays, `printf`, simulated
//! `scanf`, `if/else`, `for`, `while`, `do-while`, `break`, `continue`,
//! assignments (plain, compound, `++`/`--`) and `return`, all inside a single
//! `main`. Arithmetic has no operator precedence; see
//! [`interpreter`] for the exact rules.
//!
//! ```
//! let source = "#include <stdio.h>\nint main() { int x = 5; printf(\"%d\", x); }";
//! assert_eq!(labsim::run_simulated_program(source), "5");
//! ```

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod output;
pub mod parser;
pub mod ui;

pub use config::SimConfig;
pub use interpreter::{run_simulated_program, simulate, RunReport};
