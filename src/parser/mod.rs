//! Source handling for the simulated C runner
//!
//! There is no grammar and no token stream. Source text goes through:
//! - [`preprocess`]: pre-checks, comment stripping, `#define` expansion and
//!   extraction of the `main` body
//! - [`splitter`]: brace/paren/literal-aware statement splitting
//! - [`classify`]: one statement fragment → one [`ast::Statement`] variant
//!
//! Nested bodies are kept as text and go through the splitter and classifier
//! again when the interpreter reaches them.

pub mod ast;
pub mod classify;
pub mod preprocess;
pub(crate) mod scan;
pub mod splitter;

pub use classify::classify;
pub use preprocess::prepare;
pub use splitter::split_statements;
