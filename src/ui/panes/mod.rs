//! TUI pane rendering modules
//!
//! Each pane module exports one stateless `render_*` function. Scroll offsets
//! are owned by [`App`](crate::ui::App) and clamped by the pane that renders
//! them.
//!
//! - [`source`]: submitted program with line numbers and syntax highlighting
//! - [`output`]: run result text or error message
//! - [`variables`]: final scalar values after a successful run
//! - [`status`]: status bar with keybindings and run state

pub mod output;
pub mod source;
pub mod status;
pub mod variables;

pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::{render_status_bar, RunState};
pub use variables::render_variables_pane;
