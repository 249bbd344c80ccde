//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, background runs
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   output, variables, status bar)
//! - **[`theme`]**: dark and light color palettes used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source
//! file and a [`SimConfig`] and call [`App::run`] to start the event loop.
//!
//! [`SimConfig`]: crate::config::SimConfig
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
