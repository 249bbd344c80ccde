//! Main TUI application state and logic

use crate::config::SimConfig;
use crate::interpreter::{simulate, ErrorKind, RunReport};
use crate::ui::panes::{self, RunState};
use crate::ui::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Variables,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> variables)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Source,
        }
    }
}

/// A run in flight on the worker thread
struct PendingRun {
    receiver: Receiver<RunReport>,
    started: Instant,
}

/// The main application state
pub struct App {
    /// File the source was loaded from; `r` re-reads it
    pub source_path: PathBuf,

    /// The source code being simulated
    pub source_code: String,

    pub config: SimConfig,

    /// Result of the last finished run
    pub report: Option<RunReport>,

    pending: Option<PendingRun>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,
    pub variables_scroll: usize,

    pub theme: &'static Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(
        source_path: PathBuf,
        source_code: String,
        config: SimConfig,
        theme: &'static Theme,
    ) -> Self {
        App {
            source_path,
            source_code,
            config,
            report: None,
            pending: None,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            output_scroll: 0,
            variables_scroll: 0,
            theme,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application. A first run starts immediately.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.start_run();

        loop {
            self.poll_run();
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so a finished run shows up without a keypress
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a simulation of the current source on a worker thread. A run
    /// already in flight is abandoned; its result is dropped.
    pub fn start_run(&mut self) {
        let (sender, receiver) = mpsc::channel();
        let source = self.source_code.clone();
        let config = self.config.clone();
        thread::spawn(move || {
            // The receiver is gone if the run was superseded
            let _ = sender.send(simulate(&source, &config));
        });
        self.pending = Some(PendingRun {
            receiver,
            started: Instant::now(),
        });
        self.status_message = String::from("Running...");
    }

    /// Picks up the result of the pending run, if it has finished.
    pub fn poll_run(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        match pending.receiver.try_recv() {
            Ok(report) => {
                let elapsed = pending.started.elapsed();
                self.pending = None;
                self.status_message = Self::summarize(&report, elapsed);
                self.report = Some(report);
                self.output_scroll = 0;
                self.variables_scroll = 0;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.status_message = String::from("Run aborted");
            }
        }
    }

    /// Blocks until the pending run finishes. Used by tests and headless callers.
    pub fn wait_for_run(&mut self) {
        if let Some(pending) = self.pending.take() {
            let started = pending.started;
            match pending.receiver.recv() {
                Ok(report) => {
                    self.status_message = Self::summarize(&report, started.elapsed());
                    self.report = Some(report);
                }
                Err(_) => self.status_message = String::from("Run aborted"),
            }
        }
    }

    fn summarize(report: &RunReport, elapsed: Duration) -> String {
        match &report.error {
            Some(e) => match e.kind() {
                ErrorKind::Runtime => String::from("Runtime error"),
                ErrorKind::Unsupported => String::from("Unsupported construct (strict mode)"),
                _ => String::from("Compilation failed"),
            },
            None => {
                let mut message = format!("Finished in {} ms", elapsed.as_millis());
                if let Some(code) = report.exit_code {
                    message.push_str(&format!(", exit code {}", code));
                }
                if report.capped_loops > 0 {
                    message.push_str(&format!(
                        ", {} loop(s) hit the iteration cap",
                        report.capped_loops
                    ));
                }
                message
            }
        }
    }

    fn run_state(&self) -> RunState {
        match &self.report {
            _ if self.is_running() => RunState::Running,
            None => RunState::Idle,
            Some(r) if r.is_success() => RunState::Finished,
            Some(_) => RunState::Failed,
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Right column: Output (top) | Variables (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let title = self.source_path.display().to_string();
        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            &title,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
            self.theme,
        );

        panes::render_output_pane(
            frame,
            right_rows[0],
            self.report.as_ref(),
            self.is_running(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
            self.theme,
        );

        panes::render_variables_pane(
            frame,
            right_rows[1],
            self.report.as_ref(),
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
            self.theme,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.run_state(),
            !self.config.permissive,
            self.theme,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.reload_and_run(),
            KeyCode::Char('s') => {
                self.config.permissive = !self.config.permissive;
                self.start_run();
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                self.status_message = format!("Theme: {}", self.theme.name);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Variables => &mut self.variables_scroll,
        }
    }

    /// Re-reads the source file and runs it again. A failed read keeps the
    /// previous source.
    fn reload_and_run(&mut self) {
        match fs::read_to_string(&self.source_path) {
            Ok(source) => {
                self.source_code = source;
                self.start_run();
            }
            Err(e) => {
                self.status_message = format!("Cannot read {}: {}", self.source_path.display(), e);
            }
        }
    }
}
