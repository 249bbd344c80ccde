//! Status bar rendering with keybindings and run state indicators

use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Coarse state of the current run, shown as the coloured badge on the left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Finished,
    Failed,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    state: RunState,
    strict: bool,
    theme: &Theme,
) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (badge, badge_bg) = match state {
        RunState::Idle => (" READY ", theme.primary),
        RunState::Running => (" RUNNING ", theme.secondary),
        RunState::Finished => (" DONE ", theme.success),
        RunState::Failed => (" ERROR ", theme.error),
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default().bg(theme.status_bg).fg(theme.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(theme.status_bg)
                .fg(if state == RunState::Failed {
                    theme.error
                } else {
                    theme.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.status_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(theme.comment).fg(Color::Black);
    let desc_style = Style::default().bg(theme.status_bg).fg(theme.fg);
    let sep_style = Style::default().bg(theme.status_bg).fg(theme.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        (" r ", " run "),
        (" s ", " strict "),
        (" t ", " theme "),
        (" ⇥ ", " focus "),
        (" ↑/↓ ", " scroll "),
        ("q", " quit "),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    right_spans.push(Span::styled("│", sep_style));
    right_spans.push(Span::styled(
        if strict { " STRICT " } else { " PERMISSIVE " },
        Style::default()
            .bg(if strict { theme.secondary } else { theme.success })
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(theme.status_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
