//! Program output pane rendering

use crate::interpreter::RunReport;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the output pane: the run's result text, or a placeholder while no
/// run has finished yet.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    report: Option<&RunReport>,
    is_running: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
    theme: &Theme,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg));

    let placeholder = match report {
        _ if is_running => Some("(running...)"),
        None => Some("(press r to run)"),
        Some(r) if r.text.is_empty() => Some("(no output)"),
        Some(_) => None,
    };

    let Some(report) = report.filter(|_| placeholder.is_none()) else {
        let paragraph = Paragraph::new(placeholder.unwrap_or_default())
            .block(block)
            .style(Style::default().fg(theme.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let text_style = if report.is_success() {
        Style::default().fg(theme.fg)
    } else {
        Style::default().fg(theme.error)
    };

    let mut lines: Vec<String> = report.text.lines().map(str::to_string).collect();
    if report.capped_loops > 0 {
        lines.push(format!(
            "[{} loop(s) stopped at the iteration cap]",
            report.capped_loops
        ));
    }

    // Calculate visible range for scrolling
    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    *scroll_offset = (*scroll_offset).min(total_items.saturating_sub(visible_height));

    let visible_items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line).style(text_style))
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
