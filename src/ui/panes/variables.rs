//! Final variable values after a successful run

use crate::interpreter::builtins::number_to_string;
use crate::interpreter::RunReport;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    report: Option<&RunReport>,
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

    let mut title = String::from(" Variables ");
    if let Some(code) = report.and_then(|r| r.exit_code) {
        title = format!(" Variables (exit {}) ", code);
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg));

    let variables = report.map(|r| r.variables.as_slice()).unwrap_or_default();
    let name_width = variables
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(variables.len().saturating_sub(visible_height));

    let items: Vec<ListItem> = variables
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(name, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", name, width = name_width),
                    Style::default().fg(theme.type_name),
                ),
                Span::styled(" = ", Style::default().fg(theme.comment)),
                Span::styled(number_to_string(*value), Style::default().fg(theme.number)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
