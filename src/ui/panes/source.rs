//! Source code pane rendering with syntax highlighting
//!
//! Displays the submitted program with line numbers and basic highlighting
//! for the C subset the simulator understands.
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one line of C
fn highlight_source_code<'a>(line: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    // Simple tokenizer
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments and preprocessor lines run to end of line
        if (c == '/' && chars.get(i + 1) == Some(&'/')) || (c == '#' && current_word.is_empty()) {
            flush_word(&mut spans, &mut current_word, false, theme);
            let style = if c == '#' {
                Style::default().fg(theme.secondary)
            } else {
                Style::default().fg(theme.comment)
            };
            spans.push(Span::styled(chars[i..].iter().collect::<String>(), style));
            break;
        }

        // Strings and character literals
        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false, theme);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(theme.string),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' && c != '.' {
            flush_word(&mut spans, &mut current_word, c == '(', theme);

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(theme.primary), // Brackets
                _ => Style::default().fg(theme.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false, theme);
    spans
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String, is_function: bool, theme: &Theme) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, is_function, theme);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, is_function: bool, theme: &Theme) -> Style {
    match word {
        "int" | "char" | "void" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" | "const" => {
            Style::default().fg(theme.type_name) // Types
        }
        "return" | "if" | "else" | "while" | "for" | "do" | "break" | "continue" => {
            Style::default()
                .fg(theme.keyword)
                .add_modifier(Modifier::BOLD) // Keywords
        }
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => Style::default().fg(theme.number),
        _ => {
            if is_function {
                Style::default().fg(theme.function)
            } else {
                Style::default().fg(theme.fg) // Variables/Identifiers
            }
        }
    }
}

/// Render the source pane. `scroll_offset` is clamped to the content.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    title: &str,
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
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = source.lines().count();
    let gutter_width = total_lines.max(1).to_string().len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(total_lines.saturating_sub(visible_height));

    let lines: Vec<Line> = source
        .lines()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} │ ", idx + 1, width = gutter_width),
                Style::default().fg(theme.comment),
            )];
            spans.extend(highlight_source_code(text, theme));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(theme.bg));
    frame.render_widget(paragraph, area);
}
