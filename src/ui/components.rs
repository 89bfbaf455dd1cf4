//! Reusable UI component helpers

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Bordered box with a styled title
pub fn panel<'a>(title: impl Into<String>, border: Color, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title.into()),
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

/// Filled button with its key hint. While `loading`, the label becomes a spinner.
pub fn button<'a>(
    label: &'a str,
    hint: &'a str,
    fill: Color,
    theme: &Theme,
    loading: Option<usize>,
) -> Paragraph<'a> {
    let face_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let face = match loading {
        Some(frame) => Span::styled(spinner(frame), face_style),
        None => Span::styled(label, face_style),
    };

    Paragraph::new(vec![
        Line::from(face),
        Line::from(Span::styled(hint, Style::default().fg(theme.text_dim))),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(fill))
}

/// Page heading, bold in the primary text color
pub fn heading(text: &str, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
