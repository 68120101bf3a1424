//! Repository context picker popup.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::logic::contexts::ContextPicker;
use crate::ui::helpers::{centered_rect, truncate_to_width};
use crate::ui::theme::Theme;

/// What: Draw the picker centered over `area`.
///
/// Details:
/// - First line is the input with a cursor block; suggestions follow, the
///   highlighted one inverted. Typed text that is not a known context is
///   listed first and labelled as new.
pub fn render_picker(f: &mut Frame, picker: &ContextPicker, area: Rect, th: &Theme) {
    let suggestions = picker.suggestions();
    let rows = u16::try_from(suggestions.len().max(1)).unwrap_or(u16::MAX);
    let rect = centered_rect(70, rows.saturating_add(4), area);
    let width = usize::from(rect.width.saturating_sub(4));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(th.sapphire)),
            Span::styled(picker.input().to_string(), Style::default().fg(th.text)),
            Span::styled("█", Style::default().fg(th.overlay1)),
        ]),
        Line::from(""),
    ];
    if suggestions.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width("Type a repository context", width),
            Style::default().fg(th.overlay1),
        )));
    }
    let typed_is_new = picker.typed_is_new();
    for (i, s) in suggestions.iter().enumerate() {
        let style = if i == picker.highlighted() {
            Style::default()
                .fg(th.crust)
                .bg(th.lavender)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.subtext0)
        };
        if i == 0 && typed_is_new {
            let text = truncate_to_width(s, width.saturating_sub(6));
            lines.push(Line::from(vec![
                Span::styled(text, style),
                Span::styled(" (new)", Style::default().fg(th.overlay1)),
            ]));
        } else {
            lines.push(Line::from(Span::styled(truncate_to_width(s, width), style)));
        }
    }

    let block = Block::default()
        .title(Span::styled(
            " Repository context ",
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.mauve))
        .style(Style::default().bg(th.base));
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
