//! Component browser page.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::components::{ComponentBrowser, ComponentDetail, ListingState};
use crate::ui::helpers::{scroll_offset, truncate_to_width};
use crate::ui::theme::Theme;

/// What: Lines of an open component panel.
fn detail_lines(detail: ComponentDetail<'_>, th: &Theme) -> Vec<Line<'static>> {
    let indent = "    ";
    match detail {
        ComponentDetail::NoDataYet { loading: false } => vec![Line::from(Span::styled(
            format!("{indent}No data yet"),
            Style::default().fg(th.overlay1),
        ))],
        ComponentDetail::NoDataYet { loading: true } => vec![Line::from(Span::styled(
            format!("{indent}No data yet (loading…)"),
            Style::default().fg(th.yellow),
        ))],
        ComponentDetail::NoVersions => vec![Line::from(Span::styled(
            format!("{indent}No versions"),
            Style::default().fg(th.overlay1),
        ))],
        ComponentDetail::Error(msg) => vec![Line::from(Span::styled(
            format!("{indent}Error: {msg}"),
            Style::default().fg(th.red),
        ))],
        ComponentDetail::Versions(list) => {
            let mut lines = vec![Line::from(Span::styled(
                format!("{indent}Versions:"),
                Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD),
            ))];
            lines.extend(list.iter().map(|v| {
                Line::from(Span::styled(
                    format!("{indent}  • {v}"),
                    Style::default().fg(th.text),
                ))
            }));
            lines
        }
    }
}

/// What: Build the page body.
///
/// Inputs:
/// - `browser`: Component browser state.
/// - `width`: Inner width available for text.
/// - `th`: Palette.
///
/// Output:
/// - Lines to draw and the index of the highlighted line.
///
/// Details:
/// - Each component is one header line; an open panel adds its detail lines below it.
/// - Without components the listing state is shown instead.
#[must_use]
pub fn component_lines(
    browser: &ComponentBrowser,
    width: usize,
    th: &Theme,
) -> (Vec<Line<'static>>, usize) {
    let components = browser.components();
    if components.is_empty() {
        let (text, color) = match browser.listing() {
            ListingState::Idle => ("Not loaded".to_string(), th.overlay1),
            ListingState::Loading => ("Loading components…".to_string(), th.yellow),
            ListingState::Loaded => ("No components in this repository context".to_string(), th.overlay1),
            ListingState::Failed(msg) => (format!("Error: {msg}"), th.red),
        };
        return (vec![Line::from(Span::styled(text, Style::default().fg(color)))], 0);
    }

    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (i, c) in components.iter().enumerate() {
        let expanded = browser.is_expanded(&c.name);
        let is_selected = i == browser.selected();
        if is_selected {
            selected_line = lines.len();
        }
        let marker = if expanded { "▾ " } else { "▸ " };
        let version = c.version.as_deref().map(|v| format!("  {v}")).unwrap_or_default();
        let name = truncate_to_width(&c.name, width.saturating_sub(2 + version.len()));
        let row_style = if is_selected {
            Style::default().fg(th.crust).bg(th.lavender)
        } else {
            Style::default()
        };
        lines.push(
            Line::from(vec![
                Span::styled(marker, Style::default().fg(th.overlay1)),
                Span::styled(name, Style::default().fg(th.text).add_modifier(Modifier::BOLD)),
                Span::styled(version, Style::default().fg(th.subtext0)),
            ])
            .style(row_style),
        );
        if expanded {
            lines.extend(detail_lines(browser.component_detail(&c.name), th));
        }
    }
    (lines, selected_line)
}

/// Draw the component browser into `area`.
pub fn render_components(f: &mut Frame, browser: &ComponentBrowser, area: Rect, th: &Theme) {
    let inner_w = usize::from(area.width.saturating_sub(2));
    let inner_h = area.height.saturating_sub(2);
    let (lines, selected_line) = component_lines(browser, inner_w, th);
    let mut title = format!("Components ({})", browser.components().len());
    if matches!(browser.listing(), ListingState::Loading) {
        title.push_str(" · loading");
    }
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(th.mauve)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay1));
    let body = Paragraph::new(lines)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(block)
        .scroll((scroll_offset(selected_line, inner_h), 0));
    f.render_widget(body, area);
}
