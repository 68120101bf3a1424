//! Terminal rendering for the dashboard.
//!
//! `ui` draws the tab bar, the visible page, the status bar and, when open,
//! the repository context picker.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
};

use crate::state::{AppState, Page};

pub mod components;
pub mod helpers;
pub mod installations;
pub mod picker;
pub mod theme;

use helpers::truncate_to_width;
use theme::{Theme, theme};

/// Key hints shown when no notice is pending.
const HINTS: &str = "Tab page · ↑↓ move · Enter expand · ← collapse · r reload · c context · q quit";

/// Draw one frame.
pub fn ui(f: &mut Frame, app: &AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(f, app, chunks[0], &th);
    render_context_bar(f, app, chunks[1], &th);
    match app.page {
        Page::Components => components::render_components(f, &app.browser, chunks[2], &th),
        Page::Installations => installations::render_installations(f, &app.tree, chunks[2], &th),
    }
    render_status_bar(f, app, chunks[3], &th);

    if let Some(p) = &app.picker {
        picker::render_picker(f, p, area, &th);
    }
}

/// Page tabs with the data source on the right.
fn render_tabs(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let titles: Vec<Line> = [Page::Components, Page::Installations]
        .iter()
        .map(|p| Line::from(p.title()))
        .collect();
    let selected = match app.page {
        Page::Components => 0,
        Page::Installations => 1,
    };
    let source = format!(" {} ", app.source_label);
    let source_w = u16::try_from(source.chars().count()).unwrap_or(0).min(area.width);
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(source_w)])
        .split(area);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(th.overlay1))
        .highlight_style(Style::default().fg(th.mauve).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, split[0]);
    f.render_widget(
        Paragraph::new(Span::styled(source, Style::default().fg(th.subtext0))),
        split[1],
    );
}

/// Repository context as breadcrumbs.
fn render_context_bar(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let ctx = app.browser.context();
    let crumbs = if ctx.is_empty() {
        "<no repository context>".to_string()
    } else {
        ctx.breadcrumbs().join(" › ")
    };
    let width = usize::from(area.width).saturating_sub(10);
    let line = Line::from(vec![
        Span::styled(" Context ", Style::default().fg(th.sapphire).add_modifier(Modifier::BOLD)),
        Span::styled(truncate_to_width(&crumbs, width), Style::default().fg(th.text)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Pending notice, else key hints.
fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let width = usize::from(area.width).saturating_sub(1);
    let line = match &app.notice {
        Some(n) if n.is_error => Line::from(Span::styled(
            truncate_to_width(&format!(" {} (Esc)", n.message), width),
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        )),
        Some(n) => Line::from(Span::styled(
            truncate_to_width(&format!(" {}", n.message), width),
            Style::default().fg(th.green),
        )),
        None => Line::from(Span::styled(
            truncate_to_width(&format!(" {HINTS}"), width),
            Style::default().fg(th.overlay1),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
