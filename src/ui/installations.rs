//! Installation status page.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::installations::{InstallationTree, RowKind, StatusSummary, TreeLoad, TreeRow};
use crate::ui::helpers::{scroll_offset, truncate_to_width};
use crate::ui::theme::Theme;

/// Two cells per nesting level; panel bodies sit one level deeper than their header.
fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// `✔ n ✖ n ↻ n` tail of a collapsed header, empty for leaves.
fn summary_spans(summary: StatusSummary, th: &Theme) -> Vec<Span<'static>> {
    if summary.total() == 0 {
        return Vec::new();
    }
    vec![
        Span::styled("  [", Style::default().fg(th.overlay1)),
        Span::styled(format!("✔ {}", summary.succeeded), Style::default().fg(th.green)),
        Span::raw(" "),
        Span::styled(format!("✖ {}", summary.failed), Style::default().fg(th.red)),
        Span::raw(" "),
        Span::styled(format!("↻ {}", summary.other), Style::default().fg(th.yellow)),
        Span::styled("]", Style::default().fg(th.overlay1)),
    ]
}

/// What: Turn one flattened row into a styled line.
fn row_line(row: &TreeRow, selected: bool, width: usize, th: &Theme) -> Line<'static> {
    let pad = indent(row.depth);
    match &row.kind {
        RowKind::Header {
            glyph,
            title,
            expanded,
            summary,
        } => {
            let marker = if *expanded { "▾ " } else { "▸ " };
            let budget = width.saturating_sub(pad.len() + 4);
            let mut spans = vec![
                Span::raw(pad),
                Span::styled(marker, Style::default().fg(th.overlay1)),
                Span::styled(
                    format!("{} ", glyph.symbol()),
                    Style::default().fg(th.glyph(*glyph)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    truncate_to_width(title, budget),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
            ];
            if !*expanded {
                spans.extend(summary_spans(*summary, th));
            }
            let line = Line::from(spans);
            if selected {
                line.style(Style::default().fg(th.crust).bg(th.lavender))
            } else {
                line
            }
        }
        RowKind::Detail(d) => Line::from(vec![
            Span::raw(format!("{pad}    ")),
            Span::styled(format!("{}: ", d.label), Style::default().fg(th.sapphire)),
            Span::styled(d.value.clone(), Style::default().fg(th.text)),
        ]),
        RowKind::SubinstallationsCaption { count } => Line::from(vec![
            Span::raw(format!("{pad}    ")),
            Span::styled("Subinstallations: ", Style::default().fg(th.sapphire)),
            Span::styled(
                if *count == 0 {
                    "none".to_string()
                } else {
                    count.to_string()
                },
                Style::default().fg(th.subtext0),
            ),
        ]),
        RowKind::Execution(summary) => Line::from(vec![
            Span::raw(format!("{pad}    ")),
            Span::styled("Execution: ", Style::default().fg(th.sapphire)),
            Span::styled(summary.clone(), Style::default().fg(th.subtext0)),
        ]),
        RowKind::DeployItem(item) => Line::from(vec![
            Span::raw(format!("{pad}      ")),
            Span::styled(
                format!("{} ", item.glyph.symbol()),
                Style::default().fg(th.glyph(item.glyph)),
            ),
            Span::styled(
                truncate_to_width(&item.title, width.saturating_sub(pad.len() + 10)),
                Style::default().fg(th.text),
            ),
            Span::styled(format!("  {}", item.phase), Style::default().fg(th.subtext0)),
        ]),
    }
}

/// What: Build the page body.
///
/// Output:
/// - Lines to draw and the index of the highlighted header line.
///
/// Details:
/// - Shows the load state while the forest is empty.
#[must_use]
pub fn installation_lines(
    tree: &InstallationTree,
    width: usize,
    th: &Theme,
) -> (Vec<Line<'static>>, usize) {
    if tree.forest().is_empty() {
        let (text, color) = match tree.load_state() {
            TreeLoad::Idle => ("Not loaded".to_string(), th.overlay1),
            TreeLoad::Loading => ("Loading installations…".to_string(), th.yellow),
            TreeLoad::Loaded => ("No installations found".to_string(), th.overlay1),
            TreeLoad::Failed(msg) => (format!("Error: {msg}"), th.red),
        };
        return (vec![Line::from(Span::styled(text, Style::default().fg(color)))], 0);
    }
    let selected = tree.selected();
    let mut selected_line = 0;
    let lines = tree
        .visible_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_selected = row.is_header() && selected == Some(row.path.as_slice());
            if is_selected {
                selected_line = i;
            }
            row_line(row, is_selected, width, th)
        })
        .collect();
    (lines, selected_line)
}

/// Draw the installation tree into `area`.
pub fn render_installations(f: &mut Frame, tree: &InstallationTree, area: Rect, th: &Theme) {
    let inner_w = usize::from(area.width.saturating_sub(2));
    let inner_h = area.height.saturating_sub(2);
    let (lines, selected_line) = installation_lines(tree, inner_w, th);
    let filter = tree.filter();
    let scope = if filter.namespace.is_empty() {
        "all namespaces".to_string()
    } else {
        format!("namespace {}", filter.namespace)
    };
    let mut title = format!("Installations ({}) · {scope}", tree.forest().len());
    if matches!(tree.load_state(), TreeLoad::Loading) {
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
