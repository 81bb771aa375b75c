use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::{
    app::App,
    ui::highlight_line::SyntaxHighlighter,
    view::{DiffLine, LineType},
};

const ADDED_BG: Color = Color::Rgb(0, 100, 0);
const REMOVED_BG: Color = Color::Rgb(139, 0, 0);

pub fn render_diff_view(f: &mut Frame, area: Rect, app: &App) {
    let visible_lines = area.height.saturating_sub(2) as usize; // Account for borders

    let lines: Vec<Line> = app
        .rows
        .iter()
        .skip(app.scroll_offset)
        .take(visible_lines)
        .map(|row| render_diff_line(row, &app.highlighter))
        .collect();

    let body = if lines.is_empty() {
        Text::from(Span::styled(
            "No differences",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(lines)
    };

    let paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(app.title()))
        .scroll((0, app.horizontal_scroll_offset.min(u16::MAX as usize) as u16));

    f.render_widget(paragraph, area);

    let total_lines = app.line_count();
    if total_lines > visible_lines {
        let mut scrollbar_state = ScrollbarState::new(total_lines).position(app.scroll_offset);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_diff_line<'a>(row: &'a DiffLine, highlighter: &SyntaxHighlighter) -> Line<'a> {
    if row.line_type == LineType::Header {
        return Line::from(Span::styled(
            row.content.as_str(),
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let line_num_text = match (row.old_line_num, row.new_line_num) {
        (Some(old), Some(new)) => format!("{old:4}:{new:4} "),
        (Some(old), None) => format!("{old:4}:     "),
        (None, Some(new)) => format!("     {new:4} "),
        (None, None) => "          ".to_string(),
    };

    let mut spans = vec![Span::styled(
        line_num_text,
        Style::default().fg(Color::DarkGray),
    )];

    let (bg_color, prefix) = match row.line_type {
        LineType::Added => (Some(ADDED_BG), "+ "),
        LineType::Removed => (Some(REMOVED_BG), "- "),
        _ => (None, "  "),
    };

    spans.push(Span::styled(
        prefix,
        match bg_color {
            Some(bg) => Style::default().bg(bg).fg(Color::White),
            None => Style::default().fg(Color::White),
        },
    ));

    let highlighted = highlighter.highlight(&row.content);
    match bg_color {
        Some(bg) => spans.extend(
            highlighted
                .into_iter()
                .map(|span| Span::styled(span.content, span.style.bg(bg))),
        ),
        None => spans.extend(highlighted),
    }

    Line::from(spans)
}
