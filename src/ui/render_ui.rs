use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::App,
    ui::{diff_view::render_diff_view, footer::render_footer},
};

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let (content_area, footer_area) = if app.show_shortcuts {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);
        (chunks[0], Some(chunks[1]))
    } else {
        (size, None)
    };

    render_diff_view(f, content_area, app);

    if let Some(footer_area) = footer_area {
        render_footer(f, footer_area);
    }
}
