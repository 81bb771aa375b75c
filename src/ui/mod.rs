pub mod diff_view;
pub mod footer;
pub mod highlight_line;
pub mod render_ui;
