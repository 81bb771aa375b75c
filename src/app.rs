use confdiff::{DiffSegment, FileLabels};

use crate::{
    ui::highlight_line::SyntaxHighlighter,
    view::{DiffLine, hunk_rows, numbered_rows},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Numbered,
    Hunks,
}

pub struct App {
    pub labels: FileLabels,
    pub segments: Vec<DiffSegment>,
    pub context_lines: usize,
    pub mode: ViewMode,
    pub rows: Vec<DiffLine>,
    pub scroll_offset: usize,
    pub horizontal_scroll_offset: usize,
    pub show_shortcuts: bool,
    pub highlighter: SyntaxHighlighter,
}

impl App {
    pub fn new(
        segments: Vec<DiffSegment>,
        labels: FileLabels,
        context_lines: usize,
        mode: ViewMode,
    ) -> Self {
        let highlighter = SyntaxHighlighter::for_label(&labels.new);
        let mut app = Self {
            labels,
            segments,
            context_lines,
            mode,
            rows: Vec::new(),
            scroll_offset: 0,
            horizontal_scroll_offset: 0,
            show_shortcuts: true,
            highlighter,
        };
        app.rebuild_rows();
        app
    }

    fn rebuild_rows(&mut self) {
        self.rows = match self.mode {
            ViewMode::Numbered => numbered_rows(&self.segments),
            ViewMode::Hunks => hunk_rows(&self.segments, self.context_lines),
        };
        self.scroll_offset = 0;
    }

    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    pub fn title(&self) -> String {
        let mode = match self.mode {
            ViewMode::Numbered => "numbered",
            ViewMode::Hunks => "unified",
        };
        match self.highlighter.syntax_name() {
            Some(syntax) => format!(
                "{} → {} [{syntax}] ({mode})",
                self.labels.old, self.labels.new
            ),
            None => format!("{} → {} ({mode})", self.labels.old, self.labels.new),
        }
    }

    pub fn scroll_down(&mut self, by: usize) {
        let last = self.line_count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + by).min(last);
    }

    pub fn scroll_up(&mut self, by: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(by);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.line_count().saturating_sub(1);
    }

    pub fn scroll_right(&mut self, by: usize) {
        self.horizontal_scroll_offset += by;
    }

    pub fn scroll_left(&mut self, by: usize) {
        self.horizontal_scroll_offset = self.horizontal_scroll_offset.saturating_sub(by);
    }

    pub fn toggle_view_mode(&mut self) {
        self.mode = match self.mode {
            ViewMode::Numbered => ViewMode::Hunks,
            ViewMode::Hunks => ViewMode::Numbered,
        };
        self.rebuild_rows();
    }

    pub fn toggle_shortcuts(&mut self) {
        self.show_shortcuts = !self.show_shortcuts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdiff::compute_structured_diff;

    fn app(mode: ViewMode) -> App {
        let old: String = (1..=30).map(|i| format!("key_{i}: {i}\n")).collect();
        let new = old.replace("key_15: 15\n", "key_15: fifteen\n");
        App::new(
            compute_structured_diff(&old, &new),
            FileLabels::new("dev/app/1", "dev/app/2"),
            3,
            mode,
        )
    }

    #[test]
    fn test_toggle_switches_rows() {
        let mut app = app(ViewMode::Numbered);
        assert_eq!(app.line_count(), 31);

        app.scroll_down(5);
        app.toggle_view_mode();
        assert_eq!(app.mode, ViewMode::Hunks);
        assert_eq!(app.line_count(), 9);
        assert_eq!(app.scroll_offset, 0);
        assert!(app.title().ends_with("(unified)"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = app(ViewMode::Numbered);
        app.scroll_up(3);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_down(1000);
        assert_eq!(app.scroll_offset, 30);
        app.scroll_to_top();
        assert_eq!(app.scroll_offset, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll_offset, 30);
    }

    #[test]
    fn test_horizontal_scroll() {
        let mut app = app(ViewMode::Hunks);
        app.scroll_left(4);
        assert_eq!(app.horizontal_scroll_offset, 0);
        app.scroll_right(8);
        app.scroll_left(4);
        assert_eq!(app.horizontal_scroll_offset, 4);
    }
}
