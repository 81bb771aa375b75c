use confdiff::{DiffSegment, SegmentKind, group_hunks};

#[derive(Debug, Clone, PartialEq)]
pub struct DiffLine {
    pub line_type: LineType,
    pub old_line_num: Option<usize>,
    pub new_line_num: Option<usize>,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineType {
    Context,
    Added,
    Removed,
    Header,
}

impl DiffLine {
    pub fn new_header(text: String) -> Self {
        Self {
            line_type: LineType::Header,
            old_line_num: None,
            new_line_num: None,
            content: text,
        }
    }

    fn from_kind(kind: SegmentKind, old: usize, new: usize, content: &str) -> Self {
        let line_type = match kind {
            SegmentKind::Equal => LineType::Context,
            SegmentKind::Insert => LineType::Added,
            SegmentKind::Delete => LineType::Removed,
        };
        Self {
            line_type,
            old_line_num: kind.on_old_side().then_some(old),
            new_line_num: kind.on_new_side().then_some(new),
            content: content.to_string(),
        }
    }
}

/// One row per line of both revisions.
pub fn numbered_rows(segments: &[DiffSegment]) -> Vec<DiffLine> {
    let mut rows = Vec::new();
    for segment in segments {
        let old_start = segment.old_lines.map(|s| s.start).unwrap_or(0);
        let new_start = segment.new_lines.map(|s| s.start).unwrap_or(0);
        for (offset, content) in segment.lines().enumerate() {
            rows.push(DiffLine::from_kind(
                segment.kind,
                old_start + offset,
                new_start + offset,
                content,
            ));
        }
    }
    rows
}

/// A header row per hunk followed by its lines.
pub fn hunk_rows(segments: &[DiffSegment], context: usize) -> Vec<DiffLine> {
    let mut rows = Vec::new();
    for hunk in group_hunks(segments, context) {
        rows.push(DiffLine::new_header(hunk.header()));
        rows.extend(hunk.lines.iter().map(|line| {
            DiffLine::from_kind(line.kind, line.old_number, line.new_number, line.content)
        }));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdiff::compute_structured_diff;

    #[test]
    fn test_numbered_rows_carry_both_numbers() {
        let segments = compute_structured_diff("a\nb\n", "a\nc\n");
        let rows = numbered_rows(&segments);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].line_type, LineType::Context);
        assert_eq!((rows[0].old_line_num, rows[0].new_line_num), (Some(1), Some(1)));
        assert_eq!(rows[1].line_type, LineType::Removed);
        assert_eq!((rows[1].old_line_num, rows[1].new_line_num), (Some(2), None));
        assert_eq!(rows[2].line_type, LineType::Added);
        assert_eq!((rows[2].old_line_num, rows[2].new_line_num), (None, Some(2)));
        assert_eq!(rows[2].content, "c");
    }

    #[test]
    fn test_hunk_rows_start_with_header() {
        let old: String = (1..=20).map(|i| format!("{i}\n")).collect();
        let new = old.replace("10\n", "ten\n");
        let rows = hunk_rows(&compute_structured_diff(&old, &new), 3);

        assert_eq!(rows[0], DiffLine::new_header("@@ -7,7 +7,7 @@".to_string()));
        assert_eq!(rows.len(), 1 + 8);
        assert!(rows.iter().any(|r| r.line_type == LineType::Removed && r.content == "10"));
    }

    #[test]
    fn test_hunk_rows_empty_without_changes() {
        let segments = compute_structured_diff("x\n", "x\n");
        assert!(hunk_rows(&segments, 3).is_empty());
        assert_eq!(numbered_rows(&segments).len(), 1);
    }
}
