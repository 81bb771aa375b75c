/// Classification of a run of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Equal,
    Insert,
    Delete,
}

impl SegmentKind {
    /// Whether lines of this kind exist in the old text.
    pub fn on_old_side(self) -> bool {
        matches!(self, SegmentKind::Equal | SegmentKind::Delete)
    }

    /// Whether lines of this kind exist in the new text.
    pub fn on_new_side(self) -> bool {
        matches!(self, SegmentKind::Equal | SegmentKind::Insert)
    }

    pub fn is_change(self) -> bool {
        self != SegmentKind::Equal
    }
}

/// 1-indexed, inclusive range of line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start >= 1 && start <= end, "invalid span {start}-{end}");
        Self { start, end }
    }

    /// Number of lines covered; never zero.
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn numbers(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// A maximal run of consecutive lines sharing one classification.
///
/// `content` holds the lines exactly as they appeared in the input, terminators
/// included. `old_lines` is set for `Equal` and `Delete` runs, `new_lines` for
/// `Equal` and `Insert` runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub content: String,
    pub old_lines: Option<LineSpan>,
    pub new_lines: Option<LineSpan>,
}

impl DiffSegment {
    pub fn equal(content: String, old_lines: LineSpan, new_lines: LineSpan) -> Self {
        Self {
            kind: SegmentKind::Equal,
            content,
            old_lines: Some(old_lines),
            new_lines: Some(new_lines),
        }
    }

    pub fn delete(content: String, old_lines: LineSpan) -> Self {
        Self {
            kind: SegmentKind::Delete,
            content,
            old_lines: Some(old_lines),
            new_lines: None,
        }
    }

    pub fn insert(content: String, new_lines: LineSpan) -> Self {
        Self {
            kind: SegmentKind::Insert,
            content,
            old_lines: None,
            new_lines: Some(new_lines),
        }
    }

    /// Physical lines of the segment without their line terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split_inclusive('\n').map(strip_terminator)
    }

    pub fn line_count(&self) -> usize {
        self.old_lines
            .or(self.new_lines)
            .map(|span| span.count())
            .unwrap_or(0)
    }

    /// The highest line number this segment touches on either side.
    pub fn max_line(&self) -> usize {
        let old = self.old_lines.map(|s| s.end).unwrap_or(0);
        let new = self.new_lines.map(|s| s.end).unwrap_or(0);
        old.max(new)
    }
}

pub(crate) fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}
