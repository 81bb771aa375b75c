use std::fmt::Write as _;

use crate::color::{Colorizer, Paint};
use crate::options::FileLabels;
use crate::segment::{DiffSegment, SegmentKind};

/// Unchanged lines shown on each side of a change, as in `diff -u`.
pub const DEFAULT_CONTEXT: usize = 3;

/// One physical line of a diff. Line numbers are 0 on a side the line does
/// not exist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub kind: SegmentKind,
    pub old_number: usize,
    pub new_number: usize,
    pub content: &'a str,
}

/// A contiguous block of changed lines plus surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<'a> {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<Line<'a>>,
}

impl Hunk<'_> {
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

fn flatten(segments: &[DiffSegment]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for segment in segments {
        let mut old = segment.old_lines.map(|span| span.start);
        let mut new = segment.new_lines.map(|span| span.start);
        for content in segment.lines() {
            lines.push(Line {
                kind: segment.kind,
                old_number: old.unwrap_or(0),
                new_number: new.unwrap_or(0),
                content,
            });
            old = old.map(|n| n + 1);
            new = new.map(|n| n + 1);
        }
    }
    lines
}

/// Marks every changed line, and every line at most `context` lines away from
/// one, in two linear passes.
fn context_marks(lines: &[Line<'_>], context: usize) -> Vec<bool> {
    let mut marks = vec![false; lines.len()];

    let mut since_change: Option<usize> = None;
    for (mark, line) in marks.iter_mut().zip(lines) {
        since_change = if line.kind.is_change() {
            Some(0)
        } else {
            since_change.map(|d| d.saturating_add(1))
        };
        *mark = since_change.is_some_and(|d| d <= context);
    }

    let mut until_change: Option<usize> = None;
    for (mark, line) in marks.iter_mut().zip(lines).rev() {
        until_change = if line.kind.is_change() {
            Some(0)
        } else {
            until_change.map(|d| d.saturating_add(1))
        };
        *mark |= until_change.is_some_and(|d| d <= context);
    }

    marks
}

/// Groups changed lines, with up to `context` unchanged lines around each
/// change, into hunks. Returns nothing when the segments contain no change.
///
/// Headers follow `diff -u`: context lines count on both sides, and a side
/// with no lines in the hunk is anchored at the line before it.
pub fn group_hunks(segments: &[DiffSegment], context: usize) -> Vec<Hunk<'_>> {
    let lines = flatten(segments);
    if !lines.iter().any(|line| line.kind.is_change()) {
        return Vec::new();
    }

    let in_hunk = context_marks(&lines, context);

    let mut hunks = Vec::new();
    let mut current: Option<Hunk<'_>> = None;
    // Lines seen on each side so far, used to anchor empty sides.
    let (mut old_seen, mut new_seen) = (0, 0);

    for (line, keep) in lines.into_iter().zip(in_hunk) {
        if keep {
            let hunk = current.get_or_insert_with(|| Hunk {
                old_start: old_seen,
                old_count: 0,
                new_start: new_seen,
                new_count: 0,
                lines: Vec::new(),
            });
            if line.kind.on_old_side() {
                if hunk.old_count == 0 {
                    hunk.old_start = line.old_number;
                }
                hunk.old_count += 1;
            }
            if line.kind.on_new_side() {
                if hunk.new_count == 0 {
                    hunk.new_start = line.new_number;
                }
                hunk.new_count += 1;
            }
            hunk.lines.push(line);
        } else if let Some(hunk) = current.take() {
            hunks.push(hunk);
        }

        if line.kind.on_old_side() {
            old_seen += 1;
        }
        if line.kind.on_new_side() {
            new_seen += 1;
        }
    }
    hunks.extend(current);
    hunks
}

/// Renders segments as a git-style unified diff.
///
/// Returns an empty string, without file headers, when there is nothing to
/// show.
pub fn render_unified(
    segments: &[DiffSegment],
    labels: &FileLabels,
    context: usize,
    colors: &dyn Colorizer,
) -> String {
    let hunks = group_hunks(segments, context);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", colors.paint(Paint::FileHeader, &format!("--- {}", labels.old)));
    let _ = writeln!(out, "{}", colors.paint(Paint::FileHeader, &format!("+++ {}", labels.new)));

    for hunk in &hunks {
        let _ = writeln!(out, "{}", colors.paint(Paint::HunkHeader, &hunk.header()));
        for line in &hunk.lines {
            let rendered = match line.kind {
                SegmentKind::Equal => format!(" {}", line.content),
                SegmentKind::Delete => colors.paint(Paint::Removed, &format!("-{}", line.content)),
                SegmentKind::Insert => colors.paint(Paint::Added, &format!("+{}", line.content)),
            };
            out.push_str(&rendered);
            out.push('\n');
        }
    }

    tracing::debug!(hunks = hunks.len(), "rendered unified diff");
    out
}

/// [`render_unified`] with the default context and a colorizer picked from a
/// flag.
pub fn render_unified_default(
    segments: &[DiffSegment],
    old_label: &str,
    new_label: &str,
    colorize: bool,
) -> String {
    let labels = FileLabels::new(old_label, new_label);
    render_unified(
        segments,
        &labels,
        DEFAULT_CONTEXT,
        crate::color::colorizer(colorize),
    )
}
