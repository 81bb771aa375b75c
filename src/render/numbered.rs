use crate::color::{Colorizer, Paint};
use crate::segment::{DiffSegment, SegmentKind};

/// Renders every line of both inputs with a right-aligned line number.
///
/// Context lines use their new-side number, deletions their old-side number.
/// A blank line is printed as a single space so it keeps its row when a
/// terminal trims trailing whitespace.
pub fn render_numbered(segments: &[DiffSegment], colors: &dyn Colorizer) -> String {
    let max_line = segments.iter().map(DiffSegment::max_line).max().unwrap_or(0);
    let width = digit_count(max_line);

    let mut out = String::new();
    for segment in segments {
        let (numbers, marker, paint) = match segment.kind {
            SegmentKind::Equal => (segment.new_lines, ' ', None),
            SegmentKind::Delete => (segment.old_lines, '-', Some(Paint::Removed)),
            SegmentKind::Insert => (segment.new_lines, '+', Some(Paint::Added)),
        };
        let Some(numbers) = numbers else {
            continue;
        };

        for (number, line) in numbers.numbers().zip(segment.lines()) {
            let content = if line.is_empty() { " " } else { line };
            let number = colors.paint(Paint::LineNumber, &format!("{number:>width$}"));
            let body = format!("{marker}{content}");
            let body = match paint {
                Some(paint) => colors.paint(paint, &body),
                None => body,
            };
            out.push_str(&number);
            out.push(' ');
            out.push_str(&body);
            out.push('\n');
        }
    }
    out
}

fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
