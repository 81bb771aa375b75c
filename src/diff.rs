use std::collections::HashMap;
use std::ops::Range;

use similar::{Algorithm, DiffTag, capture_diff_slices};

use crate::segment::{DiffSegment, LineSpan, SegmentKind};

/// Maps each distinct line to a small integer so the sequence diff compares
/// `u32`s instead of strings. One table per diff call.
#[derive(Default)]
struct SymbolTable<'a> {
    ids: HashMap<&'a str, u32>,
}

impl<'a> SymbolTable<'a> {
    fn intern(&mut self, line: &'a str) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(line).or_insert(next)
    }

    fn intern_all(&mut self, lines: &[&'a str]) -> Vec<u32> {
        lines.iter().map(|line| self.intern(line)).collect()
    }
}

/// Splits text into lines, each keeping its `\n`. A trailing newline does not
/// produce an extra empty line; a final line without one is kept as is.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Computes the line-level diff between two texts.
///
/// Segments come back in document order and are maximal: no two neighbours
/// share a kind. Concatenating the `Equal`/`Delete` contents gives back `old`,
/// and the `Equal`/`Insert` contents give back `new`.
pub fn compute_structured_diff(old: &str, new: &str) -> Vec<DiffSegment> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let mut symbols = SymbolTable::default();
    let old_ids = symbols.intern_all(&old_lines);
    let new_ids = symbols.intern_all(&new_lines);

    let ops = capture_diff_slices(Algorithm::Myers, &old_ids, &new_ids);

    let mut builder = SegmentBuilder::new(&old_lines, &new_lines);
    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => builder.push(SegmentKind::Equal, old_range, new_range),
            DiffTag::Delete => builder.push(SegmentKind::Delete, old_range, 0..0),
            DiffTag::Insert => builder.push(SegmentKind::Insert, 0..0, new_range),
            DiffTag::Replace => {
                builder.push(SegmentKind::Delete, old_range, 0..0);
                builder.push(SegmentKind::Insert, 0..0, new_range);
            }
        }
    }
    let segments = builder.finish();

    tracing::debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        distinct_lines = symbols.ids.len(),
        segments = segments.len(),
        "computed structured diff"
    );

    segments
}

struct SegmentBuilder<'a> {
    old: &'a [&'a str],
    new: &'a [&'a str],
    segments: Vec<DiffSegment>,
}

impl<'a> SegmentBuilder<'a> {
    fn new(old: &'a [&'a str], new: &'a [&'a str]) -> Self {
        Self {
            old,
            new,
            segments: Vec::new(),
        }
    }

    /// Appends a run of lines. Index ranges are 0-based and half-open, as the
    /// sequence diff reports them.
    fn push(&mut self, kind: SegmentKind, old: Range<usize>, new: Range<usize>) {
        let content: String = match kind {
            SegmentKind::Insert => self.new[new.clone()].concat(),
            SegmentKind::Equal | SegmentKind::Delete => self.old[old.clone()].concat(),
        };
        if content.is_empty() {
            return;
        }

        let old_span = kind.on_old_side().then(|| to_span(&old));
        let new_span = kind.on_new_side().then(|| to_span(&new));

        if let Some(last) = self.segments.last_mut() {
            if last.kind == kind {
                last.content.push_str(&content);
                last.old_lines = join(last.old_lines, old_span);
                last.new_lines = join(last.new_lines, new_span);
                return;
            }
        }

        self.segments.push(DiffSegment {
            kind,
            content,
            old_lines: old_span,
            new_lines: new_span,
        });
    }

    fn finish(self) -> Vec<DiffSegment> {
        self.segments
    }
}

fn to_span(range: &Range<usize>) -> LineSpan {
    LineSpan::new(range.start + 1, range.end)
}

fn join(first: Option<LineSpan>, second: Option<LineSpan>) -> Option<LineSpan> {
    match (first, second) {
        (Some(a), Some(b)) => Some(LineSpan::new(a.start, b.end)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rebuild(segments: &[DiffSegment], side: fn(SegmentKind) -> bool) -> String {
        segments
            .iter()
            .filter(|s| side(s.kind))
            .map(|s| s.content.as_str())
            .collect()
    }

    fn assert_contiguous(spans: impl Iterator<Item = LineSpan>, total: usize) {
        let mut next = 1;
        for span in spans {
            assert_eq!(span.start, next, "gap or overlap before line {next}");
            next = span.end + 1;
        }
        assert_eq!(next - 1, total);
    }

    // Short alphabet so generated texts share plenty of lines.
    fn text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "", "key: 1"]), 0..20)
            .prop_flat_map(|lines| {
                let joined = lines.join("\n");
                prop::bool::ANY.prop_map(move |trailing| {
                    if trailing && !joined.is_empty() {
                        format!("{joined}\n")
                    } else {
                        joined.clone()
                    }
                })
            })
    }

    proptest! {
        #[test]
        fn test_round_trip_old(old in text(), new in text()) {
            let segments = compute_structured_diff(&old, &new);
            prop_assert_eq!(rebuild(&segments, SegmentKind::on_old_side), old);
        }

        #[test]
        fn test_round_trip_new(old in text(), new in text()) {
            let segments = compute_structured_diff(&old, &new);
            prop_assert_eq!(rebuild(&segments, SegmentKind::on_new_side), new);
        }

        #[test]
        fn test_identity(text in text()) {
            prop_assume!(!text.is_empty());
            let segments = compute_structured_diff(&text, &text);
            prop_assert_eq!(segments.len(), 1);
            prop_assert_eq!(segments[0].kind, SegmentKind::Equal);
            prop_assert_eq!(&segments[0].content, &text);
            let lines = split_lines(&text).len();
            prop_assert_eq!(segments[0].old_lines, Some(LineSpan::new(1, lines)));
            prop_assert_eq!(segments[0].new_lines, Some(LineSpan::new(1, lines)));
        }

        #[test]
        fn test_numbering_has_no_gaps(old in text(), new in text()) {
            let segments = compute_structured_diff(&old, &new);
            assert_contiguous(segments.iter().filter_map(|s| s.old_lines), split_lines(&old).len());
            assert_contiguous(segments.iter().filter_map(|s| s.new_lines), split_lines(&new).len());
        }

        #[test]
        fn test_segments_are_maximal(old in text(), new in text()) {
            let segments = compute_structured_diff(&old, &new);
            for pair in segments.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
            }
        }
    }

    #[test]
    fn test_simple_replace() {
        let segments = compute_structured_diff("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            segments,
            vec![
                DiffSegment::equal("a\n".into(), LineSpan::new(1, 1), LineSpan::new(1, 1)),
                DiffSegment::delete("b\n".into(), LineSpan::new(2, 2)),
                DiffSegment::insert("x\n".into(), LineSpan::new(2, 2)),
                DiffSegment::equal("c\n".into(), LineSpan::new(3, 3), LineSpan::new(3, 3)),
            ]
        );
    }

    #[test]
    fn test_empty_old() {
        let segments = compute_structured_diff("", "one\ntwo\n");
        assert_eq!(
            segments,
            vec![DiffSegment::insert("one\ntwo\n".into(), LineSpan::new(1, 2))]
        );
    }

    #[test]
    fn test_empty_new() {
        let segments = compute_structured_diff("one\ntwo", "");
        assert_eq!(
            segments,
            vec![DiffSegment::delete("one\ntwo".into(), LineSpan::new(1, 2))]
        );
    }

    #[test]
    fn test_both_empty() {
        assert!(compute_structured_diff("", "").is_empty());
    }

    #[test]
    fn test_missing_final_newline_changes_last_line() {
        let segments = compute_structured_diff("a\nb\n", "a\nb");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].kind, SegmentKind::Delete);
        assert_eq!(segments[1].content, "b\n");
        assert_eq!(segments[2].kind, SegmentKind::Insert);
        assert_eq!(segments[2].content, "b");
    }

    #[test]
    fn test_insertion_in_middle() {
        let segments = compute_structured_diff("a\nc\n", "a\nb\nc\n");
        let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Equal, SegmentKind::Insert, SegmentKind::Equal]
        );
        assert_eq!(segments[2].old_lines, Some(LineSpan::new(2, 2)));
        assert_eq!(segments[2].new_lines, Some(LineSpan::new(3, 3)));
    }

    #[test]
    fn test_symbol_table_reuses_ids() {
        let mut table = SymbolTable::default();
        assert_eq!(table.intern_all(&["x\n", "y\n", "x\n"]), vec![0, 1, 0]);
    }
}
