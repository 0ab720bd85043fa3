use super::types::{DiffSegment, DisplayRow, SegmentKind};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Expands segments into display rows without touching the segments.
///
/// Row offsets are computed once so a host can ask for just the visible
/// window of a large diff.
pub struct RenderProjector<'a> {
    segments: &'a [DiffSegment],
    offsets: Vec<usize>,
    total: usize,
    empty_line_marker: &'a str,
}

impl<'a> RenderProjector<'a> {
    pub fn new(segments: &'a [DiffSegment], empty_line_marker: &'a str) -> Self {
        let mut offsets = Vec::with_capacity(segments.len());
        let mut total = 0usize;
        for segment in segments {
            offsets.push(total);
            total += segment.line_count();
        }

        Self {
            segments,
            offsets,
            total,
            empty_line_marker,
        }
    }

    pub fn row_count(&self) -> usize {
        self.total
    }

    /// Every row, in segment order.
    pub fn rows(&self) -> DisplayRows<'a> {
        DisplayRows {
            segments: self.segments,
            segment: 0,
            line: 0,
            empty_line_marker: self.empty_line_marker,
        }
    }

    /// Rows `start..start + len`, clamped to the available rows.
    pub fn window(&self, start: usize, len: usize) -> std::iter::Take<DisplayRows<'a>> {
        if start >= self.total {
            return DisplayRows {
                segments: self.segments,
                segment: self.segments.len(),
                line: 0,
                empty_line_marker: self.empty_line_marker,
            }
            .take(0);
        }

        let segment = self.offsets.partition_point(|&offset| offset <= start) - 1;
        DisplayRows {
            segments: self.segments,
            segment,
            line: start - self.offsets[segment],
            empty_line_marker: self.empty_line_marker,
        }
        .take(len)
    }
}

/// Lazy, restartable row iterator produced by [`RenderProjector`].
#[derive(Clone)]
pub struct DisplayRows<'a> {
    segments: &'a [DiffSegment],
    segment: usize,
    line: usize,
    empty_line_marker: &'a str,
}

impl Iterator for DisplayRows<'_> {
    type Item = DisplayRow;

    fn next(&mut self) -> Option<DisplayRow> {
        loop {
            let segment = self.segments.get(self.segment)?;
            let Some(content) = segment.lines.get(self.line) else {
                self.segment += 1;
                self.line = 0;
                continue;
            };

            let line_number = match segment.kind {
                SegmentKind::Added | SegmentKind::Removed => {
                    Some(segment.line_start + self.line + 1)
                }
                SegmentKind::Unchanged => None,
            };
            self.line += 1;

            return Some(DisplayRow {
                segment_id: segment.id,
                kind: segment.kind,
                line_number,
                content: display_content(content, self.empty_line_marker),
            });
        }
    }
}

impl FusedIterator for DisplayRows<'_> {}

fn display_content(line: &str, empty_line_marker: &str) -> String {
    if line.is_empty() {
        empty_line_marker.to_string()
    } else {
        line.to_string()
    }
}

/// Two-pane row: removed content on the left, added content on the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySideRow {
    pub left: Option<DisplayRow>,
    pub right: Option<DisplayRow>,
}

/// Pair each removed block with the added block right after it.
///
/// Unchanged rows appear in both panes. A block without a partner leaves the
/// other pane empty.
pub fn side_by_side(segments: &[DiffSegment], empty_line_marker: &str) -> Vec<SideBySideRow> {
    let mut rows = Vec::new();
    let mut i = 0usize;

    while i < segments.len() {
        let segment = &segments[i];
        match segment.kind {
            SegmentKind::Unchanged => {
                for row in single(segment, empty_line_marker) {
                    rows.push(SideBySideRow {
                        left: Some(row.clone()),
                        right: Some(row),
                    });
                }
                i += 1;
            }
            SegmentKind::Removed => {
                let left: Vec<DisplayRow> = single(segment, empty_line_marker).collect();
                let right: Vec<DisplayRow> = match segments.get(i + 1) {
                    Some(next) if next.kind == SegmentKind::Added => {
                        i += 1;
                        single(next, empty_line_marker).collect()
                    }
                    _ => Vec::new(),
                };
                i += 1;

                let height = left.len().max(right.len());
                let mut left = left.into_iter();
                let mut right = right.into_iter();
                for _ in 0..height {
                    rows.push(SideBySideRow {
                        left: left.next(),
                        right: right.next(),
                    });
                }
            }
            SegmentKind::Added => {
                for row in single(segment, empty_line_marker) {
                    rows.push(SideBySideRow {
                        left: None,
                        right: Some(row),
                    });
                }
                i += 1;
            }
        }
    }

    rows
}

fn single<'a>(segment: &'a DiffSegment, empty_line_marker: &'a str) -> DisplayRows<'a> {
    DisplayRows {
        segments: std::slice::from_ref(segment),
        segment: 0,
        line: 0,
        empty_line_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compare;
    use crate::diff::types::CompareOptions;

    const MARKER: &str = "(empty line)";

    #[test]
    fn one_row_per_line() {
        let result = compare("a\nb\nc", "a\nx\nc", &CompareOptions::default());
        let projector = RenderProjector::new(&result.segments, MARKER);
        let rows: Vec<DisplayRow> = projector.rows().collect();

        assert_eq!(projector.row_count(), 4);
        assert_eq!(rows.len(), 4);
        let contents: Vec<&str> = rows.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "x", "c"]);
        let numbers: Vec<Option<usize>> = rows.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![None, Some(2), Some(2), None]);
    }

    #[test]
    fn blank_lines_use_marker() {
        let result = compare("a\n\nb", "a\n\nc", &CompareOptions::default());
        let projector = RenderProjector::new(&result.segments, MARKER);
        let rows: Vec<DisplayRow> = projector.rows().collect();
        assert_eq!(rows[1].content, MARKER);
    }

    #[test]
    fn rows_are_restartable() {
        let result = compare("1\n2\n3", "1\n3\n4", &CompareOptions::default());
        let projector = RenderProjector::new(&result.segments, MARKER);
        let first: Vec<DisplayRow> = projector.rows().collect();
        let second: Vec<DisplayRow> = projector.rows().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn window_matches_full_projection() {
        let source = "a\nb\nc\nd\ne\nf\ng";
        let target = "a\nB\nc\nd\nE\nF\ng\nh";
        let result = compare(source, target, &CompareOptions::default());
        let projector = RenderProjector::new(&result.segments, MARKER);
        let all: Vec<DisplayRow> = projector.rows().collect();

        for start in 0..=all.len() + 1 {
            for len in 0..4 {
                let window: Vec<DisplayRow> = projector.window(start, len).collect();
                let expected: Vec<DisplayRow> =
                    all.iter().skip(start).take(len).cloned().collect();
                assert_eq!(window, expected, "start {start} len {len}");
            }
        }
    }

    #[test]
    fn side_by_side_pairs_replacements() {
        let result = compare("a\nold1\nold2\nc", "a\nnew\nc\nd", &CompareOptions::default());
        let rows = side_by_side(&result.segments, MARKER);

        // a, (old1|new), (old2|-), c, (-|d)
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1].left.as_ref().map(|r| r.content.as_str()), Some("old1"));
        assert_eq!(rows[1].right.as_ref().map(|r| r.content.as_str()), Some("new"));
        assert!(rows[2].left.is_some());
        assert!(rows[2].right.is_none());
        assert!(rows[4].left.is_none());
        assert_eq!(rows[4].right.as_ref().map(|r| r.content.as_str()), Some("d"));
    }
}
