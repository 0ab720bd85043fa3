use super::types::{
    ChangeRun, CompareOptions, DiffResult, DiffSegment, NavigationEntry, SegmentKind,
};
use crate::constant::ELLIPSIS;

/// Assign line ranges to each run and build the navigation list.
///
/// Added runs are counted against the target, everything else against the
/// source. Unchanged runs advance both cursors.
pub fn index_runs(runs: Vec<ChangeRun>, options: &CompareOptions) -> DiffResult {
    let mut source_cursor = 0usize;
    let mut target_cursor = 0usize;
    let mut segments = Vec::with_capacity(runs.len());
    let mut navigation = Vec::new();

    for (id, run) in runs.into_iter().enumerate() {
        let line_count = run.lines.len();
        let line_start = match run.kind {
            SegmentKind::Added => {
                let start = target_cursor;
                target_cursor += line_count;
                start
            }
            SegmentKind::Removed => {
                let start = source_cursor;
                source_cursor += line_count;
                start
            }
            SegmentKind::Unchanged => {
                let start = source_cursor;
                source_cursor += line_count;
                target_cursor += line_count;
                start
            }
        };

        if run.kind.is_change() {
            navigation.push(NavigationEntry {
                segment_id: id,
                kind: run.kind,
                display_line_number: line_start + 1,
                preview: preview(run.lines.first().map(String::as_str), options),
            });
        }

        segments.push(DiffSegment {
            id,
            kind: run.kind,
            lines: run.lines,
            line_start,
            line_end: line_start + line_count,
        });
    }

    DiffResult {
        segments,
        navigation,
        source_line_count: source_cursor,
        target_line_count: target_cursor,
    }
}

/// First line of a segment, cut to `preview_length` characters.
pub fn preview(first_line: Option<&str>, options: &CompareOptions) -> String {
    let line = first_line.unwrap_or_default();
    if line.is_empty() {
        return options.empty_line_marker.clone();
    }

    let mut chars = line.chars();
    let head: String = chars.by_ref().take(options.preview_length).collect();
    if chars.next().is_some() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        head
    }
}
