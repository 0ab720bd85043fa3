use super::types::{CompareOptions, DiffResult, DiffSegment, SegmentKind};
use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag, TextDiff};
use std::time::Instant;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub changes: usize,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub unchanged_lines: usize,
    pub added_chars: usize,
    pub removed_chars: usize,
}

/// Calculate line counts and character-level statistics for a result
///
/// All character diffs share one `options.diff_timeout` budget; past it the
/// counts stay consistent but may overstate the change.
pub fn calculate_stats(result: &DiffResult, options: &CompareOptions) -> DiffStats {
    let deadline = Instant::now().checked_add(options.diff_timeout);
    let mut stats = DiffStats {
        changes: result.change_count(),
        ..DiffStats::default()
    };

    for segment in &result.segments {
        match segment.kind {
            SegmentKind::Added => stats.added_lines += segment.line_count(),
            SegmentKind::Removed => stats.removed_lines += segment.line_count(),
            SegmentKind::Unchanged => stats.unchanged_lines += segment.line_count(),
        }
    }

    let segments = &result.segments;
    let mut i = 0usize;
    while i < segments.len() {
        let segment = &segments[i];
        match segment.kind {
            SegmentKind::Unchanged => {}
            SegmentKind::Removed => match segments.get(i + 1) {
                Some(next) if next.kind == SegmentKind::Added => {
                    let (added, removed) = char_changes(segment, next, deadline);
                    stats.added_chars += added;
                    stats.removed_chars += removed;
                    i += 1;
                }
                _ => stats.removed_chars += char_count(segment),
            },
            SegmentKind::Added => stats.added_chars += char_count(segment),
        }
        i += 1;
    }

    stats
}

fn char_count(segment: &DiffSegment) -> usize {
    segment.lines.iter().map(|l| l.chars().count()).sum()
}

/// Character-granularity diff of a removed block against the added block
/// replacing it. Line separators are not counted.
fn char_changes(
    removed: &DiffSegment,
    added: &DiffSegment,
    deadline: Option<Instant>,
) -> (usize, usize) {
    let left: String = removed.lines.concat();
    let right: String = added.lines.concat();

    let mut config = TextDiff::configure();
    config.algorithm(Algorithm::Myers);
    if let Some(deadline) = deadline {
        config.deadline(deadline);
    }
    let diff = config.diff_chars(&left, &right);

    // Char tokens are single scalar values, so range lengths are char counts
    let mut added_count = 0;
    let mut removed_count = 0;
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {}
            DiffTag::Delete => removed_count += old_range.len(),
            DiffTag::Insert => added_count += new_range.len(),
            DiffTag::Replace => {
                removed_count += old_range.len();
                added_count += new_range.len();
            }
        }
    }
    (added_count, removed_count)
}
