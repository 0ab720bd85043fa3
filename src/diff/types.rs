use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Added,
    Removed,
    Unchanged,
}

impl SegmentKind {
    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Added => "Added",
            SegmentKind::Removed => "Removed",
            SegmentKind::Unchanged => "Unchanged",
        }
    }

    pub fn is_change(self) -> bool {
        match self {
            SegmentKind::Added | SegmentKind::Removed => true,
            SegmentKind::Unchanged => false,
        }
    }
}

/// A contiguous run of lines sharing one classification, before line ranges
/// have been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRun {
    pub kind: SegmentKind,
    pub lines: Vec<String>,
}

/// One indexed run of the diff result.
///
/// `line_start..line_end` is counted in the target text for `Added` segments
/// and in the source text for `Removed` and `Unchanged` segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub id: usize,
    pub kind: SegmentKind,
    pub lines: Vec<String>,
    pub line_start: usize,
    pub line_end: usize,
}

impl DiffSegment {
    /// Raw text of the run, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_range(&self) -> Range<usize> {
        self.line_start..self.line_end
    }
}

/// Pointer to one changed segment, used for "jump to change" lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub segment_id: usize,
    pub kind: SegmentKind,
    /// 1-based, same coordinate space as the segment.
    pub display_line_number: usize,
    pub preview: String,
}

/// One physical line ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub segment_id: usize,
    pub kind: SegmentKind,
    /// Unchanged rows carry no line number.
    pub line_number: Option<usize>,
    pub content: String,
}

/// Knobs for the diff deadline, previews and placeholder rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub preview_length: usize,
    pub empty_line_marker: String,
    /// Past this the diff stops searching for a minimal script and finishes
    /// with a valid, possibly longer one.
    pub diff_timeout: Duration,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            preview_length: crate::constant::PREVIEW_MAX_CHARS,
            empty_line_marker: crate::constant::EMPTY_LINE_MARKER.to_string(),
            diff_timeout: crate::constant::DIFF_TIMEOUT,
        }
    }
}

/// Complete output of one comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub segments: Vec<DiffSegment>,
    pub navigation: Vec<NavigationEntry>,
    pub source_line_count: usize,
    pub target_line_count: usize,
}

impl DiffResult {
    pub fn change_count(&self) -> usize {
        self.navigation.len()
    }

    pub fn is_identical(&self) -> bool {
        self.navigation.is_empty()
    }

    pub fn segment(&self, id: usize) -> Option<&DiffSegment> {
        self.segments.get(id)
    }

    /// Check if the result contains changes with non-whitespace content
    pub fn has_meaningful_changes(&self) -> bool {
        self.segments
            .iter()
            .filter(|segment| segment.kind.is_change())
            .flat_map(|segment| segment.lines.iter())
            .any(|line| !line.trim().is_empty())
    }
}
