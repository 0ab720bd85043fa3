use super::types::{DiffResult, DiffSegment, SegmentKind};
use crate::constant::{REPORT_DIVIDER, REPORT_TITLE};
use std::fmt::{self, Write};

/// Build the plain-text report for a diff result.
pub fn export(result: &DiffResult) -> String {
    export_report(&result.segments, result.change_count())
}

/// Plain-text report: a header with the change count, then one block per
/// changed segment with its label, 1-based inclusive line range and text.
pub fn export_report(segments: &[DiffSegment], change_count: usize) -> String {
    let mut report = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut report, segments, change_count);
    report
}

fn write_report(
    out: &mut impl Write,
    segments: &[DiffSegment],
    change_count: usize,
) -> fmt::Result {
    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "Total changes: {}", change_count)?;
    writeln!(out, "{}", REPORT_DIVIDER)?;

    for segment in segments {
        match segment.kind {
            SegmentKind::Unchanged => continue,
            SegmentKind::Added | SegmentKind::Removed => {
                writeln!(
                    out,
                    "[{}] lines {}-{}",
                    segment.kind.label(),
                    segment.line_start + 1,
                    segment.line_end
                )?;
                writeln!(out, "{}", segment.text())?;
                writeln!(out, "{}", REPORT_DIVIDER)?;
            }
        }
    }

    Ok(())
}
