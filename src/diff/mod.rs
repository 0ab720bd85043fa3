//! Line diff engine
//!
//! `compare` runs the whole pipeline: split both texts into lines, compute the
//! line-level edit script, then index the runs into segments and a navigation
//! list. Rendering and export work from the finished [`DiffResult`].

mod algorithm;
mod export;
mod indexer;
mod render;
mod stats;
mod tokenizer;
mod types;

pub use algorithm::diff_lines;
pub use export::{export, export_report};
pub use indexer::{index_runs, preview};
pub use render::{DisplayRows, RenderProjector, SideBySideRow, side_by_side};
pub use stats::{DiffStats, calculate_stats};
pub use tokenizer::{split_lines, split_pair};
pub use types::{
    ChangeRun, CompareOptions, DiffResult, DiffSegment, DisplayRow, NavigationEntry, SegmentKind,
};

use tracing::debug;

/// Compare two texts line by line.
///
/// Total over all inputs: any pair of strings produces a result.
pub fn compare(source: &str, target: &str, options: &CompareOptions) -> DiffResult {
    let (source_lines, target_lines) = split_pair(source, target);
    let runs = diff_lines(&source_lines, &target_lines, options.diff_timeout);
    let result = index_runs(runs, options);

    debug!(
        segments = result.segments.len(),
        changes = result.change_count(),
        source_lines = result.source_line_count,
        target_lines = result.target_line_count,
        "Compared texts"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_empty_is_one_unchanged_line() {
        let result = compare("", "", &CompareOptions::default());
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].kind, SegmentKind::Unchanged);
        assert_eq!(result.segments[0].lines, vec![""]);
        assert!(result.navigation.is_empty());
    }

    #[test]
    fn line_counts_match_tokenizer() {
        let result = compare("a\nb\n", "a\nc", &CompareOptions::default());
        assert_eq!(result.source_line_count, 3);
        assert_eq!(result.target_line_count, 2);
    }

    #[test]
    fn whitespace_only_changes_are_not_meaningful() {
        let options = CompareOptions::default();
        assert!(!compare("a\nb", "a\n  \nb", &options).has_meaningful_changes());
        assert!(compare("a\nb", "a\nc", &options).has_meaningful_changes());
        assert!(!compare("a", "a", &options).has_meaningful_changes());
    }
}
