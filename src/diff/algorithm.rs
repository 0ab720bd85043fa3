use super::types::{ChangeRun, SegmentKind};
use similar::{Algorithm, DiffTag, capture_diff_slices_deadline};
use std::time::{Duration, Instant};

/// Compute the line-level edit script between two line sequences.
///
/// Runs cover both sequences with no gaps or overlaps. Within each change
/// block removed lines come before added lines. Once `timeout` elapses the
/// remaining search is cut short and the script is no longer minimal.
pub fn diff_lines(source: &[&str], target: &[&str], timeout: Duration) -> Vec<ChangeRun> {
    let deadline = Instant::now().checked_add(timeout);
    let ops = capture_diff_slices_deadline(Algorithm::Myers, source, target, deadline);
    let mut runs = RunBuilder::default();

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => runs.unchanged(&source[old_range]),
            DiffTag::Delete => runs.removed(&source[old_range]),
            DiffTag::Insert => runs.added(&target[new_range]),
            DiffTag::Replace => {
                runs.removed(&source[old_range]);
                runs.added(&target[new_range]);
            }
        }
    }

    runs.finish()
}

/// Collects runs, merging adjacent operations of the same kind and holding
/// back a change block until the next unchanged run so removals lead.
#[derive(Default)]
struct RunBuilder {
    runs: Vec<ChangeRun>,
    removed: Vec<String>,
    added: Vec<String>,
}

impl RunBuilder {
    fn unchanged(&mut self, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }
        self.flush_changes();
        match self.runs.last_mut() {
            Some(last) if last.kind == SegmentKind::Unchanged => {
                last.lines.extend(lines.iter().map(|l| l.to_string()));
            }
            _ => self.runs.push(ChangeRun {
                kind: SegmentKind::Unchanged,
                lines: to_owned(lines),
            }),
        }
    }

    fn removed(&mut self, lines: &[&str]) {
        self.removed.extend(lines.iter().map(|l| l.to_string()));
    }

    fn added(&mut self, lines: &[&str]) {
        self.added.extend(lines.iter().map(|l| l.to_string()));
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            self.runs.push(ChangeRun {
                kind: SegmentKind::Removed,
                lines: std::mem::take(&mut self.removed),
            });
        }
        if !self.added.is_empty() {
            self.runs.push(ChangeRun {
                kind: SegmentKind::Added,
                lines: std::mem::take(&mut self.added),
            });
        }
    }

    fn finish(mut self) -> Vec<ChangeRun> {
        self.flush_changes();
        self.runs
    }
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_lines_default(source: &[&str], target: &[&str]) -> Vec<ChangeRun> {
        diff_lines(source, target, crate::constant::DIFF_TIMEOUT)
    }

    fn kinds(runs: &[ChangeRun]) -> Vec<SegmentKind> {
        runs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn replaced_line_is_removed_then_added() {
        let runs = diff_lines_default(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            kinds(&runs),
            vec![
                SegmentKind::Unchanged,
                SegmentKind::Removed,
                SegmentKind::Added,
                SegmentKind::Unchanged
            ]
        );
        assert_eq!(runs[1].lines, vec!["b"]);
        assert_eq!(runs[2].lines, vec!["x"]);
    }

    #[test]
    fn identical_sequences_give_one_unchanged_run() {
        let runs = diff_lines_default(&["a", "b"], &["a", "b"]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, SegmentKind::Unchanged);
        assert_eq!(runs[0].lines, vec!["a", "b"]);
    }

    #[test]
    fn empty_sides() {
        let runs = diff_lines_default(&[], &["x", "y"]);
        assert_eq!(kinds(&runs), vec![SegmentKind::Added]);

        let runs = diff_lines_default(&["x", "y"], &[]);
        assert_eq!(kinds(&runs), vec![SegmentKind::Removed]);

        assert!(diff_lines_default(&[], &[]).is_empty());
    }

    #[test]
    fn no_adjacent_runs_share_a_kind() {
        let source = ["a", "b", "c", "d", "e", "f"];
        let target = ["x", "b", "y", "z", "e", "w", "f", "g"];
        let runs = diff_lines_default(&source, &target);
        for pair in runs.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
        for pair in runs.windows(2) {
            assert!(!(pair[0].kind == SegmentKind::Added && pair[1].kind == SegmentKind::Removed));
        }
    }

    #[test]
    fn runs_cover_both_sequences() {
        let source = ["fn main() {", "    old();", "}", ""];
        let target = ["fn main() {", "    new();", "    more();", "}", ""];
        let runs = diff_lines_default(&source, &target);

        let rebuilt_source: Vec<&str> = runs
            .iter()
            .filter(|r| r.kind != SegmentKind::Added)
            .flat_map(|r| r.lines.iter().map(String::as_str))
            .collect();
        let rebuilt_target: Vec<&str> = runs
            .iter()
            .filter(|r| r.kind != SegmentKind::Removed)
            .flat_map(|r| r.lines.iter().map(String::as_str))
            .collect();

        assert_eq!(rebuilt_source, source);
        assert_eq!(rebuilt_target, target);
    }

    fn numbered(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{} {}", prefix, i)).collect()
    }

    fn rebuild(runs: &[ChangeRun], skip: SegmentKind) -> Vec<&str> {
        runs.iter()
            .filter(|r| r.kind != skip)
            .flat_map(|r| r.lines.iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn large_disjoint_inputs_finish_quickly() {
        let source = numbered("old", 20_000);
        let target = numbered("new", 20_000);
        let source: Vec<&str> = source.iter().map(String::as_str).collect();
        let target: Vec<&str> = target.iter().map(String::as_str).collect();

        let started = Instant::now();
        let runs = diff_lines(&source, &target, Duration::from_millis(200));
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);
        assert_eq!(rebuild(&runs, SegmentKind::Added), source);
        assert_eq!(rebuild(&runs, SegmentKind::Removed), target);
    }

    #[test]
    fn large_interleaved_inputs_finish_quickly() {
        let source = numbered("line", 20_000);
        let target: Vec<String> = source
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i % 2 == 0 {
                    line.clone()
                } else {
                    format!("{} changed", line)
                }
            })
            .collect();
        let source: Vec<&str> = source.iter().map(String::as_str).collect();
        let target: Vec<&str> = target.iter().map(String::as_str).collect();

        let started = Instant::now();
        let runs = diff_lines(&source, &target, Duration::from_millis(200));
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);
        assert_eq!(rebuild(&runs, SegmentKind::Added), source);
        assert_eq!(rebuild(&runs, SegmentKind::Removed), target);
        for pair in runs.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
