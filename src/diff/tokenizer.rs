/// Split text into lines on `\n`.
///
/// An empty input yields a single empty line, and a trailing `\n` yields a
/// final empty line, so the result always has `count('\n') + 1` entries.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Tokenize a source/target pair.
///
/// A genuinely empty side facing a non-empty one has zero lines, so the other
/// side collapses into a single Added or Removed run.
pub fn split_pair<'a>(source: &'a str, target: &'a str) -> (Vec<&'a str>, Vec<&'a str>) {
    match (source.is_empty(), target.is_empty()) {
        (true, false) => (Vec::new(), split_lines(target)),
        (false, true) => (split_lines(source), Vec::new()),
        _ => (split_lines(source), split_lines(target)),
    }
}
