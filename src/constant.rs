use std::time::Duration;

/// Application name and metadata constants
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "RetricSu";
pub const APP_NAME: &str = "Text Compare";

/// Report defaults
pub const DEFAULT_REPORT_NAME: &str = "text-compare";
pub const REPORT_TITLE: &str = "Text Comparison Report";
pub const REPORT_DIVIDER: &str = "----------------------------------------";

/// Navigation and display row rendering
pub const PREVIEW_MAX_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";
pub const EMPTY_LINE_MARKER: &str = "(empty line)";

/// Upper bound on time spent searching for a minimal edit script
pub const DIFF_TIMEOUT: Duration = Duration::from_millis(500);
