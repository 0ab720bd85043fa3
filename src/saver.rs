use chrono::{Local, NaiveDate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SaverError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// `<report-name>-<YYYY-MM-DD>.txt`
pub fn report_file_name(report_name: &str, date: NaiveDate) -> String {
    let stem: String = report_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{}-{}.txt", stem, date.format("%Y-%m-%d"))
}

/// Write a report into `dir`, named with today's local date
pub fn save_report(dir: &Path, report_name: &str, content: &str) -> Result<PathBuf, SaverError> {
    save_report_on(dir, report_name, content, Local::now().date_naive())
}

pub fn save_report_on(
    dir: &Path,
    report_name: &str,
    content: &str,
    date: NaiveDate,
) -> Result<PathBuf, SaverError> {
    fs::create_dir_all(dir)?;
    let file_path = dir.join(report_file_name(report_name, date));
    fs::write(&file_path, content)?;
    info!("Report saved to {:?}", file_path);
    Ok(file_path)
}
