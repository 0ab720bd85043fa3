use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use text_compare::config::Config;
use text_compare::diff::{self, CompareOptions, DiffResult};
use text_compare::saver;
use text_compare::session::CompareSession;

const USAGE: &str = "Usage: text-compare <source-file> <target-file> [--json] [--export]
       text-compare --save-config";

enum Command {
    Compare(CompareArgs),
    SaveConfig,
}

struct CompareArgs {
    source: PathBuf,
    target: PathBuf,
    json: bool,
    export: bool,
}

fn parse_args() -> Option<Command> {
    let mut files = Vec::new();
    let mut json = false;
    let mut export = false;
    let mut save_config = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--export" => export = true,
            "--save-config" => save_config = true,
            flag if flag.starts_with("--") => return None,
            _ => files.push(PathBuf::from(arg)),
        }
    }

    if save_config {
        return (files.is_empty() && !json && !export).then_some(Command::SaveConfig);
    }

    let [source, target]: [PathBuf; 2] = files.try_into().ok()?;
    Some(Command::Compare(CompareArgs {
        source,
        target,
        json,
        export,
    }))
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = parse_args() else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };

    let config = Config::default();
    let args = match command {
        Command::SaveConfig => {
            config.save()?;
            println!("Config written to {}", Config::config_path()?.display());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Compare(args) => args,
    };

    let source = fs::read_to_string(&args.source)?;
    let target = fs::read_to_string(&args.target)?;

    let options = config.settings.compare_options();
    let mut session = CompareSession::new(options.clone());
    let result = session.compare(&source, &target)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_summary(result, &options, config.settings.ignore_whitespace_only);
    }

    if args.export {
        let report = diff::export(result);
        let path = saver::save_report(&config.export_dir(), &config.settings.report_name, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(result: &DiffResult, options: &CompareOptions, ignore_whitespace_only: bool) {
    if result.is_identical() || (ignore_whitespace_only && !result.has_meaningful_changes()) {
        println!("No differences");
        return;
    }

    for entry in &result.navigation {
        println!(
            "{:<8} line {}: {}",
            entry.kind.label(),
            entry.display_line_number,
            entry.preview
        );
    }

    let stats = diff::calculate_stats(result, options);
    println!(
        "{} changes, +{} -{} lines, +{} -{} chars",
        stats.changes,
        stats.added_lines,
        stats.removed_lines,
        stats.added_chars,
        stats.removed_chars
    );
}
