//! User-facing console output.
//! Prefixed status messages plus the per-file report lines and batch summary.
//! Colors are enabled only when the target stream is a TTY.

use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

use crate::batch::BatchReport;
use crate::fs_ops::{RenameOutcome, SkipReason};

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// `path` relative to `base` when it lives underneath it.
fn shown(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}

/// Plain-text report line for one outcome.
pub fn format_outcome(outcome: &RenameOutcome, base: &Path) -> String {
    match outcome {
        RenameOutcome::Renamed {
            source,
            destination,
        } => format!("{} -> {}", shown(source, base), shown(destination, base)),
        RenameOutcome::Skipped {
            source,
            reason: SkipReason::Unchanged,
        } => format!("skipped: {} (already named correctly)", shown(source, base)),
        RenameOutcome::Skipped {
            source,
            reason: SkipReason::Collision(dest),
        } => format!(
            "skipped: {} (destination exists: {})",
            shown(source, base),
            shown(dest, base)
        ),
        RenameOutcome::Failed { source, error } => {
            format!("failed: {}: {}", shown(source, base), error)
        }
    }
}

/// Print one report line, colored by outcome.
pub fn print_outcome(outcome: &RenameOutcome, base: &Path) {
    let line = format_outcome(outcome, base);
    if !stdout_tty() {
        println!("{line}");
        return;
    }
    match outcome {
        RenameOutcome::Renamed { .. } => println!("{}", line.green()),
        RenameOutcome::Skipped { .. } => println!("{}", line.dimmed()),
        RenameOutcome::Failed { .. } => println!("{}", line.red()),
    }
}

/// Summary line with counts and elapsed time.
pub fn format_summary(report: &BatchReport, dry_run: bool, elapsed: Duration) -> String {
    let verb = if dry_run { "would rename" } else { "renamed" };
    let mut s = format!(
        "{verb} {}, unchanged {}, skipped {}, failed {}",
        report.renamed(),
        report.unchanged(),
        report.collisions(),
        report.failed()
    );
    if !report.not_attempted.is_empty() {
        s.push_str(&format!(", not attempted {}", report.not_attempted.len()));
    }
    s.push_str(&format!(" in {:.2}s", elapsed.as_secs_f64()));
    s
}

/// Print every outcome, the files left alone, and the summary.
pub fn print_report(report: &BatchReport, base: &Path, dry_run: bool, elapsed: Duration) {
    for outcome in &report.outcomes {
        print_outcome(outcome, base);
    }
    for path in &report.not_attempted {
        print_user(&format!("not attempted: {}", shown(path, base)));
    }
    let summary = format_summary(report, dry_run, elapsed);
    if report.has_failures() || report.interrupted {
        print_warn(&summary);
    } else {
        print_success(&summary);
    }
}
