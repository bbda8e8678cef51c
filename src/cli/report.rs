//! Report formatting and printing utilities.
//!
//! Progress and summaries go to stdout, warnings and per-file failures to
//! stderr. Separate from core logic to allow parlai to be used as a library.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, TransformSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::pipeline::{ExtractedString, RewriteReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, verbose, out, err),
        CommandSummary::Transform(summary) => print_transform(summary, verbose, out, err),
        CommandSummary::Init(summary) => print_init(summary, out),
    }
}

fn print_extract<W: Write, E: Write>(
    summary: &ExtractSummary,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    let report = &summary.report;
    let root = summary.root.as_path();

    if let Some(backup) = &report.backup {
        let _ = writeln!(
            out,
            "{} Backup created at {}",
            SUCCESS_MARK.green(),
            relative(backup, root)
        );
    }

    print_scaffolded(&report.scaffolded, report.dry_run, root, out);

    let _ = writeln!(
        out,
        "Scanned {} {}",
        report.files_scanned,
        plural(report.files_scanned, "file", "files")
    );
    let _ = writeln!(out, "{}", "String analysis:".bold());
    let _ = writeln!(out, "  - Total strings found: {}", report.strings_found());
    let _ = writeln!(
        out,
        "  - Strings that will be transformed: {}",
        report.strings_transformed()
    );
    if report.strings_skipped() > 0 {
        let _ = writeln!(
            out,
            "  - Skipped {} {} that wouldn't be transformed",
            report.strings_skipped(),
            plural(report.strings_skipped(), "string", "strings")
        );
    }

    if verbose {
        print_strings(&report.strings, root, out);
    }

    for collision in &report.collisions {
        let _ = writeln!(
            err,
            "{} key \"{}\" already held \"{}\", overwritten by \"{}\" ({}:{})",
            "warning:".bold().yellow(),
            collision.key,
            collision.previous,
            collision.value,
            relative(&collision.file, root),
            collision.line
        );
    }

    let written = if summary.cleanup {
        report.strings_transformed()
    } else {
        report.strings_found()
    };
    let _ = writeln!(
        out,
        "{} {} {} to {}",
        if report.dry_run {
            "Would extract".yellow().bold()
        } else {
            "Extracted".green().bold()
        },
        written,
        plural(written, "string", "strings"),
        relative(&report.catalog_path, root)
    );
    if !report.removed_keys.is_empty() {
        let _ = writeln!(
            out,
            "  - {} {} unused key(s)",
            if report.dry_run { "would remove" } else { "removed" },
            report.removed_keys.len()
        );
        if verbose {
            for key in &report.removed_keys {
                let _ = writeln!(out, "    {}", key.dimmed());
            }
        }
    }

    print_rewrite(&report.rewrite, report.dry_run, verbose, root, out, err);

    if report.dry_run {
        let _ = writeln!(
            out,
            "Dry run completed. Run without {} to apply changes.",
            "--dry-run".cyan()
        );
    } else if report.rewrite.failures.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            "All done! Your components are now internationalized.".green()
        );
    }
}

fn print_transform<W: Write, E: Write>(
    summary: &TransformSummary,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    let report = &summary.report;
    let root = summary.root.as_path();

    let _ = writeln!(
        out,
        "Scanned {} {} against {}",
        report.files_scanned,
        plural(report.files_scanned, "file", "files"),
        relative(&report.catalog_path, root)
    );
    print_rewrite(&report.rewrite, report.dry_run, verbose, root, out, err);
}

fn print_rewrite<W: Write, E: Write>(
    rewrite: &RewriteReport,
    dry_run: bool,
    verbose: bool,
    root: &Path,
    out: &mut W,
    err: &mut E,
) {
    if verbose {
        for file in &rewrite.rewritten {
            let _ = writeln!(
                out,
                "  {} {} ({} {})",
                if dry_run { "would transform" } else { "transformed" },
                relative(&file.path, root),
                file.replaced,
                plural(file.replaced, "string", "strings")
            );
        }
    }

    for failure in &rewrite.failures {
        let _ = writeln!(err, "{} {}", "error:".bold().red(), failure);
    }

    let count = rewrite.rewritten.len();
    if count == 0 {
        let _ = writeln!(out, "No files needed transformation");
    } else {
        let _ = writeln!(
            out,
            "{} {} {} ({} {})",
            if dry_run {
                "Would transform".yellow().bold()
            } else {
                "Transformed".green().bold()
            },
            count,
            plural(count, "file", "files"),
            rewrite.replaced(),
            plural(rewrite.replaced(), "replacement", "replacements")
        );
    }

    if !rewrite.failures.is_empty() {
        let _ = writeln!(
            out,
            "{} {} {} could not be rewritten and {} left untouched",
            FAILURE_MARK.red(),
            rewrite.failures.len(),
            plural(rewrite.failures.len(), "file", "files"),
            plural(rewrite.failures.len(), "was", "were")
        );
    }
}

fn print_scaffolded<W: Write>(files: &[PathBuf], dry_run: bool, root: &Path, out: &mut W) {
    if files.is_empty() {
        return;
    }
    if dry_run {
        let _ = writeln!(out, "Would create:");
        for file in files {
            let _ = writeln!(out, "  - {}", relative(file, root));
        }
    } else {
        for file in files {
            let _ = writeln!(
                out,
                "{} Created {}",
                SUCCESS_MARK.green(),
                relative(file, root)
            );
        }
    }
}

/// Key/value listing, keys padded to a common display width.
fn print_strings<W: Write>(strings: &[ExtractedString], root: &Path, out: &mut W) {
    let width = strings
        .iter()
        .map(|s| UnicodeWidthStr::width(s.key.as_str()))
        .max()
        .unwrap_or(0);

    for s in strings {
        let padding = width - UnicodeWidthStr::width(s.key.as_str());
        let mark = if s.was_transformed {
            " ".normal()
        } else {
            "~".dimmed()
        };
        let _ = writeln!(
            out,
            "  {} {}{}  \"{}\"  {}",
            mark,
            s.key.cyan(),
            " ".repeat(padding),
            s.value,
            format!("{}:{}", relative(&s.file, root), s.line).dimmed()
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, out: &mut W) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
