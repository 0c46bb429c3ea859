//! Human-readable console output

use colored::Colorize;

use itemsync_core::{DocumentStatus, RunReport};

/// Per-document status lines, diff excerpts, duplicates and errors
pub fn print_preview(report: &RunReport, excerpt: usize) {
    print_catalog_line(report);
    println!();

    for doc in &report.documents {
        match doc.status {
            DocumentStatus::Changed => {
                println!(
                    "   {} {} ({} replaced)",
                    "~".yellow(),
                    doc.filename.yellow(),
                    doc.replaced.len()
                );
                if let Some(diff) = doc.diff.as_ref().filter(|d| !d.is_empty()) {
                    let text = diff.excerpt(excerpt);
                    for line in text.lines() {
                        println!("      {}", colorize_diff_line(line));
                    }
                    if text.len() < diff.unified.len() {
                        println!("      {}", "...".dimmed());
                    }
                }
            }
            DocumentStatus::Unchanged => {
                println!("   {} {}", "=".dimmed(), doc.filename.dimmed());
            }
            DocumentStatus::Failed => {
                println!("   {} {}", "!".red(), doc.filename.red());
            }
        }
    }

    print_duplicates(report);
    print_errors(report);
}

/// Summary after a committing pass
pub fn print_applied(report: &RunReport) {
    let changed = report.changed().count();
    if changed == 0 {
        println!("{} Already in sync. No changes needed.", "OK".green().bold());
    } else {
        println!("{} Merge applied:", "OK".green().bold());
        for doc in report.changed() {
            println!("   {} {}", "+".green(), doc.filename);
        }
    }

    let written = report
        .documents
        .iter()
        .filter(|d| d.output_path.is_some())
        .count();
    println!("   {} document(s) written", written);

    if let Some(path) = &report.missing_path {
        println!(
            "   {} missing identifier(s) listed in {}",
            report.missing.len(),
            path.cyan()
        );
    }
    print_errors(report);
}

fn print_catalog_line(report: &RunReport) {
    println!(
        "{} {} identifier(s) from {} source file(s), {} of {} document(s) changed",
        "Catalog".blue().bold(),
        report.catalog_size,
        report.sources.len(),
        report.changed().count(),
        report.documents.len()
    );
}

fn print_duplicates(report: &RunReport) {
    if report.duplicates.is_empty() {
        return;
    }
    println!();
    println!("{}", "Duplicate identifiers (last definition wins):".yellow().bold());
    for dup in &report.duplicates {
        println!(
            "   {} {} in {} replaced {}",
            "!".yellow(),
            dup.identifier,
            dup.origin,
            dup.replaced_origin
        );
    }
}

fn print_errors(report: &RunReport) {
    if report.errors.is_empty() {
        return;
    }
    println!();
    println!("{}", "Errors:".red().bold());
    for error in &report.errors {
        println!("   {} {}", "!".red(), error);
    }
}

fn colorize_diff_line(line: &str) -> colored::ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}
