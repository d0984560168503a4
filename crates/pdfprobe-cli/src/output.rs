use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pdfprobe_core::{Comparison, ComparisonReport, Extraction};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the outcome of a comparison run.
pub fn print_comparison(
    w: &mut dyn Write,
    report: &ComparisonReport,
    summary_path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    match &report.summary_written {
        Ok(()) => writeln!(w, "Dumped size info to {}", summary_path.display())?,
        Err(e) => {
            let msg = format!(
                "Error writing to {}: {}",
                summary_path.display(),
                error_chain(e)
            );
            if color.enabled() {
                writeln!(w, "{}", msg.yellow())?;
            } else {
                writeln!(w, "{}", msg)?;
            }
        }
    }

    match report.comparison {
        Comparison::DifferentSize => {
            if color.enabled() {
                writeln!(w, "Files are {} size.", "DIFFERENT".red().bold())?;
            } else {
                writeln!(w, "Files are DIFFERENT size.")?;
            }
            writeln!(w, "{}", report.sizes)?;
        }
        Comparison::Identical => {
            writeln!(w, "Files have SAME SIZE.")?;
            if color.enabled() {
                writeln!(w, "Files are {} in content.", "IDENTICAL".green().bold())?;
            } else {
                writeln!(w, "Files are IDENTICAL in content.")?;
            }
        }
        Comparison::DifferentContent { first_difference } => {
            writeln!(w, "Files have SAME SIZE.")?;
            if color.enabled() {
                writeln!(
                    w,
                    "Files are {} content. {}",
                    "DIFFERENT".red().bold(),
                    format!("(first difference at byte {})", first_difference).dimmed()
                )?;
            } else {
                writeln!(
                    w,
                    "Files are DIFFERENT content. (first difference at byte {})",
                    first_difference
                )?;
            }
        }
    }
    Ok(())
}

/// An error and its sources on one line, joined with ": ".
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut line = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = cause.source();
    }
    line
}

/// Print the header shown before extraction starts.
pub fn print_processing(w: &mut dyn Write, input: &Path, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Processing:".bold().cyan(), input.display())
    } else {
        writeln!(w, "Processing: {}", input.display())
    }
}

/// Print the result of a successful extraction.
pub fn print_extraction(
    w: &mut dyn Write,
    extraction: &Extraction,
    output_path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let detail = format!(
        "({} pages, {} bytes)",
        extraction.pages, extraction.bytes
    );
    if color.enabled() {
        writeln!(
            w,
            "Dumped text to {} {}",
            output_path.display(),
            detail.dimmed()
        )
    } else {
        writeln!(w, "Dumped text to {} {}", output_path.display(), detail)
    }
}
