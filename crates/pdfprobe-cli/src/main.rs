use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pdfprobe_core::config_file::{self, ConfigFile, DEFAULT_OUTPUT};
use pdfprobe_core::{CompareConfig, ExtractConfig, LocalFs};
use pdfprobe_pdf_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// pdfprobe - Compare two PDFs byte for byte, or dump the text of one
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read settings from this TOML file instead of the usual locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare the size and content of two files and dump their sizes
    Compare {
        /// First file [env: PDFPROBE_FIRST]
        first: Option<PathBuf>,

        /// Second file [env: PDFPROBE_SECOND]
        second: Option<PathBuf>,

        /// Where to write the size summary [env: PDFPROBE_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the text of every page of a PDF into a text file
    Extract {
        /// PDF to read [env: PDFPROBE_INPUT]
        input: Option<PathBuf>,

        /// Where to write the text [env: PDFPROBE_OUTPUT]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop text in the top fraction of each page (e.g. 0.04)
        #[arg(long, default_value_t = 0.0)]
        header_ratio: f32,

        /// Drop text in the bottom fraction of each page (e.g. 0.05)
        #[arg(long, default_value_t = 0.0)]
        footer_ratio: f32,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One line: context and causes joined with ": ".
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match cli.config {
        Some(ref path) => config_file::load_from_path(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?,
        None => config_file::load_config(),
    };

    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Compare {
            first,
            second,
            output,
        } => {
            let config = resolve_compare(first, second, output, &file_config)?;
            compare(&config, &mut stdout, color)
        }
        Command::Extract {
            input,
            output,
            header_ratio,
            footer_ratio,
        } => {
            let config = resolve_extract(input, output, &file_config)?;
            let backend = MupdfBackend::new()
                .with_header_exclusion(header_ratio)
                .with_footer_exclusion(footer_ratio);
            extract(&config, &backend, &mut stdout, color)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve one path: CLI flag > env var > config file.
fn resolve_path(flag: Option<PathBuf>, env_key: &str, file: Option<&PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os(env_key).map(PathBuf::from))
        .or_else(|| file.cloned())
}

fn resolve_compare(
    first: Option<PathBuf>,
    second: Option<PathBuf>,
    output: Option<PathBuf>,
    file_config: &ConfigFile,
) -> anyhow::Result<CompareConfig> {
    let section = file_config.compare.clone().unwrap_or_default();
    let first = resolve_path(first, "PDFPROBE_FIRST", section.first.as_ref())
        .context("No first file given (argument, PDFPROBE_FIRST or [compare] first)")?;
    let second = resolve_path(second, "PDFPROBE_SECOND", section.second.as_ref())
        .context("No second file given (argument, PDFPROBE_SECOND or [compare] second)")?;
    let summary_path = resolve_path(output, "PDFPROBE_OUTPUT", section.output.as_ref())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    Ok(CompareConfig {
        first,
        second,
        summary_path,
    })
}

fn resolve_extract(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    file_config: &ConfigFile,
) -> anyhow::Result<ExtractConfig> {
    let section = file_config.extract.clone().unwrap_or_default();
    let input = resolve_path(input, "PDFPROBE_INPUT", section.input.as_ref())
        .context("No input PDF given (argument, PDFPROBE_INPUT or [extract] input)")?;
    let output_path = resolve_path(output, "PDFPROBE_OUTPUT", section.output.as_ref())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    Ok(ExtractConfig { input, output_path })
}

fn compare(config: &CompareConfig, w: &mut dyn Write, color: ColorMode) -> anyhow::Result<()> {
    tracing::debug!(?config, "comparing");
    let report = pdfprobe_core::compare_files(&LocalFs, config)?;
    output::print_comparison(w, &report, &config.summary_path, color)?;
    Ok(())
}

fn extract(
    config: &ExtractConfig,
    backend: &MupdfBackend,
    w: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    output::print_processing(w, &config.input, color)?;
    w.flush()?;

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} page {pos}/{len} [{bar:40.green/dim}]")?
            .progress_chars("=> "),
    );
    bar.enable_steady_tick(Duration::from_millis(120));

    let result = pdfprobe_core::extract_to_file(backend, &LocalFs, config, &mut |index, total| {
        if bar.length() != Some(total as u64) {
            bar.set_length(total as u64);
        }
        bar.set_position(index as u64 + 1);
    });
    bar.finish_and_clear();

    let extraction = result.with_context(|| failure_context(&config.input))?;
    output::print_extraction(w, &extraction, &config.output_path, color)?;
    Ok(())
}

fn failure_context(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    format!("Failed to dump text of {}", name)
}
