mod output;

use crate::error::Error;
use crate::validator;
use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum};
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::PathBuf;

pub use output::{Palette, render_error, render_report};

#[derive(Parser, Debug)]
#[command(name = "labelcheck")]
#[command(about = "Check the format of a multi-label file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Label file: one comma-separated list of positive label ids per line
    pub label_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Print label statistics before the result
    #[arg(long)]
    pub stats: bool,

    /// Do not print label frequency order warnings
    #[arg(long)]
    pub no_warnings: bool,

    /// When to colorize output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Rendering options resolved from the command line
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub format: OutputFormat,
    pub stats: bool,
    pub warnings: bool,
    pub palette: Palette,
}

impl Options {
    pub fn from_cli(cli: &Cli) -> Self {
        let colored = match cli.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };

        Self {
            format: cli.format,
            stats: cli.stats,
            warnings: !cli.no_warnings,
            palette: Palette::new(colored && cli.format == OutputFormat::Plain),
        }
    }
}

/// The one-line usage string printed on argument errors
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Parse `args`, mapping anything but help/version into [`Error::Usage`].
pub fn parse_args<I, T>(args: I) -> Result<Cli, ParseOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        if e.use_stderr() {
            ParseOutcome::Failed(Error::Usage(usage()))
        } else {
            ParseOutcome::Informational(e)
        }
    })
}

/// Why argument parsing did not produce a [`Cli`]
#[derive(Debug)]
pub enum ParseOutcome {
    /// `--help` or `--version`
    Informational(clap::Error),
    Failed(Error),
}

/// Validate the label file and write the outcome to stdout.
///
/// Returns the process exit code. `Err` is reserved for failures writing
/// the output itself.
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let options = Options::from_cli(&cli);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = match validator::validate_file(&cli.label_file) {
        Ok(report) => {
            render_report(&mut out, &report, &options)?;
            0
        }
        Err(e) => {
            render_error(&mut out, &e, &options)?;
            e.exit_code()
        }
    };

    out.flush().context("Failed to flush stdout")?;
    Ok(code)
}
