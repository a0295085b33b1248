use super::{OutputFormat, Options};
use crate::error::Error;
use crate::model::{LabelStats, OrderWarning, ValidationReport};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::Write;

pub const SUCCESS_MESSAGE: &str = "Label file format is correct";

/// Colors status lines when enabled
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn error(&self, text: &str) -> String {
        if self.enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.enabled {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn render_report(out: &mut impl Write, report: &ValidationReport, options: &Options) -> Result<()> {
    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
        OutputFormat::Plain => {
            if options.warnings {
                for warning in &report.warnings {
                    writeln!(out, "{}", format_warning(warning, &options.palette))?;
                }
            }
            if options.stats {
                write_stats(out, &report.stats)?;
            }
            writeln!(out, "{}", options.palette.success(SUCCESS_MESSAGE))?;
        }
    }
    Ok(())
}

pub fn render_error(out: &mut impl Write, error: &Error, options: &Options) -> Result<()> {
    match options.format {
        OutputFormat::Json => {
            let value = json!({
                "status": "error",
                "kind": error.kind(),
                "line": error.line(),
                "message": error.to_string(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Plain => {
            writeln!(out, "{}", options.palette.error(&error.to_string()))?;
        }
    }
    Ok(())
}

fn format_warning(warning: &OrderWarning, palette: &Palette) -> String {
    format!(
        "{} Label {} appears more frequently than label {} ({} > {}), please try to ensure smaller labels appear more frequently",
        palette.warning("Warning:"),
        warning.label,
        warning.previous_label,
        warning.frequency,
        warning.previous_frequency
    )
}

fn write_stats(out: &mut impl Write, stats: &LabelStats) -> Result<()> {
    writeln!(out, "Statistics:")?;
    writeln!(out, "  - Label sets: {}", stats.label_sets)?;
    writeln!(out, "  - Distinct labels: {}", stats.distinct_labels)?;
    match stats.max_label {
        Some(max) => writeln!(out, "  - Max label id: {}", max)?,
        None => writeln!(out, "  - Max label id: -")?,
    }
    writeln!(out, "  - Label occurrences: {}", stats.label_occurrences)?;
    writeln!(
        out,
        "  - Labels per set: min {}, mean {:.2}, max {}",
        stats.min_labels_per_set, stats.mean_labels_per_set, stats.max_labels_per_set
    )?;

    let listed = stats
        .first_unused
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if stats.first_unused.is_empty() {
        writeln!(out, "  - Unused label ids: {}", stats.unused_labels)?;
    } else if stats.unused_labels as usize > stats.first_unused.len() {
        writeln!(out, "  - Unused label ids: {} ({}, ...)", stats.unused_labels, listed)?;
    } else {
        writeln!(out, "  - Unused label ids: {} ({})", stats.unused_labels, listed)?;
    }
    Ok(())
}
