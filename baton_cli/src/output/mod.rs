mod formatters;
mod table;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};
pub use table::Table;

use crate::dispatcher::Outcome;
use anyhow::Result;
use std::io::Write;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a command outcome
    fn format(&self, outcome: &Outcome) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Render `outcome` into `out`
pub fn render<W: Write + ?Sized>(
    outcome: &Outcome,
    format: OutputFormat,
    use_color: bool,
    out: &mut W,
) -> Result<()> {
    let rendered = create_formatter(format, use_color).format(outcome)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
