//! Renderers for ranked word lists.
//!
//! Every format consumes the same [`RankedList`](crate::RankedList) and has an
//! explicit empty state, so a page with no countable words renders as an
//! empty table or chart rather than an error.

pub mod bar;
pub mod csv;
pub mod json;
pub mod markdown;
pub mod table;

use std::fmt;
use std::str::FromStr;

pub use bar::{BarConfig, convert_to_bar_chart};
pub use csv::convert_to_csv;
pub use json::{JsonConfig, convert_to_json};
pub use markdown::convert_to_markdown;
pub use table::{TableConfig, convert_to_table};

use crate::{Analysis, Result};

/// Message shown by text formats when the ranking is empty.
pub const EMPTY_MESSAGE: &str = "No words found.";

/// Output shape for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain-text table with 1-based ranks.
    #[default]
    Table,
    /// Horizontal bar chart drawn with block characters.
    Bar,
    /// Markdown table.
    Markdown,
    /// Comma-separated values with a header row.
    Csv,
    /// The whole analysis as JSON.
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] =
        [OutputFormat::Table, OutputFormat::Bar, OutputFormat::Markdown, OutputFormat::Csv, OutputFormat::Json];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Bar => "bar",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" | "txt" => Ok(Self::Table),
            "bar" | "chart" => Ok(Self::Bar),
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: table, bar, markdown, csv, json", s)),
        }
    }
}

/// Renders an analysis with each format's default settings.
///
/// JSON output is pretty-printed.
pub fn render(analysis: &Analysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(convert_to_table(&analysis.ranked, &TableConfig::default())),
        OutputFormat::Bar => Ok(convert_to_bar_chart(&analysis.ranked, &BarConfig::default())),
        OutputFormat::Markdown => Ok(convert_to_markdown(&analysis.ranked)),
        OutputFormat::Csv => convert_to_csv(&analysis.ranked),
        OutputFormat::Json => convert_to_json(analysis, &JsonConfig { pretty: true }),
    }
}
