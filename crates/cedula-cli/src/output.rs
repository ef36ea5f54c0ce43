//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use cedula_accumulator::ScanState;
use cedula_domain::{Field, FieldMap, Score};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Placeholder shown for fields not detected yet.
pub const SCANNING: &str = "Escaneando...";

const PROGRESS_WIDTH: usize = 20;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Get the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the accumulated state of a scan.
    pub fn format_state(&self, state: &ScanState) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_state_json(state),
            OutputFormat::Table => Ok(self.format_state_table(state)),
            OutputFormat::Quiet => Ok(format_pairs(state.record.iter())),
        }
    }

    /// Format the fields extracted from a single snapshot.
    pub fn format_extraction(&self, fields: &FieldMap) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let object: serde_json::Map<String, serde_json::Value> = fields
                    .iter()
                    .map(|(field, value)| (field.as_str().to_string(), value.clone().into()))
                    .collect();
                Ok(serde_json::to_string_pretty(&object)?)
            }
            OutputFormat::Table => {
                if fields.is_empty() {
                    return Ok(self.colorize("No fields detected.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (field, value) in fields {
                    builder.push_record([field.display_name(), value.as_str()]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(format_pairs(
                fields.iter().map(|(field, value)| (*field, value.as_str())),
            )),
        }
    }

    /// Format the field schema.
    pub fn format_schema(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let fields: Vec<serde_json::Value> = Field::ALL
                    .iter()
                    .map(|field| {
                        serde_json::json!({
                            "key": field.as_str(),
                            "name": field.display_name(),
                            "label": field.label(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&fields)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Key", "Name", "Detected by"]);
                for field in Field::ALL {
                    let rule = match (field, field.label()) {
                        (_, Some(label)) => format!("label \"{}:\"", label),
                        (Field::Sex, None) => "MASCULINO / FEMENINO line".to_string(),
                        (_, None) => "all-caps line".to_string(),
                    };
                    builder.push_record([field.as_str(), field.display_name(), rule.as_str()]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(Field::ALL
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the state as JSON.
    fn format_state_json(&self, state: &ScanState) -> Result<String> {
        let fields: serde_json::Map<String, serde_json::Value> = Field::ALL
            .iter()
            .map(|field| {
                let value = state
                    .record
                    .get(*field)
                    .map_or(serde_json::Value::Null, |value| value.into());
                (field.as_str().to_string(), value)
            })
            .collect();

        let json = serde_json::json!({
            "fields": fields,
            "score": state.score.value(),
            "complete": state.is_complete(),
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format the state as a table followed by the progress line.
    fn format_state_table(&self, state: &ScanState) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        for field in Field::ALL {
            let value = state.record.get(field).unwrap_or(SCANNING);
            builder.push_record([field.display_name(), value]);
        }

        format!("{}\n{}", styled(builder), self.progress(state.score))
    }

    /// Format the score with a progress bar and the completion marker.
    pub fn progress(&self, score: Score) -> String {
        let line = format!("Progreso: {} {}", progress_bar(score), score);
        if score.is_complete() {
            format!("{}  {}", line, self.success("Escaneo completo"))
        } else {
            line
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render a fixed-width bar for a score.
pub fn progress_bar(score: Score) -> String {
    let filled = ((score.value() / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}

fn format_pairs<'a>(pairs: impl Iterator<Item = (Field, &'a str)>) -> String {
    pairs
        .map(|(field, value)| format!("{}={}", field.as_str(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
