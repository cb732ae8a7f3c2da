//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use saliency_classifier::ClassificationOutcome;
use saliency_domain::{AnomalyClass, ChatMessage, ClassDescription, ContentBlock, RecordId};
use saliency_store::NameLookup;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

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

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the class table returned by a list-all read.
    pub fn format_classes(&self, classes: &[ClassDescription]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = classes
                    .iter()
                    .map(|c| serde_json::json!({ "name": c.name, "description": c.description }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if classes.is_empty() {
                    return Ok(self.colorize("No anomaly classes found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Name", "Description"]);
                for class in classes {
                    builder.push_record([class.name.as_str(), class.description.as_str()]);
                }
                Ok(self.render_table(builder))
            }
            OutputFormat::Quiet => Ok(join_lines(classes.iter().map(|c| c.name.as_str()))),
        }
    }

    /// Format a list of descriptions.
    pub fn format_descriptions(&self, descriptions: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(descriptions)?),
            OutputFormat::Table | OutputFormat::Quiet => {
                Ok(join_lines(descriptions.iter().map(String::as_str)))
            }
        }
    }

    /// Format the result of a lookup by names.
    pub fn format_lookup(&self, lookup: &NameLookup) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "matches": lookup.matches.iter().map(class_json).collect::<Vec<_>>(),
                "unmatched": lookup.unmatched,
            }))?),
            OutputFormat::Table => {
                let mut output = self.classes_table(&lookup.matches);
                for name in &lookup.unmatched {
                    output.push('\n');
                    output.push_str(&self.warning(&format!("No stored class named '{}'", name)));
                }
                Ok(output)
            }
            OutputFormat::Quiet => Ok(join_lines(
                lookup.matches.iter().map(|c| c.description.as_str()),
            )),
        }
    }

    /// Format the record ids assigned during ingestion.
    pub fn format_ingest(&self, records: &[(String, RecordId)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = records
                    .iter()
                    .map(|(name, id)| serde_json::json!({ "name": name, "record": id.to_string() }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Name", "Record"]);
                for (name, id) in records {
                    builder.push_record([name.clone(), id.to_string()]);
                }
                Ok(self.render_table(builder))
            }
            OutputFormat::Quiet => {
                let ids: Vec<String> = records.iter().map(|(_, id)| id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format a prompt for inspection. Images are abbreviated outside JSON.
    pub fn format_prompt(&self, message: &ChatMessage) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let content: Vec<serde_json::Value> = message
                    .content
                    .iter()
                    .map(|block| match block {
                        ContentBlock::Text(text) => serde_json::json!({ "type": "text", "text": text }),
                        ContentBlock::Image { data_url } => {
                            serde_json::json!({ "type": "image", "data_url": data_url })
                        }
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "role": message.role.as_str(),
                    "content": content,
                }))?)
            }
            OutputFormat::Table | OutputFormat::Quiet => {
                let mut image_index = 0;
                let blocks: Vec<String> = message
                    .content
                    .iter()
                    .map(|block| match block {
                        ContentBlock::Text(text) => text.clone(),
                        ContentBlock::Image { data_url } => {
                            image_index += 1;
                            self.colorize(
                                &format!("[image {}: {} chars of data URL]", image_index, data_url.len()),
                                "cyan",
                            )
                        }
                    })
                    .collect();
                Ok(blocks.join("\n"))
            }
        }
    }

    /// Format a classification outcome.
    pub fn format_outcome(&self, outcome: &ClassificationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "answer_line": outcome.result.answer_line,
                "class_names": outcome.result.class_names,
                "matches": outcome.matches.iter().map(class_json).collect::<Vec<_>>(),
                "unmatched": outcome.unmatched,
                "metadata": {
                    "model": outcome.metadata.model_name,
                    "class_count": outcome.metadata.class_count,
                    "signal_count": outcome.metadata.signal_count,
                    "prompt_chars": outcome.metadata.prompt_chars,
                    "processing_time_ms": outcome.metadata.processing_time_ms,
                },
            }))?),
            OutputFormat::Table => {
                let mut output = self.success(&format!(
                    "Predicted: {}",
                    outcome.result.class_names.join(", ")
                ));
                output.push('\n');
                output.push_str(&self.classes_table(&outcome.matches));
                for name in &outcome.unmatched {
                    output.push('\n');
                    output.push_str(&self.warning(&format!("No stored class named '{}'", name)));
                }
                output.push('\n');
                output.push_str(&self.info(&format!(
                    "{} signal(s), {} classes offered, model {}, {} ms",
                    outcome.metadata.signal_count,
                    outcome.metadata.class_count,
                    outcome.metadata.model_name,
                    outcome.metadata.processing_time_ms
                )));
                Ok(output)
            }
            OutputFormat::Quiet => Ok(outcome.result.class_names.join(",")),
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

    fn classes_table(&self, classes: &[AnomalyClass]) -> String {
        if classes.is_empty() {
            return self.colorize("No matching classes found.", "yellow");
        }
        let mut builder = Builder::default();
        builder.push_record(["Name", "Severity", "Description"]);
        for class in classes {
            builder.push_record([
                class.name.as_str(),
                class.severity.as_str(),
                class.description.as_str(),
            ]);
        }
        self.render_table(builder)
    }

    fn render_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
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
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn class_json(class: &AnomalyClass) -> serde_json::Value {
    serde_json::json!({
        "name": class.name,
        "description": class.description,
        "severity": class.severity,
    })
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}
