//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use trellis_api::{ApiError, Interpretation};

/// JSON formatter - outputs interpretations as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<Value>,
    pretty: bool,
}

/// Record for an input rejected before dispatch
#[derive(Debug, Serialize)]
struct Rejected<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    status: &'static str,
    error: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
            pretty: true,
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_interpretation(&mut self, interpretation: &Interpretation) -> Result<()> {
        self.records.push(serde_json::to_value(interpretation)?);
        Ok(())
    }

    fn format_rejected(&mut self, id: Option<&str>, error: &ApiError) -> Result<()> {
        self.records.push(serde_json::to_value(Rejected {
            id,
            status: "rejected",
            error: error.to_string(),
        })?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
