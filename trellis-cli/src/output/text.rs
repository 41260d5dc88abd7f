//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use trellis_api::{ApiError, Interpretation, Outcome};

/// Plain text formatter - one block per query
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn header(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            write!(self.writer, "[{id}] ")?;
        }
        Ok(())
    }
}


impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_interpretation(&mut self, interpretation: &Interpretation) -> Result<()> {
        self.header(interpretation.id.as_deref())?;
        writeln!(self.writer, "{}", interpretation.sentence)?;

        match &interpretation.outcome {
            Outcome::Answered {
                qtype,
                qkey: Some(qkey),
            } => writeln!(self.writer, "  answered: {qtype} (qkey {qkey})")?,
            Outcome::Answered { qtype, qkey: None } => {
                writeln!(self.writer, "  answered: {qtype}")?
            }
            Outcome::NotUnderstood => writeln!(
                self.writer,
                "  not understood: {}",
                interpretation.outcome.error_code().unwrap_or_default()
            )?,
            Outcome::Failed { error } => writeln!(self.writer, "  failed: {error}")?,
        }

        if !interpretation.fields.is_empty() {
            let fields: Vec<String> = interpretation
                .fields
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            writeln!(self.writer, "  fields: {}", fields.join(", "))?;
        }

        let tokens: Vec<&str> = interpretation
            .tokens
            .iter()
            .map(|token| token.text.as_str())
            .collect();
        writeln!(self.writer, "  tokens: {}", tokens.join(" | "))?;

        for warning in &interpretation.warnings {
            writeln!(self.writer, "  warning: {warning}")?;
        }
        Ok(())
    }

    fn format_rejected(&mut self, id: Option<&str>, error: &ApiError) -> Result<()> {
        self.header(id)?;
        writeln!(self.writer, "rejected: {error}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_api::Input;

    fn render(interpretation: &Interpretation) -> String {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_interpretation(interpretation).unwrap();
        formatter.finish().unwrap();
        String::from_utf8(formatter.writer).unwrap()
    }

    #[test]
    fn test_answered_query() {
        let interpretation = trellis_api::Interpreter::new()
            .unwrap()
            .process(
                &Input::new(
                    "hvenær kemur strætó númer sjö",
                    "P QBusArrivalTime ao so_et_fh QBus QBusNumber no_et_kk_nf no_et_hk_nf \
                     QBusNumberWord tö_ft_hk_nf /QBusNumberWord /QBusNumber /QBus /QBusArrivalTime /P",
                )
                .with_id("q1"),
            )
            .unwrap();

        let text = render(&interpretation);
        assert!(text.starts_with("[q1] hvenær kemur strætó númer sjö\n"));
        assert!(text.contains("  answered: ArrivalTime (qkey 7)\n"));
        assert!(text.contains("bus_number=7"));
        assert!(text.contains("  tokens: hvenær | kemur | strætó | númer | sjö\n"));
    }

    #[test]
    fn test_not_understood() {
        let interpretation = trellis_api::interpret("hundurinn geltir", "P NP no_nf /NP VP so_fh /VP /P")
            .unwrap();
        let text = render(&interpretation);
        assert!(text.contains("  not understood: E_QUERY_NOT_UNDERSTOOD\n"));
        assert!(!text.contains("fields:"));
    }

    #[test]
    fn test_rejected() {
        let error = trellis_api::interpret("x", "P NP ao /VP /P").unwrap_err();
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_rejected(Some("q9"), &error).unwrap();
        let text = String::from_utf8(formatter.writer).unwrap();
        assert!(text.starts_with("[q9] rejected: invalid annotation"));
    }
}
