//! Reading query records from files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use trellis_api::Input;

/// Reads JSON-lines query files
///
/// Each non-blank line is one object with `sentence`, `annotation` and an
/// optional `id`. Records without an id are named `<file>:<line>`.
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read every query record in a file
    pub fn read_inputs(path: &Path) -> Result<Vec<Input>> {
        let content = Self::read_text(path)?;
        let name = path.display().to_string();

        let mut inputs = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut input: Input =
                serde_json::from_str(line).map_err(|e| CliError::InvalidInput {
                    path: name.clone(),
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            if input.id.is_none() {
                input.id = Some(format!("{name}:{}", index + 1));
            }
            inputs.push(input);
        }

        log::debug!("read {} record(s) from {name}", inputs.len());
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_nonexistent_file() {
        let result = FileReader::read_text(Path::new("/nonexistent/file.jsonl"));
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read file"));
    }

    #[test]
    fn test_read_inputs_assigns_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queries.jsonl");
        fs::write(
            &path,
            concat!(
                r#"{"id":"q1","sentence":"já","annotation":"P ao /P"}"#,
                "\n\n",
                r#"{"sentence":"nei","annotation":"P ao /P"}"#,
                "\n"
            ),
        )
        .unwrap();

        let inputs = FileReader::read_inputs(&path).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].id.as_deref(), Some("q1"));
        assert_eq!(inputs[1].id, Some(format!("{}:3", path.display())));
        assert_eq!(inputs[1].sentence, "nei");
    }

    #[test]
    fn test_read_inputs_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jsonl");
        fs::write(&path, "{\"sentence\":\"já\"}\n").unwrap();

        let err = FileReader::read_inputs(&path).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::InvalidInput { line, .. }) => assert_eq!(*line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
