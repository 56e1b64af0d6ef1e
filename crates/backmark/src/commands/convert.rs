//! `backmark convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::CliError;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Backlog file to convert (reads stdin when omitted).
    file: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or stdout cannot be
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input = match &self.file {
            Some(path) => read_input(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        tracing::debug!(bytes = input.len(), "Read Backlog input");
        let markdown = backmark_convert::convert(&input);

        // Raw write: the Markdown goes to stdout exactly as produced, without
        // terminal styling.
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(markdown.as_bytes())?;
        if !markdown.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Read the whole input file.
fn read_input(path: &Path) -> Result<String, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.backlog");
        std::fs::write(&path, "* Title\n- item\n").unwrap();

        let input = read_input(&path).unwrap();
        assert_eq!(backmark_convert::convert(&input), "# Title\n- item\n");
    }

    #[test]
    fn test_read_input_missing_file_errors() {
        let result = read_input(Path::new("/nonexistent/notes.backlog"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
