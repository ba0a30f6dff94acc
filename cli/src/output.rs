//! Output utilities for the CLI.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

/// Where and how structured results are printed.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<String>,
}

impl Output {
    /// Creates a new output configuration.
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    /// Renders `value` in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
        })
    }

    /// Writes `value` to the configured file, or stdout.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = self.render(value)?;
        match &self.file {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(output.as_bytes())?;
            }
            None => println!("{}", output.trim_end()),
        }
        Ok(())
    }
}

/// Writes binary data to a file.
pub fn write_binary(path: impl AsRef<Path>, data: &[u8]) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}
