//! Export generated addresses as CSV, TXT or JSON

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AliasForgeError, Result};

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Txt,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AliasForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            other => Err(AliasForgeError::validation(format!(
                "Unknown export format '{}' (expected csv, txt or json)",
                other
            ))),
        }
    }
}

/// Render addresses in the given format
pub fn render(emails: &[String], format: ExportFormat) -> Result<String> {
    if emails.is_empty() {
        return Err(crate::validation_error!("No variations generated to export"));
    }

    match format {
        ExportFormat::Csv => Ok(format!("Email\n{}", emails.join("\n"))),
        ExportFormat::Txt => Ok(emails.join("\n")),
        ExportFormat::Json => serde_json::to_string_pretty(emails).map_err(|e| {
            AliasForgeError::internal(format!("Failed to serialize export: {}", e))
        }),
    }
}

/// e.g. `gmail-variations-favs-1700000000000.csv`
pub fn export_file_name(favorites_only: bool, timestamp: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "gmail-variations{}-{}.{}",
        if favorites_only { "-favs" } else { "" },
        timestamp.timestamp_millis(),
        format.extension()
    )
}

/// Write an export file into `dir` and return its path
pub fn write_export(
    dir: &Path,
    emails: &[String],
    format: ExportFormat,
    favorites_only: bool,
) -> Result<PathBuf> {
    let content = render(emails, format)?;

    std::fs::create_dir_all(dir).map_err(|e| {
        AliasForgeError::io(e.to_string(), Some(dir.to_string_lossy().to_string()))
    })?;

    let path = dir.join(export_file_name(favorites_only, Utc::now(), format));
    std::fs::write(&path, content).map_err(|e| {
        AliasForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })?;

    tracing::info!(path = %path.display(), count = emails.len(), format = %format, "Export written");
    Ok(path)
}
