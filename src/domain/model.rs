use crate::utils::error::ReconError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tally of one ingest run. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestResult {
    /// Lines handed to the store (invalid and failed lines excluded).
    pub total: usize,
    pub new: usize,
    pub invalid: usize,
    /// Lines the store rejected individually.
    pub failed: usize,
}

impl IngestResult {
    pub fn duplicates(&self) -> usize {
        self.total - self.new
    }

    pub fn duplicate_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.duplicates() as f64 / self.total as f64 * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} domains: {} new, {} duplicates ({:.2}%)",
            self.total,
            self.new,
            self.duplicates(),
            self.duplicate_percentage()
        )
    }
}

/// Tally of one removal run. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalResult {
    pub removed: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl RemovalResult {
    pub fn total(&self) -> usize {
        self.removed + self.not_found
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} domains: {} removed, {} not found",
            self.total(),
            self.removed,
            self.not_found
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Structured,
}

impl FromStr for ExportFormat {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" | "structured" => Ok(ExportFormat::Structured),
            _ => Err(ReconError::UnsupportedExportFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Structured => write!(f, "json"),
        }
    }
}

/// Structured export payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project: Option<String>,
    pub domain_count: usize,
    pub exported_at: String,
    pub domains: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_summary_formats_percentage() {
        let result = IngestResult {
            total: 4,
            new: 3,
            invalid: 1,
            failed: 0,
        };
        assert_eq!(result.duplicates(), 1);
        assert_eq!(
            result.summary(),
            "Processed 4 domains: 3 new, 1 duplicates (25.00%)"
        );
    }

    #[test]
    fn test_empty_ingest_has_zero_percentage() {
        let result = IngestResult::default();
        assert_eq!(result.duplicate_percentage(), 0.0);
    }

    #[test]
    fn test_removal_total() {
        let result = RemovalResult {
            removed: 2,
            not_found: 1,
            failed: 0,
        };
        assert_eq!(result.total(), 3);
        assert_eq!(result.summary(), "Processed 3 domains: 2 removed, 1 not found");
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Structured);
        assert_eq!(
            "structured".parse::<ExportFormat>().unwrap(),
            ExportFormat::Structured
        );
        assert!(matches!(
            "csv".parse::<ExportFormat>(),
            Err(ReconError::UnsupportedExportFormat { .. })
        ));
    }
}
