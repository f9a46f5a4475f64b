use crate::domain::model::{ExportDocument, ExportFormat};
use crate::utils::error::{ReconError, Result};
use chrono::Local;
use std::collections::HashSet;

/// Renders a project's domains for export. Output is always sorted.
pub struct ExportFormatter;

impl ExportFormatter {
    /// Fails with `EmptyExport` when there is nothing to render, so callers
    /// never write a degenerate file.
    pub fn format(
        domains: &HashSet<String>,
        format: ExportFormat,
        project: Option<&str>,
    ) -> Result<Vec<u8>> {
        if domains.is_empty() {
            return Err(ReconError::EmptyExport {
                project: project.unwrap_or_default().to_string(),
            });
        }

        let sorted = sorted_domains(domains);

        match format {
            ExportFormat::Text => {
                let mut out = String::with_capacity(sorted.iter().map(|d| d.len() + 1).sum());
                for domain in &sorted {
                    out.push_str(domain);
                    out.push('\n');
                }
                Ok(out.into_bytes())
            }
            ExportFormat::Structured => {
                let document = ExportDocument {
                    project: project.map(str::to_string),
                    domain_count: sorted.len(),
                    exported_at: Local::now().to_rfc3339(),
                    domains: sorted,
                };
                Ok(serde_json::to_vec_pretty(&document)?)
            }
        }
    }
}

pub fn sorted_domains(domains: &HashSet<String>) -> Vec<String> {
    let mut sorted: Vec<String> = domains.iter().cloned().collect();
    sorted.sort();
    sorted
}
