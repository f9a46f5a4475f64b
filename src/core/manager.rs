use crate::adapters::line_source::LineSource;
use crate::core::export::{sorted_domains, ExportFormatter};
use crate::core::ingest::{IngestOptions, IngestPipeline};
use crate::core::removal::RemovalPipeline;
use crate::domain::model::{ExportFormat, IngestResult, RemovalResult};
use crate::domain::ports::DomainStore;
use crate::utils::error::{ReconError, Result};
use crate::utils::validation::validate_project_name;
use regex::Regex;
use std::path::Path;

/// Command-level operations over a `DomainStore`.
///
/// Holds no state besides the store: every count, listing and existence
/// check is a live query.
pub struct ProjectManager<S: DomainStore> {
    store: S,
}

impl<S: DomainStore> ProjectManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn add_from_source(
        &self,
        project: &str,
        source: &str,
        validate: bool,
    ) -> Result<IngestResult> {
        validate_project_name(project)?;
        let lines = LineSource::open(source)?;
        IngestPipeline::new(&self.store, IngestOptions { validate })
            .ingest(project, lines)
            .await
    }

    pub async fn remove_from_source(&self, project: &str, source: &str) -> Result<RemovalResult> {
        validate_project_name(project)?;
        let lines = LineSource::open(source)?;
        RemovalPipeline::new(&self.store).remove(project, lines).await
    }

    /// Returns `false` when the domain was not a member.
    pub async fn remove_domain(&self, project: &str, domain: &str) -> Result<bool> {
        validate_project_name(project)?;
        let domain = domain.trim();
        let removed = self.store.remove_domain(project, domain).await? > 0;
        if removed {
            tracing::info!("Removed domain '{}' from project '{}'", domain, project);
        } else {
            tracing::warn!("Domain '{}' not found in project '{}'", domain, project);
        }
        Ok(removed)
    }

    /// Sorted members, optionally restricted to those matching `filter`.
    pub async fn domains(&self, project: &str, filter: Option<&Regex>) -> Result<Vec<String>> {
        validate_project_name(project)?;
        let mut domains = sorted_domains(&self.store.get_domains(project).await?);
        if let Some(filter) = filter {
            domains.retain(|domain| filter.is_match(domain));
        }
        Ok(domains)
    }

    pub async fn count(&self, project: &str) -> Result<usize> {
        validate_project_name(project)?;
        if !self.store.project_exists(project).await? {
            return Err(ReconError::ProjectNotFound {
                project: project.to_string(),
            });
        }
        let count = self.store.count_domains(project).await?;
        tracing::info!("Project '{}' contains {} domains", project, count);
        Ok(count)
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, project: &str) -> Result<bool> {
        validate_project_name(project)?;
        tracing::info!("Deleting project '{}'", project);
        let deleted = self.store.delete_project(project).await? > 0;
        if deleted {
            tracing::info!("Project '{}' deleted", project);
        } else {
            tracing::warn!("Project '{}' did not exist", project);
        }
        Ok(deleted)
    }

    pub async fn projects(&self) -> Result<Vec<String>> {
        let mut projects: Vec<String> = self.store.list_projects().await?.into_iter().collect();
        projects.sort();
        Ok(projects)
    }

    /// Renders the whole project and only then writes `output`; any failure
    /// leaves an existing file untouched.
    pub async fn export(&self, project: &str, output: &Path, format: &str) -> Result<usize> {
        let format: ExportFormat = format.parse()?;
        validate_project_name(project)?;

        let domains = self.store.get_domains(project).await?;
        let rendered = ExportFormatter::format(&domains, format, Some(project))?;

        tokio::fs::write(output, rendered).await?;
        tracing::info!(
            "Exported {} domains to {} ({} format)",
            domains.len(),
            output.display(),
            format
        );

        Ok(domains.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryStore;
    use tempfile::TempDir;

    async fn manager_with(domains: &[&str]) -> ProjectManager<InMemoryStore> {
        let store = InMemoryStore::new();
        for domain in domains {
            store.add_domain("acme", domain).await.unwrap();
        }
        ProjectManager::new(store)
    }

    #[tokio::test]
    async fn test_count_missing_project_is_error() {
        let manager = manager_with(&[]).await;

        let err = manager.count("acme").await.unwrap_err();
        assert!(matches!(err, ReconError::ProjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_is_live() {
        let manager = manager_with(&["a.example.com"]).await;
        assert_eq!(manager.count("acme").await.unwrap(), 1);

        manager.store().add_domain("acme", "b.example.com").await.unwrap();
        assert_eq!(manager.count("acme").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_filtered_domains_are_sorted() {
        let manager = manager_with(&["z.dev.example.com", "www.example.com", "a.dev.example.com"]).await;

        let filter = Regex::new(r"\.dev\.").unwrap();
        let domains = manager.domains("acme", Some(&filter)).await.unwrap();

        assert_eq!(domains, vec!["a.dev.example.com", "z.dev.example.com"]);
    }

    #[tokio::test]
    async fn test_remove_single_domain() {
        let manager = manager_with(&["example.com"]).await;

        assert!(!manager.remove_domain("acme", "missing.com").await.unwrap());
        assert!(manager.remove_domain("acme", "example.com").await.unwrap());
        assert!(!manager.store().project_exists("acme").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let manager = manager_with(&["example.com"]).await;

        assert!(manager.delete("acme").await.unwrap());
        assert!(!manager.delete("acme").await.unwrap());
        assert!(manager.projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_empty_project_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.txt");
        std::fs::write(&output, "previous export\n").unwrap();

        let manager = manager_with(&[]).await;
        let err = manager.export("acme", &output, "text").await.unwrap_err();

        assert!(matches!(err, ReconError::EmptyExport { .. }));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous export\n");
    }

    #[tokio::test]
    async fn test_export_unsupported_format_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.csv");

        let manager = manager_with(&["example.com"]).await;
        let err = manager.export("acme", &output, "csv").await.unwrap_err();

        assert!(matches!(err, ReconError::UnsupportedExportFormat { .. }));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_export_text() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.txt");

        let manager = manager_with(&["b.example.com", "a.example.com"]).await;
        let count = manager.export("acme", &output, "text").await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "a.example.com\nb.example.com\n"
        );
    }

    #[tokio::test]
    async fn test_add_from_missing_source_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&[]).await;

        let missing = dir.path().join("missing.txt");
        let err = manager
            .add_from_source("acme", missing.to_str().unwrap(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, ReconError::SourceUnreadable { .. }));
    }
}
