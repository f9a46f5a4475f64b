use crate::domain::model::RemovalResult;
use crate::domain::ports::DomainStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_project_name;

/// Removes the listed domains from a project.
///
/// Lines are matched verbatim after trimming; no normalization is applied,
/// so a caller must supply the stored form.
pub struct RemovalPipeline<'a, S: DomainStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DomainStore + ?Sized> RemovalPipeline<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn remove<I>(&self, project: &str, lines: I) -> Result<RemovalResult>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        validate_project_name(project)?;

        let mut result = RemovalResult::default();

        for line in lines {
            let line = line?;
            let domain = line.trim();
            if domain.is_empty() {
                continue;
            }

            match self.store.remove_domain(project, domain).await {
                Ok(0) => {
                    tracing::warn!("Domain '{}' not found in project '{}'", domain, project);
                    result.not_found += 1;
                }
                Ok(_) => result.removed += 1,
                Err(e) if e.is_recoverable() => {
                    tracing::error!("Failed to remove domain '{}': {}", domain, e);
                    result.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("{}", result.summary());
        Ok(result)
    }
}
