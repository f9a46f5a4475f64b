use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Project-scoped set storage.
///
/// Every method is keyed by a project name. Adding a member that is already
/// present is a no-op reporting `0`; removing the last member deletes the
/// project, so `project_exists` reports `false` afterwards. Implementations
/// return `StorageUnavailable` when the backing service cannot be reached and
/// `StorageOperationFailed` when a single command is rejected.
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn add_domain(&self, project: &str, domain: &str) -> Result<usize>;
    async fn remove_domain(&self, project: &str, domain: &str) -> Result<usize>;
    async fn get_domains(&self, project: &str) -> Result<HashSet<String>>;
    async fn count_domains(&self, project: &str) -> Result<usize>;
    async fn project_exists(&self, project: &str) -> Result<bool>;
    async fn delete_project(&self, project: &str) -> Result<usize>;
    async fn list_projects(&self) -> Result<HashSet<String>>;
}
