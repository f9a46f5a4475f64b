use crate::domain::ports::DomainStore;
use crate::utils::error::{ReconError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    projects: HashMap<String, HashSet<String>>,
    failing: HashSet<String>,
    unavailable: bool,
}

/// In-memory `DomainStore` with the same set semantics as Redis: empty
/// projects disappear. Supports fault injection for tests.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every add/remove of `domain` fail with `StorageOperationFailed`.
    pub async fn fail_on(&self, domain: &str) {
        self.state.lock().await.failing.insert(domain.to_string());
    }

    /// Simulate the backing service going away.
    pub async fn set_available(&self, available: bool) {
        self.state.lock().await.unavailable = !available;
    }
}

impl State {
    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(ReconError::StorageUnavailable {
                message: "in-memory store marked unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn check_domain(&self, operation: &str, domain: &str) -> Result<()> {
        self.check_available()?;
        if self.failing.contains(domain) {
            return Err(ReconError::StorageOperationFailed {
                operation: operation.to_string(),
                target: domain.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DomainStore for InMemoryStore {
    async fn add_domain(&self, project: &str, domain: &str) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.check_domain("SADD", domain)?;
        let inserted = state
            .projects
            .entry(project.to_string())
            .or_default()
            .insert(domain.to_string());
        Ok(usize::from(inserted))
    }

    async fn remove_domain(&self, project: &str, domain: &str) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.check_domain("SREM", domain)?;
        let Some(members) = state.projects.get_mut(project) else {
            return Ok(0);
        };
        let removed = members.remove(domain);
        if members.is_empty() {
            state.projects.remove(project);
        }
        Ok(usize::from(removed))
    }

    async fn get_domains(&self, project: &str) -> Result<HashSet<String>> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.projects.get(project).cloned().unwrap_or_default())
    }

    async fn count_domains(&self, project: &str) -> Result<usize> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.projects.get(project).map_or(0, HashSet::len))
    }

    async fn project_exists(&self, project: &str) -> Result<bool> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.projects.contains_key(project))
    }

    async fn delete_project(&self, project: &str) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.check_available()?;
        Ok(usize::from(state.projects.remove(project).is_some()))
    }

    async fn list_projects(&self) -> Result<HashSet<String>> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.projects.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = InMemoryStore::new();

        assert_eq!(store.add_domain("acme", "example.com").await.unwrap(), 1);
        assert_eq!(store.add_domain("acme", "example.com").await.unwrap(), 0);
        assert_eq!(store.count_domains("acme").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_last_removal_deletes_project() {
        let store = InMemoryStore::new();
        store.add_domain("acme", "example.com").await.unwrap();
        assert!(store.project_exists("acme").await.unwrap());

        assert_eq!(store.remove_domain("acme", "example.com").await.unwrap(), 1);
        assert_eq!(store.remove_domain("acme", "example.com").await.unwrap(), 0);
        assert!(!store.project_exists("acme").await.unwrap());
        assert!(store.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_project_reports_existence() {
        let store = InMemoryStore::new();
        store.add_domain("acme", "example.com").await.unwrap();

        assert_eq!(store.delete_project("acme").await.unwrap(), 1);
        assert_eq!(store.delete_project("acme").await.unwrap(), 0);
        assert_eq!(store.count_domains("acme").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_projects() {
        let store = InMemoryStore::new();
        store.add_domain("alpha", "example.com").await.unwrap();
        store.add_domain("beta", "example.org").await.unwrap();

        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.contains("alpha"));
        assert!(projects.contains("beta"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.add_domain("acme", "example.com").await.unwrap();

        assert_eq!(other.add_domain("acme", "example.com").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = InMemoryStore::new();
        store.set_available(false).await;

        assert!(matches!(
            store.count_domains("acme").await,
            Err(ReconError::StorageUnavailable { .. })
        ));
        store.set_available(true).await;
        assert_eq!(store.count_domains("acme").await.unwrap(), 0);
    }
}
